use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, HttpMethod, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::http::ApiRequest;
use crate::plan::TestCase;

use super::settings::{PlanSettings, RunSettings};
use super::types::{ConfigFile, DurationValue, ExtraCaseConfig, PlanConfig};

/// Merges CLI arguments with an optional config file into [`RunSettings`].
///
/// Values given on the command line (or through their environment variable) win over the
/// config file; config values win over CLI defaults.
///
/// # Errors
///
/// Returns an error when a value is invalid, the base URL does not parse, or no token is set.
pub fn resolve_settings(
    args: &BenchArgs,
    matches: &ArgMatches,
    config: Option<&ConfigFile>,
) -> AppResult<RunSettings> {
    let empty = ConfigFile::default();
    let config = config.unwrap_or(&empty);

    let url = pick(matches, "url", config.url.as_ref(), &args.url);
    let base_url = validate_base_url(url)?;

    let token = if is_explicit(matches, "token") {
        args.token.clone()
    } else {
        config.token.clone().or_else(|| args.token.clone())
    };
    let token = token
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::validation(ValidationError::MissingToken))?;

    let runs = match config.runs {
        Some(value) if !is_explicit(matches, "runs") => positive_field(value, "runs")?,
        Some(_) | None => args.runs,
    };
    let sample_size = match config.sample {
        Some(value) if !is_explicit(matches, "sample_size") => positive_field(value, "sample")?,
        Some(_) | None => args.sample_size,
    };

    let output = pick(matches, "output", config.output.as_ref(), &args.output);

    let delay = match config.delay.as_ref() {
        Some(value) if !is_explicit(matches, "delay") => duration_field(value, "delay", true)?,
        Some(_) | None => args.delay,
    };
    let request_timeout = match config.timeout.as_ref() {
        Some(value) if !is_explicit(matches, "request_timeout") => {
            duration_field(value, "timeout", false)?
        }
        Some(_) | None => args.request_timeout,
    };
    let connect_timeout = match config.connect_timeout.as_ref() {
        Some(value) if !is_explicit(matches, "connect_timeout") => {
            duration_field(value, "connect_timeout", false)?
        }
        Some(_) | None => args.connect_timeout,
    };

    let seed = if is_explicit(matches, "seed") {
        args.seed
    } else {
        config.seed.or(args.seed)
    };
    let no_chart = if is_explicit(matches, "no_chart") {
        args.no_chart
    } else {
        config.no_chart.unwrap_or(args.no_chart)
    };

    let search_terms = if is_explicit(matches, "search_terms") {
        Some(args.search_terms.clone())
    } else {
        config.search_terms.clone()
    };

    let plan = resolve_plan(
        search_terms,
        config.plan.as_ref(),
        config.extra_cases.as_deref().unwrap_or_default(),
    )?;

    Ok(RunSettings {
        base_url,
        token,
        runs,
        sample_size,
        output_dir: PathBuf::from(output),
        delay,
        request_timeout,
        connect_timeout,
        seed,
        chart: !no_chart,
        plan,
    })
}

fn resolve_plan(
    search_terms: Option<Vec<String>>,
    plan: Option<&PlanConfig>,
    extra_cases: &[ExtraCaseConfig],
) -> AppResult<PlanSettings> {
    let mut settings = PlanSettings::default();

    if let Some(terms) = search_terms {
        if terms.iter().any(|term| term.trim().is_empty()) {
            return Err(AppError::config(ConfigError::InvalidField {
                field: "search_terms",
                source: ValidationError::EmptySearchTerm,
            }));
        }
        settings.search_terms = terms;
    }

    if let Some(plan) = plan {
        settings.node_cases = plan.node_cases.unwrap_or(settings.node_cases);
        settings.access_users = plan.access_users.unwrap_or(settings.access_users);
        settings.access_nodes = plan.access_nodes.unwrap_or(settings.access_nodes);
        settings.accessible_users = plan.accessible_users.unwrap_or(settings.accessible_users);
    }

    settings.extra_cases = extra_cases
        .iter()
        .map(extra_case)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(settings)
}

fn extra_case(config: &ExtraCaseConfig) -> AppResult<TestCase> {
    if !config.path.starts_with('/') {
        return Err(AppError::validation(ValidationError::ExtraCasePath {
            name: config.name.clone(),
        }));
    }
    let query = config
        .query
        .as_ref()
        .map(|query| {
            query
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();
    let request = ApiRequest {
        method: config.method.unwrap_or(HttpMethod::Get),
        path: config.path.clone(),
        query,
        body: config.body.clone(),
    };
    Ok(TestCase::new(config.name.clone(), request))
}

pub(crate) fn validate_base_url(value: &str) -> AppResult<String> {
    let parsed = url::Url::parse(value).map_err(|err| {
        AppError::validation(ValidationError::InvalidBaseUrl {
            url: value.to_owned(),
            source: err,
        })
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::validation(ValidationError::UnsupportedScheme {
            url: value.to_owned(),
        }));
    }
    Ok(value.trim_end_matches('/').to_owned())
}

fn pick<'a>(
    matches: &ArgMatches,
    name: &str,
    config: Option<&'a String>,
    cli: &'a String,
) -> &'a str {
    if is_explicit(matches, name) {
        return cli;
    }
    config.map_or(cli.as_str(), String::as_str)
}

fn positive_field(value: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .map_err(|err| AppError::config(ConfigError::InvalidField { field, source: err }))
}

fn duration_field(
    value: &DurationValue,
    field: &'static str,
    allow_zero: bool,
) -> AppResult<std::time::Duration> {
    let duration = value
        .to_duration()
        .map_err(|err| AppError::config(ConfigError::InvalidField { field, source: err }))?;
    if duration.is_zero() && !allow_zero {
        return Err(AppError::config(ConfigError::InvalidField {
            field,
            source: ValidationError::DurationZero,
        }));
    }
    Ok(duration)
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
