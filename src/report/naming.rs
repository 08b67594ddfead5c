use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

const FILE_STEM: &str = "hierarchy_performance";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Output file locations for one run. Both files share a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub chart: PathBuf,
}

#[must_use]
pub fn report_paths<Tz>(output_dir: &Path, now: DateTime<Tz>) -> ReportPaths
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let stamp = now.format(TIMESTAMP_FORMAT);
    ReportPaths {
        json: output_dir.join(format!("{}_{}.json", FILE_STEM, stamp)),
        chart: output_dir.join(format!("{}_{}.png", FILE_STEM, stamp)),
    }
}
