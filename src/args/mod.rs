//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::BenchArgs;
pub use types::{HttpMethod, PositiveUsize};

pub(crate) use defaults::{
    DEFAULT_ACCESS_NODES, DEFAULT_ACCESS_USERS, DEFAULT_ACCESSIBLE_USERS, DEFAULT_NODE_CASES,
    DEFAULT_SEARCH_TERMS, DEFAULT_USER_AGENT,
};
#[cfg(test)]
pub(crate) use test_support::parse_test_args;
