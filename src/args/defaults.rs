pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("hierperf/", env!("CARGO_PKG_VERSION"), " (hierarchy benchmark)");

/// Per-node get/children/descendants cases are generated for at most this many nodes.
pub(crate) const DEFAULT_NODE_CASES: usize = 10;
pub(crate) const DEFAULT_ACCESS_USERS: usize = 5;
pub(crate) const DEFAULT_ACCESS_NODES: usize = 5;
pub(crate) const DEFAULT_ACCESSIBLE_USERS: usize = 5;

pub(crate) const DEFAULT_SEARCH_TERMS: [&str; 4] = ["company", "department", "team", "project"];
