//! Discovery of live entity ids and construction of the ordered test plan.
mod builder;
mod case;
mod collector;
mod sampling;


pub use builder::{build_plan, is_main_case};
pub use case::{EntityId, TestCase};
pub use collector::{NODES_PATH, SampleSet, USERS_PATH, collect_samples};
pub use sampling::sample_ids;
