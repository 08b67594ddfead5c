//! Run orchestration: collect samples, build the plan, execute it, report.
mod flow;


pub use flow::{RunOutcome, RunReport, run, run_benchmark};
