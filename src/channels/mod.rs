//! Interactive surfaces for the planner.

pub mod cli;
pub mod http;

pub use cli::{CliChannel, CliExit};
pub use http::{PlannerRouteState, planner_routes};
