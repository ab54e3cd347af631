// lidly-core: activation workflow and eligibility rules over lidly-api

pub mod eligibility;
pub mod workflow;

pub use eligibility::{Activatable, is_eligible};
pub use workflow::{ActivationReport, activate_all, run_scheduled};
