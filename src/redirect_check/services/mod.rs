//! Service layer for redirect rule checks.
//!
//! Provides [`RedirectRulesCheckService`], which runs the check pipeline for
//! one payload, and the JSON request/response envelope in [`webhook`].

mod check;
pub mod webhook;

pub use check::{RedirectCheckServiceError, RedirectCheckServiceResult, RedirectRulesCheckService};
pub use webhook::{
    CheckRedirectRulesInput, CheckRedirectRulesResponse, PARAMETER_LOAD_FAILURE,
    PAYLOAD_LOOKUP_FAILURE, PayloadSelector, ResponseStatus,
};
