//! Domain model for redirect rule checks.
//!
//! Covers payload and profile identity, stored parameter instances, the
//! typed values sent to profile backends, and the per-profile outcomes that
//! make up a report. All infrastructure concerns are kept outside the domain
//! boundary.

mod error;
mod grouping;
mod ids;
mod name;
mod outcome;
mod parameter;
mod report;
mod transformed;
mod value;

pub use error::{ParseParameterTypeError, RedirectDomainError};
pub use grouping::ProfileParameterSets;
pub use ids::{PayloadId, PayloadUuid, ProfileId};
pub use name::ProfileName;
pub use outcome::{OutcomeStatus, ProfileOutcome};
pub use parameter::{ParameterDefinition, ParameterInstance, ParameterType, ProfileRef};
pub use report::RedirectRulesReport;
pub use transformed::{DroppedParameter, TransformedParameters};
pub use value::{CryptoArg, ParameterValue, TypedArrayEntry};
