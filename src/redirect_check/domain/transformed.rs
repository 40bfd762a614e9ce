//! Result of transforming one profile group's parameters.

use super::ParameterValue;
use std::collections::BTreeMap;

/// A parameter left out of a profile's request because its transform failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedParameter {
    name: String,
    reason: String,
}

impl DroppedParameter {
    /// Creates a dropped-parameter record.
    #[must_use]
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the transform failure description.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Typed parameters for one profile, plus the parameters that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformedParameters {
    values: BTreeMap<String, ParameterValue>,
    dropped: Vec<DroppedParameter>,
}

impl TransformedParameters {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successfully transformed value.
    pub fn insert(&mut self, name: impl Into<String>, value: ParameterValue) {
        self.values.insert(name.into(), value);
    }

    /// Records a parameter whose transform failed.
    pub fn record_drop(&mut self, dropped: DroppedParameter) {
        self.dropped.push(dropped);
    }

    /// Returns the transformed values by parameter name.
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, ParameterValue> {
        &self.values
    }

    /// Returns the dropped parameters in encounter order.
    #[must_use]
    pub fn dropped(&self) -> &[DroppedParameter] {
        &self.dropped
    }

    /// Splits the set into the transformed values and the dropped
    /// parameters.
    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<String, ParameterValue>, Vec<DroppedParameter>) {
        (self.values, self.dropped)
    }
}
