//! Stored profile parameters and their definitions.

use super::{ParseParameterTypeError, ProfileId, ProfileName, RedirectDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared value type of a profile parameter definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    /// Free-form text.
    String,
    /// `true` or `false`.
    Boolean,
    /// Integer or decimal number.
    Number,
    /// One value picked from a fixed list of choices.
    ChooseOne,
    /// Several values picked from a fixed list of choices.
    ChooseMultiple,
    /// JSON array of values.
    Array,
    /// JSON array of `[type, value]` pairs.
    TypedArray,
    /// JSON object.
    Dictionary,
    /// Date rendered as text.
    Date,
    /// Reference to an uploaded file.
    File,
}

impl ParameterType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::ChooseOne => "ChooseOne",
            Self::ChooseMultiple => "ChooseMultiple",
            Self::Array => "Array",
            Self::TypedArray => "TypedArray",
            Self::Dictionary => "Dictionary",
            Self::Date => "Date",
            Self::File => "File",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ParameterType {
    type Error = ParseParameterTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "string" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            "number" => Ok(Self::Number),
            "chooseone" => Ok(Self::ChooseOne),
            "choosemultiple" => Ok(Self::ChooseMultiple),
            "array" => Ok(Self::Array),
            "typedarray" => Ok(Self::TypedArray),
            "dictionary" => Ok(Self::Dictionary),
            "date" => Ok(Self::Date),
            "file" => Ok(Self::File),
            _ => Err(ParseParameterTypeError(value.to_owned())),
        }
    }
}

/// Profile that owns a parameter instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileRef {
    id: ProfileId,
    name: ProfileName,
}

impl ProfileRef {
    /// Creates a profile reference.
    #[must_use]
    pub const fn new(id: ProfileId, name: ProfileName) -> Self {
        Self { id, name }
    }

    /// Returns the internal profile identifier.
    #[must_use]
    pub const fn id(&self) -> ProfileId {
        self.id
    }

    /// Returns the profile name.
    #[must_use]
    pub const fn name(&self) -> &ProfileName {
        &self.name
    }
}

/// Definition metadata for a profile parameter.
///
/// The declared type is kept as stored so that an unknown type surfaces as
/// a failure for that single parameter rather than for the whole load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDefinition {
    name: String,
    declared_type: String,
    is_crypto: bool,
}

impl ParameterDefinition {
    /// Creates a parameter definition.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectDomainError::EmptyParameterName`] when the name is
    /// empty after trimming.
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        is_crypto: bool,
    ) -> Result<Self, RedirectDomainError> {
        let normalized = name.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(RedirectDomainError::EmptyParameterName);
        }
        Ok(Self {
            name: normalized,
            declared_type: declared_type.into(),
            is_crypto,
        })
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type exactly as stored.
    #[must_use]
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Parses the declared type.
    ///
    /// # Errors
    ///
    /// Returns [`ParseParameterTypeError`] when the stored type is unknown.
    pub fn parameter_type(&self) -> Result<ParameterType, ParseParameterTypeError> {
        ParameterType::try_from(self.declared_type.as_str())
    }

    /// Returns `true` when stored values carry encryption key material.
    #[must_use]
    pub const fn is_crypto(&self) -> bool {
        self.is_crypto
    }
}

/// A stored parameter value bound to one payload, profile and definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInstance {
    profile: ProfileRef,
    definition: ParameterDefinition,
    value: String,
    enc_key: Option<Vec<u8>>,
    dec_key: Option<Vec<u8>>,
}

impl ParameterInstance {
    /// Creates a parameter instance without key material.
    #[must_use]
    pub fn new(
        profile: ProfileRef,
        definition: ParameterDefinition,
        value: impl Into<String>,
    ) -> Self {
        Self {
            profile,
            definition,
            value: value.into(),
            enc_key: None,
            dec_key: None,
        }
    }

    /// Attaches the encryption and decryption keys stored with the value.
    #[must_use]
    pub fn with_keys(mut self, enc_key: Option<Vec<u8>>, dec_key: Option<Vec<u8>>) -> Self {
        self.enc_key = enc_key;
        self.dec_key = dec_key;
        self
    }

    /// Returns the owning profile.
    #[must_use]
    pub const fn profile(&self) -> &ProfileRef {
        &self.profile
    }

    /// Returns the owning profile's name.
    #[must_use]
    pub const fn profile_name(&self) -> &ProfileName {
        self.profile.name()
    }

    /// Returns the parameter definition.
    #[must_use]
    pub const fn definition(&self) -> &ParameterDefinition {
        &self.definition
    }

    /// Returns the raw stored value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the stored encryption key, if any.
    #[must_use]
    pub fn enc_key(&self) -> Option<&[u8]> {
        self.enc_key.as_deref()
    }

    /// Returns the stored decryption key, if any.
    #[must_use]
    pub fn dec_key(&self) -> Option<&[u8]> {
        self.dec_key.as_deref()
    }
}
