//! Typed parameter values sent to profile backends.
//!
//! [`ParameterValue`] serializes untagged so each variant reaches the wire
//! as its natural JSON shape:
//!
//! | Variant      | JSON                                              |
//! |--------------|---------------------------------------------------|
//! | `Text`       | string                                            |
//! | `Boolean`    | `true` / `false`                                  |
//! | `Number`     | number                                            |
//! | `List`       | array                                             |
//! | `TypedList`  | array of `[type, value]` pairs                    |
//! | `Dictionary` | object                                            |
//! | `Crypto`     | `{"value": .., "enc_key": .., "dec_key": ..}`     |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single entry of a typed array parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedArrayEntry(String, String);

impl TypedArrayEntry {
    /// Creates a typed array entry.
    #[must_use]
    pub fn new(entry_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self(entry_type.into(), value.into())
    }
}

/// Crypto-classified parameter value with its base64-encoded key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoArg {
    value: String,
    enc_key: Option<String>,
    dec_key: Option<String>,
}

impl CryptoArg {
    /// Creates a crypto argument from already-encoded keys.
    #[must_use]
    pub fn new(value: impl Into<String>, enc_key: Option<String>, dec_key: Option<String>) -> Self {
        Self {
            value: value.into(),
            enc_key,
            dec_key,
        }
    }
}

/// Typed value of a transformed profile parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Text value (strings, single choices, dates and file references).
    Text(String),
    /// Boolean flag.
    Boolean(bool),
    /// Numeric value.
    Number(Number),
    /// Untyped list of values.
    List(Vec<Value>),
    /// List of `[type, value]` pairs.
    TypedList(Vec<TypedArrayEntry>),
    /// Key/value mapping.
    Dictionary(Map<String, Value>),
    /// Crypto selection with its key material.
    Crypto(CryptoArg),
}

impl ParameterValue {
    /// Returns the variant name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::TypedList(_) => "typed_list",
            Self::Dictionary(_) => "dictionary",
            Self::Crypto(_) => "crypto",
        }
    }
}
