//! Diesel row models for profile parameter lookups.

use diesel::prelude::*;

/// Query result row joining an instance with its profile and definition.
///
/// Field order matches the select tuple in the repository.
#[derive(Debug, Clone, Queryable)]
pub struct ParameterInstanceRow {
    /// Owning profile identifier.
    pub profile_id: i32,
    /// Owning profile name.
    pub profile_name: String,
    /// Parameter definition name.
    pub parameter_name: String,
    /// Declared value type.
    pub parameter_type: String,
    /// Crypto classification flag.
    pub crypto_type: bool,
    /// Raw stored value.
    pub value: String,
    /// Encryption key bytes.
    pub enc_key: Option<Vec<u8>>,
    /// Decryption key bytes.
    pub dec_key: Option<Vec<u8>>,
}
