//! Default value transformer for profile backend containers.

use crate::redirect_check::{
    domain::{CryptoArg, ParameterInstance, ParameterType, ParameterValue, TypedArrayEntry},
    ports::{ParameterTransformer, TransformError},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value};

/// Coerces stored parameter values into the shapes profile containers read.
///
/// Crypto-classified values are not decrypted here: the selection is passed
/// through together with its base64-encoded key pair, and the profile
/// backend applies the cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerValueTransformer;

impl ContainerValueTransformer {
    /// Creates the transformer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ParameterTransformer for ContainerValueTransformer {
    fn transform(&self, instance: &ParameterInstance) -> Result<ParameterValue, TransformError> {
        let definition = instance.definition();
        let parameter_type = definition.parameter_type()?;
        if definition.is_crypto() {
            return Ok(crypto_value(instance));
        }

        let raw = instance.value();
        match parameter_type {
            ParameterType::String
            | ParameterType::ChooseOne
            | ParameterType::Date
            | ParameterType::File => Ok(ParameterValue::Text(raw.to_owned())),
            ParameterType::Boolean => parse_boolean(raw).map(ParameterValue::Boolean),
            ParameterType::Number => raw
                .trim()
                .parse::<Number>()
                .map(ParameterValue::Number)
                .map_err(|err| TransformError::invalid_value(parameter_type, err)),
            ParameterType::Array | ParameterType::ChooseMultiple => {
                parse_json_or_default(parameter_type, raw).map(ParameterValue::List)
            }
            ParameterType::TypedArray => {
                parse_json_or_default::<Vec<TypedArrayEntry>>(parameter_type, raw)
                    .map(ParameterValue::TypedList)
            }
            ParameterType::Dictionary => {
                parse_json_or_default::<Map<String, Value>>(parameter_type, raw)
                    .map(ParameterValue::Dictionary)
            }
        }
    }
}

/// Absent keys are forwarded as `null`; the backend decides whether the
/// selection needs them.
fn crypto_value(instance: &ParameterInstance) -> ParameterValue {
    let enc_key = instance.enc_key().map(|key| STANDARD.encode(key));
    let dec_key = instance.dec_key().map(|key| STANDARD.encode(key));
    ParameterValue::Crypto(CryptoArg::new(instance.value().trim(), enc_key, dec_key))
}

fn parse_boolean(raw: &str) -> Result<bool, TransformError> {
    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(TransformError::invalid_value(
            ParameterType::Boolean,
            format!("expected true or false, got '{raw}'"),
        )),
    }
}

/// Parses a JSON document, treating an empty stored value as the type's
/// empty default.
fn parse_json_or_default<T>(parameter_type: ParameterType, raw: &str) -> Result<T, TransformError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(raw).map_err(|err| TransformError::invalid_value(parameter_type, err))
}
