//! Argument checks run before parameters are assembled.

use crate::params::MultiValue;
use crate::{Error, ErrorContext, Result};
use serde_json::Value;

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The value must be a JSON object.
pub(crate) fn require_object(operation: &str, param: &str, value: &Value) -> Result<()> {
    if value.is_object() {
        return Ok(());
    }
    Err(Error::invalid_argument_with_context(
        format!("\"{}\" must be an object", param),
        ErrorContext::new()
            .with_field_path(param)
            .with_details(format!("found {}", describe(value)))
            .with_source(operation),
    ))
}

pub(crate) fn optional_object(operation: &str, param: &str, value: Option<&Value>) -> Result<()> {
    match value {
        Some(v) => require_object(operation, param, v),
        None => Ok(()),
    }
}

/// The value must not be JSON `null`; any other shape is accepted.
pub(crate) fn require_present(operation: &str, param: &str, value: &Value) -> Result<()> {
    if value.is_null() {
        return Err(Error::invalid_argument_with_context(
            format!("\"{}\" must not be null", param),
            ErrorContext::new().with_field_path(param).with_source(operation),
        ));
    }
    Ok(())
}

pub(crate) fn multi(operation: &str, param: &str, value: &MultiValue) -> Result<()> {
    value.validate(param).map_err(|e| match e {
        Error::InvalidArgument { message, context } => {
            Error::invalid_argument_with_context(message, context.with_source(operation))
        }
        other => other,
    })
}

pub(crate) fn optional_multi(operation: &str, param: &str, value: Option<&MultiValue>) -> Result<()> {
    match value {
        Some(v) => multi(operation, param, v),
        None => Ok(()),
    }
}

/// Compact JSON text for a payload parameter.
pub(crate) fn to_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
