use serde_json::Value;
use url::Url;

use crate::domain::ProviderKind;
use crate::errors::{NewsdeskError, NewsdeskResult};

pub trait FeedProvider: Send + Sync {
    /// Identifies this provider
    fn kind(&self) -> ProviderKind;

    /// Build the request URL; a search term switches to the provider's search form
    fn endpoint(&self, query: Option<&str>) -> NewsdeskResult<Url>;

    /// Top-level field of the response holding the record array
    fn records_field(&self) -> &'static str;

    /// Borrow the raw records out of a response payload
    fn records<'a>(&self, payload: &'a Value) -> NewsdeskResult<&'a [Value]> {
        let field = self.records_field();

        match payload.get(field) {
            Some(Value::Array(records)) => Ok(records.as_slice()),
            Some(other) => Err(NewsdeskError::Parse(format!(
                "{} response field '{}' is not a list: {}",
                self.kind(),
                field,
                provider_message(other)
            ))),
            None => Err(NewsdeskError::Parse(format!(
                "{} response has no '{}' field",
                self.kind(),
                field
            ))),
        }
    }
}

/// Pull a human-readable message out of an error object, if the provider sent one
fn provider_message(value: &Value) -> String {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}
