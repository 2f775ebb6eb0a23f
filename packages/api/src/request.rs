//! Request shape and validation
//!
//! Requests are validated completely before any network call is made; a
//! malformed body never reaches the streaming engine.

use evreg_client::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which aggregate to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataTarget {
    Count,
    AvgAutonomy,
}

/// One aggregation request.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsRequest {
    pub target: DataTarget,
    /// Manufacturer name; required when `target` is `avg_autonomy`.
    #[serde(default)]
    pub maker: Option<String>,
}

impl StatsRequest {
    pub fn count() -> Self {
        Self { target: DataTarget::Count, maker: None }
    }

    pub fn avg_autonomy(maker: impl Into<String>) -> Self {
        Self { target: DataTarget::AvgAutonomy, maker: Some(maker.into()) }
    }
}

/// Parse and validate a raw request body.
///
/// Accepts either the bare request object or the delivery envelope
/// `{"body": "<json string>"}` some front doors wrap it in.
pub fn parse_request(raw: &str) -> Result<StatsRequest> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| Error::request_validation(format!("request body is not JSON: {e}")))?;

    let envelope_body = value
        .get("body")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);
    let request: StatsRequest = match envelope_body {
        Some(inner) => serde_json::from_str(&inner).map_err(|e| {
            Error::request_validation(format!("enveloped request did not decode: {e}"))
        })?,
        None => serde_json::from_value(value).map_err(|e| {
            Error::request_validation(format!("request did not decode: {e}"))
        })?,
    };
    validate(&request)?;
    Ok(request)
}

/// Shape checks beyond deserialization.
pub fn validate(request: &StatsRequest) -> Result<()> {
    if request.target == DataTarget::AvgAutonomy
        && request.maker.as_deref().is_none_or(str::is_empty)
    {
        return Err(Error::request_validation(
            "target \"avg_autonomy\" requires a non-empty \"maker\" field",
        ));
    }
    Ok(())
}
