use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

pub const API_KEY_HEADER: &str = "X-API-KEY";
pub const APP_ID_HEADER: &str = "X-APP-ID";

/// Message taken from the `error` field of a JSON error body.
#[derive(Debug, PartialEq)]
pub struct ParsedError(pub String);

/// Transport status text used when the body carries no usable message.
#[derive(Debug, PartialEq)]
pub struct RawStatusText(pub String);

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<Value>,
}

pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

pub fn parse_error_body(status: StatusCode, body: &[u8]) -> Result<ParsedError, RawStatusText> {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(Value::String(message)),
        }) if !message.is_empty() => Ok(ParsedError(message)),
        _ => Err(RawStatusText(status_text(status))),
    }
}

/// Best-effort message for a failed response. Never fails: an unreadable or
/// unparseable body degrades to the status text.
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();

    match parse_error_body(status, &body) {
        Ok(ParsedError(message)) => message,
        Err(RawStatusText(text)) => text,
    }
}
