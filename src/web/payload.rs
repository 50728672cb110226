//! Inbound webhook payload parsing.
//!
//! Parsing happens in two phases with distinct error kinds:
//! 1. A loose peek that reads only enough of the body to discriminate the
//!    event type, so irrelevant events can be acknowledged without decoding
//!    the full donation shape.
//! 2. A strict typed decode into [`WebhookEvent`] once the event type
//!    matched.

use serde::Deserialize;
use thiserror::Error;

/// The only event type that results in a stored record.
pub const DONATION_COMPLETED: &str = "donation_completed";

/// Errors produced while parsing a webhook body.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body is not valid JSON at all.
    #[error("invalid JSON body: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The body parsed, but `eventType` is absent or not a string.
    #[error("missing or non-string eventType field")]
    MissingEventType,

    /// The typed decode of the full event failed.
    #[error("malformed donation event: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Full inbound webhook event as sent by the donation platform.
///
/// Absent fields decode to their defaults, matching the platform's habit of
/// omitting fields it considers empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookEvent {
    pub id: String,
    pub event_type: String,
    pub live_mode: bool,
    pub created_at: String,
    pub data: EventData,
}

/// Payload envelope nested under `data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventData {
    pub donation: DonationPayload,
}

/// The donation object carried by a `donation_completed` event.
///
/// `amount` and `tip_amount` are in minor currency units (cents).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationPayload {
    pub id: String,
    pub amount: i64,
    pub tip_amount: i64,
    pub currency: String,
    pub live_mode: bool,
    pub dedication: String,
    pub message: String,
    pub anonymous: bool,
    pub created_at: String,
}

/// Phase one: extract the `eventType` tag without decoding the full event.
pub fn peek_event_type(body: &[u8]) -> Result<String, PayloadError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(PayloadError::Syntax)?;

    value
        .get("eventType")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or(PayloadError::MissingEventType)
}

/// Phase two: strict typed decode of the full event body.
pub fn decode_event(body: &[u8]) -> Result<WebhookEvent, PayloadError> {
    serde_json::from_slice(body).map_err(PayloadError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETED_BODY: &str = r#"{
        "eventType": "donation_completed",
        "data": {
            "donation": {
                "amount": 1000,
                "tipAmount": 250,
                "dedication": "Alice",
                "message": "Go team!"
            }
        }
    }"#;

    #[test]
    fn test_peek_event_type() {
        let event_type = peek_event_type(COMPLETED_BODY.as_bytes()).unwrap();
        assert_eq!(event_type, DONATION_COMPLETED);
    }

    #[test]
    fn test_peek_missing_event_type() {
        let err = peek_event_type(b"{}").unwrap_err();
        assert!(matches!(err, PayloadError::MissingEventType));
    }

    #[test]
    fn test_peek_non_string_event_type() {
        let err = peek_event_type(br#"{"eventType": 42}"#).unwrap_err();
        assert!(matches!(err, PayloadError::MissingEventType));
    }

    #[test]
    fn test_peek_invalid_json() {
        let err = peek_event_type(b"not json").unwrap_err();
        assert!(matches!(err, PayloadError::Syntax(_)));
    }

    #[test]
    fn test_decode_event() {
        let event = decode_event(COMPLETED_BODY.as_bytes()).unwrap();
        assert_eq!(event.event_type, DONATION_COMPLETED);
        assert_eq!(event.data.donation.amount, 1000);
        assert_eq!(event.data.donation.tip_amount, 250);
        assert_eq!(event.data.donation.dedication, "Alice");
        assert_eq!(event.data.donation.message, "Go team!");
    }

    #[test]
    fn test_decode_defaults_absent_fields() {
        let event = decode_event(br#"{"eventType": "donation_completed"}"#).unwrap();
        assert_eq!(event.data.donation.amount, 0);
        assert_eq!(event.data.donation.dedication, "");
        assert!(!event.live_mode);
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let body = br#"{"eventType": "donation_completed", "data": {"donation": {"amount": "1000"}}}"#;
        let err = decode_event(body).unwrap_err();
        assert!(matches!(err, PayloadError::Decode(_)));
    }
}
