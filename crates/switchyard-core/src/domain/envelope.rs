//! Envelope - `kind` と未デコードの payload
//!
//! payload は `RawValue` のまま保持し、kind が解決してから初めて型に落とす。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::app::config::DecodeMode;
use crate::error::DecodeError;
use crate::typed::Message;

/// One item of the input stream: `{"kind": "...", "payload": {...}}`.
///
/// A missing `kind` reads as `""`. A missing payload key is `None`; a literal
/// `null` payload is kept as raw `null`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub kind: String,

    #[serde(
        default,
        deserialize_with = "present_payload",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<Box<RawValue>>,
}

/// `Option<Box<RawValue>>` would swallow `null` into `None`.
fn present_payload<'de, D>(deserializer: D) -> Result<Option<Box<RawValue>>, D::Error>
where
    D: Deserializer<'de>,
{
    Box::<RawValue>::deserialize(deserializer).map(Some)
}

impl Envelope {
    /// Builds an envelope from a kind and the payload's JSON text.
    pub fn new(kind: impl Into<String>, payload: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            kind: kind.into(),
            payload: Some(RawValue::from_string(payload.to_owned())?),
        })
    }

    /// Wraps a typed message, tagging it with its own discriminator.
    pub fn wrap<M: Message>(message: &M) -> Result<Self, serde_json::Error> {
        Ok(Self {
            kind: M::KIND.to_owned(),
            payload: Some(serde_json::value::to_raw_value(message)?),
        })
    }

    /// Decodes the payload as `M` with permissive field handling.
    pub fn decode_as<M: Message>(&self) -> Result<M, DecodeError> {
        self.decode_with(DecodeMode::Permissive)
    }

    /// Decodes the payload as `M`.
    ///
    /// The payload must be a JSON object (or `null`, read as `{}`). Unknown
    /// fields are ignored, a repeated key keeps its last value, and a `null`
    /// field reads as absent. Absent fields take `M::default()`'s value unless
    /// `mode` is [`DecodeMode::Strict`].
    pub fn decode_with<M: Message>(&self, mode: DecodeMode) -> Result<M, DecodeError> {
        if self.kind != M::KIND {
            return Err(DecodeError::KindMismatch {
                expected: M::KIND,
                actual: self.kind.clone(),
            });
        }

        let payload = self
            .payload
            .as_deref()
            .ok_or(DecodeError::MissingPayload { kind: M::KIND })?;

        let payload_error = |source| DecodeError::Payload {
            kind: M::KIND,
            source,
        };

        let fields: Option<Map<String, Value>> =
            serde_json::from_str(payload.get()).map_err(payload_error)?;
        let mut fields = fields.unwrap_or_default();

        if mode == DecodeMode::Strict
            && let Some(field) = first_missing_field::<M>(&fields)?
        {
            return Err(DecodeError::MissingField {
                kind: M::KIND,
                field,
            });
        }

        fields.retain(|_, value| !value.is_null());
        M::deserialize(&Value::Object(fields)).map_err(payload_error)
    }
}

/// The fields `M` serializes are the fields a strict payload must carry.
fn first_missing_field<M: Message>(
    present: &Map<String, Value>,
) -> Result<Option<String>, DecodeError> {
    let template = serde_json::to_value(M::default()).map_err(|source| DecodeError::Payload {
        kind: M::KIND,
        source,
    })?;

    let missing = template
        .as_object()
        .and_then(|fields| fields.keys().find(|field| !present.contains_key(*field)))
        .cloned();
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messages::{StartMessage, StopMessage};
    use rstest::rstest;

    fn envelope(kind: &str, payload: &str) -> Envelope {
        Envelope::new(kind, payload).unwrap()
    }

    #[rstest]
    #[case(4, 8)]
    #[case(0, 0)]
    #[case(-1, i64::MAX)]
    #[case(i64::MIN, 1)]
    fn start_fields_roundtrip(#[case] memory: i64, #[case] num_cpu: i64) {
        let env = envelope(
            "start",
            &format!(r#"{{"memory":{memory},"num_cpu":{num_cpu}}}"#),
        );
        let start: StartMessage = env.decode_as().unwrap();
        assert_eq!(start, StartMessage { memory, num_cpu });
    }

    #[rstest]
    #[case("6870b39")]
    #[case("")]
    #[case("with \"quotes\" and ünïcode")]
    fn stop_id_roundtrips(#[case] id: &str) {
        let env = Envelope::wrap(&StopMessage { id: id.to_owned() }).unwrap();
        assert_eq!(env.kind, "stop");
        let stop: StopMessage = env.decode_as().unwrap();
        assert_eq!(stop.id, id);
    }

    #[test]
    fn start_kind_mismatch_reports_both_kinds() {
        let err = envelope("stop", r#"{"id":"x"}"#)
            .decode_as::<StartMessage>()
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::KindMismatch { expected: "start", ref actual } if actual == "stop"
        ));
        assert_eq!(err.to_string(), r#"expected kind "start", got "stop""#);
    }

    #[test]
    fn stop_kind_mismatch_reports_both_kinds() {
        let err = envelope("start", r#"{"memory":1}"#)
            .decode_as::<StopMessage>()
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::KindMismatch { expected: "stop", ref actual } if actual == "start"
        ));
    }

    #[test]
    fn kind_is_checked_before_payload() {
        let env = Envelope {
            kind: "restart".to_owned(),
            payload: None,
        };
        let err = env.decode_as::<StopMessage>().unwrap_err();
        assert!(matches!(err, DecodeError::KindMismatch { .. }));
    }

    #[test]
    fn missing_field_defaults_to_zero() {
        let start: StartMessage = envelope("start", r#"{"memory":4}"#).decode_as().unwrap();
        assert_eq!(start, StartMessage { memory: 4, num_cpu: 0 });

        let stop: StopMessage = envelope("stop", "{}").decode_as().unwrap();
        assert_eq!(stop.id, "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let stop: StopMessage = envelope("stop", r#"{"id":"a","reason":"done","n":[1,2]}"#)
            .decode_as()
            .unwrap();
        assert_eq!(stop.id, "a");
    }

    #[rstest]
    #[case(r#"{"memory":"four","num_cpu":8}"#)]
    #[case(r#"{"memory":4.5,"num_cpu":8}"#)]
    #[case(r#"{"memory":4,"num_cpu":[8]}"#)]
    #[case(r#""four""#)]
    #[case("[4,8]")]
    #[case("[]")]
    #[case("7")]
    fn type_mismatch_is_payload_error(#[case] payload: &str) {
        let err = envelope("start", payload)
            .decode_as::<StartMessage>()
            .unwrap_err();
        assert!(matches!(err, DecodeError::Payload { kind: "start", .. }));
    }

    #[test]
    fn absent_payload_is_reported() {
        let env: Envelope = serde_json::from_str(r#"{"kind":"stop"}"#).unwrap();
        assert!(env.payload.is_none());
        let err = env.decode_as::<StopMessage>().unwrap_err();
        assert!(matches!(err, DecodeError::MissingPayload { kind: "stop" }));
    }

    #[test]
    fn null_payload_decodes_to_zero_values() {
        let env: Envelope =
            serde_json::from_str(r#"{"kind":"start","payload":null}"#).unwrap();
        assert_eq!(env.payload.as_deref().map(RawValue::get), Some("null"));

        let start: StartMessage = env.decode_as().unwrap();
        assert_eq!(start, StartMessage::default());
    }

    #[test]
    fn null_field_decodes_to_zero_value() {
        let start: StartMessage = envelope("start", r#"{"memory":null,"num_cpu":8}"#)
            .decode_as()
            .unwrap();
        assert_eq!(start, StartMessage { memory: 0, num_cpu: 8 });

        let stop: StopMessage = envelope("stop", r#"{"id":null}"#).decode_as().unwrap();
        assert_eq!(stop.id, "");
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let start: StartMessage = envelope("start", r#"{"memory":1,"num_cpu":8,"memory":4}"#)
            .decode_as()
            .unwrap();
        assert_eq!(start, StartMessage { memory: 4, num_cpu: 8 });
    }

    #[test]
    fn strict_mode_counts_null_field_as_present() {
        let start: StartMessage = envelope("start", r#"{"memory":null,"num_cpu":2}"#)
            .decode_with(DecodeMode::Strict)
            .unwrap();
        assert_eq!(start, StartMessage { memory: 0, num_cpu: 2 });
    }

    #[test]
    fn missing_kind_reads_as_empty() {
        let env: Envelope = serde_json::from_str(r#"{"payload":{}}"#).unwrap();
        assert_eq!(env.kind, "");
    }

    #[test]
    fn strict_mode_rejects_missing_field() {
        let err = envelope("start", r#"{"memory":4}"#)
            .decode_with::<StartMessage>(DecodeMode::Strict)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingField { kind: "start", ref field } if field == "num_cpu"
        ));
    }

    #[test]
    fn strict_mode_accepts_complete_payload_with_extras() {
        let start: StartMessage = envelope("start", r#"{"memory":4,"num_cpu":8,"zone":"a"}"#)
            .decode_with(DecodeMode::Strict)
            .unwrap();
        assert_eq!(start, StartMessage { memory: 4, num_cpu: 8 });
    }

    #[test]
    fn wrap_uses_message_kind() {
        let env = Envelope::wrap(&StartMessage {
            memory: 32,
            num_cpu: 4,
        })
        .unwrap();
        let text = serde_json::to_string(&env).unwrap();
        assert_eq!(text, r#"{"kind":"start","payload":{"memory":32,"num_cpu":4}}"#);
    }
}
