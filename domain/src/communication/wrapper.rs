//! Envelope carrying one log detail across a serialization boundary

use super::codec::CommunicationLogCodec;
use super::detail::CommunicationLogDetail;
use super::error::CodecError;
use super::kind::CommunicationKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wrapper with a single polymorphic `data` field.
///
/// Serialized as `{"data": {"type": ..., ...}}`. The wrapper owns its
/// detail; the detail is reached through the public `data` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommunicationLogDetailWrapper {
    pub data: CommunicationLogDetail,
}

impl CommunicationLogDetailWrapper {
    pub fn new(data: impl Into<CommunicationLogDetail>) -> Self {
        Self { data: data.into() }
    }

    /// Decode a wrapper whose `data` is a raw tagged record, using `codec`.
    ///
    /// Unlike the serde path, the [`CodecError`] is returned as is.
    pub fn from_value(raw: Value, codec: &CommunicationLogCodec) -> Result<Self, CodecError> {
        let Value::Object(mut envelope) = raw else {
            return Err(CodecError::MalformedEnvelope(
                "wrapper must be a JSON object".to_string(),
            ));
        };
        let data = envelope.remove("data").ok_or_else(|| {
            CodecError::MalformedEnvelope("wrapper is missing 'data'".to_string())
        })?;
        if let Some(unexpected) = envelope.keys().next() {
            return Err(CodecError::MalformedEnvelope(format!(
                "unexpected wrapper field '{}'",
                unexpected
            )));
        }
        Ok(Self {
            data: codec.decode_owned(data)?,
        })
    }

    pub fn to_value(&self, codec: &CommunicationLogCodec) -> Result<Value, CodecError> {
        let mut envelope = serde_json::Map::new();
        envelope.insert("data".to_string(), codec.encode(&self.data)?);
        Ok(Value::Object(envelope))
    }

    pub fn kind(&self) -> CommunicationKind {
        self.data.kind()
    }
}

impl From<CommunicationLogDetail> for CommunicationLogDetailWrapper {
    fn from(data: CommunicationLogDetail) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communication::detail::HttpDirection;
    use crate::communication::fixtures;
    use serde_json::json;

    #[test]
    fn test_wrapper_serde_round_trip() {
        for detail in fixtures::all_details() {
            let wrapper = CommunicationLogDetailWrapper::new(detail);
            let text = serde_json::to_string(&wrapper).unwrap();
            let back: CommunicationLogDetailWrapper = serde_json::from_str(&text).unwrap();
            assert_eq!(back, wrapper);
        }
    }

    #[test]
    fn test_wrapper_keeps_discriminator_in_data() {
        let wrapper = CommunicationLogDetailWrapper::new(fixtures::host_http(1, HttpDirection::Out));
        let value = serde_json::to_value(&wrapper).unwrap();
        assert_eq!(value["data"]["type"], json!("HOST_OUT"));
    }

    #[test]
    fn test_wrapper_from_raw() {
        let raw = json!({"data": fixtures::minimal_raw(CommunicationKind::HostIn)});
        let wrapper: CommunicationLogDetailWrapper = serde_json::from_value(raw).unwrap();
        assert_eq!(wrapper.kind(), CommunicationKind::HostIn);
    }

    #[test]
    fn test_from_value_returns_codec_error() {
        let codec = CommunicationLogCodec::default();
        let raw = json!({"data": {"type": "UNKNOWN_TAG"}});
        assert_eq!(
            CommunicationLogDetailWrapper::from_value(raw, &codec).unwrap_err(),
            CodecError::UnknownVariant("UNKNOWN_TAG".to_string())
        );
    }

    #[test]
    fn test_from_value_missing_data() {
        let codec = CommunicationLogCodec::default();
        assert!(matches!(
            CommunicationLogDetailWrapper::from_value(json!({}), &codec).unwrap_err(),
            CodecError::MalformedEnvelope(_)
        ));
    }

    #[test]
    fn test_from_value_rejects_extra_envelope_fields() {
        let codec = CommunicationLogCodec::default();
        let raw = json!({
            "data": fixtures::minimal_raw(CommunicationKind::EwpIn),
            "meta": 1
        });
        assert!(CommunicationLogDetailWrapper::from_value(raw, &codec).is_err());
    }

    #[test]
    fn test_to_value_matches_serde() {
        let codec = CommunicationLogCodec::default();
        let wrapper = CommunicationLogDetailWrapper::new(fixtures::ewp_in(4));
        assert_eq!(
            wrapper.to_value(&codec).unwrap(),
            serde_json::to_value(&wrapper).unwrap()
        );
    }
}
