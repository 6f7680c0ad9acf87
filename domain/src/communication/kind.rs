//! Communication kind: the `type` discriminator of a log record

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Discriminator tag carried in the `type` field of every communication log.
///
/// The set is closed: a tag that does not parse into one of these values is
/// never coerced into a generic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunicationKind {
    /// Host invoked a function of one of its plugins
    HostPluginFunctionCall,
    /// HTTP communication received by the host from an EWP node
    EwpIn,
    /// HTTP communication sent by the host to an EWP node
    EwpOut,
    /// HTTP communication received on the host's own HTTP surface
    HostIn,
    /// HTTP communication initiated by the host
    HostOut,
}

impl CommunicationKind {
    /// All kinds, in registry declaration order.
    pub const ALL: [CommunicationKind; 5] = [
        CommunicationKind::HostPluginFunctionCall,
        CommunicationKind::EwpIn,
        CommunicationKind::EwpOut,
        CommunicationKind::HostIn,
        CommunicationKind::HostOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationKind::HostPluginFunctionCall => "HOST_PLUGIN_FUNCTION_CALL",
            CommunicationKind::EwpIn => "EWP_IN",
            CommunicationKind::EwpOut => "EWP_OUT",
            CommunicationKind::HostIn => "HOST_IN",
            CommunicationKind::HostOut => "HOST_OUT",
        }
    }

    /// Whether the record describes an HTTP exchange.
    pub fn is_http(&self) -> bool {
        !matches!(self, CommunicationKind::HostPluginFunctionCall)
    }
}

impl std::fmt::Display for CommunicationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommunicationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommunicationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_matches_serde_name() {
        for kind in CommunicationKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn test_from_str_round_trip() {
        for kind in CommunicationKind::ALL {
            assert_eq!(kind.as_str().parse::<CommunicationKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!(
            "ewp_in".parse::<CommunicationKind>(),
            Err("ewp_in".to_string())
        );
    }

    #[test]
    fn test_http_classification() {
        assert!(!CommunicationKind::HostPluginFunctionCall.is_http());
        assert!(CommunicationKind::HostOut.is_http());
    }
}
