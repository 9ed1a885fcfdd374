//! Endpoint paths, fixed parameters, and request/response wire types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ResponseError;

// ============================================================================
// Fixed paths and parameters
// ============================================================================

/// Unauthenticated probe that reports which API variant the recorder serves.
pub const ENTRY: &str = "/qvrentry";

/// Login endpoint; lives at the device root, not under the variant prefix.
pub const LOGIN: &str = "/cgi-bin/authLogin.cgi";

/// API version sent as `ver` on GET and PUT requests.
pub const API_VERSION: &str = "1.1.0";

/// Fixed `serviceKey` sent with the login request.
pub const SERVICE_KEY: &str = "1";

/// Query parameter carrying the session identifier.
pub const PARAM_SID: &str = "sid";

/// Query parameter carrying the API version.
pub const PARAM_VERSION: &str = "ver";

/// Channel-list `message` value signalling a missing permission.
pub const INSUFFICIENT_PERMISSION: &str = "Insufficient permission.";

// ============================================================================
// Variant-relative path suffixes
// ============================================================================

pub const CAMERA_LIST: &str = "/camera/list";

pub const CAMERA_CAPABILITY: &str = "/camera/capability";

pub const CHANNEL_LIST: &str = "/qshare/StreamingOutput/channels";

pub fn camera_snapshot(guid: &str) -> String {
    format!("/camera/snapshot/{}", guid)
}

pub fn channel_streams(guid: &str) -> String {
    format!("/qshare/StreamingOutput/channel/{}/streams", guid)
}

pub fn channel_live_stream(guid: &str, stream: u32) -> String {
    format!(
        "/qshare/StreamingOutput/channel/{}/stream/{}/liveStream",
        guid, stream
    )
}

pub fn recording_start(guid: &str) -> String {
    format!("/camera/mrec/{}/start", guid)
}

pub fn recording_stop(guid: &str) -> String {
    format!("/camera/mrec/{}/stop", guid)
}

/// Value of the `act` parameter on the capability endpoint.
pub fn capability_act(ptz: bool) -> &'static str {
    if ptz {
        "get_camera_capability"
    } else {
        "get_event_capability"
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response from the entry probe.
#[derive(Debug, Deserialize)]
pub struct EntryResponse {
    #[serde(default)]
    pub is_qvp: Option<serde_json::Value>,
}

/// The `QDocRoot` document returned by the login endpoint.
///
/// Only the two fields the client needs are decoded; values usually arrive
/// wrapped in CDATA sections.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "authPassed", default)]
    pub auth_passed: Option<String>,
    #[serde(rename = "authSid", default)]
    pub auth_sid: Option<String>,
}

impl LoginResponse {
    /// Parse the login document.
    pub fn from_xml(xml: &str) -> Result<Self, ResponseError> {
        quick_xml::de::from_str(xml)
            .map_err(|e| ResponseError::malformed(format!("login document: {}", e)))
    }

    /// Interpret `authPassed`: an integer flag, non-zero meaning success.
    pub fn passed(&self) -> Result<bool, ResponseError> {
        let raw = self
            .auth_passed
            .as_deref()
            .ok_or_else(|| ResponseError::malformed("login document has no authPassed"))?;

        raw.trim()
            .parse::<i64>()
            .map(|flag| flag != 0)
            .map_err(|_| ResponseError::malformed(format!("authPassed is not a number: {:?}", raw)))
    }

    /// Returns the issued session identifier, ignoring empty values.
    pub fn session_id(&self) -> Option<&str> {
        self.auth_sid
            .as_deref()
            .map(str::trim)
            .filter(|sid| !sid.is_empty())
    }
}

/// Delivery protocol requested for a live stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamProtocol {
    #[default]
    Hls,
    Rtsp,
}

impl fmt::Display for StreamProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamProtocol::Hls => f.write_str("hls"),
            StreamProtocol::Rtsp => f.write_str("rtsp"),
        }
    }
}

/// Request body for the live-stream endpoint.
#[derive(Debug, Serialize)]
pub struct LiveStreamRequest {
    pub protocol: StreamProtocol,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_OK: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<QDocRoot version="1.0">
<doQuick><![CDATA[]]></doQuick>
<is_booting><![CDATA[0]]></is_booting>
<authPassed><![CDATA[1]]></authPassed>
<authSid><![CDATA[kx2a6ipx]]></authSid>
<isAdmin><![CDATA[1]]></isAdmin>
<username><![CDATA[qvruser]]></username>
</QDocRoot>"#;

    const LOGIN_FAILED: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<QDocRoot version="1.0">
<authPassed><![CDATA[0]]></authPassed>
<errorValue><![CDATA[-1]]></errorValue>
</QDocRoot>"#;

    #[test]
    fn parses_successful_login() {
        let doc = LoginResponse::from_xml(LOGIN_OK).unwrap();
        assert!(doc.passed().unwrap());
        assert_eq!(doc.session_id(), Some("kx2a6ipx"));
    }

    #[test]
    fn parses_failed_login() {
        let doc = LoginResponse::from_xml(LOGIN_FAILED).unwrap();
        assert!(!doc.passed().unwrap());
        assert_eq!(doc.session_id(), None);
    }

    #[test]
    fn parses_plain_text_values() {
        let xml = "<QDocRoot><authPassed>1</authPassed><authSid>abc</authSid></QDocRoot>";
        let doc = LoginResponse::from_xml(xml).unwrap();
        assert!(doc.passed().unwrap());
        assert_eq!(doc.session_id(), Some("abc"));
    }

    #[test]
    fn missing_auth_passed_is_malformed() {
        let doc = LoginResponse::from_xml("<QDocRoot><authSid>abc</authSid></QDocRoot>").unwrap();
        assert!(doc.passed().is_err());
    }

    #[test]
    fn non_numeric_auth_passed_is_malformed() {
        let doc = LoginResponse::from_xml("<QDocRoot><authPassed>yes</authPassed></QDocRoot>")
            .unwrap();
        assert!(doc.passed().is_err());
    }

    #[test]
    fn capability_act_follows_ptz_flag() {
        assert_eq!(capability_act(true), "get_camera_capability");
        assert_eq!(capability_act(false), "get_event_capability");
    }

    #[test]
    fn live_stream_path_and_body() {
        assert_eq!(
            channel_live_stream("guid-1", 0),
            "/qshare/StreamingOutput/channel/guid-1/stream/0/liveStream"
        );
        let body = serde_json::to_value(LiveStreamRequest {
            protocol: StreamProtocol::default(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"protocol": "hls"}));
    }
}
