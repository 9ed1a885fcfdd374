//! Session state for an authenticated recorder connection.

use std::fmt;

use crate::types::Variant;

/// An opaque session identifier (`sid`) issued by the recorder at login.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub(crate) fn new(sid: impl Into<String>) -> Self {
        Self(sid.into())
    }

    /// Returns the identifier value for use in request parameters.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionId").field(&"[REDACTED]").finish()
    }
}

/// Session state: the detected API variant, the session identifier and
/// whether the session is still considered authenticated.
///
/// The identifier is written only after a login reports success. A failed
/// request clears the authenticated flag but keeps the identifier, so later
/// calls are still attempted against the recorder.
#[derive(Clone, Debug, Default)]
pub struct Session {
    variant: Variant,
    sid: Option<SessionId>,
    authenticated: bool,
}

impl Session {
    /// A fresh, unauthenticated session for the detected variant.
    pub(crate) fn new(variant: Variant) -> Self {
        Self {
            variant,
            sid: None,
            authenticated: false,
        }
    }

    /// Record a successful login. The identifier is stored before the flag
    /// is raised.
    pub(crate) fn establish(&mut self, sid: SessionId) {
        self.sid = Some(sid);
        self.authenticated = true;
    }

    /// Mark the session as no longer authenticated.
    pub(crate) fn invalidate(&mut self) {
        self.authenticated = false;
    }

    /// Returns the API variant this session was established against.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the session identifier, if login has succeeded.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.sid.as_ref()
    }

    /// Returns whether the session is currently considered authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_hides_value_in_debug() {
        let sid = SessionId::new("4k1p9x2q");
        let debug = format!("{:?}", sid);
        assert!(!debug.contains("4k1p9x2q"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn new_session_is_unauthenticated() {
        let session = Session::new(Variant::Lite);
        assert_eq!(session.variant(), Variant::Lite);
        assert!(session.session_id().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn invalidate_keeps_identifier() {
        let mut session = Session::new(Variant::Pro);
        session.establish(SessionId::new("abc"));
        assert!(session.is_authenticated());

        session.invalidate();
        assert!(!session.is_authenticated());
        assert_eq!(session.session_id().map(SessionId::as_str), Some("abc"));
    }
}
