//! Session client for the recorder management API.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::api::endpoints::{
    self, API_VERSION, CAMERA_CAPABILITY, CAMERA_LIST, CHANNEL_LIST, ENTRY, EntryResponse,
    INSUFFICIENT_PERMISSION, LOGIN, LiveStreamRequest, LoginResponse, PARAM_SID, PARAM_VERSION,
    SERVICE_KEY, StreamProtocol,
};
use crate::api::{ApiResponse, HttpTransport, ensure_success, interpret};
use crate::auth::{Credentials, Session, SessionId};
use crate::config::ClientConfig;
use crate::error::{AuthError, Error, ResponseError};
use crate::types::{BaseUrl, Variant};

/// A JSON object returned by the recorder.
pub type JsonObject = Map<String, Value>;

/// Stream index used when the caller has no preference.
pub const DEFAULT_STREAM: u32 = 0;

/// An authenticated client for one recorder.
///
/// A `Client` only exists after login has succeeded: [`Client::new`] detects
/// the API variant and authenticates before returning. Every call blocks
/// until the recorder answers.
///
/// A failed request clears the authenticated flag but does not stop later
/// calls from being attempted; call [`Client::connect`] to log in again.
///
/// # Example
///
/// ```no_run
/// use qvrpro::{Client, ClientConfig};
///
/// # fn example() -> Result<(), qvrpro::Error> {
/// let config = ClientConfig::new("admin", "secret", "10.7.7.100");
/// let mut client = Client::new(config)?;
///
/// let cameras = client.list_cameras()?;
/// println!("{} cameras", cameras["total_channel_num"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    credentials: Credentials,
    transport: HttpTransport,
    session: Session,
}

impl Client {
    /// Connect to a recorder and authenticate.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the recorder rejects the
    /// login, an input error for an invalid host, and transport or response
    /// errors if the recorder cannot be reached or answers unexpectedly.
    #[instrument(skip(config), fields(host = %config.host(), user = %config.user()))]
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(config.base_url()?)?;

        let mut client = Self {
            credentials: config.credentials(),
            transport,
            session: Session::default(),
        };
        client.connect()?;

        Ok(client)
    }

    /// Detect the API variant and log in, replacing the current session.
    ///
    /// On failure the previous session identifier is discarded and the
    /// client is left unauthenticated.
    #[instrument(skip(self), fields(base = %self.transport.base_url()))]
    pub fn connect(&mut self) -> Result<(), Error> {
        info!("Connecting to recorder");
        self.session = Session::default();

        let variant = self.detect_variant()?;
        self.session = Session::new(variant);

        let sid = self.login()?;
        self.session.establish(sid);

        info!(%variant, "Session established");
        Ok(())
    }

    fn detect_variant(&self) -> Result<Variant, Error> {
        let response = ensure_success(self.transport.get(ENTRY, &[] as &[(&str, &str)])?)?;

        let bytes = response.bytes()?;
        let entry: EntryResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ResponseError::malformed(format!("entry probe: {}", e)))?;

        let variant = Variant::from_is_qvp(entry.is_qvp.as_ref());
        debug!(%variant, "Detected API variant");
        Ok(variant)
    }

    fn login(&self) -> Result<SessionId, Error> {
        let pwd = self.credentials.encoded_password();
        let query = [
            ("user", self.credentials.user()),
            ("pwd", pwd.as_str()),
            ("serviceKey", SERVICE_KEY),
        ];

        let response = ensure_success(self.transport.get(LOGIN, &query)?)?;

        let document = LoginResponse::from_xml(&response.text()?)?;

        if !document.passed()? {
            warn!("Recorder rejected credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        let sid = document
            .session_id()
            .ok_or_else(|| ResponseError::malformed("login passed without authSid"))?;

        Ok(SessionId::new(sid))
    }

    // ========================================================================
    // Session accessors
    // ========================================================================

    /// Returns whether the session is currently considered authenticated.
    pub fn authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Returns the session identifier issued at login.
    pub fn session_id(&self) -> Option<&str> {
        self.session.session_id().map(SessionId::as_str)
    }

    /// Returns the detected API variant.
    pub fn variant(&self) -> Variant {
        self.session.variant()
    }

    /// Returns the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the recorder base URL.
    pub fn base_url(&self) -> &BaseUrl {
        self.transport.base_url()
    }

    /// Returns `user:password` for embedding in stream URLs.
    pub fn auth_string(&self) -> String {
        self.credentials.auth_string()
    }

    // ========================================================================
    // Dispatch primitives
    // ========================================================================

    /// Send an authenticated GET to an absolute path on the recorder.
    ///
    /// `sid` and `ver` are always attached; caller parameters with those
    /// names are dropped.
    #[instrument(skip(self, params))]
    pub fn get(&mut self, path: &str, params: &[(&str, &str)]) -> Result<ApiResponse, Error> {
        let sid = self.require_sid()?;

        let mut query = vec![(PARAM_SID, sid.as_str()), (PARAM_VERSION, API_VERSION)];
        for &(key, value) in params {
            if key == PARAM_SID || key == PARAM_VERSION {
                debug!(key, "Ignoring caller override of session parameter");
                continue;
            }
            query.push((key, value));
        }

        let result = self.transport.get(path, &query);
        self.finish(result)
    }

    /// Send an authenticated POST with a JSON body. Only `sid` is attached.
    #[instrument(skip(self, body))]
    pub fn post<B>(&mut self, path: &str, body: &B) -> Result<ApiResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let sid = self.require_sid()?;
        let query = [(PARAM_SID, sid.as_str())];

        let result = self.transport.post(path, &query, body);
        self.finish(result)
    }

    /// Send an authenticated PUT with no body.
    #[instrument(skip(self))]
    pub fn put(&mut self, path: &str) -> Result<ApiResponse, Error> {
        let sid = self.require_sid()?;
        let query = [(PARAM_SID, sid.as_str()), (PARAM_VERSION, API_VERSION)];

        let result = self.transport.put(path, &query);
        self.finish(result)
    }

    fn require_sid(&self) -> Result<String, Error> {
        self.session
            .session_id()
            .map(|sid| sid.as_str().to_string())
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    /// Interpret a transport result, invalidating the session on failure.
    fn finish(
        &mut self,
        result: Result<reqwest::blocking::Response, Error>,
    ) -> Result<ApiResponse, Error> {
        let outcome = result.and_then(interpret);

        if let Err(err) = &outcome {
            if matches!(
                err,
                Error::Transport(_) | Error::Response(ResponseError::Status { .. })
            ) {
                warn!(error = %err, "Request failed, session invalidated");
                self.session.invalidate();
            }
        }

        outcome
    }

    fn path(&self, suffix: &str) -> String {
        self.session.variant().path(suffix)
    }

    // ========================================================================
    // Camera operations
    // ========================================================================

    /// List the configured cameras.
    #[instrument(skip(self))]
    pub fn list_cameras(&mut self) -> Result<JsonObject, Error> {
        let path = self.path(CAMERA_LIST);
        Ok(self.get(&path, &[])?.into_json_object()?)
    }

    /// Fetch camera capabilities: PTZ capabilities when `ptz` is set,
    /// event capabilities otherwise.
    #[instrument(skip(self))]
    pub fn get_capability(&mut self, ptz: bool) -> Result<JsonObject, Error> {
        let path = self.path(CAMERA_CAPABILITY);
        let params = [("act", endpoints::capability_act(ptz))];
        Ok(self.get(&path, &params)?.into_json_object()?)
    }

    /// Fetch a JPEG snapshot from a camera.
    #[instrument(skip(self))]
    pub fn get_snapshot(&mut self, camera_guid: &str) -> Result<Vec<u8>, Error> {
        let path = self.path(&endpoints::camera_snapshot(camera_guid));
        Ok(self.get(&path, &[])?.into_image()?)
    }

    /// Start manual recording on a channel.
    #[instrument(skip(self))]
    pub fn start_recording(&mut self, guid: &str) -> Result<ApiResponse, Error> {
        let path = self.path(&endpoints::recording_start(guid));
        self.put(&path)
    }

    /// Stop manual recording on a channel.
    #[instrument(skip(self))]
    pub fn stop_recording(&mut self, guid: &str) -> Result<ApiResponse, Error> {
        let path = self.path(&endpoints::recording_stop(guid));
        self.put(&path)
    }

    // ========================================================================
    // Streaming output operations
    // ========================================================================

    /// List the channels available for streaming output.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InsufficientPermissions`] when the account lacks
    /// surveillance management permission, even though the recorder answers
    /// with a success status.
    #[instrument(skip(self))]
    pub fn get_channel_list(&mut self) -> Result<JsonObject, Error> {
        let path = self.path(CHANNEL_LIST);
        let channels = self.get(&path, &[])?.into_json_object()?;

        if channels.get("message").and_then(Value::as_str) == Some(INSUFFICIENT_PERMISSION) {
            warn!("Channel listing denied");
            return Err(AuthError::InsufficientPermissions {
                message: "User must have Surveillance Management permission".to_string(),
            }
            .into());
        }

        Ok(channels)
    }

    /// List the streams of a channel.
    #[instrument(skip(self))]
    pub fn get_channel_streams(&mut self, guid: &str) -> Result<JsonObject, Error> {
        let path = self.path(&endpoints::channel_streams(guid));
        Ok(self.get(&path, &[])?.into_json_object()?)
    }

    /// Request a live stream for a channel.
    ///
    /// Use [`DEFAULT_STREAM`] and `StreamProtocol::default()` (HLS) when the
    /// caller has no preference.
    #[instrument(skip(self))]
    pub fn get_channel_live_stream(
        &mut self,
        guid: &str,
        stream: u32,
        protocol: StreamProtocol,
    ) -> Result<JsonObject, Error> {
        let path = self.path(&endpoints::channel_live_stream(guid, stream));
        let body = LiveStreamRequest { protocol };
        Ok(self.post(&path, &body)?.into_json_object()?)
    }
}
