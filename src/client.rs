use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Map, Value};

use crate::api::{
    BomApi, CreoApi, DimensionApi, DrawingApi, FamilyTableApi, FeatureApi, FileApi, GeometryApi,
    InterfaceApi, LayerApi, NoteApi, ParameterApi, ServerApi, ViewApi, WindchillApi,
};
use crate::envelope::{self, Payload, RequestEnvelope};
use crate::error::CreosonError;
use crate::transport::{Endpoint, Transport};

const CREOSON_URL_ENV: &str = "CREOSON_URL";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 9056;

const COMMAND_CONNECTION: &str = "connection";

/// Async client for a CREOSON server.
///
/// Cheap to clone; every clone shares the same HTTP transport and session
/// identifier. Domain operations hang off the accessor methods
/// ([`CreosonClient::file`], [`CreosonClient::feature`], ...); the
/// connection lifecycle lives directly on the client.
#[derive(Clone, Debug)]
pub struct CreosonClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    transport: Transport,
    session: Mutex<String>,
    base_url: String,
    timeout: Duration,
}

#[derive(Clone, Debug)]
struct ClientConfig {
    timeout: Duration,
    host: String,
    port: u16,
    base_url: Option<String>,
}

/// Configures and constructs a [`CreosonClient`].
#[derive(Clone, Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig {
                timeout: Duration::from_millis(3_000),
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                base_url: None,
            },
        }
    }

    /// Per-request timeout, default 3 s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Server host name, default `localhost`.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Server port, default `9056`.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Full base URL such as `http://localhost:9056`. Takes precedence over
    /// [`ClientBuilder::host`]/[`ClientBuilder::port`] and the
    /// `CREOSON_URL` environment variable.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Build the client without contacting the server.
    ///
    /// Until [`CreosonClient::connect`] succeeds the session identifier is
    /// empty and the server rejects any call that needs one.
    pub fn build(self) -> Result<CreosonClient, CreosonError> {
        let base_url = resolve_base_url(
            self.config.base_url.as_deref(),
            &self.config.host,
            self.config.port,
        );
        let timeout = self.config.timeout;
        let transport = Transport::new(&base_url, timeout)?;

        Ok(CreosonClient {
            inner: Arc::new(ClientInner {
                transport,
                session: Mutex::new(String::new()),
                base_url,
                timeout,
            }),
        })
    }

    /// Build the client and perform `connection/connect`, storing the
    /// session identifier the server hands back.
    pub async fn connect(self) -> Result<CreosonClient, CreosonError> {
        let client = self.build()?;
        client.connect().await?;
        Ok(client)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CreosonClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Shorthand for `ClientBuilder::new().connect()` with all defaults.
    pub async fn connect_default() -> Result<Self, CreosonError> {
        ClientBuilder::new().connect().await
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The current session identifier; empty before connect and after
    /// disconnect.
    pub fn session_id(&self) -> Result<String, CreosonError> {
        Ok(self
            .inner
            .session
            .lock()
            .map_err(|_| CreosonError::InternalPoisoned)?
            .clone())
    }

    /// `connection/connect`: obtain a session identifier from the server.
    ///
    /// This is the only request sent without a `sessionId` key; the
    /// identifier arrives at the top level of the response rather than
    /// inside `data`.
    pub async fn connect(&self) -> Result<(), CreosonError> {
        let request = RequestEnvelope {
            session_id: None,
            command: COMMAND_CONNECTION,
            function: "connect",
            data: None,
        };

        let body = self
            .inner
            .transport
            .roundtrip(Endpoint::Creoson, &request)
            .await?;
        let payload = envelope::unwrap_response(body)?;

        let session = payload.session_id.ok_or(CreosonError::MissingField {
            field: "sessionId".to_string(),
        })?;

        let mut guard = self
            .inner
            .session
            .lock()
            .map_err(|_| CreosonError::InternalPoisoned)?;
        *guard = session;

        Ok(())
    }

    /// `connection/disconnect`: end the session and clear the stored
    /// identifier. Later calls ship an empty `sessionId` and fail
    /// server-side; there is no client-side guard.
    pub async fn disconnect(&self) -> Result<(), CreosonError> {
        self.request(COMMAND_CONNECTION, "disconnect", None).await?;

        let mut guard = self
            .inner
            .session
            .lock()
            .map_err(|_| CreosonError::InternalPoisoned)?;
        guard.clear();

        Ok(())
    }

    /// `connection/is_creo_running`: whether Creo is up behind the server.
    pub async fn is_creo_running(&self) -> Result<bool, CreosonError> {
        let data = self
            .request(COMMAND_CONNECTION, "is_creo_running", None)
            .await?;
        envelope::require_field(data, "running")
    }

    /// `connection/start_creo`: launch Creo via a start script known to the
    /// server.
    pub async fn start_creo(
        &self,
        start_command: &str,
        retries: Option<u32>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        data.insert(
            "start_command".to_string(),
            Value::String(start_command.to_string()),
        );
        if let Some(retries) = retries {
            data.insert("retries".to_string(), Value::from(retries));
        }

        self.request(COMMAND_CONNECTION, "start_creo", Some(data))
            .await?;
        Ok(())
    }

    /// `connection/stop_creo`: ask Creo to exit cleanly.
    pub async fn stop_creo(&self) -> Result<(), CreosonError> {
        self.request(COMMAND_CONNECTION, "stop_creo", None).await?;
        Ok(())
    }

    /// `connection/kill_creo`: kill the Creo process outright.
    pub async fn kill_creo(&self) -> Result<(), CreosonError> {
        self.request(COMMAND_CONNECTION, "kill_creo", None).await?;
        Ok(())
    }

    /// `bom` operations.
    pub fn bom(&self) -> BomApi<'_> {
        BomApi { client: self }
    }

    /// `creo` directory/config operations.
    pub fn creo(&self) -> CreoApi<'_> {
        CreoApi { client: self }
    }

    /// `dimension` operations.
    pub fn dimension(&self) -> DimensionApi<'_> {
        DimensionApi { client: self }
    }

    /// `drawing` operations.
    pub fn drawing(&self) -> DrawingApi<'_> {
        DrawingApi { client: self }
    }

    /// `familytable` operations.
    pub fn familytable(&self) -> FamilyTableApi<'_> {
        FamilyTableApi { client: self }
    }

    /// `feature` operations.
    pub fn feature(&self) -> FeatureApi<'_> {
        FeatureApi { client: self }
    }

    /// `file` operations.
    pub fn file(&self) -> FileApi<'_> {
        FileApi { client: self }
    }

    /// `geometry` operations.
    pub fn geometry(&self) -> GeometryApi<'_> {
        GeometryApi { client: self }
    }

    /// `interface` import/export operations.
    pub fn interface(&self) -> InterfaceApi<'_> {
        InterfaceApi { client: self }
    }

    /// `layer` operations.
    pub fn layer(&self) -> LayerApi<'_> {
        LayerApi { client: self }
    }

    /// `note` operations.
    pub fn note(&self) -> NoteApi<'_> {
        NoteApi { client: self }
    }

    /// `parameter` operations.
    pub fn parameter(&self) -> ParameterApi<'_> {
        ParameterApi { client: self }
    }

    /// Server-introspection operations on the `/server` endpoint.
    pub fn server(&self) -> ServerApi<'_> {
        ServerApi { client: self }
    }

    /// `view` operations.
    pub fn view(&self) -> ViewApi<'_> {
        ViewApi { client: self }
    }

    /// `windchill` workspace operations.
    pub fn windchill(&self) -> WindchillApi<'_> {
        WindchillApi { client: self }
    }

    /// One request on the general `/creoson` endpoint: attach the session,
    /// post the envelope, unwrap `status`/`data`.
    pub(crate) async fn request(
        &self,
        command: &str,
        function: &str,
        data: Option<Map<String, Value>>,
    ) -> Result<Option<Map<String, Value>>, CreosonError> {
        let payload = self
            .request_on(Endpoint::Creoson, command, function, data)
            .await?;
        Ok(payload.data)
    }

    /// Same as [`CreosonClient::request`] but addressed to the `/server`
    /// endpoint.
    pub(crate) async fn request_server(
        &self,
        command: &str,
        function: &str,
        data: Option<Map<String, Value>>,
    ) -> Result<Option<Map<String, Value>>, CreosonError> {
        let payload = self
            .request_on(Endpoint::Server, command, function, data)
            .await?;
        Ok(payload.data)
    }

    async fn request_on(
        &self,
        endpoint: Endpoint,
        command: &str,
        function: &str,
        data: Option<Map<String, Value>>,
    ) -> Result<Payload, CreosonError> {
        let session = self
            .inner
            .session
            .lock()
            .map_err(|_| CreosonError::InternalPoisoned)?
            .clone();

        let request = RequestEnvelope {
            session_id: Some(&session),
            command,
            function,
            data,
        };

        let body = self.inner.transport.roundtrip(endpoint, &request).await?;
        envelope::unwrap_response(body)
    }
}

fn resolve_base_url(explicit: Option<&str>, host: &str, port: u16) -> String {
    if let Some(base_url) = explicit {
        return normalize_base_url(base_url);
    }

    if let Ok(base_url) = std::env::var(CREOSON_URL_ENV) {
        if !base_url.is_empty() {
            return normalize_base_url(&base_url);
        }
    }

    format!("http://{host}:{port}")
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.contains("://") {
        return trimmed.to_string();
    }

    format!("http://{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::{normalize_base_url, resolve_base_url, ClientBuilder};

    #[test]
    fn normalize_base_url_adds_http_scheme() {
        assert_eq!(normalize_base_url("localhost:9056"), "http://localhost:9056");
    }

    #[test]
    fn normalize_base_url_preserves_scheme_and_strips_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://creo-host:9056/"),
            "http://creo-host:9056"
        );
    }

    #[test]
    fn resolve_base_url_prefers_explicit_value() {
        let resolved = resolve_base_url(Some("creo-host:9000"), "ignored", 1);
        assert_eq!(resolved, "http://creo-host:9000");
    }

    #[test]
    fn built_client_starts_with_an_empty_session() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:9056")
            .build()
            .expect("client should build");

        assert_eq!(client.session_id().expect("session readable"), "");
        assert_eq!(client.base_url(), "http://localhost:9056");
    }
}
