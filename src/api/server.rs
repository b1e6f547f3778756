use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;

const COMMAND: &str = "server";

/// Handle for server-introspection operations.
///
/// These are answered by the CREOSON server itself rather than by Creo, and
/// travel on the `/server` endpoint instead of `/creoson`.
#[derive(Clone, Copy, Debug)]
pub struct ServerApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

impl ServerApi<'_> {
    /// `server/pwd`: the server's own working directory.
    pub async fn pwd(&self) -> Result<String, CreosonError> {
        let data = self.client.request_server(COMMAND, "pwd", None).await?;
        envelope::require_field(data, "dirname")
    }
}
