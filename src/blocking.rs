use std::sync::Arc;

use crate::client::{ClientBuilder, CreosonClient};
use crate::error::CreosonError;

/// Blocking wrapper over [`CreosonClient`].
///
/// Owns a current-thread tokio runtime and drives the async client on it.
/// Connection lifecycle calls are mirrored here; everything else goes
/// through [`CreosonClientBlocking::block_on`] with the inner client.
#[derive(Clone, Debug)]
pub struct CreosonClientBlocking {
    inner: CreosonClient,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl CreosonClientBlocking {
    /// Connect with all defaults.
    pub fn connect() -> Result<Self, CreosonError> {
        Self::connect_with(ClientBuilder::new())
    }

    /// Connect with a configured builder.
    pub fn connect_with(builder: ClientBuilder) -> Result<Self, CreosonError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| CreosonError::Runtime {
                reason: err.to_string(),
            })?;

        let inner = runtime.block_on(builder.connect())?;

        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    /// The async client, for [`CreosonClientBlocking::block_on`].
    pub fn inner(&self) -> &CreosonClient {
        &self.inner
    }

    /// Drive any future on the wrapper's runtime.
    ///
    /// ```no_run
    /// # fn run() -> Result<(), creoson_rs::CreosonError> {
    /// let client = creoson_rs::CreosonClientBlocking::connect()?;
    /// let dirname = client.block_on(client.inner().creo().pwd())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// See [`CreosonClient::session_id`].
    pub fn session_id(&self) -> Result<String, CreosonError> {
        self.inner.session_id()
    }

    /// See [`CreosonClient::disconnect`].
    pub fn disconnect(&self) -> Result<(), CreosonError> {
        self.block_on(self.inner.disconnect())
    }

    /// See [`CreosonClient::is_creo_running`].
    pub fn is_creo_running(&self) -> Result<bool, CreosonError> {
        self.block_on(self.inner.is_creo_running())
    }
}
