use serde::Deserialize;
use serde_json::Map;

use super::{finish, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;

const COMMAND: &str = "layer";

/// Handle for `layer` operations.
#[derive(Clone, Copy, Debug)]
pub struct LayerApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// One layer record from [`LayerApi::list`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LayerInfo {
    pub name: String,
    /// Display status such as `NORMAL`, `DISPLAY` or `BLANK`.
    pub status: Option<String>,
    #[serde(rename = "ID")]
    pub id: Option<i64>,
}

impl LayerApi<'_> {
    /// `layer/delete`: delete layers; all layers when no name is given.
    pub async fn delete(&self, name: Option<&str>, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "name", name);
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "delete", finish(data)).await?;
        Ok(())
    }

    /// `layer/exists`: whether a layer exists.
    pub async fn exists(
        &self,
        name: Option<&str>,
        file: Option<&str>,
    ) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "name", name);
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "exists", finish(data)).await?;
        envelope::require_field(data, "exists")
    }

    /// `layer/list`: layer records matching an optional name filter.
    pub async fn list(
        &self,
        name: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<LayerInfo>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "name", name);
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "list", finish(data)).await?;
        envelope::optional_field(data, "layers").map(Option::unwrap_or_default)
    }

    /// `layer/show`: show or blank layers.
    pub async fn show(
        &self,
        name: Option<&str>,
        file: Option<&str>,
        show: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "name", name);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "show", show);

        self.client.request(COMMAND, "show", finish(data)).await?;
        Ok(())
    }
}
