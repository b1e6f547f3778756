use serde_json::Map;

use super::{finish, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;

const COMMAND: &str = "view";

/// Handle for `view` operations on saved model orientations.
#[derive(Clone, Copy, Debug)]
pub struct ViewApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

impl ViewApi<'_> {
    /// `view/activate`: switch the model to a saved view.
    pub async fn activate(&self, name: &str, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "activate", Some(data)).await?;
        Ok(())
    }

    /// `view/list`: saved view names matching an optional filter pattern.
    pub async fn list(
        &self,
        name: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "name", name);
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "list", finish(data)).await?;
        envelope::optional_field(data, "viewlist").map(Option::unwrap_or_default)
    }

    /// `view/list_exploded`: exploded-state view names matching an optional
    /// filter pattern.
    pub async fn list_exploded(
        &self,
        name: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "name", name);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "list_exploded", finish(data))
            .await?;
        envelope::optional_field(data, "viewlist").map(Option::unwrap_or_default)
    }

    /// `view/save`: save the current orientation under a view name.
    pub async fn save(&self, name: &str, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "save", Some(data)).await?;
        Ok(())
    }
}
