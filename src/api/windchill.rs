use serde_json::{Map, Value};

use super::{finish, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;

const COMMAND: &str = "windchill";

/// Handle for `windchill` workspace management operations.
#[derive(Clone, Copy, Debug)]
pub struct WindchillApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

impl WindchillApi<'_> {
    /// `windchill/authorize`: log in to the active Windchill server.
    pub async fn authorize(&self, user: &str, password: &str) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "user", user);
        put(&mut data, "password", password);

        self.client
            .request(COMMAND, "authorize", Some(data))
            .await?;
        Ok(())
    }

    /// `windchill/clear_workspace`: remove objects from a workspace; the
    /// whole workspace when no file names are given.
    pub async fn clear_workspace(
        &self,
        workspace: Option<&str>,
        filenames: Option<Vec<String>>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "workspace", workspace);
        if let Some(filenames) = filenames {
            put(
                &mut data,
                "filenames",
                Value::Array(filenames.into_iter().map(Value::String).collect()),
            );
        }

        self.client
            .request(COMMAND, "clear_workspace", finish(data))
            .await?;
        Ok(())
    }

    /// `windchill/create_workspace`: create a workspace in a context.
    pub async fn create_workspace(
        &self,
        workspace: &str,
        context: &str,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "workspace", workspace);
        put(&mut data, "context", context);

        self.client
            .request(COMMAND, "create_workspace", Some(data))
            .await?;
        Ok(())
    }

    /// `windchill/delete_workspace`: delete a workspace.
    pub async fn delete_workspace(&self, workspace: &str) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "workspace", workspace);

        self.client
            .request(COMMAND, "delete_workspace", Some(data))
            .await?;
        Ok(())
    }

    /// `windchill/file_checked_out`: whether a file is checked out in a
    /// workspace.
    pub async fn file_checked_out(
        &self,
        filename: &str,
        workspace: Option<&str>,
    ) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "filename", filename);
        put_opt(&mut data, "workspace", workspace);

        let data = self
            .client
            .request(COMMAND, "file_checked_out", Some(data))
            .await?;
        envelope::require_field(data, "checked_out")
    }

    /// `windchill/get_workspace`: the active workspace name.
    pub async fn get_workspace(&self) -> Result<String, CreosonError> {
        let data = self.client.request(COMMAND, "get_workspace", None).await?;
        envelope::require_field(data, "workspace")
    }

    /// `windchill/list_workspace_files`: file names in a workspace matching
    /// an optional filter pattern.
    pub async fn list_workspace_files(
        &self,
        filename: Option<&str>,
        workspace: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "filename", filename);
        put_opt(&mut data, "workspace", workspace);

        let data = self
            .client
            .request(COMMAND, "list_workspace_files", finish(data))
            .await?;
        envelope::optional_field(data, "filelist").map(Option::unwrap_or_default)
    }

    /// `windchill/list_workspaces`: workspace names on the active server.
    pub async fn list_workspaces(&self) -> Result<Vec<String>, CreosonError> {
        let data = self.client.request(COMMAND, "list_workspaces", None).await?;
        envelope::optional_field(data, "workspaces").map(Option::unwrap_or_default)
    }

    /// `windchill/server_exists`: whether a server URL is known to Creo.
    pub async fn server_exists(&self, server_url: &str) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "server_url", server_url);

        let data = self
            .client
            .request(COMMAND, "server_exists", Some(data))
            .await?;
        envelope::require_field(data, "exists")
    }

    /// `windchill/set_server`: select the active Windchill server.
    pub async fn set_server(&self, server_url: &str) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "server_url", server_url);

        self.client
            .request(COMMAND, "set_server", Some(data))
            .await?;
        Ok(())
    }

    /// `windchill/set_workspace`: select the active workspace.
    pub async fn set_workspace(&self, workspace: &str) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "workspace", workspace);

        self.client
            .request(COMMAND, "set_workspace", Some(data))
            .await?;
        Ok(())
    }

    /// `windchill/workspace_exists`: whether a workspace exists.
    pub async fn workspace_exists(&self, workspace: &str) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "workspace", workspace);

        let data = self
            .client
            .request(COMMAND, "workspace_exists", Some(data))
            .await?;
        envelope::require_field(data, "exists")
    }
}
