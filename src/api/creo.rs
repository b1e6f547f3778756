use serde::Deserialize;
use serde_json::Map;

use super::{finish, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::OneOrMany;

const COMMAND: &str = "creo";

/// Handle for `creo` low-level directory and config operations.
#[derive(Clone, Copy, Debug)]
pub struct CreoApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// RGB triple for one of Creo's standard system colors.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StdColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl CreoApi<'_> {
    /// `creo/cd`: change Creo's working directory. Returns the resulting
    /// directory name.
    pub async fn cd(&self, dirname: &str) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "dirname", dirname);

        let data = self.client.request(COMMAND, "cd", Some(data)).await?;
        envelope::require_field(data, "dirname")
    }

    /// `creo/delete_files`: delete files on disk. Returns the names that
    /// were deleted.
    pub async fn delete_files(
        &self,
        file: Option<OneOrMany>,
        dirname: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        if let Some(file) = file {
            file.insert_into(&mut data, "filename", "filenames");
        }
        put_opt(&mut data, "dirname", dirname);

        let data = self
            .client
            .request(COMMAND, "delete_files", finish(data))
            .await?;
        envelope::optional_field(data, "filelist").map(Option::unwrap_or_default)
    }

    /// `creo/get_config`: values of a `config.pro` option. Creo reports
    /// multi-valued options as a list.
    pub async fn get_config(&self, name: &str) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);

        let data = self
            .client
            .request(COMMAND, "get_config", Some(data))
            .await?;
        envelope::optional_field(data, "values").map(Option::unwrap_or_default)
    }

    /// `creo/get_std_color`: RGB values of one standard system color.
    pub async fn get_std_color(&self, color_type: &str) -> Result<StdColor, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "color_type", color_type);

        let data = self
            .client
            .request(COMMAND, "get_std_color", Some(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `creo/list_dirs`: subdirectories of Creo's working directory
    /// matching an optional filter pattern.
    pub async fn list_dirs(&self, dirname: Option<&str>) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "dirname", dirname);

        let data = self
            .client
            .request(COMMAND, "list_dirs", finish(data))
            .await?;
        envelope::optional_field(data, "dirlist").map(Option::unwrap_or_default)
    }

    /// `creo/list_files`: files in Creo's working directory matching an
    /// optional filter pattern.
    pub async fn list_files(&self, filename: Option<&str>) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "filename", filename);

        let data = self
            .client
            .request(COMMAND, "list_files", finish(data))
            .await?;
        envelope::optional_field(data, "filelist").map(Option::unwrap_or_default)
    }

    /// `creo/mkdir`: create a directory. Returns the resulting directory
    /// name.
    pub async fn mkdir(&self, dirname: &str) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "dirname", dirname);

        let data = self.client.request(COMMAND, "mkdir", Some(data)).await?;
        envelope::require_field(data, "dirname")
    }

    /// `creo/pwd`: Creo's current working directory.
    pub async fn pwd(&self) -> Result<String, CreosonError> {
        let data = self.client.request(COMMAND, "pwd", None).await?;
        envelope::require_field(data, "dirname")
    }

    /// `creo/rmdir`: remove a directory.
    pub async fn rmdir(&self, dirname: &str) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "dirname", dirname);

        self.client.request(COMMAND, "rmdir", Some(data)).await?;
        Ok(())
    }

    /// `creo/set_config`: set a `config.pro` option.
    pub async fn set_config(
        &self,
        name: &str,
        value: &str,
        ignore_errors: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put(&mut data, "value", value);
        put_opt(&mut data, "ignore_errors", ignore_errors);

        self.client
            .request(COMMAND, "set_config", Some(data))
            .await?;
        Ok(())
    }

    /// `creo/set_creo_version`: tell the server which major Creo version it
    /// is driving, for version-specific workarounds.
    pub async fn set_creo_version(&self, version: u32) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "version", version);

        self.client
            .request(COMMAND, "set_creo_version", Some(data))
            .await?;
        Ok(())
    }

    /// `creo/set_std_color`: set one standard system color.
    pub async fn set_std_color(
        &self,
        color_type: &str,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "color_type", color_type);
        put(&mut data, "red", red);
        put(&mut data, "green", green);
        put(&mut data, "blue", blue);

        self.client
            .request(COMMAND, "set_std_color", Some(data))
            .await?;
        Ok(())
    }
}
