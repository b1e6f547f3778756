use serde::{Deserialize, Serialize};
use serde_json::Map;

use super::{finish, merge_options, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::{OneOrMany, Point3};

const COMMAND: &str = "note";

/// Handle for `note` operations on model and drawing notes.
#[derive(Clone, Copy, Debug)]
pub struct NoteApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// One note record from [`NoteApi::get`] and [`NoteApi::list`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoteInfo {
    pub file: Option<String>,
    pub name: String,
    pub value: Option<String>,
    pub encoded: Option<bool>,
    pub url: Option<String>,
    pub location: Option<Point3>,
}

/// Options for [`NoteApi::set`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct SetNoteOptions {
    /// Model or drawing name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Whether the supplied value is Base64-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<bool>,
    /// New note text; cleared when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Placement for drawing notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Point3>,
}

impl NoteApi<'_> {
    /// `note/copy`: copy a note, optionally to another model.
    pub async fn copy(
        &self,
        name: &str,
        to_name: Option<&str>,
        file: Option<&str>,
        to_file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put_opt(&mut data, "to_name", to_name);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "to_file", to_file);

        self.client.request(COMMAND, "copy", Some(data)).await?;
        Ok(())
    }

    /// `note/delete`: delete one or several notes.
    pub async fn delete(&self, name: OneOrMany, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        name.insert_into(&mut data, "name", "names");
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "delete", Some(data)).await?;
        Ok(())
    }

    /// `note/exists`: whether the named notes exist.
    pub async fn exists(
        &self,
        name: Option<OneOrMany>,
        file: Option<&str>,
    ) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        if let Some(name) = name {
            name.insert_into(&mut data, "name", "names");
        }
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "exists", finish(data)).await?;
        envelope::require_field(data, "exists")
    }

    /// `note/get`: one note's text and placement.
    pub async fn get(&self, name: &str, file: Option<&str>) -> Result<NoteInfo, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "get", Some(data)).await?;
        envelope::whole_data(data)
    }

    /// `note/list`: note records, filterable by name(s) and value pattern.
    pub async fn list(
        &self,
        name: Option<OneOrMany>,
        file: Option<&str>,
        value: Option<&str>,
        get_expanded: Option<bool>,
    ) -> Result<Vec<NoteInfo>, CreosonError> {
        let mut data = Map::new();
        if let Some(name) = name {
            name.insert_into(&mut data, "name", "names");
        }
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "value", value);
        put_opt(&mut data, "get_expanded", get_expanded);

        let data = self.client.request(COMMAND, "list", finish(data)).await?;
        envelope::optional_field(data, "itemlist").map(Option::unwrap_or_default)
    }

    /// `note/set`: create or update a note.
    pub async fn set(&self, name: &str, options: SetNoteOptions) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        merge_options(&mut data, &options)?;

        self.client.request(COMMAND, "set", Some(data)).await?;
        Ok(())
    }
}
