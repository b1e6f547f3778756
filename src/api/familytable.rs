use serde::Deserialize;
use serde_json::{Map, Value};

use super::{finish, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;

const COMMAND: &str = "familytable";

/// Handle for `familytable` operations on family-table instances.
#[derive(Clone, Copy, Debug)]
pub struct FamilyTableApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// One family-table cell. `value` keeps the JSON type the server reports
/// for the column's data type.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FamilyTableCell {
    pub instance: Option<String>,
    pub colid: String,
    pub value: Value,
    pub datatype: Option<String>,
    pub coltype: Option<String>,
}

impl FamilyTableApi<'_> {
    /// `familytable/add_inst`: add an instance row.
    pub async fn add_inst(&self, instance: &str, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "instance", instance);
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "add_inst", Some(data)).await?;
        Ok(())
    }

    /// `familytable/create_inst`: create a new model from an instance row.
    /// Returns the new model name.
    pub async fn create_inst(
        &self,
        instance: &str,
        file: Option<&str>,
    ) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "instance", instance);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "create_inst", Some(data))
            .await?;
        envelope::require_field(data, "name")
    }

    /// `familytable/delete`: delete the whole family table.
    pub async fn delete(&self, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "delete", finish(data)).await?;
        Ok(())
    }

    /// `familytable/delete_inst`: delete an instance row.
    pub async fn delete_inst(
        &self,
        instance: &str,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "instance", instance);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "delete_inst", Some(data))
            .await?;
        Ok(())
    }

    /// `familytable/exists`: whether an instance row exists.
    pub async fn exists(&self, instance: &str, file: Option<&str>) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "instance", instance);
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "exists", Some(data)).await?;
        envelope::require_field(data, "exists")
    }

    /// `familytable/get_cell`: one cell of an instance row.
    pub async fn get_cell(
        &self,
        instance: &str,
        colid: &str,
        file: Option<&str>,
    ) -> Result<FamilyTableCell, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "instance", instance);
        put(&mut data, "colid", colid);
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "get_cell", Some(data)).await?;
        envelope::whole_data(data)
    }

    /// `familytable/get_header`: the table's column definitions.
    pub async fn get_header(
        &self,
        file: Option<&str>,
    ) -> Result<Vec<FamilyTableCell>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_header", finish(data))
            .await?;
        envelope::optional_field(data, "columns").map(Option::unwrap_or_default)
    }

    /// `familytable/get_parents`: generic models above this one in the
    /// family hierarchy.
    pub async fn get_parents(&self, file: Option<&str>) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_parents", finish(data))
            .await?;
        envelope::optional_field(data, "parents").map(Option::unwrap_or_default)
    }

    /// `familytable/get_row`: all cells of one instance row.
    pub async fn get_row(
        &self,
        instance: &str,
        file: Option<&str>,
    ) -> Result<Vec<FamilyTableCell>, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "instance", instance);
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "get_row", Some(data)).await?;
        envelope::optional_field(data, "columns").map(Option::unwrap_or_default)
    }

    /// `familytable/list`: instance names matching an optional filter
    /// pattern.
    pub async fn list(
        &self,
        instance: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "instance", instance);
        put_opt(&mut data, "file", file);

        let data = self.client.request(COMMAND, "list", finish(data)).await?;
        envelope::optional_field(data, "instances").map(Option::unwrap_or_default)
    }

    /// `familytable/list_tree`: the full instance hierarchy, including
    /// nested family tables. The tree shape is open-ended and stays raw
    /// JSON.
    pub async fn list_tree(
        &self,
        file: Option<&str>,
        erase: Option<bool>,
    ) -> Result<Value, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "erase", erase);

        let data = self
            .client
            .request(COMMAND, "list_tree", finish(data))
            .await?;
        envelope::require_field(data, "children")
    }

    /// `familytable/replace`: swap one instance for another inside an
    /// assembly.
    pub async fn replace(
        &self,
        cur_model: &str,
        new_inst: &str,
        file: Option<&str>,
        cur_inst: Option<&str>,
        path: Option<Vec<i64>>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "cur_model", cur_model);
        put(&mut data, "new_inst", new_inst);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "cur_inst", cur_inst);
        put_opt(&mut data, "path", path);

        self.client.request(COMMAND, "replace", Some(data)).await?;
        Ok(())
    }
}
