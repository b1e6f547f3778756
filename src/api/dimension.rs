use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{finish, merge_options, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::OneOrMany;

const COMMAND: &str = "dimension";

/// Handle for `dimension` operations.
#[derive(Clone, Copy, Debug)]
pub struct DimensionApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// One dimension record from [`DimensionApi::list`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DimensionInfo {
    pub name: String,
    /// Numeric value, or the Base64 text for encoded dimensions.
    pub value: Value,
    pub encoded: Option<bool>,
    pub dim_type: Option<String>,
}

/// Options for [`DimensionApi::list`] and [`DimensionApi::list_detail`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListDimsOptions {
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Dimension type filter, e.g. `linear`, `radial`, `diameter`,
    /// `angular`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim_type: Option<String>,
    /// Return text values Base64-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<bool>,
    /// Highlight the listed dimensions in the session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<bool>,
}

/// Options for [`DimensionApi::show`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ShowDimOptions {
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Assembly the model occurs in, for occurrence dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,
    /// Component id path from the assembly down to the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<i64>>,
}

impl DimensionApi<'_> {
    /// `dimension/copy`: copy a dimension, optionally to another model.
    pub async fn copy(
        &self,
        name: &str,
        to_name: &str,
        file: Option<&str>,
        to_file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put(&mut data, "to_name", to_name);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "to_file", to_file);

        self.client.request(COMMAND, "copy", Some(data)).await?;
        Ok(())
    }

    /// `dimension/list`: dimension records, filterable by name(s) and type.
    pub async fn list(
        &self,
        name: Option<OneOrMany>,
        options: ListDimsOptions,
    ) -> Result<Vec<DimensionInfo>, CreosonError> {
        let mut data = Map::new();
        if let Some(name) = name {
            name.insert_into(&mut data, "name", "names");
        }
        merge_options(&mut data, &options)?;

        let data = self.client.request(COMMAND, "list", finish(data)).await?;
        envelope::optional_field(data, "dimlist").map(Option::unwrap_or_default)
    }

    /// `dimension/list_detail`: like [`DimensionApi::list`] with placement
    /// and tolerance details. The per-dimension detail keys vary with the
    /// dimension type, so records stay raw JSON.
    pub async fn list_detail(
        &self,
        name: Option<OneOrMany>,
        options: ListDimsOptions,
    ) -> Result<Vec<Value>, CreosonError> {
        let mut data = Map::new();
        if let Some(name) = name {
            name.insert_into(&mut data, "name", "names");
        }
        merge_options(&mut data, &options)?;

        let data = self
            .client
            .request(COMMAND, "list_detail", finish(data))
            .await?;
        envelope::optional_field(data, "dimlist").map(Option::unwrap_or_default)
    }

    /// `dimension/set`: set a dimension value. Numeric for regular
    /// dimensions, a string for encoded text.
    pub async fn set(
        &self,
        name: &str,
        value: impl Into<Value>,
        file: Option<&str>,
        encoded: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put(&mut data, "value", value);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "encoded", encoded);

        self.client.request(COMMAND, "set", Some(data)).await?;
        Ok(())
    }

    /// `dimension/set_text`: set dimension text, keeping the value.
    pub async fn set_text(
        &self,
        name: &str,
        file: Option<&str>,
        text: Option<&str>,
        encoded: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "text", text);
        put_opt(&mut data, "encoded", encoded);

        self.client.request(COMMAND, "set_text", Some(data)).await?;
        Ok(())
    }

    /// `dimension/show`: show a dimension in the model, optionally at an
    /// assembly occurrence.
    pub async fn show(&self, name: &str, options: ShowDimOptions) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        merge_options(&mut data, &options)?;

        self.client.request(COMMAND, "show", Some(data)).await?;
        Ok(())
    }

    /// `dimension/user_select`: prompt the user to pick dimensions in the
    /// Creo window.
    pub async fn user_select(
        &self,
        file: Option<&str>,
        max: Option<u32>,
    ) -> Result<Vec<DimensionInfo>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "max", max);

        let data = self
            .client
            .request(COMMAND, "user_select", finish(data))
            .await?;
        envelope::optional_field(data, "dimlist").map(Option::unwrap_or_default)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ListDimsOptions;

    #[test]
    fn list_options_only_serialize_set_fields() {
        let options = ListDimsOptions {
            dim_type: Some("radial".to_string()),
            ..ListDimsOptions::default()
        };

        assert_eq!(
            serde_json::to_value(options).unwrap(),
            json!({"dim_type": "radial"})
        );
    }
}
