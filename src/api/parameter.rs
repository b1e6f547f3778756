use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{finish, merge_options, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::OneOrMany;

const COMMAND: &str = "parameter";

/// Handle for `parameter` operations on model parameters.
#[derive(Clone, Copy, Debug)]
pub struct ParameterApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// One parameter record from [`ParameterApi::list`] and
/// `feature/list_params`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParameterInfo {
    pub name: String,
    /// Raw value; the JSON type follows the parameter type.
    pub value: Value,
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    pub designate: Option<bool>,
    pub encoded: Option<bool>,
    pub owner_name: Option<String>,
    pub owner_id: Option<i64>,
    pub owner_type: Option<String>,
    pub description: Option<String>,
}

/// Options for [`ParameterApi::list`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListParamsOptions {
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Return string values Base64-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<bool>,
    /// Only return parameters whose value matches this pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Options for [`ParameterApi::set`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct SetParamOptions {
    /// New value; cleared when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Parameter type such as `STRING`, `DOUBLE`, `INTEGER` or `BOOL`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Whether the supplied value is Base64-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<bool>,
    /// Designate the parameter for Windchill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fail instead of creating the parameter when it does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_create: Option<bool>,
}

impl ParameterApi<'_> {
    /// `parameter/copy`: copy a parameter, optionally to another model.
    pub async fn copy(
        &self,
        name: &str,
        to_name: &str,
        file: Option<&str>,
        to_file: Option<&str>,
        designate: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put(&mut data, "to_name", to_name);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "to_file", to_file);
        put_opt(&mut data, "designate", designate);

        self.client.request(COMMAND, "copy", Some(data)).await?;
        Ok(())
    }

    /// `parameter/delete`: delete one or several parameters.
    pub async fn delete(&self, name: OneOrMany, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        name.insert_into(&mut data, "name", "names");
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "delete", Some(data)).await?;
        Ok(())
    }

    /// `parameter/exists`: whether the named parameters exist.
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

    /// `parameter/list`: parameter records, filterable by name(s) and
    /// value pattern.
    pub async fn list(
        &self,
        name: Option<OneOrMany>,
        options: ListParamsOptions,
    ) -> Result<Vec<ParameterInfo>, CreosonError> {
        let mut data = Map::new();
        if let Some(name) = name {
            name.insert_into(&mut data, "name", "names");
        }
        merge_options(&mut data, &options)?;

        let data = self.client.request(COMMAND, "list", finish(data)).await?;
        envelope::optional_field(data, "paramlist").map(Option::unwrap_or_default)
    }

    /// `parameter/set`: create or update a parameter.
    pub async fn set(&self, name: &str, options: SetParamOptions) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        merge_options(&mut data, &options)?;

        self.client.request(COMMAND, "set", Some(data)).await?;
        Ok(())
    }

    /// `parameter/set_designated`: set or clear a parameter's designated
    /// flag.
    pub async fn set_designated(
        &self,
        name: &str,
        designate: bool,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "name", name);
        put(&mut data, "designate", designate);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "set_designated", Some(data))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::SetParamOptions;

    #[test]
    fn set_options_omit_unset_fields_and_rename_type() {
        let options = SetParamOptions {
            value: Some(json!(42)),
            param_type: Some("INTEGER".to_string()),
            ..SetParamOptions::default()
        };

        let value = serde_json::to_value(options).unwrap();
        assert_eq!(value, json!({"value": 42, "type": "INTEGER"}));
    }
}
