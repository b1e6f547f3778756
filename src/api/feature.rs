use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parameter::ParameterInfo;
use super::{finish, merge_options, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::{FeatureRef, FeatureStatus, OneOrMany};

const COMMAND: &str = "feature";

/// Handle for `feature` operations.
#[derive(Clone, Copy, Debug)]
pub struct FeatureApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// One feature record from [`FeatureApi::list`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeatureInfo {
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub feat_type: Option<String>,
    pub feat_id: Option<i64>,
    pub feat_number: Option<i64>,
    pub path: Option<Vec<i64>>,
}

/// Options for [`FeatureApi::delete`], [`FeatureApi::resume`] and
/// [`FeatureApi::suppress`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct FeatureSelectOptions {
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Only act on features with this regeneration status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
    /// Only act on features of this type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub feat_type: Option<String>,
    /// Also act on dependent children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,
    /// Carry child features along (resume/suppress only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_children: Option<bool>,
}

/// Options for [`FeatureApi::list`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListFeaturesOptions {
    /// Feature name filter pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub feat_type: Option<String>,
    /// Include component id paths in the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_datum_features: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inc_unnamed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_comp_features: Option<bool>,
}

/// Options for [`FeatureApi::list_params`] and
/// [`FeatureApi::param_exists`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListFeatureParamsOptions {
    /// Feature name filter pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub feat_type: Option<String>,
    /// Only return parameters whose value matches this pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Return string values Base64-encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_datum_features: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inc_unnamed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_comp_features: Option<bool>,
}

/// Options for [`FeatureApi::set_param`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct SetFeatureParamOptions {
    /// Feature name; all features when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New value; cleared when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Parameter type such as `STRING`, `DOUBLE`, `INTEGER` or `BOOL`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fail instead of creating the parameter when it does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_create: Option<bool>,
}

impl FeatureApi<'_> {
    /// `feature/delete`: delete features by name(s), status or type.
    pub async fn delete(
        &self,
        name: Option<OneOrMany>,
        options: FeatureSelectOptions,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        if let Some(name) = name {
            name.insert_into(&mut data, "name", "names");
        }
        merge_options(&mut data, &options)?;

        self.client.request(COMMAND, "delete", finish(data)).await?;
        Ok(())
    }

    /// `feature/delete_param`: delete feature parameters matching the
    /// name/parameter filter patterns.
    pub async fn delete_param(
        &self,
        name: Option<&str>,
        param: Option<&str>,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "name", name);
        put_opt(&mut data, "param", param);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "delete_param", finish(data))
            .await?;
        Ok(())
    }

    /// `feature/list`: feature records matching the filters.
    pub async fn list(
        &self,
        options: ListFeaturesOptions,
    ) -> Result<Vec<FeatureInfo>, CreosonError> {
        let mut data = Map::new();
        merge_options(&mut data, &options)?;

        let data = self.client.request(COMMAND, "list", finish(data)).await?;
        envelope::optional_field(data, "featlist").map(Option::unwrap_or_default)
    }

    /// `feature/list_params`: feature parameter records.
    pub async fn list_params(
        &self,
        param: Option<OneOrMany>,
        options: ListFeatureParamsOptions,
    ) -> Result<Vec<ParameterInfo>, CreosonError> {
        let mut data = Map::new();
        if let Some(param) = param {
            param.insert_into(&mut data, "param", "params");
        }
        merge_options(&mut data, &options)?;

        let data = self
            .client
            .request(COMMAND, "list_params", finish(data))
            .await?;
        envelope::optional_field(data, "paramlist").map(Option::unwrap_or_default)
    }

    /// `feature/list_group_features`: features belonging to a group.
    pub async fn list_group_features(
        &self,
        group_name: &str,
        feat_type: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<FeatureInfo>, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "group_name", group_name);
        put_opt(&mut data, "type", feat_type);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "list_group_features", Some(data))
            .await?;
        envelope::optional_field(data, "featlist").map(Option::unwrap_or_default)
    }

    /// `feature/list_pattern_features`: features belonging to a pattern.
    pub async fn list_pattern_features(
        &self,
        patt_name: &str,
        feat_type: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<FeatureInfo>, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "patt_name", patt_name);
        put_opt(&mut data, "type", feat_type);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "list_pattern_features", Some(data))
            .await?;
        envelope::optional_field(data, "featlist").map(Option::unwrap_or_default)
    }

    /// `feature/param_exists`: whether the named feature parameters exist.
    pub async fn param_exists(
        &self,
        name: Option<&str>,
        param: Option<OneOrMany>,
        file: Option<&str>,
    ) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "name", name);
        if let Some(param) = param {
            param.insert_into(&mut data, "param", "params");
        }
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "param_exists", finish(data))
            .await?;
        envelope::require_field(data, "exists")
    }

    /// `feature/rename`: rename a feature addressed by name or id.
    pub async fn rename(
        &self,
        feature: FeatureRef,
        new_name: &str,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        feature.insert_into(&mut data);
        put(&mut data, "new_name", new_name);
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "rename", Some(data)).await?;
        Ok(())
    }

    /// `feature/resume`: resume suppressed features.
    pub async fn resume(
        &self,
        name: Option<OneOrMany>,
        options: FeatureSelectOptions,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        if let Some(name) = name {
            name.insert_into(&mut data, "name", "names");
        }
        merge_options(&mut data, &options)?;

        self.client.request(COMMAND, "resume", finish(data)).await?;
        Ok(())
    }

    /// `feature/set_param`: create or update a feature parameter.
    pub async fn set_param(
        &self,
        param: &str,
        options: SetFeatureParamOptions,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "param", param);
        merge_options(&mut data, &options)?;

        self.client
            .request(COMMAND, "set_param", Some(data))
            .await?;
        Ok(())
    }

    /// `feature/suppress`: suppress features.
    pub async fn suppress(
        &self,
        name: Option<OneOrMany>,
        options: FeatureSelectOptions,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        if let Some(name) = name {
            name.insert_into(&mut data, "name", "names");
        }
        merge_options(&mut data, &options)?;

        self.client
            .request(COMMAND, "suppress", finish(data))
            .await?;
        Ok(())
    }

    /// `feature/user_select_csys`: prompt the user to pick coordinate
    /// systems in the Creo window.
    pub async fn user_select_csys(
        &self,
        file: Option<&str>,
        max: Option<u32>,
    ) -> Result<Vec<FeatureInfo>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "max", max);

        let data = self
            .client
            .request(COMMAND, "user_select_csys", finish(data))
            .await?;
        envelope::optional_field(data, "featlist").map(Option::unwrap_or_default)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FeatureSelectOptions;
    use crate::model::FeatureStatus;

    #[test]
    fn select_options_serialize_status_uppercase_and_rename_type() {
        let options = FeatureSelectOptions {
            status: Some(FeatureStatus::Suppressed),
            feat_type: Some("HOLE".to_string()),
            ..FeatureSelectOptions::default()
        };

        assert_eq!(
            serde_json::to_value(options).unwrap(),
            json!({"status": "SUPPRESSED", "type": "HOLE"})
        );
    }
}
