use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{finish, merge_options};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;

const COMMAND: &str = "bom";

/// Handle for `bom` operations.
#[derive(Clone, Copy, Debug)]
pub struct BomApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// Options for [`BomApi::get_paths`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct GetPathsOptions {
    /// Assembly name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Include component paths in the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<bool>,
    /// Include skeleton models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeletons: Option<bool>,
    /// Only report the top level of the hierarchy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_level: Option<bool>,
    /// Include component transform tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_transforms: Option<bool>,
    /// Leave out components excluded from the current simplified rep.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_inactive: Option<bool>,
}

/// Assembly hierarchy returned by [`BomApi::get_paths`].
///
/// The nested `children` tree is open-ended (depth and per-node keys depend
/// on the request flags), so it stays raw JSON.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct BomHierarchy {
    pub file: Option<String>,
    pub generic: Option<String>,
    pub children: Option<Value>,
    pub has_simprep: Option<bool>,
}

impl BomApi<'_> {
    /// `bom/get_paths`: component hierarchy of an assembly.
    pub async fn get_paths(&self, options: GetPathsOptions) -> Result<BomHierarchy, CreosonError> {
        let mut data = Map::new();
        merge_options(&mut data, &options)?;

        let data = self
            .client
            .request(COMMAND, "get_paths", finish(data))
            .await?;
        envelope::whole_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::GetPathsOptions;

    #[test]
    fn default_options_serialize_to_an_empty_object() {
        let value = serde_json::to_value(GetPathsOptions::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
