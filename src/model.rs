use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CreosonError;

/// Argument accepted either as a single name or as a list of names.
///
/// Several operations take the same logical parameter under two request
/// keys, singular for one value and plural for a list (for example `file`
/// vs `files`). The variant decides which key is populated; the other is
/// never sent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OneOrMany {
    /// One name, sent under the singular key.
    One(String),
    /// Several names, sent under the plural key.
    Many(Vec<String>),
}

impl OneOrMany {
    pub(crate) fn insert_into(self, data: &mut Map<String, Value>, singular: &str, plural: &str) {
        match self {
            Self::One(name) => {
                data.insert(singular.to_string(), Value::String(name));
            }
            Self::Many(names) => {
                data.insert(
                    plural.to_string(),
                    Value::Array(names.into_iter().map(Value::String).collect()),
                );
            }
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for OneOrMany {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for OneOrMany {
    fn from(names: &[&str]) -> Self {
        Self::Many(names.iter().map(|name| (*name).to_string()).collect())
    }
}

/// Feature addressed either by name or by numeric feature id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FeatureRef {
    /// Feature name, sent as `name`.
    Name(String),
    /// Feature id, sent as `feat_id`.
    Id(i32),
}

impl FeatureRef {
    pub(crate) fn insert_into(self, data: &mut Map<String, Value>) {
        match self {
            Self::Name(name) => {
                data.insert("name".to_string(), Value::String(name));
            }
            Self::Id(id) => {
                data.insert("feat_id".to_string(), Value::from(id));
            }
        }
    }
}

impl From<&str> for FeatureRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FeatureRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<i32> for FeatureRef {
    fn from(id: i32) -> Self {
        Self::Id(id)
    }
}

/// Regeneration status a feature is filtered or acted on by.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeatureStatus {
    Active,
    Inactive,
    Failed,
    Unregenerated,
    Suppressed,
}

impl FeatureStatus {
    const ALLOWED: &'static str = "ACTIVE, INACTIVE, FAILED, UNREGENERATED, SUPPRESSED";

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Failed => "FAILED",
            Self::Unregenerated => "UNREGENERATED",
            Self::Suppressed => "SUPPRESSED",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeatureStatus {
    type Err = CreosonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "FAILED" => Ok(Self::Failed),
            "UNREGENERATED" => Ok(Self::Unregenerated),
            "SUPPRESSED" => Ok(Self::Suppressed),
            _ => Err(CreosonError::Validation {
                param: "feature status",
                value: value.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// Target format for a geometry export.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
    Dxf,
    Iges,
    Pv,
    Step,
    Vrml,
}

impl ExportFormat {
    const ALLOWED: &'static str = "DXF, IGES, PV, STEP, VRML";

    fn as_str(self) -> &'static str {
        match self {
            Self::Dxf => "DXF",
            Self::Iges => "IGES",
            Self::Pv => "PV",
            Self::Step => "STEP",
            Self::Vrml => "VRML",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = CreosonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "DXF" => Ok(Self::Dxf),
            "IGES" => Ok(Self::Iges),
            "PV" => Ok(Self::Pv),
            "STEP" => Ok(Self::Step),
            "VRML" => Ok(Self::Vrml),
            _ => Err(CreosonError::Validation {
                param: "export format",
                value: value.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// Target format for a rendered image export.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageExportFormat {
    Bmp,
    Eps,
    Jpeg,
    Tiff,
}

impl ImageExportFormat {
    const ALLOWED: &'static str = "BMP, EPS, JPEG, TIFF";

    fn as_str(self) -> &'static str {
        match self {
            Self::Bmp => "BMP",
            Self::Eps => "EPS",
            Self::Jpeg => "JPEG",
            Self::Tiff => "TIFF",
        }
    }
}

impl fmt::Display for ImageExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImageExportFormat {
    type Err = CreosonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "BMP" => Ok(Self::Bmp),
            "EPS" => Ok(Self::Eps),
            "JPEG" => Ok(Self::Jpeg),
            "TIFF" => Ok(Self::Tiff),
            _ => Err(CreosonError::Validation {
                param: "image export format",
                value: value.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// Source format for a file import.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImportFormat {
    Iges,
    Neutral,
    Pv,
    Step,
}

impl ImportFormat {
    const ALLOWED: &'static str = "IGES, NEUTRAL, PV, STEP";

    fn as_str(self) -> &'static str {
        match self {
            Self::Iges => "IGES",
            Self::Neutral => "NEUTRAL",
            Self::Pv => "PV",
            Self::Step => "STEP",
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImportFormat {
    type Err = CreosonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "IGES" => Ok(Self::Iges),
            "NEUTRAL" => Ok(Self::Neutral),
            "PV" => Ok(Self::Pv),
            "STEP" => Ok(Self::Step),
            _ => Err(CreosonError::Validation {
                param: "import format",
                value: value.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// 3D point in model or drawing coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for Value {
    fn from(point: Point3) -> Self {
        serde_json::json!({"x": point.x, "y": point.y, "z": point.z})
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use super::{FeatureRef, FeatureStatus, ImageExportFormat, OneOrMany};
    use crate::error::CreosonError;

    #[test]
    fn one_populates_only_the_singular_key() {
        let mut data = Map::new();
        OneOrMany::from("box.prt").insert_into(&mut data, "file", "files");

        assert_eq!(data.get("file"), Some(&json!("box.prt")));
        assert!(!data.contains_key("files"));
    }

    #[test]
    fn many_populates_only_the_plural_key() {
        let mut data = Map::new();
        OneOrMany::from(vec!["box.prt", "bracket.prt"]).insert_into(&mut data, "file", "files");

        assert_eq!(data.get("files"), Some(&json!(["box.prt", "bracket.prt"])));
        assert!(!data.contains_key("file"));
    }

    #[test]
    fn feature_ref_picks_name_or_id_key() {
        let mut by_name = Map::new();
        FeatureRef::from("FLANGE").insert_into(&mut by_name);
        assert_eq!(by_name.get("name"), Some(&json!("FLANGE")));
        assert!(!by_name.contains_key("feat_id"));

        let mut by_id = Map::new();
        FeatureRef::from(42).insert_into(&mut by_id);
        assert_eq!(by_id.get("feat_id"), Some(&json!(42)));
        assert!(!by_id.contains_key("name"));
    }

    #[test]
    fn feature_status_round_trips_known_values() {
        let status: FeatureStatus = "SUPPRESSED".parse().expect("known value should parse");
        assert_eq!(status, FeatureStatus::Suppressed);
        assert_eq!(status.to_string(), "SUPPRESSED");
        assert_eq!(serde_json::to_value(status).unwrap(), json!("SUPPRESSED"));
    }

    #[test]
    fn feature_status_rejects_unknown_values_locally() {
        let err = "SLEEPING"
            .parse::<FeatureStatus>()
            .expect_err("unknown value should be rejected");

        match err {
            CreosonError::Validation { param, value, .. } => {
                assert_eq!(param, "feature status");
                assert_eq!(value, "SLEEPING");
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn image_format_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(ImageExportFormat::Jpeg).unwrap(),
            json!("JPEG")
        );
    }
}
