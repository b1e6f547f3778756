//! Per-domain call builders.
//!
//! One module per CREOSON command group. Each exposes a borrowed handle
//! created from [`crate::client::CreosonClient`] accessor methods; the
//! handle builds the `data` mapping for a fixed command/function pair,
//! delegates the round trip to the client, and unwraps the response field
//! the operation documents.

pub mod bom;
pub mod creo;
pub mod dimension;
pub mod drawing;
pub mod familytable;
pub mod feature;
pub mod file;
pub mod geometry;
pub mod interface;
pub mod layer;
pub mod note;
pub mod parameter;
pub mod server;
pub mod view;
pub mod windchill;

pub use bom::BomApi;
pub use creo::CreoApi;
pub use dimension::DimensionApi;
pub use drawing::DrawingApi;
pub use familytable::FamilyTableApi;
pub use feature::FeatureApi;
pub use file::FileApi;
pub use geometry::GeometryApi;
pub use interface::InterfaceApi;
pub use layer::LayerApi;
pub use note::NoteApi;
pub use parameter::ParameterApi;
pub use server::ServerApi;
pub use view::ViewApi;
pub use windchill::WindchillApi;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CreosonError;

/// Insert a required parameter.
pub(crate) fn put(data: &mut Map<String, Value>, key: &str, value: impl Into<Value>) {
    data.insert(key.to_string(), value.into());
}

/// Insert an optional parameter only when the caller supplied it. Omission
/// means "use the remote default", never an explicit null.
pub(crate) fn put_opt(data: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
        data.insert(key.to_string(), value.into());
    }
}

/// Merge an options struct into `data`. Options structs skip unset fields
/// during serialization, so absent options never reach the wire.
pub(crate) fn merge_options<T: Serialize>(
    data: &mut Map<String, Value>,
    options: &T,
) -> Result<(), CreosonError> {
    match serde_json::to_value(options) {
        Ok(Value::Object(map)) => {
            data.extend(map);
            Ok(())
        }
        Ok(other) => Err(CreosonError::Encode {
            reason: format!("options did not serialize to an object: {other}"),
        }),
        Err(err) => Err(CreosonError::Encode {
            reason: err.to_string(),
        }),
    }
}

/// An empty `data` mapping is dropped from the envelope entirely.
pub(crate) fn finish(data: Map<String, Value>) -> Option<Map<String, Value>> {
    if data.is_empty() {
        None
    } else {
        Some(data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::{finish, merge_options, put, put_opt};

    #[derive(serde::Serialize, Default)]
    struct DemoOptions {
        #[serde(skip_serializing_if = "Option::is_none")]
        dirname: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        display: Option<bool>,
    }

    #[test]
    fn put_opt_skips_absent_values() {
        let mut data = Map::new();
        put(&mut data, "file", "box.prt");
        put_opt(&mut data, "dirname", None::<&str>);
        put_opt(&mut data, "display", Some(true));

        assert_eq!(data.get("file"), Some(&json!("box.prt")));
        assert!(!data.contains_key("dirname"));
        assert_eq!(data.get("display"), Some(&json!(true)));
    }

    #[test]
    fn merge_options_only_carries_set_fields() {
        let mut data = Map::new();
        let options = DemoOptions {
            display: Some(false),
            ..DemoOptions::default()
        };
        merge_options(&mut data, &options).expect("options should merge");

        assert_eq!(data.len(), 1);
        assert_eq!(data.get("display"), Some(&json!(false)));
    }

    #[test]
    fn finish_drops_an_empty_mapping() {
        assert!(finish(Map::new()).is_none());

        let mut data = Map::new();
        put(&mut data, "file", "box.prt");
        assert!(finish(data).is_some());
    }
}
