use serde::Deserialize;
use serde_json::{Map, Value};

use super::{finish, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::Point3;

const COMMAND: &str = "geometry";

/// Handle for `geometry` interrogation operations.
#[derive(Clone, Copy, Debug)]
pub struct GeometryApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// Axis-aligned bounding box of a model.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
}

/// One surface record from [`GeometryApi::get_surfaces`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SurfaceInfo {
    pub surface_id: Option<i64>,
    pub area: Option<f64>,
    pub min_extent: Option<Point3>,
    pub max_extent: Option<Point3>,
}

impl GeometryApi<'_> {
    /// `geometry/bound_box`: bounding box of a model.
    pub async fn bound_box(&self, file: Option<&str>) -> Result<BoundingBox, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "bound_box", finish(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `geometry/get_edges`: edge contours of the given surfaces. The
    /// per-contour geometry is open-ended and stays raw JSON.
    pub async fn get_edges(
        &self,
        surface_ids: Vec<i64>,
        file: Option<&str>,
    ) -> Result<Vec<Value>, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "surface_ids", surface_ids);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_edges", Some(data))
            .await?;
        envelope::optional_field(data, "contourlist").map(Option::unwrap_or_default)
    }

    /// `geometry/get_surfaces`: surface records of a model.
    pub async fn get_surfaces(&self, file: Option<&str>) -> Result<Vec<SurfaceInfo>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_surfaces", finish(data))
            .await?;
        envelope::optional_field(data, "surflist").map(Option::unwrap_or_default)
    }
}
