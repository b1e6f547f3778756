use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{finish, merge_options, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::Point3;

const COMMAND: &str = "drawing";

/// Handle for `drawing` operations on sheets, views and symbols.
#[derive(Clone, Copy, Debug)]
pub struct DrawingApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// Sheet format assignment, from [`DrawingApi::get_sheet_format`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SheetFormat {
    /// Format file name, e.g. `a.frm`.
    pub file: Option<String>,
    /// Format size label, e.g. `A4`.
    pub format: Option<String>,
}

/// Per-view outcome of [`DrawingApi::scale_view`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScaleViewReport {
    /// Views that took the new scale.
    pub success: Vec<String>,
    /// Views that rejected it.
    pub failed: Vec<String>,
}

/// 2D bounding box in drawing coordinates, from
/// [`DrawingApi::view_bound_box`].
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundingBox2D {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

/// A loaded symbol definition, from [`DrawingApi::load_symbol_def`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SymbolDefInfo {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Options for [`DrawingApi::create`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateDrawingOptions {
    /// Model the drawing shows; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Model name filter when several models are in session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Drawing name; derived from the model name when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Display the drawing after creating it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    /// Activate the drawing's window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activate: Option<bool>,
    /// Open in a new window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_window: Option<bool>,
}

/// Options for [`DrawingApi::create_gen_view`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateGenViewOptions {
    /// Drawing name; defaults to the active drawing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Name for the new view; defaults to the model view name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing_view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<u32>,
    /// Model shown in the view; defaults to the drawing's current model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Display style, e.g. `hidden_line`, `shaded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_data: Option<Value>,
    /// Show the view exploded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploded: Option<bool>,
}

/// Options for [`DrawingApi::create_proj_view`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateProjViewOptions {
    /// Drawing name; defaults to the active drawing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Name for the new view; generated by Creo when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawing_view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploded: Option<bool>,
}

/// Options for [`DrawingApi::create_symbol`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateSymbolOptions {
    /// Placement point in drawing coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<Point3>,
    /// Drawing name; defaults to the active drawing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Values for the symbol's variable text fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_values: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<u32>,
}

/// Options for [`DrawingApi::set_sheet_format`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct SetSheetFormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<u32>,
    /// Directory the format file lives in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirname: Option<String>,
    /// Drawing name; defaults to the active drawing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl DrawingApi<'_> {
    /// `drawing/add_model`: add a model to the drawing's model list.
    pub async fn add_model(&self, model: &str, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "model", model);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "add_model", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/add_sheet`: insert a sheet, at the end when no position is
    /// given.
    pub async fn add_sheet(
        &self,
        position: Option<u32>,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "position", position);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "add_sheet", finish(data))
            .await?;
        Ok(())
    }

    /// `drawing/create`: create a drawing from a template. Returns the new
    /// drawing name.
    pub async fn create(
        &self,
        template: &str,
        options: CreateDrawingOptions,
    ) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "template", template);
        merge_options(&mut data, &options)?;

        let data = self.client.request(COMMAND, "create", Some(data)).await?;
        envelope::require_field(data, "drawing")
    }

    /// `drawing/create_gen_view`: create a general view of a model view at
    /// a point.
    pub async fn create_gen_view(
        &self,
        model_view: &str,
        point: Point3,
        options: CreateGenViewOptions,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "model_view", model_view);
        put(&mut data, "point", point);
        merge_options(&mut data, &options)?;

        self.client
            .request(COMMAND, "create_gen_view", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/create_proj_view`: create a projection view from a parent
    /// view at a point.
    pub async fn create_proj_view(
        &self,
        parent_view: &str,
        point: Point3,
        options: CreateProjViewOptions,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "parent_view", parent_view);
        put(&mut data, "point", point);
        merge_options(&mut data, &options)?;

        self.client
            .request(COMMAND, "create_proj_view", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/create_symbol`: place a symbol instance on the drawing.
    pub async fn create_symbol(
        &self,
        symbol_file: &str,
        options: CreateSymbolOptions,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "symbol_file", symbol_file);
        merge_options(&mut data, &options)?;

        self.client
            .request(COMMAND, "create_symbol", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/delete_models`: remove models from the drawing, optionally
    /// deleting their views.
    pub async fn delete_models(
        &self,
        model: Option<&str>,
        file: Option<&str>,
        delete_views: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "model", model);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "delete_views", delete_views);

        self.client
            .request(COMMAND, "delete_models", finish(data))
            .await?;
        Ok(())
    }

    /// `drawing/delete_sheet`: delete a sheet.
    pub async fn delete_sheet(&self, sheet: u32, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "sheet", sheet);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "delete_sheet", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/delete_symbol_def`: remove a symbol definition and all its
    /// instances.
    pub async fn delete_symbol_def(
        &self,
        symbol_file: &str,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "symbol_file", symbol_file);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "delete_symbol_def", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/delete_symbol_inst`: remove one symbol instance by id.
    pub async fn delete_symbol_inst(
        &self,
        symbol_id: i64,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "symbol_id", symbol_id);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "delete_symbol_inst", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/delete_view`: delete a view, optionally with its children.
    pub async fn delete_view(
        &self,
        view: &str,
        sheet: Option<u32>,
        file: Option<&str>,
        delete_children: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "view", view);
        put_opt(&mut data, "sheet", sheet);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "delete_children", delete_children);

        self.client
            .request(COMMAND, "delete_view", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/get_cur_model`: the drawing's current model name.
    pub async fn get_cur_model(&self, file: Option<&str>) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_cur_model", finish(data))
            .await?;
        envelope::require_field(data, "file")
    }

    /// `drawing/get_cur_sheet`: the current sheet number.
    pub async fn get_cur_sheet(&self, file: Option<&str>) -> Result<u32, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_cur_sheet", finish(data))
            .await?;
        envelope::require_field(data, "sheet")
    }

    /// `drawing/get_num_sheets`: the sheet count.
    pub async fn get_num_sheets(&self, file: Option<&str>) -> Result<u32, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_num_sheets", finish(data))
            .await?;
        envelope::require_field(data, "num_sheets")
    }

    /// `drawing/get_num_views`: the view count.
    pub async fn get_num_views(&self, file: Option<&str>) -> Result<u32, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_num_views", finish(data))
            .await?;
        envelope::require_field(data, "num_views")
    }

    /// `drawing/get_sheet_format`: a sheet's format assignment.
    pub async fn get_sheet_format(
        &self,
        sheet: u32,
        file: Option<&str>,
    ) -> Result<SheetFormat, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "sheet", sheet);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_sheet_format", Some(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `drawing/get_sheet_scale`: a sheet's scale, relative to one of the
    /// drawing's models.
    pub async fn get_sheet_scale(
        &self,
        sheet: u32,
        model: Option<&str>,
        file: Option<&str>,
    ) -> Result<f64, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "sheet", sheet);
        put_opt(&mut data, "model", model);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_sheet_scale", Some(data))
            .await?;
        envelope::require_field(data, "scale")
    }

    /// `drawing/get_sheet_size`: a sheet's size label, e.g. `A4`.
    pub async fn get_sheet_size(
        &self,
        sheet: u32,
        file: Option<&str>,
    ) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "sheet", sheet);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_sheet_size", Some(data))
            .await?;
        envelope::require_field(data, "size")
    }

    /// `drawing/get_view_loc`: a view's location on its sheet.
    pub async fn get_view_loc(&self, view: &str, file: Option<&str>) -> Result<Point3, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "view", view);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_view_loc", Some(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `drawing/get_view_scale`: a view's scale.
    pub async fn get_view_scale(&self, view: &str, file: Option<&str>) -> Result<f64, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "view", view);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_view_scale", Some(data))
            .await?;
        envelope::require_field(data, "scale")
    }

    /// `drawing/get_view_sheet`: the sheet number a view sits on.
    pub async fn get_view_sheet(&self, view: &str, file: Option<&str>) -> Result<u32, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "view", view);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_view_sheet", Some(data))
            .await?;
        envelope::require_field(data, "sheet")
    }

    /// `drawing/is_symbol_def_loaded`: whether a symbol definition is
    /// loaded into the drawing.
    pub async fn is_symbol_def_loaded(
        &self,
        symbol_file: &str,
        file: Option<&str>,
    ) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "symbol_file", symbol_file);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "is_symbol_def_loaded", Some(data))
            .await?;
        envelope::require_field(data, "loaded")
    }

    /// `drawing/list_models`: model names assigned to the drawing.
    pub async fn list_models(
        &self,
        model: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "model", model);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "list_models", finish(data))
            .await?;
        envelope::optional_field(data, "files").map(Option::unwrap_or_default)
    }

    /// `drawing/list_symbols`: symbol instances on the drawing. Instance
    /// records are open-ended and stay raw JSON.
    pub async fn list_symbols(
        &self,
        file: Option<&str>,
        symbol_file: Option<&str>,
        sheet: Option<u32>,
    ) -> Result<Vec<Value>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "symbol_file", symbol_file);
        put_opt(&mut data, "sheet", sheet);

        let data = self
            .client
            .request(COMMAND, "list_symbols", finish(data))
            .await?;
        envelope::optional_field(data, "symbols").map(Option::unwrap_or_default)
    }

    /// `drawing/list_view_details`: view records with placement details.
    /// Per-view keys vary, so records stay raw JSON.
    pub async fn list_view_details(
        &self,
        view: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<Value>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "view", view);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "list_view_details", finish(data))
            .await?;
        envelope::optional_field(data, "views").map(Option::unwrap_or_default)
    }

    /// `drawing/list_views`: view names matching an optional filter
    /// pattern.
    pub async fn list_views(
        &self,
        view: Option<&str>,
        file: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "view", view);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "list_views", finish(data))
            .await?;
        envelope::optional_field(data, "views").map(Option::unwrap_or_default)
    }

    /// `drawing/load_symbol_def`: load a symbol definition into the
    /// drawing.
    pub async fn load_symbol_def(
        &self,
        symbol_file: &str,
        symbol_dir: Option<&str>,
        file: Option<&str>,
    ) -> Result<SymbolDefInfo, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "symbol_file", symbol_file);
        put_opt(&mut data, "symbol_dir", symbol_dir);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "load_symbol_def", Some(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `drawing/regenerate`: regenerate the drawing.
    pub async fn regenerate(&self, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "regenerate", finish(data))
            .await?;
        Ok(())
    }

    /// `drawing/regenerate_sheet`: regenerate one sheet, or all sheets when
    /// no number is given.
    pub async fn regenerate_sheet(
        &self,
        sheet: Option<u32>,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "sheet", sheet);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "regenerate_sheet", finish(data))
            .await?;
        Ok(())
    }

    /// `drawing/rename_view`: rename a view.
    pub async fn rename_view(
        &self,
        view: &str,
        new_view: &str,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "view", view);
        put(&mut data, "new_view", new_view);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "rename_view", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/scale_sheet`: set a sheet's scale.
    pub async fn scale_sheet(
        &self,
        sheet: u32,
        scale: f64,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "sheet", sheet);
        put(&mut data, "scale", scale);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "scale_sheet", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/scale_view`: set view scales; all views when no name is
    /// given.
    pub async fn scale_view(
        &self,
        scale: f64,
        view: Option<&str>,
        file: Option<&str>,
    ) -> Result<ScaleViewReport, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "scale", scale);
        put_opt(&mut data, "view", view);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "scale_view", Some(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `drawing/select_sheet`: make a sheet current.
    pub async fn select_sheet(&self, sheet: u32, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "sheet", sheet);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "select_sheet", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/set_cur_model`: set the drawing's current model.
    pub async fn set_cur_model(&self, model: &str, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "model", model);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "set_cur_model", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/set_sheet_format`: assign a format file to a sheet.
    pub async fn set_sheet_format(
        &self,
        format_file: &str,
        options: SetSheetFormatOptions,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "format_file", format_file);
        merge_options(&mut data, &options)?;

        self.client
            .request(COMMAND, "set_sheet_format", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/set_view_loc`: move a view to a point on its sheet.
    pub async fn set_view_loc(
        &self,
        view: &str,
        point: Point3,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "view", view);
        put(&mut data, "point", point);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "set_view_loc", Some(data))
            .await?;
        Ok(())
    }

    /// `drawing/view_bound_box`: the 2D bounding box of a view.
    pub async fn view_bound_box(
        &self,
        view: Option<&str>,
        file: Option<&str>,
    ) -> Result<BoundingBox2D, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "view", view);
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "view_bound_box", finish(data))
            .await?;
        envelope::whole_data(data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::CreateDrawingOptions;

    #[test]
    fn create_options_omit_unset_fields() {
        let options = CreateDrawingOptions {
            scale: Some(2.0),
            display: Some(true),
            ..CreateDrawingOptions::default()
        };

        assert_eq!(
            serde_json::to_value(options).unwrap(),
            json!({"scale": 2.0, "display": true})
        );
    }
}
