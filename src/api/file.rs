use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{finish, merge_options, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::{OneOrMany, Point3};

const COMMAND: &str = "file";

/// Handle for `file` operations on models and windows.
#[derive(Clone, Copy, Debug)]
pub struct FileApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// The active model, from [`FileApi::get_active`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActiveFile {
    pub dirname: Option<String>,
    pub file: Option<String>,
}

/// Basic model info, from [`FileApi::get_fileinfo`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    pub dirname: Option<String>,
    pub file: Option<String>,
    pub revision: Option<i64>,
}

/// Family-table instances of a model, from [`FileApi::list_instances`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct InstanceList {
    pub dirname: Option<String>,
    pub generic: Option<String>,
    pub files: Vec<String>,
}

/// Mass properties of a model, from [`FileApi::massprops`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MassProperties {
    pub volume: Option<f64>,
    pub mass: Option<f64>,
    pub density: Option<f64>,
    pub surface_area: Option<f64>,
    /// Center of gravity in model coordinates.
    pub ctr_grav: Option<Point3>,
    /// Inertia tensor about the center of gravity; shape depends on the
    /// Creo version, kept raw.
    pub ctr_grav_inertia_tensor: Option<Value>,
    pub coord_sys_inertia: Option<Value>,
}

/// Result of [`FileApi::open`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OpenReport {
    pub dirname: Option<String>,
    pub files: Vec<String>,
    pub revision: Option<i64>,
}

/// Result of [`FileApi::assemble`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AssembleReport {
    pub dirname: Option<String>,
    pub files: Vec<String>,
    pub revision: Option<i64>,
    /// Id of the component feature created in the assembly.
    pub featureid: Option<i64>,
}

/// Options for [`FileApi::assemble`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct AssembleOptions {
    /// Source directory; Creo's working directory when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirname: Option<String>,
    /// Generic name when assembling a family-table instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic: Option<String>,
    /// Target assembly; defaults to the active assembly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub into_asm: Option<String>,
    /// Component id path to the subassembly to assemble into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<i64>>,
    /// Reference model the constraints refer to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_model: Option<String>,
    /// Initial placement transform; raw JLTransform mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Value>,
    /// Assembly constraints; raw JLConstraint mappings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<Value>>,
    /// Package the component instead of constraining it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_assembly: Option<bool>,
    /// Apply constraints to all occurrences of the reference model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walk_children: Option<bool>,
    /// Constrain against the root assembly rather than the subassembly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assemble_to_root: Option<bool>,
    /// Add the component suppressed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress: Option<bool>,
}

/// Options for [`FileApi::open`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct OpenOptions {
    /// Source directory; Creo's working directory when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirname: Option<String>,
    /// Generic name when opening a family-table instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic: Option<String>,
    /// Display the model after opening.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    /// Activate the model's window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activate: Option<bool>,
    /// Open in a new window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_window: Option<bool>,
    /// Force a regeneration on open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regen_force: Option<bool>,
}

impl FileApi<'_> {
    /// `file/assemble`: add a component to an assembly.
    pub async fn assemble(
        &self,
        file: &str,
        options: AssembleOptions,
    ) -> Result<AssembleReport, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "file", file);
        merge_options(&mut data, &options)?;

        let data = self.client.request(COMMAND, "assemble", Some(data)).await?;
        envelope::whole_data(data)
    }

    /// `file/backup`: back up a model to a directory.
    pub async fn backup(&self, target_dir: &str, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "target_dir", target_dir);
        put_opt(&mut data, "file", file);

        self.client.request(COMMAND, "backup", Some(data)).await?;
        Ok(())
    }

    /// `file/close_window`: close a model's window.
    pub async fn close_window(&self, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "close_window", finish(data))
            .await?;
        Ok(())
    }

    /// `file/display`: display a model that is already in session.
    pub async fn display(&self, file: &str, activate: Option<bool>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "file", file);
        put_opt(&mut data, "activate", activate);

        self.client.request(COMMAND, "display", Some(data)).await?;
        Ok(())
    }

    /// `file/erase`: erase models from session; all models when no name is
    /// given.
    pub async fn erase(
        &self,
        file: Option<OneOrMany>,
        erase_children: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        if let Some(file) = file {
            file.insert_into(&mut data, "file", "files");
        }
        put_opt(&mut data, "erase_children", erase_children);

        self.client.request(COMMAND, "erase", finish(data)).await?;
        Ok(())
    }

    /// `file/erase_not_displayed`: erase every model not shown in a window.
    pub async fn erase_not_displayed(&self) -> Result<(), CreosonError> {
        self.client
            .request(COMMAND, "erase_not_displayed", None)
            .await?;
        Ok(())
    }

    /// `file/exists`: whether a model exists in session.
    pub async fn exists(&self, file: &str) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "file", file);

        let data = self.client.request(COMMAND, "exists", Some(data)).await?;
        envelope::require_field(data, "exists")
    }

    /// `file/get_active`: the active model and its directory.
    pub async fn get_active(&self) -> Result<ActiveFile, CreosonError> {
        let data = self.client.request(COMMAND, "get_active", None).await?;
        envelope::whole_data(data)
    }

    /// `file/get_cur_material`: the model's current material, if any.
    pub async fn get_cur_material(&self, file: Option<&str>) -> Result<Option<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_cur_material", finish(data))
            .await?;
        envelope::optional_field(data, "material")
    }

    /// `file/get_fileinfo`: name, directory and revision of a model.
    pub async fn get_fileinfo(&self, file: Option<&str>) -> Result<FileInfo, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_fileinfo", finish(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `file/get_length_units`: the model's length units, e.g. `mm`.
    pub async fn get_length_units(&self, file: Option<&str>) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_length_units", finish(data))
            .await?;
        envelope::require_field(data, "units")
    }

    /// `file/get_mass_units`: the model's mass units, e.g. `kg`.
    pub async fn get_mass_units(&self, file: Option<&str>) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "get_mass_units", finish(data))
            .await?;
        envelope::require_field(data, "units")
    }

    /// `file/get_transform`: the 3D transform of an assembly component.
    /// Returned as a raw JLTransform mapping.
    pub async fn get_transform(
        &self,
        asm: Option<&str>,
        path: Option<Vec<i64>>,
        csys: Option<&str>,
    ) -> Result<Value, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "asm", asm);
        put_opt(&mut data, "path", path);
        put_opt(&mut data, "csys", csys);

        let data = self
            .client
            .request(COMMAND, "get_transform", finish(data))
            .await?;
        envelope::require_field(data, "transform")
    }

    /// `file/has_instances`: whether the model has a family table.
    pub async fn has_instances(&self, file: Option<&str>) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "has_instances", finish(data))
            .await?;
        envelope::require_field(data, "exists")
    }

    /// `file/is_active`: whether a model is the active model.
    pub async fn is_active(&self, file: &str) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "file", file);

        let data = self.client.request(COMMAND, "is_active", Some(data)).await?;
        envelope::require_field(data, "active")
    }

    /// `file/list`: model names in session matching the filter name(s).
    pub async fn list(&self, file: Option<OneOrMany>) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        if let Some(file) = file {
            file.insert_into(&mut data, "file", "files");
        }

        let data = self.client.request(COMMAND, "list", finish(data)).await?;
        envelope::optional_field(data, "files").map(Option::unwrap_or_default)
    }

    /// `file/list_instances`: family-table instances of a model.
    pub async fn list_instances(&self, file: Option<&str>) -> Result<InstanceList, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "list_instances", finish(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `file/list_materials`: material names available to a model.
    pub async fn list_materials(
        &self,
        file: Option<&str>,
        material: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "material", material);

        let data = self
            .client
            .request(COMMAND, "list_materials", finish(data))
            .await?;
        envelope::optional_field(data, "materials").map(Option::unwrap_or_default)
    }

    /// `file/list_simp_reps`: simplified rep names of a model.
    pub async fn list_simp_reps(
        &self,
        file: Option<&str>,
        rep: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "rep", rep);

        let data = self
            .client
            .request(COMMAND, "list_simp_reps", finish(data))
            .await?;
        envelope::optional_field(data, "reps").map(Option::unwrap_or_default)
    }

    /// `file/load_material_file`: load a material file into one or several
    /// models.
    pub async fn load_material_file(
        &self,
        material: &str,
        file: Option<OneOrMany>,
        dirname: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "material", material);
        if let Some(file) = file {
            file.insert_into(&mut data, "file", "files");
        }
        put_opt(&mut data, "dirname", dirname);

        self.client
            .request(COMMAND, "load_material_file", Some(data))
            .await?;
        Ok(())
    }

    /// `file/massprops`: mass properties of a model.
    pub async fn massprops(&self, file: Option<&str>) -> Result<MassProperties, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "massprops", finish(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `file/open`: open one or several models from disk.
    pub async fn open(
        &self,
        file: OneOrMany,
        options: OpenOptions,
    ) -> Result<OpenReport, CreosonError> {
        let mut data = Map::new();
        file.insert_into(&mut data, "file", "files");
        merge_options(&mut data, &options)?;

        let data = self.client.request(COMMAND, "open", Some(data)).await?;
        envelope::whole_data(data)
    }

    /// `file/open_errors`: whether errors occurred in the last open.
    pub async fn open_errors(&self, file: Option<&str>) -> Result<bool, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "open_errors", finish(data))
            .await?;
        envelope::require_field(data, "errors")
    }

    /// `file/postregen_relations_get`: the model's post-regeneration
    /// relations.
    pub async fn postregen_relations_get(
        &self,
        file: Option<&str>,
    ) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "postregen_relations_get", finish(data))
            .await?;
        envelope::optional_field(data, "relations").map(Option::unwrap_or_default)
    }

    /// `file/postregen_relations_set`: replace the post-regeneration
    /// relations; cleared when absent.
    pub async fn postregen_relations_set(
        &self,
        file: Option<&str>,
        relations: Option<Vec<String>>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "relations", relations);

        self.client
            .request(COMMAND, "postregen_relations_set", finish(data))
            .await?;
        Ok(())
    }

    /// `file/refresh`: refresh a model's window.
    pub async fn refresh(&self, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "refresh", finish(data))
            .await?;
        Ok(())
    }

    /// `file/regenerate`: regenerate one or several models.
    pub async fn regenerate(
        &self,
        file: Option<OneOrMany>,
        display: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        if let Some(file) = file {
            file.insert_into(&mut data, "file", "files");
        }
        put_opt(&mut data, "display", display);

        self.client
            .request(COMMAND, "regenerate", finish(data))
            .await?;
        Ok(())
    }

    /// `file/relations_get`: the model's relations.
    pub async fn relations_get(&self, file: Option<&str>) -> Result<Vec<String>, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "relations_get", finish(data))
            .await?;
        envelope::optional_field(data, "relations").map(Option::unwrap_or_default)
    }

    /// `file/relations_set`: replace the model's relations; cleared when
    /// absent.
    pub async fn relations_set(
        &self,
        file: Option<&str>,
        relations: Option<Vec<String>>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "relations", relations);

        self.client
            .request(COMMAND, "relations_set", finish(data))
            .await?;
        Ok(())
    }

    /// `file/rename`: rename a model. Returns the new name.
    pub async fn rename(
        &self,
        new_name: &str,
        file: Option<&str>,
        onlysession: Option<bool>,
    ) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "new_name", new_name);
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "onlysession", onlysession);

        let data = self.client.request(COMMAND, "rename", Some(data)).await?;
        envelope::require_field(data, "file")
    }

    /// `file/repaint`: repaint a model's window.
    pub async fn repaint(&self, file: Option<&str>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "repaint", finish(data))
            .await?;
        Ok(())
    }

    /// `file/save`: save one or several models.
    pub async fn save(&self, file: Option<OneOrMany>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        if let Some(file) = file {
            file.insert_into(&mut data, "file", "files");
        }

        self.client.request(COMMAND, "save", finish(data)).await?;
        Ok(())
    }

    /// `file/set_cur_material`: set the model's current material.
    pub async fn set_cur_material(
        &self,
        material: &str,
        file: Option<&str>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "material", material);
        put_opt(&mut data, "file", file);

        self.client
            .request(COMMAND, "set_cur_material", Some(data))
            .await?;
        Ok(())
    }

    /// `file/set_length_units`: set length units on one or several models.
    pub async fn set_length_units(
        &self,
        units: &str,
        file: Option<OneOrMany>,
        convert: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "units", units);
        if let Some(file) = file {
            file.insert_into(&mut data, "file", "files");
        }
        put_opt(&mut data, "convert", convert);

        self.client
            .request(COMMAND, "set_length_units", Some(data))
            .await?;
        Ok(())
    }

    /// `file/set_mass_units`: set mass units on one or several models.
    pub async fn set_mass_units(
        &self,
        units: &str,
        file: Option<OneOrMany>,
        convert: Option<bool>,
    ) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "units", units);
        if let Some(file) = file {
            file.insert_into(&mut data, "file", "files");
        }
        put_opt(&mut data, "convert", convert);

        self.client
            .request(COMMAND, "set_mass_units", Some(data))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::OpenOptions;

    #[test]
    fn open_options_omit_unset_fields() {
        let options = OpenOptions {
            display: Some(true),
            ..OpenOptions::default()
        };

        assert_eq!(serde_json::to_value(options).unwrap(), json!({"display": true}));
    }

    #[test]
    fn default_open_options_serialize_to_an_empty_object() {
        assert_eq!(
            serde_json::to_value(OpenOptions::default()).unwrap(),
            json!({})
        );
    }
}
