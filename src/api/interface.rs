use serde::{Deserialize, Serialize};
use serde_json::Map;

use super::{finish, merge_options, put, put_opt};
use crate::client::CreosonClient;
use crate::envelope;
use crate::error::CreosonError;
use crate::model::{ExportFormat, ImageExportFormat, ImportFormat};

const COMMAND: &str = "interface";

/// Handle for `interface` import/export operations.
#[derive(Clone, Copy, Debug)]
pub struct InterfaceApi<'a> {
    pub(crate) client: &'a CreosonClient,
}

/// Where an export landed on disk.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportReport {
    pub dirname: Option<String>,
    pub filename: Option<String>,
}

/// Options for the document exports ([`InterfaceApi::export_3dpdf`] and
/// [`InterfaceApi::export_pdf`]).
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportDocOptions {
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Output file name; derived from the model name when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Output directory; Creo's working directory when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
    /// Use the drawing's own page size/resolution settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_drawing_settings: Option<bool>,
    /// Sheet range for PDF export, e.g. `all` or `1-3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_range: Option<String>,
}

/// Options for [`InterfaceApi::export_file`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportFileOptions {
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirname: Option<String>,
    /// Geometry flags for the target format, e.g. `wireframe`, `solids`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geom_flags: Option<String>,
    /// Use Creo's newer export profiles where available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced: Option<bool>,
}

/// Options for [`InterfaceApi::export_image`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportImageOptions {
    /// Model name; defaults to the active model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
    /// Color depth in bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

/// Options for [`InterfaceApi::import_file`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct ImportFileOptions {
    /// Source directory; Creo's working directory when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirname: Option<String>,
    /// Name for the imported model; derived from the file name when
    /// absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    /// Model type to create, e.g. `asm` or `prt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_model_type: Option<String>,
}

impl InterfaceApi<'_> {
    /// `interface/export_3dpdf`: export a model as 3D PDF.
    pub async fn export_3dpdf(
        &self,
        options: ExportDocOptions,
    ) -> Result<ExportReport, CreosonError> {
        self.export_doc("export_3dpdf", options).await
    }

    /// `interface/export_file`: export a model to a geometry file format.
    pub async fn export_file(
        &self,
        format: ExportFormat,
        options: ExportFileOptions,
    ) -> Result<ExportReport, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "type", format.to_string());
        merge_options(&mut data, &options)?;

        let data = self
            .client
            .request(COMMAND, "export_file", Some(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `interface/export_image`: render a model to an image file.
    pub async fn export_image(
        &self,
        format: ImageExportFormat,
        options: ExportImageOptions,
    ) -> Result<ExportReport, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "type", format.to_string());
        merge_options(&mut data, &options)?;

        let data = self
            .client
            .request(COMMAND, "export_image", Some(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `interface/export_pdf`: export a drawing as 2D PDF.
    pub async fn export_pdf(
        &self,
        options: ExportDocOptions,
    ) -> Result<ExportReport, CreosonError> {
        self.export_doc("export_pdf", options).await
    }

    /// `interface/export_program`: export a model's program (relations
    /// listing) next to the model.
    pub async fn export_program(&self, file: Option<&str>) -> Result<ExportReport, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);

        let data = self
            .client
            .request(COMMAND, "export_program", finish(data))
            .await?;
        envelope::whole_data(data)
    }

    /// `interface/import_program`: import a program file into a model.
    /// Returns the model name.
    pub async fn import_program(
        &self,
        file: Option<&str>,
        filename: Option<&str>,
        dirname: Option<&str>,
    ) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "filename", filename);
        put_opt(&mut data, "dirname", dirname);

        let data = self
            .client
            .request(COMMAND, "import_program", finish(data))
            .await?;
        envelope::require_field(data, "file")
    }

    /// `interface/import_file`: import a geometry file as a new model.
    /// Returns the new model name.
    pub async fn import_file(
        &self,
        filename: &str,
        format: Option<ImportFormat>,
        options: ImportFileOptions,
    ) -> Result<String, CreosonError> {
        let mut data = Map::new();
        put(&mut data, "filename", filename);
        put_opt(&mut data, "type", format.map(|format| format.to_string()));
        merge_options(&mut data, &options)?;

        let data = self
            .client
            .request(COMMAND, "import_file", Some(data))
            .await?;
        envelope::require_field(data, "file")
    }

    /// `interface/mapkey`: run a mapkey script in the Creo session.
    pub async fn mapkey(&self, script: &str, delay: Option<u32>) -> Result<(), CreosonError> {
        let mut data = Map::new();
        put(&mut data, "script", script);
        put_opt(&mut data, "delay", delay);

        self.client.request(COMMAND, "mapkey", Some(data)).await?;
        Ok(())
    }

    /// `interface/plot`: plot a model with a print driver.
    pub async fn plot(
        &self,
        file: Option<&str>,
        dirname: Option<&str>,
        driver: Option<&str>,
    ) -> Result<ExportReport, CreosonError> {
        let mut data = Map::new();
        put_opt(&mut data, "file", file);
        put_opt(&mut data, "dirname", dirname);
        put_opt(&mut data, "driver", driver);

        let data = self.client.request(COMMAND, "plot", finish(data)).await?;
        envelope::whole_data(data)
    }

    async fn export_doc(
        &self,
        function: &str,
        options: ExportDocOptions,
    ) -> Result<ExportReport, CreosonError> {
        let mut data = Map::new();
        merge_options(&mut data, &options)?;

        let data = self.client.request(COMMAND, function, finish(data)).await?;
        envelope::whole_data(data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ExportDocOptions;

    #[test]
    fn doc_options_omit_unset_fields() {
        let options = ExportDocOptions {
            dirname: Some("C:/exports".to_string()),
            dpi: Some(300),
            ..ExportDocOptions::default()
        };

        assert_eq!(
            serde_json::to_value(options).unwrap(),
            json!({"dirname": "C:/exports", "dpi": 300})
        );
    }
}
