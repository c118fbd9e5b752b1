use crate::errors::Result;

use fs_err as fs;
use tracing::error;

use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
pub enum GraphOutputType {
    SVG,
    PDF,
    PNG,
}

impl GraphOutputType {
    /// Guesses the output type from a file extension, falling back to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => Self::SVG,
            Some("pdf") => Self::PDF,
            _ => Self::PNG,
        }
    }

    /// gnuplot terminal name.
    pub fn terminal(&self) -> &'static str {
        match self {
            Self::SVG => "svg",
            Self::PDF => "pdfcairo",
            Self::PNG => "pngcairo",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub output_type: Option<GraphOutputType>,
    pub x_label: String,
    pub x_start: f64,
    pub x_end: Option<f64>,
    pub grid: bool,
    pub save_temp_files: bool,
    pub gnuplot: PathBuf,
}

impl Default for GraphConfig {
    fn default() -> Self {
        let gnuplot = if cfg!(target_os = "windows") {
            "gnuplot.exe"
        } else {
            "gnuplot"
        };
        Self {
            output_type: None,
            x_label: String::from("Percent Grade"),
            x_start: 0.0,
            x_end: None,
            grid: true,
            save_temp_files: false,
            gnuplot: PathBuf::from(gnuplot),
        }
    }
}

impl GraphConfig {
    pub fn read(config_path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(config_path) {
            Ok(data) => data,
            Err(e) => {
                error!(error = %e, "failed to read graph configuration file");
                return Err(e.into());
            }
        };
        let config: GraphConfig = match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "damaged graph configuration structure");
                return Err(e.into());
            }
        };
        Ok(config)
    }

    pub fn output_type_for(&self, output_path: &Path) -> GraphOutputType {
        self.output_type
            .unwrap_or_else(|| GraphOutputType::from_path(output_path))
    }
}
