//! Run configuration: the YAML document merged with command-line paths.
//!
//! ```yaml
//! tablas_solicitud_ingesta:
//!   - POZOS_EXPORT
//! replacements:
//!   POZOS_EXPORT: POZOS
//! schema_encoding: windows-1252   # optional, defaults to utf-8
//! workbook:                       # optional, see WorkbookLayout
//!   skip_rows: 2
//! templates:                      # optional, see TemplateSettings
//!   database: pae_dataplatform_lakehouse
//! ```

use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::{cli::PathArgs, emit::TemplateSettings, io_utils, workbook::WorkbookLayout};

pub const HOME_ENV: &str = "LAKEHOUSE_SQLGEN_HOME";

const DEFAULT_EXCEL_FILE: &str = "Solicitud de ingesta - Secretaria.xlsx";
const DEFAULT_SCHEMAS_DIR: &str = "outputs/table-schemas";
const DEFAULT_CATALOG_DIR: &str = "outputs/glue-catalog-populators";
const DEFAULT_S3_DIR: &str = "outputs/s3-populator";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Schemas to process; empty means every schema file found
    #[serde(rename = "tablas_solicitud_ingesta", alias = "tables")]
    pub tables: Vec<String>,
    /// Schema identifier to workbook interface name
    pub replacements: BTreeMap<String, String>,
    pub schema_encoding: Option<String>,
    pub workbook: WorkbookLayout,
    pub templates: TemplateSettings,
}

impl ConfigFile {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Loads `path`, falling back to an empty configuration when it is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        let loaded = fs::read_to_string(path)
            .with_context(|| format!("Opening configuration file {path:?}"))
            .and_then(|raw| {
                Self::parse(&raw).with_context(|| format!("Parsing configuration file {path:?}"))
            });
        match loaded {
            Ok(config) => {
                debug!(
                    "Loaded {} replacement(s) from {:?}",
                    config.replacements.len(),
                    path
                );
                config
            }
            Err(err) => {
                error!("Error loading configuration file: {err:#}");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub tables: Vec<String>,
    pub replacements: BTreeMap<String, String>,
    pub schema_encoding: &'static Encoding,
    pub workbook: WorkbookLayout,
    pub templates: TemplateSettings,
    pub excel_file: PathBuf,
    pub schemas_path: PathBuf,
    pub catalog_output: PathBuf,
    pub s3_output: PathBuf,
}

impl GeneratorConfig {
    pub fn resolve(paths: &PathArgs) -> Result<Self> {
        let root = install_root();
        let config_path = paths
            .config
            .clone()
            .unwrap_or_else(|| root.join(DEFAULT_CONFIG_FILE));
        let file = ConfigFile::load_or_default(&config_path);
        Self::from_parts(paths, file, &root)
    }

    pub fn from_parts(paths: &PathArgs, file: ConfigFile, root: &Path) -> Result<Self> {
        let schema_encoding = io_utils::resolve_encoding(file.schema_encoding.as_deref())
            .context("Resolving schema_encoding from configuration")?;
        let pick = |value: &Option<PathBuf>, default: &str| {
            value.clone().unwrap_or_else(|| root.join(default))
        };
        Ok(Self {
            tables: file.tables,
            replacements: file.replacements,
            schema_encoding,
            workbook: file.workbook,
            templates: file.templates,
            excel_file: pick(&paths.excel_file, DEFAULT_EXCEL_FILE),
            schemas_path: pick(&paths.schemas_path, DEFAULT_SCHEMAS_DIR),
            catalog_output: pick(&paths.catalog_output, DEFAULT_CATALOG_DIR),
            s3_output: pick(&paths.s3_output, DEFAULT_S3_DIR),
        })
    }
}

/// Base directory for default paths: `LAKEHOUSE_SQLGEN_HOME`, else the working directory.
pub fn install_root() -> PathBuf {
    match env::var_os(HOME_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_schema_list_and_replacements() {
        let raw = "\
tablas_solicitud_ingesta:
  - POZOS_EXPORT
replacements:
  POZOS_EXPORT: POZOS
";
        let config = ConfigFile::parse(raw).expect("config");
        assert_eq!(config.tables, vec!["POZOS_EXPORT"]);
        assert_eq!(config.replacements["POZOS_EXPORT"], "POZOS");
        assert_eq!(config.workbook, WorkbookLayout::default());
        assert_eq!(config.templates, TemplateSettings::default());
    }

    #[test]
    fn parse_accepts_partial_sections() {
        let raw = "\
workbook:
  skip_rows: 0
templates:
  process_name: custom-pipeline
";
        let config = ConfigFile::parse(raw).expect("config");
        assert_eq!(config.workbook.skip_rows, 0);
        assert_eq!(config.workbook.fields_sheet, "Campos Lakehouse");
        assert_eq!(config.templates.process_name, "custom-pipeline");
        assert_eq!(
            config.templates.database,
            TemplateSettings::default().database
        );
    }

    #[test]
    fn empty_document_is_empty_config() {
        assert_eq!(ConfigFile::parse("  \n").unwrap(), ConfigFile::default());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let config = ConfigFile::load_or_default(Path::new("/nonexistent/config.yaml"));
        assert!(config.replacements.is_empty());
        assert!(config.tables.is_empty());
    }

    #[test]
    fn from_parts_prefers_explicit_paths() {
        let paths = PathArgs {
            schemas_path: Some(PathBuf::from("/data/schemas")),
            ..PathArgs::default()
        };
        let config =
            GeneratorConfig::from_parts(&paths, ConfigFile::default(), Path::new("/opt/gen"))
                .expect("config");
        assert_eq!(config.schemas_path, PathBuf::from("/data/schemas"));
        assert_eq!(
            config.s3_output,
            Path::new("/opt/gen").join("outputs/s3-populator")
        );
        assert_eq!(config.schema_encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn from_parts_rejects_unknown_encoding() {
        let file = ConfigFile {
            schema_encoding: Some("klingon".to_string()),
            ..ConfigFile::default()
        };
        assert!(GeneratorConfig::from_parts(&PathArgs::default(), file, Path::new(".")).is_err());
    }
}
