#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch directory laid out like an install root: workbook export, schema
/// files, configuration and output directories. Removed on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` to `name` (relative, parents created) and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    pub fn workbook_dir(&self) -> PathBuf {
        self.path().join("workbook")
    }

    pub fn schemas_dir(&self) -> PathBuf {
        self.path().join("schemas")
    }

    pub fn catalog_dir(&self) -> PathBuf {
        self.path().join("out").join("catalog")
    }

    pub fn s3_dir(&self) -> PathBuf {
        self.path().join("out").join("s3")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.yaml")
    }

    /// Writes both sheets as CSV exports with the usual two banner rows.
    pub fn write_workbook(&self, alias_rows: &[(&str, &str)], table_rows: &[(&str, &str)]) {
        let mut fields = String::from(
            "Solicitud de ingesta,\n,\nNombre Interface en Origen,Campo (Nombre Lakehouse)\n",
        );
        for (interface, alias) in alias_rows {
            fields.push_str(&format!("{interface},{alias}\n"));
        }
        let mut tables = String::from(
            "Solicitud de ingesta,\n,\nNombre en Origen,Nombre Interface en Lakehouse\n",
        );
        for (interface, table) in table_rows {
            tables.push_str(&format!("{interface},{table}\n"));
        }
        self.write("workbook/Campos Lakehouse.csv", &fields);
        self.write("workbook/Tablas Lakehouse.csv", &tables);
    }

    pub fn write_schema(&self, name: &str, fields: &[(&str, &str)]) -> PathBuf {
        let contents = fields
            .iter()
            .map(|(field, data_type)| format!("{field}\t{data_type}\n"))
            .collect::<String>();
        self.write(&format!("schemas/{name}.txt"), &contents)
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read generated file")
    }
}
