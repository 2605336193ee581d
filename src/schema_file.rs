//! Source schema definitions stored as `<schema>.txt` files.
//!
//! Each line holds a field name and its type separated by a tab. `\n`, `\r\n`
//! and bare `\r` all end a line. Lines that do not split into exactly two parts
//! are dropped without a diagnostic.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use itertools::Itertools;

use crate::{error::SchemaError, io_utils};

pub const SCHEMA_EXTENSION: &str = "txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDefinition {
    pub fields: Vec<SchemaField>,
}

impl SchemaDefinition {
    pub fn parse(text: &str) -> Self {
        let fields = text
            .split(['\n', '\r'])
            .filter_map(|line| {
                let parts = line.trim().split('\t').collect::<Vec<_>>();
                match parts.as_slice() {
                    [name, data_type] => Some(SchemaField {
                        name: name.to_string(),
                        data_type: data_type.to_string(),
                    }),
                    _ => None,
                }
            })
            .collect();
        SchemaDefinition { fields }
    }

    pub fn origin_fields(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn field_types(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.data_type.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub fn schema_path(schema_dir: &Path, schema_name: &str) -> PathBuf {
    schema_dir.join(format!("{schema_name}.{SCHEMA_EXTENSION}"))
}

pub fn load(
    schema_dir: &Path,
    schema_name: &str,
    encoding: &'static Encoding,
) -> Result<SchemaDefinition, SchemaError> {
    let path = schema_path(schema_dir, schema_name);
    let bytes = io_utils::read_bytes(&path).map_err(|source| SchemaError::Read {
        path: path.clone(),
        source,
    })?;
    let text = io_utils::decode_bytes(&bytes, encoding).ok_or_else(|| SchemaError::Decode {
        path: path.clone(),
        encoding: encoding.name(),
    })?;
    Ok(SchemaDefinition::parse(&text))
}

/// Lists schema identifiers (file stems of regular files) in `schema_dir`, sorted.
pub fn discover(schema_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(schema_dir)
        .with_context(|| format!("Listing schema directory {schema_dir:?}"))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Reading entry in {schema_dir:?}"))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    Ok(names.into_iter().sorted().dedup().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_file_order_and_drops_malformed_lines() {
        let text = "Campo 1\tSTRING\nbroken line\nCampo 2\tINT\textra\n\nCampo 3\tDOUBLE\r\n";
        let schema = SchemaDefinition::parse(text);
        assert_eq!(schema.origin_fields(), vec!["Campo 1", "Campo 3"]);
        assert_eq!(schema.field_types(), vec!["STRING", "DOUBLE"]);
    }

    #[test]
    fn parse_trims_surrounding_whitespace_per_line() {
        let schema = SchemaDefinition::parse("  Pozo\tSTRING  \n");
        assert_eq!(schema.fields[0].name, "Pozo");
        assert_eq!(schema.fields[0].data_type, "STRING");
    }

    #[test]
    fn parse_accepts_carriage_return_line_endings() {
        let schema = SchemaDefinition::parse("Pozo\tSTRING\rEquipo\tSTRING\r\nFecha\tTIMESTAMP");
        assert_eq!(schema.origin_fields(), vec!["Pozo", "Equipo", "Fecha"]);
    }

    #[test]
    fn parse_drops_lines_whose_name_is_trimmed_away() {
        let schema = SchemaDefinition::parse("\tSTRING\nPozo\t\n");
        assert!(schema.is_empty());
    }
}
