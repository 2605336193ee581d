//! SQL text for the Glue catalog and the S3 populator.
//!
//! Rendering is pure; the `write_*` functions resolve the target file from the
//! lakehouse table name and overwrite it. `$LAKEHOUSE_BUCKET` and
//! `$SOURCE_DATABASE` are left in the output for substitution at deploy time.

use std::{
    collections::BTreeMap,
    fmt::Write as _,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::SchemaError, io_utils, workbook::TableNameDirectory};

pub const TABLE_SUFFIX: &str = "_th";
pub const POPULATOR_FILE_SUFFIX: &str = "_lh_sec";

const CATALOG_AUDIT_COLUMNS: [&str; 4] = [
    "fecha_audit_create TIMESTAMP",
    "proceso_audit_create STRING",
    "fecha_audit_update TIMESTAMP",
    "proceso_audit_update STRING",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Catalog database the external tables are registered in
    pub database: String,
    /// Path under `s3://$LAKEHOUSE_BUCKET/` holding the table data
    pub location_prefix: String,
    /// Value stamped into `proceso_audit_create` by the populator
    pub process_name: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            database: "pae_dataplatform_lakehouse".to_string(),
            location_prefix: "intervencionesdepozo/eventos/structured".to_string(),
            process_name: "drilling-standarized2lakehouse-pipeline".to_string(),
        }
    }
}

/// Resolves the lakehouse table (with its `_th` suffix) generated for `schema`.
pub fn resolve_table_name(
    schema: &str,
    replacements: &BTreeMap<String, String>,
    tables: &TableNameDirectory,
) -> Result<String, SchemaError> {
    let interface = replacements
        .get(schema)
        .ok_or_else(|| SchemaError::MissingReplacement {
            schema: schema.to_string(),
        })?;
    let table = tables
        .table_for(interface)
        .ok_or_else(|| SchemaError::UnknownInterface {
            schema: schema.to_string(),
            interface: interface.clone(),
        })?;
    Ok(format!("{table}{TABLE_SUFFIX}"))
}

pub fn render_catalog_ddl<N, T>(
    table: &str,
    origin: &[N],
    field_types: &[T],
    settings: &TemplateSettings,
) -> String
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    let mut lines = origin
        .iter()
        .zip(field_types)
        .map(|(name, field_type)| format!("    `{}` {},", name.as_ref(), field_type.as_ref()))
        .collect::<Vec<_>>();
    lines.extend(CATALOG_AUDIT_COLUMNS.iter().map(|column| format!("    {column}")));

    let mut sql = String::new();
    let _ = writeln!(
        sql,
        "CREATE EXTERNAL TABLE IF NOT EXISTS {}.{table} (",
        settings.database
    );
    let _ = writeln!(sql, "{}", lines.join("\n"));
    let _ = writeln!(sql, ")");
    let _ = writeln!(sql, "STORED AS PARQUET");
    let _ = write!(
        sql,
        "LOCATION 's3://$LAKEHOUSE_BUCKET/{}/{table}';",
        settings.location_prefix.trim_matches('/')
    );
    sql
}

pub fn render_populator_select<N, A>(
    schema: &str,
    origin: &[N],
    aliases: &[A],
    settings: &TemplateSettings,
) -> String
where
    N: AsRef<str>,
    A: AsRef<str>,
{
    let mut lines = origin
        .iter()
        .zip(aliases)
        .map(|(name, alias)| format!("    `{}` AS {},", name.as_ref(), alias.as_ref()))
        .collect::<Vec<_>>();
    lines.push("    current_timestamp AS fecha_audit_create,".to_string());
    lines.push(format!(
        "    '{}' AS proceso_audit_create,",
        settings.process_name
    ));
    lines.push("    null AS fecha_audit_update,".to_string());
    lines.push("    null AS proceso_audit_update".to_string());

    let mut sql = String::from("SELECT\n");
    let _ = writeln!(sql, "{}", lines.join("\n"));
    let _ = write!(sql, "FROM $SOURCE_DATABASE.{schema};");
    sql
}

pub fn catalog_path(destination: &Path, table: &str) -> PathBuf {
    destination.join(format!("{table}.sql"))
}

pub fn populator_path(destination: &Path, table: &str) -> PathBuf {
    destination.join(format!("{table}{POPULATOR_FILE_SUFFIX}.sql"))
}

pub fn write_catalog_ddl<N, T>(
    destination: &Path,
    table: &str,
    origin: &[N],
    field_types: &[T],
    settings: &TemplateSettings,
) -> Result<PathBuf, SchemaError>
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    let path = catalog_path(destination, table);
    let sql = render_catalog_ddl(table, origin, field_types, settings);
    write_sql(path, &sql)
}

pub fn write_populator_select<N, A>(
    destination: &Path,
    table: &str,
    schema: &str,
    origin: &[N],
    aliases: &[A],
    settings: &TemplateSettings,
) -> Result<PathBuf, SchemaError>
where
    N: AsRef<str>,
    A: AsRef<str>,
{
    let path = populator_path(destination, table);
    let sql = render_populator_select(schema, origin, aliases, settings);
    write_sql(path, &sql)
}

fn write_sql(path: PathBuf, sql: &str) -> Result<PathBuf, SchemaError> {
    match io_utils::write_text(&path, sql) {
        Ok(()) => Ok(path),
        Err(source) => Err(SchemaError::Write { path, source }),
    }
}
