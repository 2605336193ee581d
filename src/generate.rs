use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use crate::{
    config::GeneratorConfig,
    emit,
    error::SchemaError,
    io_utils, schema_file,
    schema_file::SchemaDefinition,
    transform::{AliasMatch, MatchKind, align_fields, normalize},
    workbook::{self, IngestionRequest},
};

/// Fields of one schema matched against the aliases listed for its interface.
#[derive(Debug, Clone)]
pub struct SchemaPlan {
    pub schema: String,
    pub interface: String,
    pub definition: SchemaDefinition,
    pub matches: Vec<AliasMatch>,
}

impl SchemaPlan {
    pub fn build(
        config: &GeneratorConfig,
        request: &IngestionRequest,
        schema: &str,
    ) -> Result<Self, SchemaError> {
        let interface = config
            .replacements
            .get(schema)
            .ok_or_else(|| SchemaError::MissingReplacement {
                schema: schema.to_string(),
            })?;
        let aliases = request.field_aliases.aliases_for(interface);
        let definition =
            schema_file::load(&config.schemas_path, schema, config.schema_encoding)?;
        let matches = align_fields(&definition.origin_fields(), &aliases);
        debug!(
            "Schema {schema}: {} field(s), {} alias candidate(s) for '{interface}'",
            definition.len(),
            aliases.len()
        );
        Ok(Self {
            schema: schema.to_string(),
            interface: interface.clone(),
            definition,
            matches,
        })
    }

    pub fn aliases(&self) -> Vec<String> {
        self.matches.iter().map(|m| m.alias.clone()).collect()
    }

    pub fn normalized(&self) -> Vec<String> {
        self.definition
            .fields
            .iter()
            .map(|field| normalize(&field.name))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub catalog: PathBuf,
    pub populator: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generated: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

pub fn execute(config: &GeneratorConfig) -> Result<GenerationSummary> {
    io_utils::ensure_directory(&config.catalog_output)?;
    io_utils::ensure_directory(&config.s3_output)?;

    let request = load_request(config)?;
    let schemas = schema_list(config)?;
    info!("Found {} schemas to process", schemas.len());

    let mut summary = GenerationSummary::default();
    for schema in schemas {
        info!("Processing schema: {schema}");
        match process_schema(config, &request, &schema) {
            Ok(files) => {
                info!(
                    "Generated Glue catalog populator for {schema} at {:?}",
                    files.catalog
                );
                info!("Generated S3 populator for {schema} at {:?}", files.populator);
                summary.generated.push(schema);
            }
            Err(err) if err.is_skip() => {
                warn!("Schema {schema} not found in replacements, skipping");
                summary.skipped.push(schema);
            }
            Err(err) => {
                error!("Skipping schema {schema} due to error: {err}");
                summary.failed.push(schema);
            }
        }
    }

    info!(
        "Processing completed: {} generated, {} skipped, {} failed",
        summary.generated.len(),
        summary.skipped.len(),
        summary.failed.len()
    );
    Ok(summary)
}

pub fn load_request(config: &GeneratorConfig) -> Result<IngestionRequest> {
    info!("Loading data from {:?}", config.excel_file);
    let mut source = workbook::open(&config.excel_file)?;
    let request = IngestionRequest::load(source.as_mut(), &config.workbook)
        .with_context(|| format!("Loading ingestion request from {:?}", config.excel_file))?;
    debug!(
        "Loaded {} alias row(s) and {} table row(s)",
        request.field_aliases.len(),
        request.table_names.len()
    );
    Ok(request)
}

/// Schemas named in the configuration, or every schema file when none are named.
pub fn schema_list(config: &GeneratorConfig) -> Result<Vec<String>> {
    if !config.tables.is_empty() {
        return Ok(config.tables.clone());
    }
    schema_file::discover(&config.schemas_path)
}

pub fn process_schema(
    config: &GeneratorConfig,
    request: &IngestionRequest,
    schema: &str,
) -> Result<GeneratedFiles, SchemaError> {
    let plan = SchemaPlan::build(config, request, schema)?;
    let table = emit::resolve_table_name(schema, &config.replacements, &request.table_names)?;

    for (field, assignment) in plan.definition.fields.iter().zip(&plan.matches) {
        if assignment.kind == MatchKind::Fallback {
            debug!(
                "Schema {schema}: no alias for '{}', using '{}'",
                field.name, assignment.alias
            );
        }
    }

    let origin = plan.definition.origin_fields();
    let catalog = emit::write_catalog_ddl(
        &config.catalog_output,
        &table,
        &origin,
        &plan.definition.field_types(),
        &config.templates,
    )?;
    let populator = emit::write_populator_select(
        &config.s3_output,
        &table,
        schema,
        &origin,
        &plan.aliases(),
        &config.templates,
    )?;
    Ok(GeneratedFiles { catalog, populator })
}
