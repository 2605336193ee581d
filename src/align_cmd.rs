//! Alignment report for a single schema.
//!
//! Prints how every field is normalized and which alias it receives, without
//! writing any SQL. Useful when curating the workbook's alias sheet.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{
    cli::{AlignArgs, AlignFormat},
    config::GeneratorConfig,
    generate::{self, SchemaPlan},
    table,
    transform::MatchKind,
};

#[derive(Debug, Serialize)]
struct AlignmentRow<'a> {
    origin: &'a str,
    normalized: &'a str,
    alias: &'a str,
    kind: MatchKind,
}

pub fn execute(config: &GeneratorConfig, args: &AlignArgs) -> Result<()> {
    let request = generate::load_request(config)?;
    let plan = SchemaPlan::build(config, &request, &args.schema)
        .with_context(|| format!("Aligning schema {}", args.schema))?;
    let normalized = plan.normalized();
    let rows = plan
        .definition
        .fields
        .iter()
        .zip(&normalized)
        .zip(&plan.matches)
        .map(|((field, norm), assignment)| AlignmentRow {
            origin: &field.name,
            normalized: norm,
            alias: &assignment.alias,
            kind: assignment.kind,
        })
        .collect::<Vec<_>>();

    match args.format {
        AlignFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&rows).context("Serializing alignment report")?;
            println!("{rendered}");
        }
        AlignFormat::Table => {
            let headers = ["#", "origin", "normalized", "alias", "match"]
                .map(str::to_string)
                .to_vec();
            let cells = rows
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    vec![
                        (idx + 1).to_string(),
                        row.origin.to_string(),
                        row.normalized.to_string(),
                        row.alias.to_string(),
                        row.kind.to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            table::print_table(&headers, &cells);
        }
    }

    let fallbacks = rows
        .iter()
        .filter(|row| row.kind == MatchKind::Fallback)
        .count();
    info!(
        "Aligned {} field(s) of {} against interface '{}' ({} fallback)",
        rows.len(),
        plan.schema,
        plan.interface,
        fallbacks
    );
    Ok(())
}
