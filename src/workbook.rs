//! Ingestion-request workbook access.
//!
//! The workbook carries two sheets: one listing the target alias of every
//! source field per interface, one naming the lakehouse table of every
//! interface. Both start with banner rows, followed by a header row.
//!
//! Sheets are read through [`WorkbookSource`], backed either by an Excel/ODS
//! file ([`ExcelWorkbook`]) or by a directory holding one `<sheet>.csv` export
//! per sheet ([`CsvWorkbook`]).

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Data, Reader, Sheets, open_workbook_auto};
use serde::{Deserialize, Serialize};

use crate::io_utils;

pub trait WorkbookSource {
    /// Returns every row of `sheet` from the first row of the sheet, as text.
    fn sheet_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>>;
}

pub struct ExcelWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl ExcelWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        let sheets =
            open_workbook_auto(path).with_context(|| format!("Opening workbook {path:?}"))?;
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }
}

impl WorkbookSource for ExcelWorkbook {
    fn sheet_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        if !self.sheets.sheet_names().iter().any(|name| name == sheet) {
            bail!("Workbook {:?} has no sheet named '{sheet}'", self.path);
        }
        let range = self
            .sheets
            .worksheet_range(sheet)
            .with_context(|| format!("Reading sheet '{sheet}' from {:?}", self.path))?;
        // The range begins at the first used cell; pad back to A1 so row offsets stay absolute.
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        let mut rows = vec![Vec::new(); row_offset as usize];
        for row in range.rows() {
            let mut cells = vec![String::new(); col_offset as usize];
            cells.extend(row.iter().map(cell_text));
            rows.push(cells);
        }
        Ok(rows)
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl WorkbookSource for CsvWorkbook {
    fn sheet_rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        let path = self.dir.join(format!("{sheet}.csv"));
        let file = File::open(&path).with_context(|| format!("Opening sheet export {path:?}"))?;
        let mut reader = io_utils::open_csv_reader(BufReader::new(file), b',');
        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Reading row {} of {path:?}", idx + 1))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }
}

/// Opens `path` as a CSV export directory when it is a directory, otherwise as a spreadsheet file.
pub fn open(path: &Path) -> Result<Box<dyn WorkbookSource>> {
    if path.is_dir() {
        Ok(Box::new(CsvWorkbook::new(path)))
    } else {
        Ok(Box::new(ExcelWorkbook::open(path)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookLayout {
    /// Rows preceding the header row on both sheets
    pub skip_rows: usize,
    pub fields_sheet: String,
    pub fields_interface_column: String,
    pub fields_alias_column: String,
    pub tables_sheet: String,
    pub tables_interface_column: String,
    pub tables_name_column: String,
}

impl Default for WorkbookLayout {
    fn default() -> Self {
        Self {
            skip_rows: 2,
            fields_sheet: "Campos Lakehouse".to_string(),
            fields_interface_column: "Nombre Interface en Origen".to_string(),
            fields_alias_column: "Campo (Nombre Lakehouse)".to_string(),
            tables_sheet: "Tablas Lakehouse".to_string(),
            tables_interface_column: "Nombre en Origen".to_string(),
            tables_name_column: "Nombre Interface en Lakehouse".to_string(),
        }
    }
}

/// Alias rows keyed by interface name, in sheet order.
#[derive(Debug, Clone, Default)]
pub struct FieldAliasDirectory {
    entries: Vec<(String, String)>,
}

impl FieldAliasDirectory {
    pub fn from_pairs(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Aliases of `interface` in the order they appear on the sheet.
    pub fn aliases_for(&self, interface: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(key, _)| key == interface)
            .map(|(_, alias)| alias.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableNameDirectory {
    entries: Vec<(String, String)>,
}

impl TableNameDirectory {
    pub fn from_pairs(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// First table name listed for `interface`.
    pub fn table_for(&self, interface: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == interface)
            .map(|(_, table)| table.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestionRequest {
    pub field_aliases: FieldAliasDirectory,
    pub table_names: TableNameDirectory,
}

impl IngestionRequest {
    pub fn load(source: &mut dyn WorkbookSource, layout: &WorkbookLayout) -> Result<Self> {
        let field_rows = source.sheet_rows(&layout.fields_sheet)?;
        let field_aliases = FieldAliasDirectory::from_pairs(read_pairs(
            field_rows,
            layout.skip_rows,
            &layout.fields_sheet,
            &layout.fields_interface_column,
            &layout.fields_alias_column,
        )?);
        let table_rows = source.sheet_rows(&layout.tables_sheet)?;
        let table_names = TableNameDirectory::from_pairs(read_pairs(
            table_rows,
            layout.skip_rows,
            &layout.tables_sheet,
            &layout.tables_interface_column,
            &layout.tables_name_column,
        )?);
        Ok(Self {
            field_aliases,
            table_names,
        })
    }
}

fn read_pairs(
    rows: Vec<Vec<String>>,
    skip_rows: usize,
    sheet: &str,
    key_column: &str,
    value_column: &str,
) -> Result<Vec<(String, String)>> {
    let mut rows = rows.into_iter().skip(skip_rows);
    let header = rows.next().ok_or_else(|| {
        anyhow!("Sheet '{sheet}' has no header row after skipping {skip_rows} row(s)")
    })?;
    let key_idx = column_index(&header, key_column, sheet)?;
    let value_idx = column_index(&header, value_column, sheet)?;
    let pairs = rows
        .filter_map(|row| {
            let key = row.get(key_idx)?;
            let value = row.get(value_idx)?;
            if key.trim().is_empty() || value.trim().is_empty() {
                return None;
            }
            Some((key.clone(), value.clone()))
        })
        .collect();
    Ok(pairs)
}

fn column_index(header: &[String], column: &str, sheet: &str) -> Result<usize> {
    header
        .iter()
        .position(|cell| cell.trim() == column.trim())
        .ok_or_else(|| anyhow!("Sheet '{sheet}' has no column named '{column}'"))
}
