mod common;

use common::{TestWorkspace, fixture_path};
use lakehouse_sqlgen::workbook::{
    self, ExcelWorkbook, IngestionRequest, WorkbookLayout, WorkbookSource,
};

#[test]
fn xlsx_workbook_loads_both_sheets() {
    let mut source = workbook::open(&fixture_path("ingesta.xlsx")).expect("open workbook");
    let request =
        IngestionRequest::load(source.as_mut(), &WorkbookLayout::default()).expect("load");

    assert_eq!(
        request.field_aliases.aliases_for("POZOS"),
        vec!["nro_pozo", "profundidad_final_m"]
    );
    assert_eq!(request.field_aliases.len(), 3);
    assert_eq!(request.table_names.table_for("POZOS"), Some("pozos"));
}

#[test]
fn xlsx_numeric_key_cells_read_as_integers() {
    let mut source = workbook::open(&fixture_path("ingesta.xlsx")).expect("open workbook");
    let request =
        IngestionRequest::load(source.as_mut(), &WorkbookLayout::default()).expect("load");

    assert_eq!(request.field_aliases.aliases_for("101"), vec!["id_evento"]);
    assert_eq!(request.table_names.table_for("101"), Some("eventos"));
}

#[test]
fn xlsx_rows_are_counted_from_a1() {
    // "Tablas Lakehouse" has nothing before B3, its header row.
    let mut source = ExcelWorkbook::open(&fixture_path("ingesta.xlsx")).expect("open workbook");
    let rows = source.sheet_rows("Tablas Lakehouse").expect("rows");

    assert!(rows[0].is_empty());
    assert!(rows[1].is_empty());
    assert_eq!(rows[2][0], "");
    assert_eq!(rows[2][1], "Nombre en Origen");
    assert_eq!(rows[4][1], "101");
    assert_eq!(rows[4][2], "eventos");
}

#[test]
fn xlsx_missing_sheet_is_an_error() {
    let layout = WorkbookLayout {
        tables_sheet: "Hoja3".to_string(),
        ..WorkbookLayout::default()
    };
    let mut source = workbook::open(&fixture_path("ingesta.xlsx")).expect("open workbook");
    let err = IngestionRequest::load(source.as_mut(), &layout).unwrap_err();
    assert!(err.to_string().contains("has no sheet named 'Hoja3'"));
}

#[test]
fn csv_export_directory_loads_both_sheets() {
    let ws = TestWorkspace::new();
    ws.write_workbook(
        &[
            ("POZOS", "nro_pozo"),
            ("EVENTOS", "id_evento"),
            ("POZOS", "operador"),
        ],
        &[("POZOS", "pozos"), ("EVENTOS", "eventos")],
    );

    let mut source = workbook::open(&ws.workbook_dir()).expect("open workbook");
    let request =
        IngestionRequest::load(source.as_mut(), &WorkbookLayout::default()).expect("load");

    assert_eq!(
        request.field_aliases.aliases_for("POZOS"),
        vec!["nro_pozo", "operador"]
    );
    assert!(request.field_aliases.aliases_for("OTRA").is_empty());
    assert_eq!(request.table_names.table_for("EVENTOS"), Some("eventos"));
}

#[test]
fn custom_layout_reads_renamed_sheets() {
    let ws = TestWorkspace::new();
    ws.write("book/fields.csv", "interface,alias\nPOZOS,nro_pozo\n");
    ws.write("book/tables.csv", "interface,table\nPOZOS,pozos\n");
    let layout = WorkbookLayout {
        skip_rows: 0,
        fields_sheet: "fields".to_string(),
        fields_interface_column: "interface".to_string(),
        fields_alias_column: "alias".to_string(),
        tables_sheet: "tables".to_string(),
        tables_interface_column: "interface".to_string(),
        tables_name_column: "table".to_string(),
    };

    let mut source = workbook::open(&ws.path().join("book")).expect("open workbook");
    let request = IngestionRequest::load(source.as_mut(), &layout).expect("load");
    assert_eq!(request.field_aliases.len(), 1);
    assert_eq!(request.table_names.table_for("POZOS"), Some("pozos"));
}

#[test]
fn missing_sheet_export_is_an_error() {
    let ws = TestWorkspace::new();
    ws.write("book/Campos Lakehouse.csv", "a\nb\nNombre Interface en Origen,Campo (Nombre Lakehouse)\n");

    let mut source = workbook::open(&ws.path().join("book")).expect("open workbook");
    let err = IngestionRequest::load(source.as_mut(), &WorkbookLayout::default()).unwrap_err();
    assert!(format!("{err:#}").contains("Tablas Lakehouse.csv"));
}
