use std::fs::File;
use std::io::Read;
use std::path::Path;

use frete_tools::derive::{COMBINED_DOCUMENT_FIELD, EMISSION_DATE_FIELD};
use frete_tools::io::excel_write;
use frete_tools::model::{Table, Value};
use tempfile::tempdir;
use zip::ZipArchive;

fn read_part(path: &Path, name: &str) -> String {
    let file = File::open(path).expect("workbook opened");
    let mut archive = ZipArchive::new(file).expect("workbook is a zip archive");
    let mut part = archive.by_name(name).expect("workbook part present");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("workbook part read");
    xml
}

fn attribute<'a>(element: &'a str, name: &str) -> Option<&'a str> {
    let marker = format!(" {name}=\"");
    let start = element.find(&marker)? + marker.len();
    let end = element[start..].find('"')? + start;
    Some(&element[start..end])
}

/// Style index applied to the 1-based worksheet column `column`, if any.
fn column_style(sheet_xml: &str, column: usize) -> Option<usize> {
    sheet_xml
        .split("<col ")
        .skip(1)
        .map(|rest| &rest[..rest.find("/>").unwrap_or(rest.len())])
        .map(|element| format!(" {element}"))
        .find(|element| {
            let min = attribute(element, "min").and_then(|v| v.parse::<usize>().ok());
            let max = attribute(element, "max").and_then(|v| v.parse::<usize>().ok());
            matches!((min, max), (Some(min), Some(max)) if min <= column && column <= max)
        })
        .and_then(|element| attribute(&element, "style").and_then(|v| v.parse().ok()))
}

fn section<'a>(xml: &'a str, tag: &str) -> &'a str {
    let start = xml.find(&format!("<{tag}")).expect("section present");
    let end = xml[start..]
        .find(&format!("</{tag}>"))
        .expect("section closed")
        + start;
    &xml[start..end]
}

/// Whether cell format `style` paints a yellow solid fill.
fn style_is_yellow(styles_xml: &str, style: usize) -> bool {
    let xf = section(styles_xml, "cellXfs")
        .split("<xf ")
        .nth(style + 1)
        .map(|rest| format!(" {}", &rest[..rest.find('>').unwrap_or(rest.len())]))
        .expect("cell format present");
    let fill_id: usize = attribute(&xf, "fillId")
        .and_then(|v| v.parse().ok())
        .expect("fill id present");
    section(styles_xml, "fills")
        .split("<fill>")
        .nth(fill_id + 1)
        .is_some_and(|fill| fill.contains("FFFF00"))
}

#[test]
fn flagged_columns_are_highlighted_yellow() {
    let table = Table::from_rows(
        vec![
            "Remetente".to_string(),
            COMBINED_DOCUMENT_FIELD.to_string(),
            EMISSION_DATE_FIELD.to_string(),
        ],
        vec![
            vec![
                Value::Text("ACME".into()),
                Value::Text("G001/X".into()),
                Value::DateTime(45292.0),
            ],
            vec![Value::Text("BETA".into()), Value::Missing, Value::Missing],
        ],
    );
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("final.xlsx");
    excel_write::write_table(&path, &table).expect("workbook written");

    let styles = read_part(&path, "xl/styles.xml");
    let sheet = read_part(&path, "xl/worksheets/sheet1.xml");

    assert!(styles.contains("FFFF00"));
    for column in [2, 3] {
        let style = column_style(&sheet, column).expect("highlighted column has a style");
        assert!(style_is_yellow(&styles, style), "column {column} is not yellow");
    }
    assert!(
        column_style(&sheet, 1).is_none_or(|style| !style_is_yellow(&styles, style)),
        "unflagged column is highlighted"
    );
}
