use std::fs;
use std::path::{Path, PathBuf};

use calamine::{Reader, open_workbook_auto};
use frete_tools::io::{csv_write, excel_write, table_read};
use frete_tools::mapping::FieldMapping;
use frete_tools::model::{Table, Value};
use frete_tools::pipeline;
use frete_tools::verify::Verdict;
use tempfile::tempdir;

const ESL_COLUMNS: [&str; 12] = [
    "Filial",
    "Série",
    "Data Emissão",
    "Remetente",
    "Destinatário",
    "Classificação",
    "Número",
    "NF 1",
    "NF 2",
    "Total Frete",
    "Valor Pedágio",
    "nº de referência",
];

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn esl_table(rows: usize) -> Table {
    let rows = (0..rows)
        .map(|n| {
            vec![
                text("SP"),
                Value::Number(1.0),
                Value::DateTime(45292.0 + n as f64),
                text(&format!("Remetente {n}")),
                text("Destino SA"),
                if n % 2 == 0 { Value::Missing } else { text("COLETA") },
                text(&format!("G{n:03}")),
                text(&format!("NF{n}")),
                if n % 3 == 0 { text(&format!("CT{n}")) } else { Value::Missing },
                if n == 0 { text("abc") } else { Value::Number(10.0 * n as f64) },
                Value::Number(1.5),
                Value::Number(9000.0 + n as f64),
            ]
        })
        .collect();
    Table::from_rows(labels(&ESL_COLUMNS), rows)
}

fn sig_table(rows: usize) -> Table {
    let rows = (0..rows)
        .map(|n| {
            vec![
                text(&format!("SIG-{n}")),
                text("Remetente SIG"),
                Value::Number(100.0),
                text("obs a"),
                text("obs b"),
            ]
        })
        .collect();
    Table::from_rows(
        labels(&["Número CT-e", "Remetente", "Valor Frete", "Obs", "Obs"]),
        rows,
    )
}

fn write_inputs(dir: &Path, esl_rows: usize, sig_rows: usize) -> (PathBuf, PathBuf) {
    let esl_path = dir.join("esl.xlsx");
    let sig_path = dir.join("sig.xlsx");
    excel_write::write_table(&esl_path, &esl_table(esl_rows)).expect("ESL workbook written");
    excel_write::write_table(&sig_path, &sig_table(sig_rows)).expect("SIG workbook written");
    (esl_path, sig_path)
}

#[test]
fn consolidates_workbooks_end_to_end() {
    let temp_dir = tempdir().expect("temporary directory");
    let (esl_path, sig_path) = write_inputs(temp_dir.path(), 10, 5);
    let output_path = temp_dir.path().join("final.xlsx");

    let outcome = pipeline::consolidate_files(
        &esl_path,
        &sig_path,
        &output_path,
        &FieldMapping::builtin(),
    )
    .expect("consolidation succeeded");

    assert_eq!(outcome.row_counts.expected, 15);
    assert_eq!(outcome.row_counts.actual, 15);
    assert_eq!(outcome.row_counts.verdict(), Verdict::Pass);
    assert_eq!(outcome.renames.renamed("Obs"), Some("Obs_1"));
    // 5 SIG rows at 100 plus ESL totals 0 (unparseable) + 10 + 20 + ... + 90.
    assert_eq!(outcome.freight_total, 500.0 + 450.0);

    let written = table_read::read_table(&output_path).expect("output read back");
    assert_eq!(written.len(), 15);
    assert_eq!(
        &written.columns()[..5],
        ["Número CT-e", "Remetente", "Valor Frete", "Obs", "Obs_1"]
    );
    assert_eq!(written.get(0, "Número CT-e"), Some(&text("SIG-0")));
    assert_eq!(written.get(4, "Obs_1"), Some(&text("obs b")));

    // Derived columns are appended after the ESL header is indexed, so they
    // never feed the mapping.
    assert_eq!(written.get(5, "Número CT-e"), Some(&Value::Missing));
    assert_eq!(written.get(6, "Número CT-e"), Some(&Value::Missing));
    assert!(!written.has_column("Emissão CT-e"));
    assert_eq!(written.get(5, "Tipo Movimento"), Some(&text("EMBARQUE")));
    assert_eq!(written.get(6, "Tipo Movimento"), Some(&text("COLETA")));
    assert_eq!(written.get(5, "Valor Frete"), Some(&Value::Number(0.0)));
    assert_eq!(written.get(7, "Pedágio"), Some(&Value::Number(1.5)));
    assert_eq!(written.get(5, "Número Coleta"), Some(&Value::Number(9000.0)));
    assert_eq!(written.get(5, "Obs"), Some(&Value::Missing));
}

#[test]
fn exported_workbook_uses_final_sheet_name() {
    let temp_dir = tempdir().expect("temporary directory");
    let (esl_path, sig_path) = write_inputs(temp_dir.path(), 2, 1);
    let output_path = temp_dir.path().join("final.xlsx");

    pipeline::consolidate_files(&esl_path, &sig_path, &output_path, &FieldMapping::builtin())
        .expect("consolidation succeeded");

    let mut workbook = open_workbook_auto(&output_path).expect("workbook opened");
    let range = workbook
        .worksheet_range(excel_write::FINAL_SHEET)
        .expect("final sheet present")
        .expect("final sheet readable");
    assert_eq!(range.height(), 4);
}

#[test]
fn csv_inputs_and_output_are_supported() {
    let temp_dir = tempdir().expect("temporary directory");
    let esl_path = temp_dir.path().join("esl.csv");
    let sig_path = temp_dir.path().join("sig.csv");
    let output_path = temp_dir.path().join("final.csv");

    fs::write(&esl_path, "Remetente,Total Frete,Natureza\nACME,12.50,\nBETA,x,VENDA\n")
        .expect("ESL csv written");
    fs::write(&sig_path, "Remetente,Valor Frete\nSIG,7\n").expect("SIG csv written");

    let outcome = pipeline::consolidate_files(
        &esl_path,
        &sig_path,
        &output_path,
        &FieldMapping::builtin(),
    )
    .expect("consolidation succeeded");

    assert_eq!(outcome.freight_total, 19.5);
    let written = fs::read_to_string(&output_path).expect("output read");
    assert_eq!(
        written,
        "Remetente,Valor Frete,Natureza\n\
         SIG,7,\n\
         ACME,12.5,\n\
         BETA,0,VENDA\n"
    );
}

#[test]
fn rerunning_produces_identical_output() {
    let first = pipeline::run(esl_table(10), sig_table(5), &FieldMapping::builtin());
    let second = pipeline::run(esl_table(10), sig_table(5), &FieldMapping::builtin());
    assert_eq!(first, second);

    let temp_dir = tempdir().expect("temporary directory");
    let first_path = temp_dir.path().join("first.csv");
    let second_path = temp_dir.path().join("second.csv");
    csv_write::write_table(&first_path, &first.consolidated).expect("first export");
    csv_write::write_table(&second_path, &second.consolidated).expect("second export");
    assert_eq!(
        fs::read(&first_path).expect("first read"),
        fs::read(&second_path).expect("second read")
    );
}

#[test]
fn mapping_override_is_loaded_from_json() {
    let temp_dir = tempdir().expect("temporary directory");
    let mapping_path = temp_dir.path().join("mapping.json");
    fs::write(&mapping_path, r#"[["Remetente", "Cliente"], ["Total Frete", "Valor Frete"]]"#)
        .expect("mapping written");

    let mapping = FieldMapping::load(&mapping_path).expect("mapping loaded");
    let outcome = pipeline::run(esl_table(3), sig_table(1), &mapping);

    assert_eq!(mapping.len(), 2);
    assert_eq!(outcome.consolidated.get(1, "Cliente"), Some(&text("Remetente 0")));
    assert_eq!(outcome.consolidated.get(1, "Número CT-e"), Some(&Value::Missing));
}

#[test]
fn unsupported_extensions_are_rejected() {
    let temp_dir = tempdir().expect("temporary directory");
    let (esl_path, sig_path) = write_inputs(temp_dir.path(), 1, 1);
    let output_path = temp_dir.path().join("final.ods");

    let result =
        pipeline::consolidate_files(&esl_path, &sig_path, &output_path, &FieldMapping::builtin());
    assert!(matches!(
        result,
        Err(frete_tools::ToolError::UnsupportedFormat(_))
    ));
}
