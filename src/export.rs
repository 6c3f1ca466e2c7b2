// 📤 Export - CSV of transactions and a PDF report stub
//
// CSV: header row from field names, one row per transaction, values via their
// default string form. Rows that fail validation on the way back in are
// skipped with a warning instead of aborting the whole file.
//
// PDF: a single A4 page with a title and the generation date. It carries no
// transaction content yet.

use crate::entities::{RawTransaction, Transaction};
use crate::settings::DateFormat;
use chrono::NaiveDate;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PDF_FILENAME: &str = "financial-report.pdf";

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV output is not valid UTF-8")]
    Encoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Pdf => "PDF",
        }
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Serialize transactions to CSV text
pub fn to_csv(transactions: &[Transaction]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for tx in transactions {
        writer.serialize(tx)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;

    String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
}

/// Parse CSV text produced by `to_csv` (or a hand-written file with the same header)
pub fn from_csv<R: Read>(reader: R) -> Result<Vec<Transaction>, ExportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for (index, result) in rdr.deserialize::<RawTransaction>().enumerate() {
        // Header is line 1
        let line = index + 2;

        let raw = match result {
            Ok(raw) => raw,
            Err(e) if is_row_error(&e) => {
                tracing::warn!(line, error = %e, "Skipping unreadable CSV row");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match Transaction::try_from(raw) {
            Ok(tx) => transactions.push(tx),
            Err(e) => tracing::warn!(line, error = %e, "Skipping invalid transaction"),
        }
    }

    Ok(transactions)
}

/// Errors confined to a single record. Anything else (I/O) ends the load.
fn is_row_error(e: &csv::Error) -> bool {
    matches!(
        e.kind(),
        csv::ErrorKind::Deserialize { .. }
            | csv::ErrorKind::UnequalLengths { .. }
            | csv::ErrorKind::Utf8 { .. }
    )
}

/// `transactions_YYYY-MM-DD.csv`
pub fn csv_filename(date: NaiveDate) -> String {
    format!("transactions_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the CSV export into `dir` and return the file path
pub fn write_csv(
    dir: &Path,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let content = to_csv(transactions)?;
    let path = dir.join(csv_filename(today));
    write_file(&path, content.as_bytes())?;

    tracing::info!(path = %path.display(), rows = transactions.len(), "Exported CSV");
    Ok(path)
}

// ============================================================================
// PDF
// ============================================================================

/// Two-line report: title at (20mm, 20mm) and generation date at (20mm, 30mm),
/// both measured from the top-left corner of an A4 page.
pub fn pdf_report(generated_on: NaiveDate, date_format: DateFormat) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) =
        PdfDocument::new("Financial Report", Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let layer = doc.get_page(page).get_layer(layer);

    // PDF origin is bottom-left
    layer.use_text("Financial Report", 20.0, Mm(20.0), Mm(A4_HEIGHT_MM - 20.0), &font);
    layer.use_text(
        format!("Generated on: {}", date_format.format(generated_on)),
        12.0,
        Mm(20.0),
        Mm(A4_HEIGHT_MM - 30.0),
        &font,
    );

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Write `financial-report.pdf` into `dir` and return the file path
pub fn write_pdf(
    dir: &Path,
    generated_on: NaiveDate,
    date_format: DateFormat,
) -> Result<PathBuf, ExportError> {
    let bytes = pdf_report(generated_on, date_format)?;
    let path = dir.join(PDF_FILENAME);
    write_file(&path, &bytes)?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Exported PDF report");
    Ok(path)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TransactionType;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn two_rows() -> Vec<Transaction> {
        vec![
            Transaction::new("1", "Grocery Shopping", -120.5, "Food", date("2024-02-20")),
            Transaction::new("2", "Salary, March", 3500.0, "Income", date("2024-02-19")),
        ]
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = to_csv(&two_rows()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "id,description,amount,category,date,type");
        assert_eq!(lines[1], "1,Grocery Shopping,-120.5,Food,2024-02-20,expense");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_round_trip() {
        let rows = two_rows();
        let csv = to_csv(&rows).unwrap();

        let parsed = from_csv(csv.as_bytes()).unwrap();

        assert_eq!(parsed, rows);
        assert_eq!(parsed[1].description, "Salary, March");
        assert_eq!(parsed[1].transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_from_csv_skips_bad_rows() {
        let text = "id,description,amount,category,date,type\n\
                    1,Ok,-5,Food,2024-01-02,expense\n\
                    2,Bad date,-5,Food,2024-13-40,expense\n\
                    3,Bad amount,abc,Food,2024-01-03,expense\n\
                    4,Wrong sign,-5,Food,2024-01-04,income\n";

        let parsed = from_csv(text.as_bytes()).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "1");
    }

    #[test]
    fn test_from_csv_skips_rows_with_wrong_field_count() {
        let text = "id,description,amount,category,date,type\n\
                    1,Ok,-5,Food,2024-01-02,expense\n\
                    2,Short row,-5,Food\n\
                    3,Ok too,-7,Food,2024-01-03,expense\n\
                    4,Long row,-9,Food,2024-01-04,expense,extra\n";

        let parsed = from_csv(text.as_bytes()).unwrap();

        let ids: Vec<&str> = parsed.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_from_csv_skips_invalid_utf8_row() {
        let mut bytes = b"id,description,amount,category,date,type\n".to_vec();
        bytes.extend_from_slice(b"1,Caf\xe9,-5,Food,2024-01-02,expense\n");
        bytes.extend_from_slice(b"2,Cafe,-5,Food,2024-01-02,expense\n");

        let parsed = from_csv(bytes.as_slice()).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "2");
    }

    #[test]
    fn test_csv_error_message_not_doubled() {
        let err = ExportError::from(csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk gone",
        )));

        assert_eq!(err.to_string(), "disk gone");
    }

    #[test]
    fn test_csv_filename_embeds_date() {
        assert_eq!(csv_filename(date("2026-10-19")), "transactions_2026-10-19.csv");
    }

    #[test]
    fn test_write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");

        let path = write_csv(&out, &two_rows(), date("2024-02-21")).unwrap();

        assert_eq!(path, out.join("transactions_2024-02-21.csv"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("id,description,amount,category,date,type"));
    }

    #[test]
    fn test_write_csv_reports_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"x").unwrap();

        let result = write_csv(&blocker, &two_rows(), date("2024-02-21"));

        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_pdf_report_is_a_pdf() {
        let bytes = pdf_report(date("2024-02-21"), DateFormat::Iso).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), date("2024-02-21"), DateFormat::MonthDayYear).unwrap();

        assert_eq!(path.file_name().unwrap(), PDF_FILENAME);
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}
