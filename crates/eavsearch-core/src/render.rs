//! Rendering and writing of query results

use crate::errors::{Result, SearchError};
use crate::model::{AttributeDescriptor, OutputFormat, OutputLocation, ResultRow};
use std::io::Write;

pub const SEARCH_CSV_HEADER: [&str; 2] = ["SKU", "Value"];
pub const ATTRIBUTE_CSV_HEADER: [&str; 3] = ["SKU", "Name", "Required"];

fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| SearchError::Serialization {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| SearchError::Serialization {
        message: e.to_string(),
    })
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Render search rows in the requested format
///
/// # Errors
///
/// `SearchError::Serialization` if CSV encoding fails.
pub fn render_results(rows: &[ResultRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_results_text(rows)),
        OutputFormat::Csv => render_results_csv(rows),
    }
}

/// One `| SKU: <sku> | Value: <value> |` line per row; NULL for null values
pub fn render_results_text(rows: &[ResultRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "| SKU: {} | Value: {} |\n",
                row.sku,
                row.value.as_deref().unwrap_or("NULL")
            )
        })
        .collect()
}

/// `SKU,Value` header, then one record per row in input order
///
/// # Errors
///
/// `SearchError::Serialization` if CSV encoding fails.
pub fn render_results_csv(rows: &[ResultRow]) -> Result<String> {
    let mut writer = csv_writer();
    writer.write_record(SEARCH_CSV_HEADER)?;
    for row in rows {
        writer.write_record([row.sku.as_str(), row.value.as_deref().unwrap_or("")])?;
    }
    finish_csv(writer)
}

/// Fixed-width attribute listing for the console
pub fn render_attributes_text(attributes: &[AttributeDescriptor]) -> String {
    attributes
        .iter()
        .map(|a| {
            format!(
                "| ID: {:>6} | Name: {:<40} | Required: {:<3} |\n",
                a.id,
                a.code,
                yes_no(a.required)
            )
        })
        .collect()
}

/// # Errors
///
/// `SearchError::Serialization` if CSV encoding fails.
pub fn render_attributes_csv(attributes: &[AttributeDescriptor]) -> Result<String> {
    let mut writer = csv_writer();
    writer.write_record(ATTRIBUTE_CSV_HEADER)?;
    for a in attributes {
        writer.write_record([a.id.to_string().as_str(), a.code.as_str(), yes_no(a.required)])?;
    }
    finish_csv(writer)
}

/// Write rendered output to stdout or a file, newline terminated
///
/// Files are created or truncated.
///
/// # Errors
///
/// `SearchError::Io` if stdout or the file cannot be written.
pub fn write_output(location: &OutputLocation, content: &str) -> Result<()> {
    let terminated = if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{}\n", content)
    };

    match location {
        OutputLocation::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(terminated.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| SearchError::io("write_stdout", e))
        }
        OutputLocation::File(path) => {
            tracing::debug!(path = %path.display(), "writing output file");
            std::fs::write(path, terminated).map_err(|e| SearchError::io("write_file", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<ResultRow> {
        vec![ResultRow::new("SKU1", Some("X")), ResultRow::new("SKU2", None)]
    }

    #[test]
    fn test_text_rendering() {
        assert_eq!(
            render_results_text(&sample_rows()),
            "| SKU: SKU1 | Value: X |\n| SKU: SKU2 | Value: NULL |\n"
        );
    }

    #[test]
    fn test_csv_rendering_keeps_order_and_header() {
        let csv = render_results(&sample_rows(), OutputFormat::Csv).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines, vec!["SKU,Value", "SKU1,X", "SKU2,"]);
    }

    #[test]
    fn test_csv_rows_end_in_line_feed() {
        let csv = render_results_csv(&sample_rows()).unwrap();
        assert_eq!(csv, "SKU,Value\nSKU1,X\nSKU2,\n");
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn test_csv_rendering_quotes_commas() {
        let rows = vec![ResultRow::new("SKU-3", Some("red, blue"))];
        let csv = render_results_csv(&rows).unwrap();
        assert!(csv.contains("SKU-3,\"red, blue\""));
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(render_results_text(&[]), "");
        assert_eq!(render_results_csv(&[]).unwrap(), "SKU,Value\n");
    }

    #[test]
    fn test_attribute_rendering() {
        let attributes = vec![AttributeDescriptor {
            id: 73,
            code: "name".to_string(),
            required: true,
        }];

        let text = render_attributes_text(&attributes);
        assert!(text.starts_with("| ID:     73 | Name: name "));
        assert!(text.contains("| Required: Yes |"));

        let csv = render_attributes_csv(&attributes).unwrap();
        assert_eq!(csv, "SKU,Name,Required\n73,name,Yes\n");
    }

    #[test]
    fn test_write_output_to_file_appends_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output(&OutputLocation::File(path.clone()), "a,b").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");

        write_output(&OutputLocation::File(path.clone()), "c\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "c\n");
    }
}
