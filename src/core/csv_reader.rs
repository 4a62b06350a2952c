use crate::domain::model::{Cell, Row};
use crate::utils::error::Result;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Tokens read as a missing cell, matching what spreadsheet exports emit for
/// blanks. `NA` is kept as text since it is the ISO code for Namibia.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn to_cell(raw: &str) -> Cell {
    if MISSING_MARKERS.contains(&raw) {
        Cell::Missing
    } else {
        Cell::Text(raw.to_string())
    }
}

/// Parse UTF-8 CSV bytes into rows in a single pass.
///
/// Every cell is kept as raw text; normalization happens later. Rows shorter
/// than the header simply lack the trailing columns so that the row processor
/// can reject them one at a time.
pub fn parse_rows(data: &[u8]) -> Result<Vec<Row>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    tracing::debug!("CSV headers: {:?}", headers);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Row::new(index + 1);
        for (header, value) in headers.iter().zip(record.iter()) {
            row.cells.insert(header.clone(), to_cell(value));
        }
        rows.push(row);
    }

    Ok(rows)
}
