use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::types::CanonicalRecord;

pub const COLUMNS: [&str; 12] = [
    "name",
    "original_name",
    "year",
    "rating",
    "genres",
    "countries",
    "description",
    "runtime_minutes",
    "age_rating",
    "poster_url",
    "actors",
    "directors",
];

const LIST_SEPARATOR: &str = ", ";
const LINE_END: &str = "\r\n";

/// Header plus one data row. List fields are joined with ", ".
pub fn render_csv(record: &CanonicalRecord) -> String {
    let row = [
        record.name.clone(),
        record.original_name.clone(),
        record.year.to_string(),
        record.rating.clone(),
        record.genres.join(LIST_SEPARATOR),
        record.countries.join(LIST_SEPARATOR),
        record.description.clone(),
        record.runtime_minutes.to_string(),
        record.age_rating.to_string(),
        record.poster_url.clone(),
        record.actors.join(LIST_SEPARATOR),
        record.directors.join(LIST_SEPARATOR),
    ];

    let mut out = String::new();
    push_row(&mut out, COLUMNS.iter().copied());
    push_row(&mut out, row.iter().map(String::as_str));
    out
}

pub fn write_csv(record: &CanonicalRecord, path: &Path) -> Result<()> {
    super::write_file(path, &render_csv(record))?;
    info!("CSV saved: {:?}", path);
    Ok(())
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_cell(out, cell);
    }
    out.push_str(LINE_END);
}

/// Quote only when the cell holds a delimiter, quote or line break.
fn push_cell(out: &mut String, cell: &str) {
    if cell.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&cell.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Scalar;
    use pretty_assertions::assert_eq;

    fn record() -> CanonicalRecord {
        CanonicalRecord {
            name: "Начало".to_string(),
            original_name: "Inception".to_string(),
            year: Scalar::Number(2010),
            rating: "8.7".to_string(),
            genres: vec!["фантастика".to_string(), "боевик".to_string()],
            countries: vec!["США".to_string()],
            description: "Он сказал \"спи\"".to_string(),
            actors: vec!["A".to_string()],
            directors: vec!["N".to_string()],
            runtime_minutes: Scalar::Number(148),
            age_rating: Scalar::Number(12),
            poster_url: "https://img/p.jpg".to_string(),
        }
    }

    #[test]
    fn single_row_with_joined_lists() {
        let csv = render_csv(&record());
        let expected = "name,original_name,year,rating,genres,countries,description,runtime_minutes,age_rating,poster_url,actors,directors\r\n\
             Начало,Inception,2010,8.7,\"фантастика, боевик\",США,\"Он сказал \"\"спи\"\"\",148,12,https://img/p.jpg,A,N\r\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn multiline_description_is_quoted() {
        let mut r = record();
        r.description = "line one\nline two".to_string();
        assert!(render_csv(&r).contains("\"line one\nline two\""));
    }

    #[test]
    fn plain_cells_are_not_quoted() {
        let mut out = String::new();
        push_cell(&mut out, "plain text");
        assert_eq!(out, "plain text");
    }
}
