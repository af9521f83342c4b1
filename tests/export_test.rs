//! Exporter tests against real files in a temporary directory.

use kinofetch::io::writers::{csv::write_csv, json::write_json};
use kinofetch::types::{DetailFields, NamedEntry, Person, Poster, Rating};
use kinofetch::{
    CanonicalRecord, FailureKind, RawCandidate, RawDetail, Scalar, export_record,
    normalize_detail, render_csv, render_json,
};
use pretty_assertions::assert_eq;

#[cfg(test)]
mod export_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> CanonicalRecord {
        normalize_detail(&RawDetail {
            candidate: RawCandidate {
                id: Some(41519),
                name: Some("Брат".to_string()),
                alternative_name: None,
                year: Some(1997),
                rating: Some(Rating {
                    kp: Some(8.283),
                    imdb: Some(7.8),
                }),
            },
            fields: DetailFields {
                description: Some("Демобилизовавшись, Данила Багров...".to_string()),
                movie_length: Some(96),
                age_rating: Some(Scalar::Number(18)),
                poster: Some(Poster {
                    url: Some("https://img/brat.jpg".to_string()),
                    preview_url: None,
                }),
                genres: vec![
                    NamedEntry {
                        name: Some("драма".to_string()),
                    },
                    NamedEntry {
                        name: Some("криминал".to_string()),
                    },
                ],
                countries: vec![NamedEntry {
                    name: Some("Россия".to_string()),
                }],
                persons: vec![
                    Person {
                        name: Some("Сергей Бодров мл.".to_string()),
                        en_profession: Some("actor".to_string()),
                        ..Person::default()
                    },
                    Person {
                        name: Some("Алексей Балабанов".to_string()),
                        en_profession: Some("director".to_string()),
                        ..Person::default()
                    },
                ],
            },
        })
    }

    #[test]
    fn repeated_exports_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let r = record();

        let first = export_record(&r, dir.path(), "Брат");
        assert!(first.is_complete());
        let json_1 = std::fs::read(first.json.as_ref().unwrap()).unwrap();
        let csv_1 = std::fs::read(first.csv.as_ref().unwrap()).unwrap();

        let second = export_record(&r, dir.path(), "Брат");
        assert!(second.is_complete());
        assert_eq!(json_1, std::fs::read(second.json.as_ref().unwrap()).unwrap());
        assert_eq!(csv_1, std::fs::read(second.csv.as_ref().unwrap()).unwrap());

        assert_eq!(render_json(&r).unwrap(), render_json(&r).unwrap());
        assert_eq!(render_csv(&r), render_csv(&r));
    }

    #[test]
    fn json_file_keeps_cyrillic_and_structure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brat.json");
        write_json(&record(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Алексей Балабанов"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["rating"], serde_json::json!("8.3"));
        assert_eq!(value["year"], serde_json::json!(1997));
        assert_eq!(value["genres"], serde_json::json!(["драма", "криминал"]));
        assert_eq!(value.as_object().unwrap().len(), 12);
    }

    #[test]
    fn csv_file_has_header_and_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brat.csv");
        write_csv(&record(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("actors,directors"));
        assert!(lines[1].contains("\"драма, криминал\""));
        assert!(lines[1].ends_with("Сергей Бодров мл.,Алексей Балабанов"));
    }

    #[test]
    fn missing_directory_reports_export_error_for_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does").join("not").join("exist");

        let report = export_record(&record(), &missing, "Брат");
        assert!(!report.is_complete());
        assert_eq!(
            report.json.unwrap_err().kind(),
            FailureKind::ExportError
        );
        assert_eq!(report.csv.unwrap_err().kind(), FailureKind::ExportError);
    }
}
