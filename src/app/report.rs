use crate::domain::model::Assignment;
use crate::utils::error::{PlannerError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_FILENAME: &str = "assignment.csv";
pub const JSON_FILENAME: &str = "assignment.json";

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    bed: &'a str,
    person: &'a str,
}

/// One block per bed: the emoji and label, then one name per line.
pub fn render_text(assignment: &Assignment) -> String {
    let mut out = String::new();
    for placement in &assignment.beds {
        out.push_str(&format!("{} {}\n", placement.kind.emoji(), placement.label));
        for person in &placement.people {
            out.push_str(&format!("  - {}\n", person.name));
        }
    }
    out
}

pub fn to_csv(assignment: &Assignment) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for placement in &assignment.beds {
        for person in &placement.people {
            writer.serialize(CsvRow {
                bed: &placement.label,
                person: &person.name,
            })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PlannerError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PlannerError::ExportError {
        message: format!("CSV output was not UTF-8: {}", e),
    })
}

pub fn to_json(assignment: &Assignment) -> Result<String> {
    Ok(serde_json::to_string_pretty(assignment)?)
}

/// Writes the assignment in each requested format under `output_dir` and
/// returns the written paths.
pub fn export<P: AsRef<Path>>(
    assignment: &Assignment,
    output_dir: P,
    formats: &[String],
) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for format in formats {
        let (filename, content) = match format.as_str() {
            "csv" => (CSV_FILENAME, to_csv(assignment)?),
            "json" => (JSON_FILENAME, to_json(assignment)?),
            other => {
                return Err(PlannerError::InvalidConfigValueError {
                    field: "formats".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported format. Valid formats: csv, json".to_string(),
                })
            }
        };

        let path = output_dir.join(filename);
        fs::write(&path, content)?;
        tracing::info!("📁 Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BedKind, Person, Placement};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample() -> Assignment {
        Assignment {
            decided_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            beds: vec![
                Placement {
                    label: "Queen".to_string(),
                    kind: BedKind::Bed,
                    capacity: 2,
                    people: vec![Person::new("Alice"), Person::new("Bob")],
                },
                Placement {
                    label: "Couch".to_string(),
                    kind: BedKind::Couch,
                    capacity: 1,
                    people: vec![Person::new("Carol")],
                },
            ],
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample());
        assert_eq!(
            text,
            "🛏️ Queen\n  - Alice\n  - Bob\n🛋️ Couch\n  - Carol\n"
        );
    }

    #[test]
    fn test_csv_has_one_row_per_person() {
        let csv = to_csv(&sample()).unwrap();
        assert_eq!(csv, "bed,person\nQueen,Alice\nQueen,Bob\nCouch,Carol\n");
    }

    #[test]
    fn test_json_shape() {
        let value: serde_json::Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
        assert_eq!(value["beds"][0]["label"], "Queen");
        assert_eq!(value["beds"][1]["kind"], "couch");
        assert_eq!(value["beds"][0]["people"][1], "Bob");
        assert!(value["decided_at"].as_str().unwrap().starts_with("2024-01-02"));
    }

    #[test]
    fn test_export_writes_requested_formats() {
        let temp_dir = TempDir::new().unwrap();
        let formats = vec!["csv".to_string(), "json".to_string()];

        let written = export(&sample(), temp_dir.path(), &formats).unwrap();

        assert_eq!(written.len(), 2);
        assert!(temp_dir.path().join(CSV_FILENAME).exists());
        assert!(temp_dir.path().join(JSON_FILENAME).exists());
    }

    #[test]
    fn test_export_rejects_unknown_format() {
        let temp_dir = TempDir::new().unwrap();
        let result = export(&sample(), temp_dir.path(), &["xml".to_string()]);
        assert!(result.is_err());
    }
}
