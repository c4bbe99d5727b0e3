//! Semester record store: CSV ingestion, schema validation, manual entry,
//! and ordering by semester sequence.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Upper bound on the manual-entry semester count control.
pub const MAX_SEMESTERS: usize = 20;

/// One semester's (label, SGPA, CGPA) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    pub semester: String,
    pub sgpa: f64,
    pub cgpa: f64,
}

impl SemesterRecord {
    pub fn new(semester: impl Into<String>, sgpa: f64, cgpa: f64) -> Self {
        SemesterRecord {
            semester: semester.into(),
            sgpa,
            cgpa,
        }
    }
}

/// One manual-entry field pair. Unset fields deserialize to 0.0, which means
/// "not yet entered".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    #[serde(default)]
    pub sgpa: f64,
    #[serde(default)]
    pub cgpa: f64,
}

/// Ordered sequence of semester records for one request. Order is
/// chronological semester progression and determines which record is "final".
/// Rebuilt from scratch on every input change; nothing persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordStore {
    records: Vec<SemesterRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<SemesterRecord>) -> Self {
        RecordStore { records }
    }

    pub fn records(&self) -> &[SemesterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The built-in demo dataset, semesters 1-8.
    pub fn sample() -> Self {
        let sgpa = [8.35, 8.03, 7.34, 8.29, 7.90, 7.95, 8.70, 8.33];
        let cgpa = [8.35, 8.19, 7.91, 8.01, 7.99, 7.98, 8.10, 8.13];
        let records = sgpa
            .iter()
            .zip(cgpa)
            .enumerate()
            .map(|(i, (&s, c))| SemesterRecord::new(format!("Sem {}", i + 1), s, c))
            .collect();
        RecordStore::new(records)
    }

    /// Parses delimited text with a header row. Requires the exact columns
    /// `Semester`, `SGPA`, `CGPA` (case-sensitive); additional columns are
    /// ignored. The semester cell is taken as text, the grade cells must be
    /// numeric. The resulting store is normalized by semester sequence.
    pub fn from_csv<R: Read>(input: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(input);
        let headers = reader
            .headers()
            .map_err(|e| DashboardError::Parse(e.to_string()))?
            .clone();

        let column = |name: &str| headers.iter().position(|h| h == name);
        let (semester_col, sgpa_col, cgpa_col) =
            match (column("Semester"), column("SGPA"), column("CGPA")) {
                (Some(sem), Some(sgpa), Some(cgpa)) => (sem, sgpa, cgpa),
                (sem, sgpa, cgpa) => {
                    let missing = [("Semester", sem), ("SGPA", sgpa), ("CGPA", cgpa)]
                        .into_iter()
                        .filter(|(_, idx)| idx.is_none())
                        .map(|(name, _)| name.to_string())
                        .collect();
                    return Err(DashboardError::Schema { missing });
                }
            };

        let mut records = Vec::new();
        for (row_number, row) in reader.records().enumerate() {
            let row = row.map_err(|e| DashboardError::Parse(e.to_string()))?;
            let semester = row.get(semester_col).unwrap_or("").trim().to_string();
            let sgpa = numeric_cell(&row, sgpa_col, "SGPA", row_number)?;
            let cgpa = numeric_cell(&row, cgpa_col, "CGPA", row_number)?;
            records.push(SemesterRecord {
                semester,
                sgpa,
                cgpa,
            });
        }

        Ok(RecordStore::new(records).normalized())
    }

    /// Builds a store from manually entered values. Labels are generated as
    /// "Sem 1".."Sem N" and values clamped to the grade scale. Fails with
    /// `EmptyInput` while every field is still at its zero default.
    pub fn from_manual(entries: &[ManualEntry]) -> Result<Self> {
        if entries.is_empty() || entries.len() > MAX_SEMESTERS {
            return Err(DashboardError::Parse(format!(
                "semester count must be between 1 and {MAX_SEMESTERS}, got {}",
                entries.len()
            )));
        }
        if entries.iter().all(|e| e.sgpa == 0.0 && e.cgpa == 0.0) {
            return Err(DashboardError::EmptyInput);
        }

        let records = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| SemesterRecord {
                semester: format!("Sem {}", i + 1),
                sgpa: entry.sgpa.clamp(0.0, 10.0),
                cgpa: entry.cgpa.clamp(0.0, 10.0),
            })
            .collect();
        Ok(RecordStore::new(records))
    }

    /// Stable-sorts ascending by the integer embedded in each semester label,
    /// but only when every label yields one. If extraction fails for any
    /// record the original input order is kept untouched; the fallback is
    /// all-or-nothing, never a partial re-ordering.
    pub fn normalized(self) -> Self {
        let keys: Option<Vec<u32>> = self
            .records
            .iter()
            .map(|r| leading_number(&r.semester))
            .collect();

        let records = match keys {
            Some(keys) => {
                let mut tagged: Vec<_> = keys.into_iter().zip(self.records).collect();
                tagged.sort_by_key(|(key, _)| *key);
                tagged.into_iter().map(|(_, record)| record).collect()
            }
            None => self.records,
        };
        RecordStore { records }
    }
}

/// First run of ASCII digits in the label, e.g. "Sem 12" -> 12.
fn leading_number(label: &str) -> Option<u32> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn numeric_cell(row: &csv::StringRecord, idx: usize, column: &str, row_number: usize) -> Result<f64> {
    let raw = row.get(idx).unwrap_or("").trim();
    raw.parse().map_err(|_| {
        DashboardError::Parse(format!(
            "row {}: {column} value {raw:?} is not numeric",
            row_number + 1
        ))
    })
}
