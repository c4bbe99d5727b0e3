//! Derived statistics over a record store: best/worst semester, mean SGPA,
//! and the final CGPA under two provenance-dependent policies.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::records::RecordStore;

/// How the "final" CGPA is picked. Complete historical data wants the
/// chronologically last record no matter what; an in-progress manual entry
/// wants the last semester actually filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalCgpaPolicy {
    /// CGPA of the chronologically last record, even if zero.
    StrictLast,
    /// Last record in store order with `cgpa > 0`; (0.0, "N/A") if none.
    LastNonzero,
}

/// A value together with the semester it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub value: f64,
    pub semester: String,
}

impl MetricPoint {
    fn of(value: f64, semester: &str) -> Self {
        MetricPoint {
            value,
            semester: semester.to_string(),
        }
    }
}

/// The four summary figures shown in the metrics panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeMetrics {
    pub highest_sgpa: MetricPoint,
    pub lowest_sgpa: MetricPoint,
    pub average_sgpa: f64,
    pub final_cgpa: MetricPoint,
}

/// Computes the summary figures. Ties on highest/lowest SGPA resolve to the
/// first occurrence in store order. The mean includes zero-valued (unfilled)
/// entries, so they pull the average down on the manual path.
pub fn compute(store: &RecordStore, policy: FinalCgpaPolicy) -> Result<GradeMetrics> {
    let records = store.records();
    let Some(first) = records.first() else {
        return Err(DashboardError::EmptyData);
    };

    let mut highest = first;
    let mut lowest = first;
    for record in &records[1..] {
        if record.sgpa > highest.sgpa {
            highest = record;
        }
        if record.sgpa < lowest.sgpa {
            lowest = record;
        }
    }

    let sgpa_column = Array1::from_vec(records.iter().map(|r| r.sgpa).collect());
    let average_sgpa = sgpa_column.mean().unwrap_or(0.0);

    let final_cgpa = match policy {
        FinalCgpaPolicy::StrictLast => {
            let last = records.last().unwrap_or(first);
            MetricPoint::of(last.cgpa, &last.semester)
        }
        FinalCgpaPolicy::LastNonzero => records
            .iter()
            .rev()
            .find(|r| r.cgpa > 0.0)
            .map(|r| MetricPoint::of(r.cgpa, &r.semester))
            .unwrap_or_else(|| MetricPoint::of(0.0, "N/A")),
    };

    Ok(GradeMetrics {
        highest_sgpa: MetricPoint::of(highest.sgpa, &highest.semester),
        lowest_sgpa: MetricPoint::of(lowest.sgpa, &lowest.semester),
        average_sgpa,
        final_cgpa,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::SemesterRecord;

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    #[test]
    fn sample_dataset_metrics() {
        let store = RecordStore::sample();
        let metrics = compute(&store, FinalCgpaPolicy::StrictLast).unwrap();

        assert_eq!(metrics.highest_sgpa, MetricPoint::of(8.70, "Sem 7"));
        assert_eq!(metrics.lowest_sgpa, MetricPoint::of(7.34, "Sem 3"));
        assert_eq!(round2(metrics.average_sgpa), 8.11);
        assert_eq!(metrics.final_cgpa, MetricPoint::of(8.13, "Sem 8"));
    }

    #[test]
    fn sgpa_ties_resolve_to_the_first_occurrence() {
        let store = RecordStore::new(vec![
            SemesterRecord::new("Sem 1", 8.0, 8.0),
            SemesterRecord::new("Sem 2", 9.0, 8.4),
            SemesterRecord::new("Sem 3", 9.0, 8.6),
        ]);
        let metrics = compute(&store, FinalCgpaPolicy::StrictLast).unwrap();
        assert_eq!(metrics.highest_sgpa, MetricPoint::of(9.0, "Sem 2"));
    }

    #[test]
    fn strict_last_reports_the_last_record_even_if_zero() {
        let store = RecordStore::new(vec![
            SemesterRecord::new("Sem 1", 8.35, 8.35),
            SemesterRecord::new("Sem 2", 0.0, 0.0),
        ]);
        let metrics = compute(&store, FinalCgpaPolicy::StrictLast).unwrap();
        assert_eq!(metrics.final_cgpa, MetricPoint::of(0.0, "Sem 2"));
    }

    #[test]
    fn last_nonzero_skips_unfilled_semesters() {
        let store = RecordStore::new(vec![
            SemesterRecord::new("Sem 1", 8.35, 8.35),
            SemesterRecord::new("Sem 2", 0.0, 0.0),
            SemesterRecord::new("Sem 3", 0.0, 0.0),
        ]);
        let metrics = compute(&store, FinalCgpaPolicy::LastNonzero).unwrap();
        assert_eq!(metrics.final_cgpa, MetricPoint::of(8.35, "Sem 1"));
    }

    #[test]
    fn last_nonzero_reports_a_sentinel_when_no_cgpa_is_filled() {
        let store = RecordStore::new(vec![
            SemesterRecord::new("Sem 1", 7.5, 0.0),
            SemesterRecord::new("Sem 2", 8.0, 0.0),
        ]);
        let metrics = compute(&store, FinalCgpaPolicy::LastNonzero).unwrap();
        assert_eq!(metrics.final_cgpa, MetricPoint::of(0.0, "N/A"));
    }

    #[test]
    fn zero_valued_entries_pull_the_average_down() {
        let store = RecordStore::new(vec![
            SemesterRecord::new("Sem 1", 8.0, 8.0),
            SemesterRecord::new("Sem 2", 0.0, 0.0),
        ]);
        let metrics = compute(&store, FinalCgpaPolicy::LastNonzero).unwrap();
        assert_eq!(metrics.average_sgpa, 4.0);
    }

    #[test]
    fn empty_store_fails_with_the_empty_data_guard() {
        let store = RecordStore::default();
        assert!(matches!(
            compute(&store, FinalCgpaPolicy::StrictLast),
            Err(DashboardError::EmptyData)
        ));
    }
}
