use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter predicate: age range + class membership
// ---------------------------------------------------------------------------

/// The two row filters driven by the control panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    /// Closed age range `[lo, hi]`, both within the slider domain 0..=80.
    pub age_range: [u32; 2],
    /// Selected class labels. The checklist may be emptied; an empty set
    /// selects nothing.
    pub classes: BTreeSet<String>,
}

impl FilterParams {
    /// Widest range, all classes selected: passes every row with a known age.
    pub fn all(dataset: &Dataset) -> Self {
        FilterParams {
            age_range: [0, 80],
            classes: dataset.class_labels.iter().cloned().collect(),
        }
    }
}

/// Return indices of rows that pass both filters.
///
/// A row passes when:
/// * its age is present and `lo <= age <= hi` (comparisons against a missing
///   age are false, so those rows never pass)
/// * its class label is in the selected set (empty set → nothing passes)
pub fn filtered_indices(dataset: &Dataset, params: &FilterParams) -> Vec<usize> {
    let lo = f64::from(params.age_range[0]);
    let hi = f64::from(params.age_range[1]);

    dataset
        .passengers
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            let age_ok = match p.age {
                Some(age) => age >= lo && age <= hi,
                None => false,
            };
            age_ok && params.classes.contains(&p.class)
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Passenger};

    fn passenger(id: i64, class: &str, age: Option<f64>, survived: bool) -> Passenger {
        Passenger {
            passenger_id: id,
            survived,
            class: class.to_string(),
            name: format!("Passenger {id}"),
            sex: if id % 2 == 0 { "female" } else { "male" }.to_string(),
            age,
            sibsp: 0,
            parch: 0,
            ticket: format!("T{id}"),
            fare: 10.0 * id as f64,
            cabin: None,
            embark_town: Some("S".to_string()),
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_passengers(vec![
            passenger(1, "1", Some(30.0), true),
            passenger(2, "2", Some(45.0), false),
            passenger(3, "3", None, false),
            passenger(4, "3", Some(8.0), true),
            passenger(5, "1", Some(30.0), false),
        ])
    }

    #[test]
    fn every_passing_row_satisfies_the_predicate() {
        let ds = sample_dataset();
        let params = FilterParams {
            age_range: [10, 40],
            classes: ["1", "3"].iter().map(|s| s.to_string()).collect(),
        };
        let idx = filtered_indices(&ds, &params);
        assert!(!idx.is_empty());
        for &i in &idx {
            let p = &ds.passengers[i];
            let age = p.age.expect("missing age must never pass");
            assert!((10.0..=40.0).contains(&age));
            assert!(params.classes.contains(&p.class));
        }
        // And nothing outside the constraints slipped in.
        assert_eq!(idx, vec![0, 4]);
    }

    #[test]
    fn missing_age_rows_are_excluded() {
        let ds = sample_dataset();
        let idx = filtered_indices(&ds, &FilterParams::all(&ds));
        assert!(!idx.contains(&2));
        assert_eq!(idx.len(), 4);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample_dataset();
        let params = FilterParams {
            age_range: [0, 40],
            classes: ds.class_labels.iter().cloned().collect(),
        };
        let once = filtered_indices(&ds, &params);

        // Re-filter the already-filtered subset with the same parameters.
        let subset =
            Dataset::from_passengers(once.iter().map(|&i| ds.passengers[i].clone()).collect());
        let twice = filtered_indices(&subset, &params);
        assert_eq!(twice.len(), once.len());
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
    }

    #[test]
    fn degenerate_range_keeps_exact_age_only() {
        let ds = sample_dataset();
        let params = FilterParams {
            age_range: [30, 30],
            classes: ds.class_labels.iter().cloned().collect(),
        };
        let idx = filtered_indices(&ds, &params);
        assert_eq!(idx, vec![0, 4]);
        for &i in &idx {
            assert_eq!(ds.passengers[i].age, Some(30.0));
        }
    }

    #[test]
    fn empty_class_selection_selects_nothing() {
        let ds = sample_dataset();
        let params = FilterParams {
            age_range: [0, 80],
            classes: BTreeSet::new(),
        };
        assert!(filtered_indices(&ds, &params).is_empty());
    }

    #[test]
    fn full_range_and_all_classes_keeps_every_aged_row() {
        let ds = sample_dataset();
        let idx = filtered_indices(&ds, &FilterParams::all(&ds));
        let aged = ds.passengers.iter().filter(|p| p.age.is_some()).count();
        assert_eq!(idx.len(), aged);
    }
}
