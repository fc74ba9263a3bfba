use std::collections::BTreeMap;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Survival counts (donut chart input)
// ---------------------------------------------------------------------------

/// One slice of the survival donut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurvivalSlice {
    pub label: &'static str,
    pub count: usize,
}

pub const LABEL_SURVIVED: &str = "Survived";
pub const LABEL_DID_NOT_SURVIVE: &str = "Did Not Survive";

/// Count survived / not-survived over the filtered rows. Slices are ordered
/// by descending count; an absent outcome produces no slice at all, so an
/// empty view yields an empty vec.
pub fn survival_counts(dataset: &Dataset, indices: &[usize]) -> Vec<SurvivalSlice> {
    let mut survived = 0usize;
    let mut perished = 0usize;
    for &i in indices {
        if dataset.passengers[i].survived {
            survived += 1;
        } else {
            perished += 1;
        }
    }

    let mut slices = Vec::with_capacity(2);
    if perished > 0 {
        slices.push(SurvivalSlice {
            label: LABEL_DID_NOT_SURVIVE,
            count: perished,
        });
    }
    if survived > 0 {
        slices.push(SurvivalSlice {
            label: LABEL_SURVIVED,
            count: survived,
        });
    }
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

// ---------------------------------------------------------------------------
// Survival rate by class (bar chart input)
// ---------------------------------------------------------------------------

/// One bar: a class label and its mean survival in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRate {
    pub class: String,
    pub rate: f64,
}

/// Group the filtered rows by class and take the mean of `survived`. Classes
/// with no matching rows are omitted, not shown as zero. Bars come out in
/// ascending class-label order.
pub fn survival_rate_by_class(dataset: &Dataset, indices: &[usize]) -> Vec<ClassRate> {
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for &i in indices {
        let p = &dataset.passengers[i];
        let entry = groups.entry(p.class.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if p.survived {
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(class, (total, survived))| ClassRate {
            class: class.to_string(),
            rate: survived as f64 / total as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Preview table (first rows of the filtered view)
// ---------------------------------------------------------------------------

/// Preview column headers, in render order.
pub const PREVIEW_COLUMNS: [&str; 6] = ["name", "age", "sex", "class", "fare", "survived"];

/// How many rows the preview shows at most.
pub const PREVIEW_LIMIT: usize = 10;

/// One row of the preview table, restricted to the preview columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    pub name: String,
    pub age: Option<f64>,
    pub sex: String,
    pub class: String,
    pub fare: f64,
    pub survived: bool,
}

/// Project the first `PREVIEW_LIMIT` filtered rows onto the preview columns,
/// keeping the filtered view's order (dataset order restricted to the
/// filter).
pub fn preview_rows(dataset: &Dataset, indices: &[usize]) -> Vec<PreviewRow> {
    indices
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|&i| {
            let p = &dataset.passengers[i];
            PreviewRow {
                name: p.name.clone(),
                age: p.age,
                sex: p.sex.clone(),
                class: p.class.clone(),
                fare: p.fare,
                survived: p.survived,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
