use std::collections::BTreeSet;

use crate::chart::{ChartKind, ChartSelection};
use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, FilterParams};
use crate::data::model::{Dataset, Field, FieldValue};

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// Current values of every UI control. All outputs are pure functions of
/// these plus the dataset.
#[derive(Debug, Clone)]
pub struct Controls {
    pub x_field: Field,
    pub y_field: Field,
    /// Grouping / colour field, `None` for "none".
    pub group_field: Option<Field>,
    pub chart_kind: ChartKind,
    pub filters: FilterParams,
}

impl Controls {
    /// Defaults mirror the initial dashboard: age vs fare scatter coloured
    /// by sex, full age range, every class selected.
    fn for_dataset(dataset: &Dataset) -> Self {
        Controls {
            x_field: Field::Age,
            y_field: Field::Fare,
            group_field: Some(Field::Sex),
            chart_kind: ChartKind::Scatter,
            filters: FilterParams::all(dataset),
        }
    }

    pub fn chart_selection(&self) -> ChartSelection {
        ChartSelection {
            kind: self.chart_kind,
            x: self.x_field,
            y: self.y_field,
            group: self.group_field,
        }
    }

    /// Text for the range label under the sliders.
    pub fn age_range_label(&self) -> String {
        let [lo, hi] = self.filters.age_range;
        format!("Age Range: {lo} - {hi} years")
    }
}

impl Default for Controls {
    fn default() -> Self {
        Controls {
            x_field: Field::Age,
            y_field: Field::Fare,
            group_field: Some(Field::Sex),
            chart_kind: ChartKind::Scatter,
            filters: FilterParams {
                age_range: [0, 80],
                classes: BTreeSet::new(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Current control values.
    pub controls: Controls,

    /// Indices of rows passing the current filters. Rebuilt wholesale on
    /// every filter change.
    pub visible_indices: Vec<usize>,

    /// Colours for the current grouping field.
    pub color_map: ColorMap,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            controls: Controls::default(),
            visible_indices: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reset controls to their defaults.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.controls = Controls::for_dataset(&dataset);
        self.visible_indices = filtered_indices(&dataset, &self.controls.filters);
        self.dataset = Some(dataset);
        self.rebuild_color_map();
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.controls.filters);
        }
    }

    /// Set the grouping field and rebuild its colour map.
    pub fn set_group_field(&mut self, field: Option<Field>) {
        self.controls.group_field = field;
        self.rebuild_color_map();
    }

    /// Colours come from the grouping field's distinct values over the FULL
    /// dataset, so a group keeps its colour when filters change.
    fn rebuild_color_map(&mut self) {
        let (Some(ds), Some(field)) = (&self.dataset, self.controls.group_field) else {
            self.color_map = ColorMap::default();
            return;
        };
        let values: BTreeSet<FieldValue> = ds
            .passengers
            .iter()
            .map(|p| field.value(p))
            .filter(|v| !v.is_null())
            .collect();
        self.color_map = ColorMap::new(values.iter());
    }

    /// Toggle a single class label in the checklist.
    pub fn toggle_class(&mut self, label: &str) {
        let classes = &mut self.controls.filters.classes;
        if !classes.remove(label) {
            classes.insert(label.to_string());
        }
        self.refilter();
    }

    /// Select every class label.
    pub fn select_all_classes(&mut self) {
        if let Some(ds) = &self.dataset {
            self.controls.filters.classes = ds.class_labels.iter().cloned().collect();
            self.refilter();
        }
    }

    /// Deselect every class label. Yields an empty view; every output
    /// renders empty rather than erroring.
    pub fn select_no_classes(&mut self) {
        self.controls.filters.classes = BTreeSet::new();
        self.refilter();
    }

    /// The low handle moved: keep the range well-formed by dragging the
    /// high handle along.
    pub fn age_lo_changed(&mut self) {
        let [lo, hi] = self.controls.filters.age_range;
        if hi < lo {
            self.controls.filters.age_range[1] = lo;
        }
        self.refilter();
    }

    /// The high handle moved: same, in the other direction.
    pub fn age_hi_changed(&mut self) {
        let [lo, hi] = self.controls.filters.age_range;
        if lo > hi {
            self.controls.filters.age_range[0] = hi;
        }
        self.refilter();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Passenger;

    fn passenger(id: i64, class: &str, age: Option<f64>) -> Passenger {
        Passenger {
            passenger_id: id,
            survived: id % 2 == 0,
            class: class.to_string(),
            name: format!("Passenger {id}"),
            sex: "male".to_string(),
            age,
            sibsp: 0,
            parch: 0,
            ticket: format!("T{id}"),
            fare: 10.0,
            cabin: None,
            embark_town: None,
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Dataset::from_passengers(vec![
            passenger(1, "1", Some(30.0)),
            passenger(2, "2", Some(40.0)),
            passenger(3, "3", None),
        ]));
        state
    }

    #[test]
    fn loading_a_dataset_selects_everything() {
        let state = loaded_state();
        assert_eq!(state.controls.filters.age_range, [0, 80]);
        assert_eq!(state.controls.filters.classes.len(), 3);
        // The row without an age never passes the range filter.
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn toggling_a_class_refilters() {
        let mut state = loaded_state();
        state.toggle_class("2");
        assert_eq!(state.visible_indices, vec![0]);
        state.toggle_class("2");
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn deselecting_all_classes_empties_the_view() {
        let mut state = loaded_state();
        state.select_no_classes();
        assert!(state.visible_indices.is_empty());
        state.select_all_classes();
        assert_eq!(state.visible_indices.len(), 2);
    }

    #[test]
    fn slider_handles_never_cross() {
        let mut state = loaded_state();
        state.controls.filters.age_range = [50, 80];
        state.age_lo_changed();
        assert_eq!(state.controls.filters.age_range, [50, 80]);

        state.controls.filters.age_range[1] = 35;
        state.age_hi_changed();
        assert_eq!(state.controls.filters.age_range, [35, 35]);
        assert_eq!(state.visible_indices, Vec::<usize>::new());
    }

    #[test]
    fn range_label_formats_both_bounds() {
        let mut state = loaded_state();
        state.controls.filters.age_range = [18, 65];
        assert_eq!(state.controls.age_range_label(), "Age Range: 18 - 65 years");
    }
}
