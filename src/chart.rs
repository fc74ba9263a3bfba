use std::collections::BTreeMap;

use crate::data::model::{Dataset, Field, FieldValue};

// ---------------------------------------------------------------------------
// Chart selection – what the control panel asks for
// ---------------------------------------------------------------------------

/// The primary chart variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    Box,
    Violin,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Scatter,
        ChartKind::Box,
        ChartKind::Violin,
        ChartKind::Histogram,
    ];

    /// Label shown in the chart-kind selector.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Box => "Box Plot",
            ChartKind::Violin => "Violin Plot",
            ChartKind::Histogram => "Histogram",
        }
    }
}

/// Everything the primary chart depends on besides the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSelection {
    pub kind: ChartKind,
    pub x: Field,
    /// Ignored by [`ChartKind::Histogram`].
    pub y: Field,
    /// Grouping / colour field; `None` plots a single ungrouped series.
    pub group: Option<Field>,
}

/// Chart heading derived from the selected field names.
pub fn chart_title(sel: &ChartSelection) -> String {
    match sel.kind {
        ChartKind::Scatter => format!("{} vs {}", sel.y.title(), sel.x.title()),
        ChartKind::Box | ChartKind::Violin => {
            format!("Distribution of {} by {}", sel.y.title(), sel.x.title())
        }
        ChartKind::Histogram => format!("Distribution of {}", sel.x.title()),
    }
}

// ---------------------------------------------------------------------------
// Axis scales
// ---------------------------------------------------------------------------

/// How a field maps onto a plot axis: numeric fields keep their values,
/// categorical fields get ordinal positions 0, 1, 2, …
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Linear,
    Categorical(Vec<FieldValue>),
}

impl AxisScale {
    /// Build the scale for `field` over the filtered rows. Null values do
    /// not contribute a category.
    pub fn for_field(field: Field, dataset: &Dataset, indices: &[usize]) -> AxisScale {
        if field.is_numeric() {
            return AxisScale::Linear;
        }
        AxisScale::Categorical(distinct_values(field, dataset, indices))
    }

    /// Axis position of a value, `None` when the value cannot be placed
    /// (null, or a category not on the scale).
    pub fn position(&self, value: &FieldValue) -> Option<f64> {
        match self {
            AxisScale::Linear => value.as_f64(),
            AxisScale::Categorical(values) => values
                .iter()
                .position(|v| v == value)
                .map(|i| i as f64),
        }
    }

    /// Tick label for an axis position; only whole categorical positions
    /// produce one.
    pub fn tick_label(&self, pos: f64) -> Option<String> {
        match self {
            AxisScale::Linear => None,
            AxisScale::Categorical(values) => {
                if (pos - pos.round()).abs() > 1e-6 || pos < -0.5 {
                    return None;
                }
                values.get(pos.round() as usize).map(|v| v.to_string())
            }
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, AxisScale::Categorical(_))
    }
}

/// Sorted distinct non-null values of a field over the filtered rows.
fn distinct_values(field: Field, dataset: &Dataset, indices: &[usize]) -> Vec<FieldValue> {
    let mut values: Vec<FieldValue> = indices
        .iter()
        .map(|&i| field.value(&dataset.passengers[i]))
        .filter(|v| !v.is_null())
        .collect();
    values.sort();
    values.dedup();
    values
}

// ---------------------------------------------------------------------------
// Derived chart data (renderer-independent)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum ChartData {
    Scatter(ScatterChart),
    Box(BoxChart),
    Violin(ViolinChart),
    Histogram(HistogramChart),
}

impl ChartData {
    pub fn title(&self) -> &str {
        match self {
            ChartData::Scatter(c) => &c.title,
            ChartData::Box(c) => &c.title,
            ChartData::Violin(c) => &c.title,
            ChartData::Histogram(c) => &c.title,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub title: String,
    pub x_axis: AxisScale,
    pub y_axis: AxisScale,
    pub groups: Vec<ScatterGroup>,
}

#[derive(Debug, Clone)]
pub struct ScatterGroup {
    /// Legend label; empty for the single ungrouped series.
    pub name: String,
    pub group_value: Option<FieldValue>,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Row index into the dataset, for hover details.
    pub row: usize,
}

#[derive(Debug, Clone)]
pub struct BoxChart {
    pub title: String,
    pub x_axis: AxisScale,
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone)]
pub struct BoxGroup {
    pub name: String,
    pub group_value: Option<FieldValue>,
    pub boxes: Vec<PositionedBox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedBox {
    /// Axis position, already offset for side-by-side groups.
    pub x: f64,
    pub width: f64,
    pub stats: BoxStats,
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

#[derive(Debug, Clone)]
pub struct ViolinChart {
    pub title: String,
    pub x_axis: AxisScale,
    pub groups: Vec<ViolinGroup>,
}

#[derive(Debug, Clone)]
pub struct ViolinGroup {
    pub name: String,
    pub group_value: Option<FieldValue>,
    pub violins: Vec<Violin>,
}

#[derive(Debug, Clone)]
pub struct Violin {
    pub x: f64,
    /// Density profile along y: `(y, half_width)` pairs, widest point scaled
    /// to the violin's slot.
    pub profile: Vec<(f64, f64)>,
    /// Box summary overlaid on the violin body.
    pub stats: BoxStats,
    pub box_width: f64,
}

#[derive(Debug, Clone)]
pub struct HistogramChart {
    pub title: String,
    pub x_axis: AxisScale,
    /// Bar width in axis units (bin width, or the categorical slot).
    pub bar_width: f64,
    pub groups: Vec<HistogramGroup>,
}

#[derive(Debug, Clone)]
pub struct HistogramGroup {
    pub name: String,
    pub group_value: Option<FieldValue>,
    pub bars: Vec<HistogramBar>,
    /// Marginal box summary of the raw x values (numeric x only).
    pub summary: Option<BoxStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBar {
    pub center: f64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Derivation entry point
// ---------------------------------------------------------------------------

/// Derive the primary chart from the filtered view. Pure: same inputs, same
/// structure. An empty view produces a chart with no marks.
pub fn derive_chart(dataset: &Dataset, indices: &[usize], sel: &ChartSelection) -> ChartData {
    match sel.kind {
        ChartKind::Scatter => ChartData::Scatter(scatter_chart(dataset, indices, sel)),
        ChartKind::Box => ChartData::Box(box_chart(dataset, indices, sel)),
        ChartKind::Violin => ChartData::Violin(violin_chart(dataset, indices, sel)),
        ChartKind::Histogram => ChartData::Histogram(histogram_chart(dataset, indices, sel)),
    }
}

/// Split the filtered rows by the grouping field. Without a grouping field
/// everything lands in one unnamed group. Rows with a null grouping value
/// are dropped from the chart (they stay in the other outputs).
fn group_rows(
    dataset: &Dataset,
    indices: &[usize],
    group: Option<Field>,
) -> Vec<(Option<FieldValue>, Vec<usize>)> {
    match group {
        None => vec![(None, indices.to_vec())],
        Some(field) => {
            let mut map: BTreeMap<FieldValue, Vec<usize>> = BTreeMap::new();
            for &i in indices {
                let v = field.value(&dataset.passengers[i]);
                if v.is_null() {
                    continue;
                }
                map.entry(v).or_default().push(i);
            }
            map.into_iter().map(|(v, rows)| (Some(v), rows)).collect()
        }
    }
}

fn group_name(value: &Option<FieldValue>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

// ---- scatter ----

fn scatter_chart(dataset: &Dataset, indices: &[usize], sel: &ChartSelection) -> ScatterChart {
    let x_axis = AxisScale::for_field(sel.x, dataset, indices);
    let y_axis = AxisScale::for_field(sel.y, dataset, indices);

    let groups = group_rows(dataset, indices, sel.group)
        .into_iter()
        .map(|(value, rows)| {
            let points = rows
                .iter()
                .filter_map(|&i| {
                    let p = &dataset.passengers[i];
                    let x = x_axis.position(&sel.x.value(p))?;
                    let y = y_axis.position(&sel.y.value(p))?;
                    Some(ScatterPoint { x, y, row: i })
                })
                .collect();
            ScatterGroup {
                name: group_name(&value),
                group_value: value,
                points,
            }
        })
        .collect();

    ScatterChart {
        title: chart_title(sel),
        x_axis,
        y_axis,
        groups,
    }
}

// ---- box ----

/// Width of the band one x-category occupies; side-by-side group boxes share
/// it.
const CATEGORY_SLOT: f64 = 0.8;

fn box_chart(dataset: &Dataset, indices: &[usize], sel: &ChartSelection) -> BoxChart {
    // Box plots place every distinct x value at an ordinal position, numeric
    // fields included, so side-by-side group offsets stay uniform.
    let x_axis = AxisScale::Categorical(distinct_values(sel.x, dataset, indices));

    let grouped = group_rows(dataset, indices, sel.group);
    let n_groups = grouped.len().max(1);
    let box_width = CATEGORY_SLOT / n_groups as f64;

    let groups = grouped
        .into_iter()
        .enumerate()
        .map(|(g, (value, rows))| {
            let boxes = boxes_for_group(
                dataset, &rows, sel, &x_axis, g, n_groups, box_width,
            );
            BoxGroup {
                name: group_name(&value),
                group_value: value,
                boxes,
            }
        })
        .collect();

    BoxChart {
        title: chart_title(sel),
        x_axis,
        groups,
    }
}

fn boxes_for_group(
    dataset: &Dataset,
    rows: &[usize],
    sel: &ChartSelection,
    x_axis: &AxisScale,
    group_index: usize,
    n_groups: usize,
    box_width: f64,
) -> Vec<PositionedBox> {
    let mut per_category: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
    for &i in rows {
        let p = &dataset.passengers[i];
        let Some(x) = x_axis.position(&sel.x.value(p)) else {
            continue;
        };
        let Some(y) = sel.y.value(p).as_f64() else {
            continue;
        };
        per_category.entry(x as u64).or_default().push(y);
    }

    per_category
        .into_iter()
        .filter_map(|(cat, values)| {
            let stats = box_stats(&values)?;
            let x = cat as f64 + group_offset(group_index, n_groups, box_width);
            Some(PositionedBox {
                x,
                width: box_width * 0.9,
                stats,
            })
        })
        .collect()
}

/// Offset of group `g` of `n` within a category slot, centred on the
/// category position.
fn group_offset(g: usize, n: usize, width: f64) -> f64 {
    (g as f64 - (n as f64 - 1.0) / 2.0) * width
}

// ---- violin ----

/// Number of sample points along a violin's density profile.
const VIOLIN_PROFILE_STEPS: usize = 40;

fn violin_chart(dataset: &Dataset, indices: &[usize], sel: &ChartSelection) -> ViolinChart {
    let x_axis = AxisScale::Categorical(distinct_values(sel.x, dataset, indices));

    let grouped = group_rows(dataset, indices, sel.group);
    let n_groups = grouped.len().max(1);
    let slot = CATEGORY_SLOT / n_groups as f64;

    let groups = grouped
        .into_iter()
        .enumerate()
        .map(|(g, (value, rows))| {
            let mut per_category: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
            for &i in &rows {
                let p = &dataset.passengers[i];
                let Some(x) = x_axis.position(&sel.x.value(p)) else {
                    continue;
                };
                let Some(y) = sel.y.value(p).as_f64() else {
                    continue;
                };
                per_category.entry(x as u64).or_default().push(y);
            }

            let violins = per_category
                .into_iter()
                .filter_map(|(cat, values)| {
                    let stats = box_stats(&values)?;
                    let x = cat as f64 + group_offset(g, n_groups, slot);
                    let profile = density_profile(&values, slot / 2.0 * 0.9);
                    Some(Violin {
                        x,
                        profile,
                        stats,
                        box_width: slot * 0.25,
                    })
                })
                .collect();

            ViolinGroup {
                name: group_name(&value),
                group_value: value,
                violins,
            }
        })
        .collect();

    ViolinChart {
        title: chart_title(sel),
        x_axis,
        groups,
    }
}

/// Gaussian-KDE density along the value range, scaled so the widest point
/// equals `max_half_width`.
fn density_profile(values: &[f64], max_half_width: f64) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }
    let h = silverman_bandwidth(values);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - 2.0 * h;
    let hi = max + 2.0 * h;
    let step = (hi - lo) / VIOLIN_PROFILE_STEPS as f64;

    let mut profile: Vec<(f64, f64)> = (0..=VIOLIN_PROFILE_STEPS)
        .map(|i| {
            let y = lo + step * i as f64;
            (y, gaussian_kde(values, y, h))
        })
        .collect();

    let peak = profile
        .iter()
        .map(|&(_, d)| d)
        .fold(0.0_f64, f64::max);
    if peak > 0.0 {
        for (_, d) in &mut profile {
            *d = *d / peak * max_half_width;
        }
    }
    profile
}

/// Silverman's rule of thumb, with a floor so degenerate samples (n = 1 or
/// all-equal values) still get a usable bandwidth.
pub fn silverman_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 1.0;
    }
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = var.sqrt();

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let iqr = percentile(&sorted, 0.75) - percentile(&sorted, 0.25);

    let spread = if iqr > 0.0 {
        std.min(iqr / 1.34)
    } else {
        std
    };
    let h = 0.9 * spread * n.powf(-0.2);
    if h > 0.0 {
        h
    } else {
        1.0
    }
}

/// Kernel density estimate at `at` with gaussian kernels of bandwidth `h`.
pub fn gaussian_kde(values: &[f64], at: f64, h: f64) -> f64 {
    if values.is_empty() || h <= 0.0 {
        return 0.0;
    }
    let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * h * values.len() as f64);
    values
        .iter()
        .map(|&v| (-0.5 * ((at - v) / h).powi(2)).exp())
        .sum::<f64>()
        * norm
}

// ---- histogram ----

fn histogram_chart(dataset: &Dataset, indices: &[usize], sel: &ChartSelection) -> HistogramChart {
    let x_axis = AxisScale::for_field(sel.x, dataset, indices);
    let grouped = group_rows(dataset, indices, sel.group);

    // x values per group, nulls dropped.
    let group_values: Vec<(Option<FieldValue>, Vec<f64>)> = grouped
        .into_iter()
        .map(|(value, rows)| {
            let xs = rows
                .iter()
                .filter_map(|&i| x_axis.position(&sel.x.value(&dataset.passengers[i])))
                .collect();
            (value, xs)
        })
        .collect();

    let (bar_width, groups) = match &x_axis {
        AxisScale::Categorical(cats) => {
            let groups = group_values
                .into_iter()
                .map(|(value, xs)| {
                    let mut counts = vec![0usize; cats.len()];
                    for x in &xs {
                        counts[x.round() as usize] += 1;
                    }
                    let bars = counts
                        .into_iter()
                        .enumerate()
                        .map(|(i, count)| HistogramBar {
                            center: i as f64,
                            count,
                        })
                        .collect();
                    HistogramGroup {
                        name: group_name(&value),
                        group_value: value,
                        bars,
                        summary: None,
                    }
                })
                .collect();
            (CATEGORY_SLOT, groups)
        }
        AxisScale::Linear => {
            // Shared bins across groups, over the whole filtered range.
            let all: Vec<f64> = group_values
                .iter()
                .flat_map(|(_, xs)| xs.iter().copied())
                .collect();
            let bins = numeric_bins(&all);

            let groups = group_values
                .into_iter()
                .map(|(value, xs)| {
                    let bars = match &bins {
                        Some(b) => b.count(&xs),
                        None => Vec::new(),
                    };
                    let mut sorted = xs;
                    sorted.sort_by(f64::total_cmp);
                    HistogramGroup {
                        name: group_name(&value),
                        group_value: value,
                        summary: box_stats(&sorted),
                        bars,
                    }
                })
                .collect();
            (bins.map(|b| b.width).unwrap_or(1.0), groups)
        }
    };

    HistogramChart {
        title: chart_title(sel),
        x_axis,
        bar_width,
        groups,
    }
}

/// Equal-width bin layout for a numeric histogram axis.
struct BinLayout {
    min: f64,
    width: f64,
    count: usize,
}

impl BinLayout {
    fn count(&self, values: &[f64]) -> Vec<HistogramBar> {
        let mut counts = vec![0usize; self.count];
        for &v in values {
            let mut bin = ((v - self.min) / self.width).floor() as usize;
            // The maximum lands exactly on the upper edge; keep it inside.
            if bin >= self.count {
                bin = self.count - 1;
            }
            counts[bin] += 1;
        }
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBar {
                center: self.min + self.width * (i as f64 + 0.5),
                count,
            })
            .collect()
    }
}

fn numeric_bins(values: &[f64]) -> Option<BinLayout> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        // All values identical: one unit-wide bin around them.
        return Some(BinLayout {
            min: min - 0.5,
            width: 1.0,
            count: 1,
        });
    }
    let count = sturges_bins(values.len());
    Some(BinLayout {
        min,
        width: (max - min) / count as f64,
        count,
    })
}

/// Sturges' formula: `ceil(log2 n) + 1` bins.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

// ---- shared statistics ----

/// Five-number summary over a sample. Quartiles use linear interpolation;
/// whiskers extend to the most extreme points within 1.5·IQR of the
/// quartiles (Tukey).
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = percentile(&sorted, 0.25);
    let median = percentile(&sorted, 0.5);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;

    let lo_fence = q1 - 1.5 * iqr;
    let hi_fence = q3 + 1.5 * iqr;
    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|&v| v >= lo_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= hi_fence)
        .unwrap_or(q3);

    Some(BoxStats {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
    })
}

/// Linear-interpolation percentile of an already-sorted sample, `p` in
/// `[0, 1]`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Passenger};

    fn passenger(
        id: i64,
        class: &str,
        sex: &str,
        age: Option<f64>,
        fare: f64,
        survived: bool,
    ) -> Passenger {
        Passenger {
            passenger_id: id,
            survived,
            class: class.to_string(),
            name: format!("Passenger {id}"),
            sex: sex.to_string(),
            age,
            sibsp: 0,
            parch: 0,
            ticket: format!("T{id}"),
            fare,
            cabin: None,
            embark_town: Some("S".to_string()),
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_passengers(vec![
            passenger(1, "1", "male", Some(30.0), 80.0, true),
            passenger(2, "1", "female", Some(40.0), 120.0, true),
            passenger(3, "2", "male", Some(25.0), 20.0, false),
            passenger(4, "2", "female", Some(35.0), 26.0, true),
            passenger(5, "3", "male", Some(20.0), 8.0, false),
            passenger(6, "3", "female", Some(22.0), 9.0, false),
            passenger(7, "3", "male", None, 7.0, false),
        ])
    }

    fn all_indices(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    fn selection(kind: ChartKind, group: Option<Field>) -> ChartSelection {
        ChartSelection {
            kind,
            x: Field::Age,
            y: Field::Fare,
            group,
        }
    }

    #[test]
    fn titles_follow_the_selected_fields() {
        let mut sel = selection(ChartKind::Scatter, None);
        assert_eq!(chart_title(&sel), "Fare vs Age");

        sel.kind = ChartKind::Box;
        assert_eq!(chart_title(&sel), "Distribution of Fare by Age");

        sel.kind = ChartKind::Histogram;
        sel.x = Field::EmbarkTown;
        assert_eq!(chart_title(&sel), "Distribution of Embark_town");
    }

    #[test]
    fn categorical_axis_positions_are_sorted_and_stable() {
        let ds = sample_dataset();
        let axis = AxisScale::for_field(Field::Class, &ds, &all_indices(&ds));
        let AxisScale::Categorical(values) = &axis else {
            panic!("class must be categorical");
        };
        assert_eq!(values.len(), 3);
        assert_eq!(axis.position(&FieldValue::Str("1".into())), Some(0.0));
        assert_eq!(axis.position(&FieldValue::Str("3".into())), Some(2.0));
        assert_eq!(axis.tick_label(1.0).as_deref(), Some("2"));
        assert_eq!(axis.tick_label(0.5), None);
    }

    #[test]
    fn scatter_has_one_point_per_plottable_row() {
        let ds = sample_dataset();
        let data = derive_chart(&ds, &all_indices(&ds), &selection(ChartKind::Scatter, None));
        let ChartData::Scatter(chart) = data else {
            panic!("expected scatter");
        };
        assert_eq!(chart.groups.len(), 1);
        // Row 7 has no age, so it cannot be placed on the x axis.
        assert_eq!(chart.groups[0].points.len(), 6);
    }

    #[test]
    fn scatter_grouping_splits_rows_by_value() {
        let ds = sample_dataset();
        let data = derive_chart(
            &ds,
            &all_indices(&ds),
            &selection(ChartKind::Scatter, Some(Field::Sex)),
        );
        let ChartData::Scatter(chart) = data else {
            panic!("expected scatter");
        };
        let names: Vec<&str> = chart.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["female", "male"]);
        let total: usize = chart.groups.iter().map(|g| g.points.len()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn box_stats_known_quartiles() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 5.0);
    }

    #[test]
    fn box_whiskers_exclude_outliers() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        // 100 is far outside q3 + 1.5*IQR, the whisker stops at 4.
        assert_eq!(stats.upper_whisker, 4.0);
    }

    #[test]
    fn box_stats_single_value_collapses() {
        let stats = box_stats(&[7.5]).unwrap();
        assert_eq!(stats.q1, 7.5);
        assert_eq!(stats.median, 7.5);
        assert_eq!(stats.q3, 7.5);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 1.0), 40.0);
        assert_eq!(percentile(&sorted, 0.5), 25.0);
    }

    #[test]
    fn grouped_boxes_sit_side_by_side() {
        let ds = sample_dataset();
        let sel = ChartSelection {
            kind: ChartKind::Box,
            x: Field::Class,
            y: Field::Fare,
            group: Some(Field::Sex),
        };
        let ChartData::Box(chart) = derive_chart(&ds, &all_indices(&ds), &sel) else {
            panic!("expected box");
        };
        assert_eq!(chart.groups.len(), 2);
        // Boxes of different groups at the same category must not overlap
        // positions.
        let female_x: Vec<f64> = chart.groups[0].boxes.iter().map(|b| b.x).collect();
        let male_x: Vec<f64> = chart.groups[1].boxes.iter().map(|b| b.x).collect();
        for fx in &female_x {
            assert!(male_x.iter().all(|mx| (mx - fx).abs() > 1e-9));
        }
    }

    #[test]
    fn histogram_ignores_the_y_field() {
        let ds = sample_dataset();
        let idx = all_indices(&ds);
        let with_fare = derive_chart(
            &ds,
            &idx,
            &ChartSelection {
                kind: ChartKind::Histogram,
                x: Field::Age,
                y: Field::Fare,
                group: None,
            },
        );
        let with_class = derive_chart(
            &ds,
            &idx,
            &ChartSelection {
                kind: ChartKind::Histogram,
                x: Field::Age,
                y: Field::Class,
                group: None,
            },
        );
        let (ChartData::Histogram(a), ChartData::Histogram(b)) = (with_fare, with_class) else {
            panic!("expected histograms");
        };
        assert_eq!(a.groups[0].bars, b.groups[0].bars);
    }

    #[test]
    fn histogram_counts_cover_every_plottable_row() {
        let ds = sample_dataset();
        let data = derive_chart(
            &ds,
            &all_indices(&ds),
            &ChartSelection {
                kind: ChartKind::Histogram,
                x: Field::Age,
                y: Field::Fare,
                group: None,
            },
        );
        let ChartData::Histogram(chart) = data else {
            panic!("expected histogram");
        };
        let counted: usize = chart.groups[0].bars.iter().map(|b| b.count).sum();
        assert_eq!(counted, 6); // one row has no age
        assert!(chart.groups[0].summary.is_some());
    }

    #[test]
    fn categorical_histogram_counts_per_label() {
        let ds = sample_dataset();
        let data = derive_chart(
            &ds,
            &all_indices(&ds),
            &ChartSelection {
                kind: ChartKind::Histogram,
                x: Field::Class,
                y: Field::Fare,
                group: None,
            },
        );
        let ChartData::Histogram(chart) = data else {
            panic!("expected histogram");
        };
        let counts: Vec<usize> = chart.groups[0].bars.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 3]);
        assert!(chart.groups[0].summary.is_none());
    }

    #[test]
    fn empty_view_derives_empty_charts_for_every_kind() {
        let ds = sample_dataset();
        let empty: Vec<usize> = Vec::new();
        for kind in ChartKind::ALL {
            let data = derive_chart(&ds, &empty, &selection(kind, Some(Field::Sex)));
            match data {
                ChartData::Scatter(c) => assert!(c.groups.is_empty()),
                ChartData::Box(c) => assert!(c.groups.is_empty()),
                ChartData::Violin(c) => assert!(c.groups.is_empty()),
                ChartData::Histogram(c) => assert!(c.groups.is_empty()),
            }
        }
    }

    #[test]
    fn sturges_bin_counts() {
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(8), 4);
        assert_eq!(sturges_bins(100), 8);
    }

    #[test]
    fn kde_integrates_to_roughly_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 4.5, 5.0, 6.0];
        let h = silverman_bandwidth(&values);
        assert!(h > 0.0);
        // Trapezoid rule over a generous range.
        let steps = 2000;
        let (lo, hi) = (-10.0, 20.0);
        let dx = (hi - lo) / steps as f64;
        let mut area = 0.0;
        for i in 0..steps {
            let a = gaussian_kde(&values, lo + dx * i as f64, h);
            let b = gaussian_kde(&values, lo + dx * (i + 1) as f64, h);
            area += (a + b) / 2.0 * dx;
        }
        assert!((area - 1.0).abs() < 1e-3, "area = {area}");
    }

    #[test]
    fn violin_profile_peaks_at_the_slot_half_width() {
        let values = [1.0, 2.0, 2.0, 3.0, 4.0];
        let profile = density_profile(&values, 0.4);
        let peak = profile.iter().map(|&(_, w)| w).fold(0.0_f64, f64::max);
        assert!((peak - 0.4).abs() < 1e-12);
        assert!(profile.iter().all(|&(_, w)| w >= 0.0));
    }
}
