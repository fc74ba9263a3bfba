use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, Points, Polygon,
};

use crate::chart::{
    self, AxisScale, BoxChart, BoxStats, ChartData, HistogramChart, ScatterChart, ViolinChart,
};
use crate::color::ColorMap;
use crate::data::model::{Dataset, Passenger};
use crate::data::summary;
use crate::state::AppState;
use crate::ui::pie;

/// Screen-space pick radius for the scatter hover tooltip.
const HOVER_RADIUS: f32 = 12.0;

// ---------------------------------------------------------------------------
// Central panel – primary chart + survival charts
// ---------------------------------------------------------------------------

pub fn charts_panel(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to explore  (File → Open…)");
        });
        return;
    };

    let total_height = ui.available_height();
    let main_height = (total_height * 0.58).max(200.0);
    let lower_height = (total_height - main_height - 60.0).max(140.0);

    let data = chart::derive_chart(
        dataset,
        &state.visible_indices,
        &state.controls.chart_selection(),
    );

    ui.heading(data.title());
    primary_chart(ui, state, dataset, &data, main_height);

    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        pie::survival_donut(&mut cols[0], dataset, &state.visible_indices, lower_height);
        survival_rate_bar(&mut cols[1], dataset, &state.visible_indices, lower_height);
    });
}

// ---------------------------------------------------------------------------
// Primary chart
// ---------------------------------------------------------------------------

fn primary_chart(
    ui: &mut Ui,
    state: &AppState,
    dataset: &Dataset,
    data: &ChartData,
    height: f32,
) {
    let sel = state.controls.chart_selection();

    let mut plot = Plot::new("primary_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(sel.x.key())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true);

    plot = match data {
        ChartData::Histogram(_) => plot.y_axis_label("count"),
        _ => plot.y_axis_label(sel.y.key()),
    };

    // Categorical axes render their labels instead of raw positions.
    let x_axis = match data {
        ChartData::Scatter(c) => &c.x_axis,
        ChartData::Box(c) => &c.x_axis,
        ChartData::Violin(c) => &c.x_axis,
        ChartData::Histogram(c) => &c.x_axis,
    };
    if x_axis.is_categorical() {
        let axis = x_axis.clone();
        plot = plot.x_axis_formatter(move |mark, _range| {
            axis.tick_label(mark.value).unwrap_or_default()
        });
    }
    if let ChartData::Scatter(c) = data {
        if c.y_axis.is_categorical() {
            let axis = c.y_axis.clone();
            plot = plot.y_axis_formatter(move |mark, _range| {
                axis.tick_label(mark.value).unwrap_or_default()
            });
        }
    }

    let color_map = &state.color_map;
    let response = plot.show(ui, |plot_ui| match data {
        ChartData::Scatter(c) => draw_scatter(plot_ui, c, color_map),
        ChartData::Box(c) => {
            draw_boxes(plot_ui, c, color_map);
            None
        }
        ChartData::Violin(c) => {
            draw_violins(plot_ui, c, color_map);
            None
        }
        ChartData::Histogram(c) => {
            draw_histogram(plot_ui, c, color_map);
            None
        }
    });

    if let Some(row) = response.inner {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            response.response.layer_id,
            egui::Id::new("passenger_details"),
            |ui: &mut Ui| passenger_tooltip(ui, &dataset.passengers[row]),
        );
    }
}

// ---- scatter ----

fn draw_scatter(
    plot_ui: &mut egui_plot::PlotUi,
    chart: &ScatterChart,
    color_map: &ColorMap,
) -> Option<usize> {
    for group in &chart.groups {
        let color = color_map.color_for(group.group_value.as_ref());
        let coords: Vec<[f64; 2]> = group.points.iter().map(|p| [p.x, p.y]).collect();
        let mut points = Points::new(coords).color(color).radius(2.5);
        if !group.name.is_empty() {
            points = points.name(&group.name);
        }
        plot_ui.points(points);
    }

    // Nearest mark under the pointer, for the detail tooltip.
    let pointer = plot_ui.response().hover_pos()?;
    let mut best: Option<(f32, usize)> = None;
    for group in &chart.groups {
        for p in &group.points {
            let screen = plot_ui.screen_from_plot(PlotPoint::new(p.x, p.y));
            let dist = screen.distance(pointer);
            if dist <= HOVER_RADIUS && best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, p.row));
            }
        }
    }
    best.map(|(_, row)| row)
}

/// Detail card shown when hovering a scatter mark. Always the same six
/// columns, independent of what the chart plots.
fn passenger_tooltip(ui: &mut Ui, p: &Passenger) {
    egui::Grid::new("passenger_details_grid")
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("name");
            ui.label(&p.name);
            ui.end_row();
            ui.label("age");
            ui.label(p.age.map(|a| a.to_string()).unwrap_or_default());
            ui.end_row();
            ui.label("fare");
            ui.label(p.fare.to_string());
            ui.end_row();
            ui.label("class");
            ui.label(&p.class);
            ui.end_row();
            ui.label("sex");
            ui.label(&p.sex);
            ui.end_row();
            ui.label("survived");
            ui.label(if p.survived { "1" } else { "0" });
            ui.end_row();
        });
}

// ---- box ----

fn spread(stats: &BoxStats) -> BoxSpread {
    BoxSpread::new(
        stats.lower_whisker,
        stats.q1,
        stats.median,
        stats.q3,
        stats.upper_whisker,
    )
}

fn draw_boxes(plot_ui: &mut egui_plot::PlotUi, chart: &BoxChart, color_map: &ColorMap) {
    for group in &chart.groups {
        let color = color_map.color_for(group.group_value.as_ref());
        let elems: Vec<BoxElem> = group
            .boxes
            .iter()
            .map(|b| {
                BoxElem::new(b.x, spread(&b.stats))
                    .box_width(b.width)
                    .whisker_width(b.width * 0.5)
                    .fill(color.gamma_multiply(0.4))
                    .stroke(Stroke::new(1.5, color))
            })
            .collect();
        let mut box_plot = BoxPlot::new(elems);
        if !group.name.is_empty() {
            box_plot = box_plot.name(&group.name);
        }
        plot_ui.box_plot(box_plot);
    }
}

// ---- violin ----

fn draw_violins(plot_ui: &mut egui_plot::PlotUi, chart: &ViolinChart, color_map: &ColorMap) {
    for group in &chart.groups {
        let color = color_map.color_for(group.group_value.as_ref());

        let mut named = false;
        for violin in &group.violins {
            let mut outline: Vec<[f64; 2]> = Vec::with_capacity(violin.profile.len() * 2);
            for &(y, w) in &violin.profile {
                outline.push([violin.x + w, y]);
            }
            for &(y, w) in violin.profile.iter().rev() {
                outline.push([violin.x - w, y]);
            }

            let mut polygon = Polygon::new(outline)
                .fill_color(color.gamma_multiply(0.3))
                .stroke(Stroke::new(1.0, color));
            if !group.name.is_empty() && !named {
                polygon = polygon.name(&group.name);
                named = true;
            }
            plot_ui.polygon(polygon);
        }

        // Box summary overlaid on each violin body.
        let elems: Vec<BoxElem> = group
            .violins
            .iter()
            .map(|v| {
                BoxElem::new(v.x, spread(&v.stats))
                    .box_width(v.box_width)
                    .whisker_width(v.box_width * 0.5)
                    .fill(color.gamma_multiply(0.6))
                    .stroke(Stroke::new(1.0, color))
            })
            .collect();
        plot_ui.box_plot(BoxPlot::new(elems));
    }
}

// ---- histogram ----

fn draw_histogram(plot_ui: &mut egui_plot::PlotUi, chart: &HistogramChart, color_map: &ColorMap) {
    let max_count = chart
        .groups
        .iter()
        .flat_map(|g| g.bars.iter())
        .map(|b| b.count)
        .max()
        .unwrap_or(0) as f64;

    for (gi, group) in chart.groups.iter().enumerate() {
        let color = color_map.color_for(group.group_value.as_ref());

        // Groups overlay translucently at the same positions, not stacked.
        let bars: Vec<Bar> = group
            .bars
            .iter()
            .filter(|b| b.count > 0)
            .map(|b| {
                Bar::new(b.center, b.count as f64)
                    .width(chart.bar_width)
                    .fill(color.gamma_multiply(0.55))
            })
            .collect();
        let mut bar_chart = BarChart::new(bars);
        if !group.name.is_empty() {
            bar_chart = bar_chart.name(&group.name);
        }
        plot_ui.bar_chart(bar_chart);

        // Marginal box summary above the bars, one lane per group.
        if let (Some(stats), true) = (&group.summary, max_count > 0.0) {
            let lane = max_count * (1.06 + 0.08 * gi as f64);
            let elem = BoxElem::new(lane, spread(stats))
                .box_width(max_count * 0.05)
                .whisker_width(max_count * 0.04)
                .fill(color.gamma_multiply(0.4))
                .stroke(Stroke::new(1.0, color));
            plot_ui.box_plot(BoxPlot::new(vec![elem]).horizontal());
        }
    }
}

// ---------------------------------------------------------------------------
// Survival-rate bar chart (lower right)
// ---------------------------------------------------------------------------

fn survival_rate_bar(ui: &mut Ui, dataset: &Dataset, indices: &[usize], height: f32) {
    ui.strong("Survival Rate by Class");

    let rates = summary::survival_rate_by_class(dataset, indices);
    let labels: Vec<String> = rates.iter().map(|r| r.class.clone()).collect();

    let bars: Vec<Bar> = rates
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.rate * 100.0)
                .width(0.6)
                .name(&r.class)
                .fill(Color32::LIGHT_BLUE)
        })
        .collect();

    Plot::new("survival_rate")
        .height(height)
        .include_y(0.0)
        .x_axis_label("Passenger Class")
        .y_axis_label("Survival Rate")
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value;
            if (pos - pos.round()).abs() > 1e-6 || pos < -0.5 {
                return String::new();
            }
            labels
                .get(pos.round() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_axis_formatter(|mark, _range| format!("{:.0}%", mark.value))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
