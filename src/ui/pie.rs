use std::f32::consts::TAU;

use eframe::egui::epaint::Mesh;
use eframe::egui::{self, pos2, vec2, Color32, Pos2, Sense, Shape, Ui};

use crate::color::generate_palette;
use crate::data::model::Dataset;
use crate::data::summary::{self, SurvivalSlice};

/// Hole radius as a fraction of the outer radius.
const HOLE: f32 = 0.4;

// ---------------------------------------------------------------------------
// Survival donut chart (lower left)
// ---------------------------------------------------------------------------

/// Render the survival distribution as a ring chart. An empty filtered view
/// draws no slices and no legend, just the heading.
pub fn survival_donut(ui: &mut Ui, dataset: &Dataset, indices: &[usize], height: f32) {
    ui.strong("Survival Distribution");

    let slices = summary::survival_counts(dataset, indices);
    let total: usize = slices.iter().map(|s| s.count).sum();

    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
    if total == 0 {
        return;
    }

    let legend_width = 150.0_f32.min(width * 0.45);
    let radius = ((width - legend_width) / 2.0)
        .min(height / 2.0)
        .max(10.0)
        - 4.0;
    let center = pos2(
        rect.left() + (width - legend_width) / 2.0,
        rect.center().y,
    );

    let colors = generate_palette(slices.len());
    let painter = ui.painter_at(rect);

    // Slices start at 12 o'clock and run clockwise, largest first.
    let mut mesh = Mesh::default();
    let mut angle = -TAU / 4.0;
    for (slice, color) in slices.iter().zip(&colors) {
        let sweep = slice.count as f32 / total as f32 * TAU;
        add_ring_segment(
            &mut mesh,
            center,
            radius * HOLE,
            radius,
            angle,
            angle + sweep,
            *color,
        );
        angle += sweep;
    }
    painter.add(Shape::mesh(mesh));

    draw_legend(&painter, rect.right() - legend_width, center.y, &slices, total, &colors);
}

fn draw_legend(
    painter: &egui::Painter,
    x: f32,
    center_y: f32,
    slices: &[SurvivalSlice],
    total: usize,
    colors: &[Color32],
) {
    let row_height = 18.0;
    let top = center_y - slices.len() as f32 * row_height / 2.0;

    for (i, (slice, color)) in slices.iter().zip(colors).enumerate() {
        let y = top + i as f32 * row_height;
        let swatch = egui::Rect::from_min_size(pos2(x, y + 3.0), vec2(10.0, 10.0));
        painter.rect_filled(swatch, 2.0, *color);

        let pct = slice.count as f64 / total as f64 * 100.0;
        painter.text(
            pos2(x + 16.0, y),
            egui::Align2::LEFT_TOP,
            format!("{}  {} ({pct:.1}%)", slice.label, slice.count),
            egui::FontId::proportional(12.0),
            painter.ctx().style().visuals.text_color(),
        );
    }
}

/// Append a filled ring segment to the mesh as a strip of quads.
fn add_ring_segment(
    mesh: &mut Mesh,
    center: Pos2,
    inner_radius: f32,
    outer_radius: f32,
    start_angle: f32,
    end_angle: f32,
    color: Color32,
) {
    let sweep = end_angle - start_angle;
    let steps = ((sweep.abs() / 0.05).ceil() as usize).max(1);
    let base = mesh.vertices.len() as u32;

    for i in 0..=steps {
        let angle = start_angle + sweep * i as f32 / steps as f32;
        let (sin, cos) = angle.sin_cos();
        mesh.colored_vertex(
            pos2(center.x + cos * outer_radius, center.y + sin * outer_radius),
            color,
        );
        mesh.colored_vertex(
            pos2(center.x + cos * inner_radius, center.y + sin * inner_radius),
            color,
        );
    }

    for i in 0..steps as u32 {
        let o = base + i * 2;
        mesh.add_triangle(o, o + 1, o + 2);
        mesh.add_triangle(o + 1, o + 3, o + 2);
    }
}
