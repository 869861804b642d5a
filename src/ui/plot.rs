use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, pos2, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::histogram::Histogram;
use crate::data::model::{Dataset, Diagnosis, Measure};
use crate::data::summary::Summary;

/// Columns of the scatter matrix, in display order.
pub const SCATTER_DIMENSIONS: [Measure; 5] = [
    Measure::Area,
    Measure::Radius,
    Measure::Perimeter,
    Measure::Concavity,
    Measure::Symmetry,
];

// ---------------------------------------------------------------------------
// Pie chart: tumors per diagnosis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub diagnosis: Diagnosis,
    pub count: usize,
    /// Radians, clockwise from 12 o'clock.
    pub start: f32,
    pub sweep: f32,
}

/// Angular layout of the non-empty categories in `summary`.
pub fn pie_slices(summary: &Summary) -> Vec<PieSlice> {
    let mut start = 0.0;
    let mut slices = Vec::new();
    for diagnosis in Diagnosis::ALL {
        let Some(share) = summary.share(diagnosis) else {
            continue;
        };
        let count = summary.count(diagnosis);
        if count == 0 {
            continue;
        }
        let sweep = share as f32 * TAU;
        slices.push(PieSlice {
            diagnosis,
            count,
            start,
            sweep,
        });
        start += sweep;
    }
    slices
}

fn point_on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    // angle 0 at 12 o'clock, growing clockwise
    let a = angle - FRAC_PI_2;
    pos2(center.x + radius * a.cos(), center.y + radius * a.sin())
}

/// Render the diagnosis split as a pie with a legend.
pub fn pie_chart(ui: &mut Ui, summary: &Summary, colors: &ColorMap) {
    let slices = pie_slices(summary);
    if slices.is_empty() {
        ui.label("No tumors match the current filters.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let side = ui.available_width().clamp(120.0, 260.0);
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let center = response.rect.center();
        let radius = side * 0.45;

        for slice in &slices {
            let color = colors.color_for(slice.diagnosis);
            // Fan of small convex pieces so large slices stay convex.
            let steps = ((slice.sweep / TAU) * 96.0).ceil().max(1.0) as usize;
            let mut points = vec![center];
            for i in 0..=steps {
                let angle = slice.start + slice.sweep * i as f32 / steps as f32;
                points.push(point_on_circle(center, radius, angle));
            }
            for window in points[1..].windows(2) {
                painter.add(Shape::convex_polygon(
                    vec![center, window[0], window[1]],
                    color,
                    Stroke::NONE,
                ));
            }
            if slices.len() > 1 {
                painter.line_segment(
                    [center, point_on_circle(center, radius, slice.start)],
                    Stroke::new(1.5, Color32::WHITE),
                );
            }

            let mid = point_on_circle(center, radius * 0.6, slice.start + slice.sweep / 2.0);
            painter.text(
                mid,
                Align2::CENTER_CENTER,
                format!("{:.1}%", slice.sweep / TAU * 100.0),
                FontId::proportional(14.0),
                Color32::WHITE,
            );
        }

        response.on_hover_text(format!("{} tumors", summary.total));

        ui.vertical(|ui: &mut Ui| {
            for slice in &slices {
                let color = colors.color_for(slice.diagnosis);
                ui.label(
                    egui::RichText::new(format!(
                        "■ {} ({}): {}",
                        slice.diagnosis.label(),
                        slice.diagnosis.code(),
                        slice.count
                    ))
                    .color(color),
                );
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Histogram: one measure, stacked by diagnosis
// ---------------------------------------------------------------------------

/// Render `histogram` as stacked bars, benign at the bottom.
pub fn histogram_plot(ui: &mut Ui, histogram: Option<&Histogram>, colors: &ColorMap) {
    let Some(h) = histogram else {
        ui.label("No tumors match the current filters.");
        return;
    };

    let mut base = vec![0.0_f64; h.bin_count()];
    let charts: Vec<BarChart> = Diagnosis::ALL
        .iter()
        .map(|&d| {
            let bars: Vec<Bar> = h
                .counts_for(d)
                .iter()
                .enumerate()
                .map(|(i, &count)| {
                    let bar = Bar::new(h.bin_center(i), count as f64)
                        .width(h.bin_width)
                        .base_offset(base[i]);
                    base[i] += count as f64;
                    bar
                })
                .collect();
            BarChart::new(bars)
                .name(d.label())
                .color(colors.fill_for(d))
        })
        .collect();

    Plot::new("histogram")
        .legend(Legend::default())
        .height(300.0)
        .x_axis_label(h.measure.column())
        .y_axis_label("count")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter matrix
// ---------------------------------------------------------------------------

/// Pairwise scatter plots over [`SCATTER_DIMENSIONS`], coloured by diagnosis.
pub fn scatter_matrix(ui: &mut Ui, filtered: &Dataset, colors: &ColorMap) {
    if filtered.is_empty() {
        ui.label("No tumors match the current filters.");
        return;
    }

    let n = SCATTER_DIMENSIONS.len();
    let spacing = 4.0;
    let cell = ((ui.available_width() - spacing * n as f32) / n as f32).clamp(80.0, 180.0);

    egui::Grid::new("scatter_matrix")
        .spacing([spacing, spacing])
        .show(ui, |ui: &mut Ui| {
            for (row_idx, &y_measure) in SCATTER_DIMENSIONS.iter().enumerate() {
                for (col_idx, &x_measure) in SCATTER_DIMENSIONS.iter().enumerate() {
                    if x_measure == y_measure {
                        ui.allocate_ui(Vec2::splat(cell), |ui: &mut Ui| {
                            ui.centered_and_justified(|ui: &mut Ui| {
                                ui.strong(x_measure.column());
                            });
                        });
                        continue;
                    }

                    let mut plot = Plot::new(("scatter", x_measure, y_measure))
                        .width(cell)
                        .height(cell)
                        .show_axes([row_idx == n - 1, col_idx == 0])
                        .allow_drag(false)
                        .allow_zoom(false)
                        .allow_scroll(false)
                        .allow_boxed_zoom(false);
                    if row_idx == n - 1 {
                        plot = plot.x_axis_label(x_measure.column());
                    }
                    if col_idx == 0 {
                        plot = plot.y_axis_label(y_measure.column());
                    }

                    plot.show(ui, |plot_ui| {
                        for d in Diagnosis::ALL {
                            let points: PlotPoints = filtered
                                .rows()
                                .iter()
                                .filter(|r| r.diagnosis == d)
                                .map(|r| [r.value(x_measure), r.value(y_measure)])
                                .collect();
                            plot_ui.points(
                                Points::new(points)
                                    .radius(1.5)
                                    .color(colors.color_for(d))
                                    .name(d.label()),
                            );
                        }
                    });
                }
                ui.end_row();
            }
        });
}
