use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::state::AppState;

/// Width of a single bar; series sit side by side around each category.
const BAR_WIDTH: f64 = 0.1;

// ---------------------------------------------------------------------------
// Grouped bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the bar chart of the selected metric in the central panel.
pub fn averages_plot(ui: &mut Ui, state: &AppState) {
    let chart = match &state.chart {
        Some(c) => c,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open an experiment folder  (File → Open folder…)");
            });
            return;
        }
    };

    if chart.category_count() == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No group survived selection in this folder.");
        });
        return;
    }

    let metric = state.metric;
    let categories = chart.categories.clone();

    ui.heading(&chart.metric_names[metric]);

    Plot::new(("group_averages", metric))
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label_for(metric).to_string())
        .x_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
                return String::new();
            }
            categories.get(pos as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, series) in chart.series.iter().enumerate() {
                if !state.visible.get(i).copied().unwrap_or(true) {
                    continue;
                }
                let offset = (i as f64 - 2.0) * BAR_WIDTH;
                let bars: Vec<Bar> = series.metrics[metric]
                    .iter()
                    .enumerate()
                    .map(|(c, &v)| Bar::new(c as f64 + offset, v).width(BAR_WIDTH))
                    .collect();

                let mut bar_chart = BarChart::new(bars).name(&series.label);
                if let Some(&color) = state.colors.get(i) {
                    bar_chart = bar_chart.color(color);
                }
                plot_ui.bar_chart(bar_chart);
            }
        });
}
