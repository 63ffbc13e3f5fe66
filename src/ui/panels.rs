use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::experiment::SuiteKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series toggles and averages table
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    let Some(result) = &state.result else {
        ui.label("No results loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let entries: Vec<(String, usize, usize)> = result
        .series
        .iter()
        .map(|s| (s.spec.label.clone(), s.report.len(), s.report.diagnostics.len()))
        .collect();

    let mut toggled = None;
    for (i, (label, groups, warnings)) in entries.iter().enumerate() {
        let color = state.colors.get(i).copied().unwrap_or(Color32::GRAY);
        let mut checked = state.visible.get(i).copied().unwrap_or(true);
        let text = RichText::new(format!("{label}  ({groups} groups)")).color(color);
        if ui.checkbox(&mut checked, text).changed() {
            toggled = Some(i);
        }
        if *warnings > 0 {
            ui.label(RichText::new(format!("   {warnings} unreadable files")).color(Color32::YELLOW));
        }
    }
    if let Some(i) = toggled {
        state.toggle_series(i);
    }

    ui.separator();
    ui.strong("Averages");

    let Some(chart) = &state.chart else {
        return;
    };
    let metric = state.metric;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .columns(Column::auto(), chart.series.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(&chart.x_label);
            });
            for series in &chart.series {
                header.col(|ui| {
                    ui.strong(&series.label);
                });
            }
        })
        .body(|mut body| {
            for (c, category) in chart.categories.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(category);
                    });
                    for series in &chart.series {
                        row.col(|ui| {
                            ui.label(format!("{:.3}", series.metrics[metric][c]));
                        });
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        for (kind, label) in [(SuiteKind::Performance, "Performance"), (SuiteKind::Metrics, "Metrics")] {
            if ui.selectable_label(state.suite.kind == kind, label).clicked() {
                state.set_suite(kind);
            }
        }

        ui.separator();

        let names = state.suite.metric_names.clone();
        for (m, name) in names.iter().enumerate() {
            if ui.selectable_label(state.metric == m, name).clicked() {
                state.metric = m;
            }
        }

        ui.separator();
        ui.label(state.root.display().to_string());

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open experiment folder")
        .set_directory(&state.root)
        .pick_folder();

    if let Some(path) = folder {
        state.set_root(path);
    }
}
