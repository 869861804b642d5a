use std::error::Error;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::histogram::Histogram;
use crate::data::loader::LoadError;
use crate::data::model::{Diagnosis, Measure};
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// KPI formatting
// ---------------------------------------------------------------------------

/// Two decimals with thousands separators; `n/a` for an undefined value.
pub fn format_metric(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return "n/a".to_string();
    };
    let fixed = format!("{:.2}", v.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Top-level message plus every `source` below it.
pub fn error_chain(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn kpi(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the dashboard body, or only the load error when there is no data.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(err) = &state.load_error {
        load_error(ui, err);
        return;
    }

    let AppState {
        config,
        dataset,
        filtered,
        summary,
        histogram_measure,
        color_map,
        ..
    } = state;
    let Some(dataset) = dataset.as_ref() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded.");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            introduction(ui);

            ui.heading("Breast Cancer Data Dashboard");
            data_presentation(ui);
            ui.add_space(8.0);

            ui.strong("Loaded breast cancer data");
            let preview = &dataset.rows()[..config.preview_rows.min(dataset.len())];
            table::record_table(ui, "preview_table", preview, 160.0);
            ui.add_space(8.0);

            ui.strong(format!(
                "Filtered data ({} of {} tumors)",
                filtered.len(),
                dataset.len()
            ));
            table::record_table(ui, "filtered_table", filtered.rows(), 320.0);
            ui.add_space(8.0);

            data_context(ui);
            ui.separator();

            ui.heading("Tumor split in the filtered data");
            plot::pie_chart(ui, summary, color_map);
            ui.separator();

            ui.heading("Tumor counts");
            ui.columns(3, |cols: &mut [Ui]| {
                kpi(&mut cols[0], "Total tumors", summary.total.to_string());
                kpi(
                    &mut cols[1],
                    "Benign tumors",
                    summary.count(Diagnosis::Benign).to_string(),
                );
                kpi(
                    &mut cols[2],
                    "Malignant tumors",
                    summary.count(Diagnosis::Malignant).to_string(),
                );
            });
            ui.separator();

            ui.heading("Mean values of the filtered data");
            for chunk in Measure::ALL.chunks(3) {
                ui.columns(chunk.len(), |cols: &mut [Ui]| {
                    for (col, &measure) in cols.iter_mut().zip(chunk) {
                        kpi(col, measure.label(), format_metric(summary.mean(measure)));
                    }
                });
                ui.add_space(4.0);
            }
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                ui.heading("Tumor count by");
                egui::ComboBox::from_id_salt("histogram_measure")
                    .selected_text(histogram_measure.column())
                    .show_ui(ui, |ui: &mut Ui| {
                        for measure in Measure::ALL {
                            ui.selectable_value(histogram_measure, measure, measure.column());
                        }
                    });
            });
            let histogram =
                Histogram::build(filtered.rows(), *histogram_measure, config.histogram_bins);
            plot::histogram_plot(ui, histogram.as_ref(), color_map);
            ui.separator();

            ui.heading("Scatter matrix: mean area, radius, perimeter, concavity and symmetry");
            plot::scatter_matrix(ui, filtered, color_map);
            ui.separator();

            insights(ui);
        });
}

fn load_error(ui: &mut Ui, err: &LoadError) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(
            RichText::new(error_chain(err))
                .color(Color32::RED)
                .size(16.0),
        );
    });
}

// ---------------------------------------------------------------------------
// Narrative sections
// ---------------------------------------------------------------------------

fn introduction(ui: &mut Ui) {
    ui.heading("1. The problem");
    ui.label(
        "Health services face a hard call when tumors are diagnosed: deciding which ones \
         actually need surgery. The goal is to operate only when it is truly necessary, \
         improving patients' quality of life and saving medical resources.",
    );
    ui.add_space(6.0);

    ui.heading("2. Background");
    ui.label(
        "Thousands of patients are diagnosed with tumors every year, but not every tumor \
         needs surgery. Decisions taken without a detailed analysis can lead to unnecessary \
         operations, wearing the patient down, raising costs and overloading the health system.",
    );
    ui.label(
        "Challenge: how to tell precisely which benign tumors can be treated conservatively \
         and which malignant ones really need surgery? The answer lies in the tumors' \
         characteristics.",
    );
    ui.add_space(6.0);
}

fn data_presentation(ui: &mut Ui) {
    ui.heading("3. The data");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("The data comes from the public dataset available at");
        ui.hyperlink_to("kaggle.com", "https://www.kaggle.com");
        ui.label(
            "and includes variables such as tumor size, concavity, perimeter and symmetry, \
             which help indicate how severe a tumor is.",
        );
    });
    ui.label("Two key values segment the tumors:");
    ui.label("• Malignant (M): tumors that usually require surgery.");
    ui.label("• Benign (B): tumors that can be treated with less invasive methods.");
}

fn data_context(ui: &mut Ui) {
    ui.heading("4. Data context");
    ui.label(
        "The histogram relates how often malignant and benign tumors occur to the mean \
         area. Malignant tumors tend to have larger mean areas while most benign tumors \
         have smaller ones, which can help doctors prioritise tumors that deserve surgical \
         attention.",
    );
    ui.label("The scatter plots compare mean area with other characteristics:");
    ui.label("• Area × radius: malignant tumors usually show both a larger area and radius.");
    ui.label("• Area × perimeter: perimeter and area are strongly correlated.");
    ui.label("• Area × concavity: tumors with marked concavity also show a larger area.");
    ui.label("• Area × symmetry: more asymmetric tumors tend to be larger.");
}

fn insights(ui: &mut Ui) {
    ui.heading("5. Solutions and insights");
    ui.label(
        "• Prioritise surgery for malignant tumors: larger area, radius and concavity \
         should be prioritised for surgical intervention.",
    );
    ui.label(
        "• Monitor benign tumors: tumors with smaller size and concavity can be followed \
         with less invasive methods.",
    );
    ui.label(
        "• Watch evolving tumors: tumors that grow quickly or change shape, even if \
         initially benign, should be followed closely.",
    );
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn metrics_use_two_decimals_and_grouping() {
        assert_eq!(format_metric(Some(400.0)), "400.00");
        assert_eq!(format_metric(Some(654.889)), "654.89");
        assert_eq!(format_metric(Some(1234567.891)), "1,234,567.89");
        assert_eq!(format_metric(Some(-1500.5)), "-1,500.50");
        assert_eq!(format_metric(Some(0.0888)), "0.09");
    }

    #[test]
    fn undefined_metric_is_not_zero() {
        assert_eq!(format_metric(None), "n/a");
        assert_eq!(format_metric(Some(f64::NAN)), "n/a");
    }

    #[test]
    fn error_chain_includes_sources() {
        let csv_err = csv::ReaderBuilder::new()
            .from_reader("a\nnot-a-number\n".as_bytes())
            .deserialize::<(u32,)>()
            .next()
            .unwrap()
            .unwrap_err();
        let err = LoadError::Malformed {
            origin: "dados.csv".to_string(),
            row: 1,
            source: csv_err,
        };
        let text = error_chain(&err);
        assert!(text.starts_with("dados.csv: malformed row 1: "), "{text}");
    }

    #[test]
    fn missing_source_message_names_the_file() {
        let err = LoadError::SourceNotFound {
            path: PathBuf::from("dados.csv"),
        };
        let text = err.to_string();
        assert!(text.starts_with("file 'dados.csv' not found"), "{text}");
    }
}
