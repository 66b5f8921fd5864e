use egui::{DragValue, Ui};
use log::{error, info, warn};

use crate::{
    dataset::{self, Columns},
    figure::{self, CandidateOptions, Figure},
    fitting::{Line, Sample},
    render,
};

const SETTINGS_KEY: &str = "settings";

/// Everything the window remembers between runs. Fitted lines are
/// recomputed every frame and never stored.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Settings {
    pub data_path: String,
    pub columns: Columns,
    pub candidate: CandidateOptions,
    pub show_candidate: bool,
    pub show_least_squares: bool,
    pub show_equation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: String::new(),
            columns: Columns::default(),
            candidate: CandidateOptions::default(),
            show_candidate: true,
            show_least_squares: false,
            show_equation: true,
        }
    }
}

/// Outcome of building the figure for one frame.
#[derive(Debug, Default)]
struct Summary {
    candidate_error: Option<f64>,
    fitted: Option<Line>,
    failure: Option<String>,
}

pub struct FitApp {
    settings: Settings,
    samples: Vec<Sample>,
    load_error: Option<String>,
}

impl FitApp {
    /// Called once before the first frame. `overrides` is applied on top of
    /// the stored settings.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        samples: Vec<Sample>,
        overrides: impl FnOnce(&mut Settings),
    ) -> Self {
        let mut settings: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default();
        overrides(&mut settings);

        let mut app = Self {
            settings,
            samples,
            load_error: None,
        };
        if app.samples.is_empty() && !app.settings.data_path.is_empty() {
            app.load();
        }
        app
    }

    fn load(&mut self) {
        match dataset::load(&self.settings.data_path, &self.settings.columns) {
            Ok(samples) => {
                self.samples = samples;
                self.load_error = None;
            }
            Err(err) => {
                error!("failed to load {:?}: {}", self.settings.data_path, err);
                self.load_error = Some(err.to_string());
            }
        }
    }

    fn build_figure(&self) -> (Figure, Summary) {
        let mut figure = figure::scatter(&self.samples, None);
        let mut summary = Summary::default();
        if self.samples.is_empty() {
            return (figure, summary);
        }

        if self.settings.show_candidate {
            match figure::candidate_line(&self.samples, &mut figure, &self.settings.candidate) {
                Ok(total) => summary.candidate_error = Some(total),
                Err(err) => summary.failure = Some(err.to_string()),
            }
        }
        if self.settings.show_least_squares {
            match figure::least_squares_fit(
                &self.samples,
                &mut figure,
                self.settings.show_equation,
            ) {
                Ok(line) => summary.fitted = Some(line),
                Err(err) => summary.failure = Some(err.to_string()),
            }
        }
        (figure, summary)
    }
}

impl eframe::App for FitApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, &self.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (figure, summary) = self.build_figure();
        egui::SidePanel::right("fit_opts").show(ctx, |ui| self.side_panel(ui, &summary));
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.samples.is_empty() {
                ui.strong("no flight data loaded");
            }
            render::show(ui, &figure);
        });
    }
}

impl FitApp {
    fn side_panel(&mut self, ui: &mut Ui, summary: &Summary) {
        ui.heading("Data");
        ui.label("CSV file:");
        ui.text_edit_singleline(&mut self.settings.data_path);
        ui.horizontal(|ui| {
            ui.label("x column");
            ui.text_edit_singleline(&mut self.settings.columns.x);
        });
        ui.horizontal(|ui| {
            ui.label("y column");
            ui.text_edit_singleline(&mut self.settings.columns.y);
        });
        if ui.button("load").clicked() {
            if self.settings.data_path.is_empty() {
                warn!("no path was set");
            } else {
                self.load();
            }
        }
        ui.label(format!("There are {} samples.", self.samples.len()));

        ui.separator();
        ui.heading("Candidate line");
        ui.checkbox(&mut self.settings.show_candidate, "show");
        let candidate = &mut self.settings.candidate;
        ui.add(DragValue::new(&mut candidate.slope).speed(0.1).prefix("slope: "));
        ui.add(
            DragValue::new(&mut candidate.intercept)
                .speed(0.5)
                .prefix("intercept: "),
        );
        ui.checkbox(&mut candidate.error_check, "draw residuals");
        ui.checkbox(&mut candidate.show_error, "label squared error");
        if ui.button("reset").clicked() {
            *candidate = CandidateOptions::default();
        }

        ui.separator();
        ui.heading("Least squares");
        ui.checkbox(&mut self.settings.show_least_squares, "fit");
        ui.checkbox(&mut self.settings.show_equation, "label equation");
        if let Some(line) = summary.fitted {
            if ui.button("use as candidate").clicked() {
                info!("taking fitted line {} as candidate", figure::format_equation(line));
                self.settings.candidate.slope = line.slope;
                self.settings.candidate.intercept = line.intercept;
            }
        }

        ui.separator();
        if let Some(total) = summary.candidate_error {
            ui.label(format!("Sum of squared errors: {:.2}", total));
        }
        if let Some(line) = summary.fitted {
            ui.label(figure::format_equation(line));
        }
        if let Some(failure) = summary.failure.as_ref().or(self.load_error.as_ref()) {
            ui.colored_label(egui::Color32::RED, failure.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::DrawCommand;

    fn app(samples: Vec<Sample>, settings: Settings) -> FitApp {
        FitApp {
            settings,
            samples,
            load_error: None,
        }
    }

    #[test]
    fn settings_default_to_reference_line() {
        let settings = Settings::default();
        assert_eq!(settings.candidate.slope, 20.0);
        assert_eq!(settings.candidate.intercept, 50.0);
        assert!(settings.show_candidate);
    }

    #[test]
    fn empty_dataset_only_scatters() {
        let (figure, summary) = app(Vec::new(), Settings::default()).build_figure();
        assert_eq!(figure.commands().len(), 1);
        assert!(summary.failure.is_none());
    }

    #[test]
    fn builds_candidate_and_fit() {
        let samples = vec![
            Sample { x: 1.0, y: 70.0 },
            Sample { x: 2.0, y: 90.0 },
            Sample { x: 3.0, y: 110.0 },
        ];
        let settings = Settings {
            show_least_squares: true,
            ..Default::default()
        };
        let (figure, summary) = app(samples, settings).build_figure();
        assert_eq!(summary.candidate_error, Some(0.0));
        assert!(summary.fitted.is_some());
        let lines = figure
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 2);
    }

    #[test]
    fn degenerate_fit_is_reported() {
        let samples = vec![Sample { x: 1.0, y: 100.0 }, Sample { x: 1.0, y: 200.0 }];
        let settings = Settings {
            show_least_squares: true,
            ..Default::default()
        };
        let (_, summary) = app(samples, settings).build_figure();
        assert!(summary.fitted.is_none());
        assert!(summary.failure.unwrap().contains("degenerate"));
    }
}
