//! Builds plots as ordered lists of draw commands.
//!
//! Nothing here draws. The functions take the pure outputs of
//! [`crate::fitting`] and append commands to a [`Figure`], which
//! [`crate::render`] later executes in order.

use egui::Color32;
use itertools::Itertools;

use crate::{
    fitting::{self, FitError, Line, Sample},
    X_RANGE, Y_RANGE,
};

pub const ROYAL_BLUE: Color32 = Color32::from_rgb(65, 105, 225);
pub const CORAL: Color32 = Color32::from_rgb(255, 127, 80);
pub const GREY: Color32 = Color32::from_rgb(128, 128, 128);

const ANNOTATION_SIZE: f32 = 14.0;
const ERROR_ANCHOR: [f64; 2] = [0.05, 0.95];
const EQUATION_ANCHOR: [f64; 2] = [0.05, 0.9];

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x_label: String,
    pub y_label: String,
    pub label_size: f32,
    pub tick_size: f32,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            x_label: "Flight Time [Hours]".to_string(),
            y_label: "Flight Price [£]".to_string(),
            label_size: 18.0,
            tick_size: 16.0,
            x_limits: X_RANGE,
            y_limits: Y_RANGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub fill: Color32,
    pub edge: Color32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color32,
    pub width: f32,
    pub dashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Baseline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Scatter {
        points: Vec<[f64; 2]>,
        marker: Marker,
        name: String,
    },
    Line {
        points: Vec<[f64; 2]>,
        stroke: Stroke,
        name: String,
    },
    /// Vertical segment between a sample and the line evaluated at its x.
    Offset {
        x: f64,
        from: f64,
        to: f64,
        stroke: Stroke,
    },
    /// Text placed in axes fractions, `[0, 0]` bottom left, `[1, 1]` top right.
    Annotation {
        anchor: [f64; 2],
        text: String,
        size: f32,
        align: VerticalAlign,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    pub axes: Axes,
    commands: Vec<DrawCommand>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command)
    }

    /// Maps an axes fraction onto data coordinates using the axis limits.
    pub fn to_data(&self, anchor: [f64; 2]) -> [f64; 2] {
        let (x0, x1) = self.axes.x_limits;
        let (y0, y1) = self.axes.y_limits;
        [x0 + anchor[0] * (x1 - x0), y0 + anchor[1] * (y1 - y0)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CandidateOptions {
    pub slope: f64,
    pub intercept: f64,
    /// Draw a dashed offset from every sample to the line.
    pub error_check: bool,
    /// Print the sum of squared errors onto the plot.
    pub show_error: bool,
}

impl Default for CandidateOptions {
    fn default() -> Self {
        Self {
            slope: 20.0,
            intercept: 50.0,
            error_check: false,
            show_error: false,
        }
    }
}

impl CandidateOptions {
    pub fn line(&self) -> Line {
        Line::new(self.slope, self.intercept)
    }
}

pub fn format_equation(line: Line) -> String {
    format!("y = {:.2}x + {:.2}", line.slope, line.intercept)
}

fn line_points(line: Line) -> Vec<[f64; 2]> {
    let (start, end) = X_RANGE;
    vec![[start, line.predict(start)], [end, line.predict(end)]]
}

/// Scatter of the samples, on `figure` if given or on a fresh one.
pub fn scatter(samples: &[Sample], figure: Option<Figure>) -> Figure {
    let mut figure = figure.unwrap_or_default();
    figure.axes = Axes::default();
    figure.push(DrawCommand::Scatter {
        points: samples.iter().map(|s| [s.x, s.y]).collect_vec(),
        marker: Marker {
            fill: ROYAL_BLUE,
            edge: Color32::BLACK,
            radius: 5.0,
        },
        name: "Flight data".to_string(),
    });
    figure
}

/// Draws a user supplied line and returns its sum of squared errors.
pub fn candidate_line(
    samples: &[Sample],
    figure: &mut Figure,
    options: &CandidateOptions,
) -> Result<f64, FitError> {
    let line = options.line();
    let evaluation = fitting::evaluate(samples, line)?;

    figure.push(DrawCommand::Line {
        points: line_points(line),
        stroke: Stroke {
            color: CORAL,
            width: 3.0,
            dashed: false,
        },
        name: "Best fit line".to_string(),
    });

    if options.error_check {
        for (sample, residual) in samples.iter().zip(&evaluation.residuals) {
            figure.push(DrawCommand::Offset {
                x: sample.x,
                from: sample.y,
                to: sample.y + residual,
                stroke: Stroke {
                    color: GREY,
                    width: 1.5,
                    dashed: true,
                },
            });
        }
    }

    if options.show_error {
        figure.push(DrawCommand::Annotation {
            anchor: ERROR_ANCHOR,
            text: format!(
                "Sum of squared errors: {:.2}",
                evaluation.total_squared_error
            ),
            size: ANNOTATION_SIZE,
            align: VerticalAlign::Top,
        });
    }

    Ok(evaluation.total_squared_error)
}

/// Fits the samples by least squares and draws the result.
pub fn least_squares_fit(
    samples: &[Sample],
    figure: &mut Figure,
    show_equation: bool,
) -> Result<Line, FitError> {
    let line = fitting::fit(samples)?;

    figure.push(DrawCommand::Line {
        points: line_points(line),
        stroke: Stroke {
            color: CORAL,
            width: 3.0,
            dashed: false,
        },
        name: "Least Squares Fit".to_string(),
    });

    if show_equation {
        figure.push(DrawCommand::Annotation {
            anchor: EQUATION_ANCHOR,
            text: format_equation(line),
            size: ANNOTATION_SIZE,
            align: VerticalAlign::Baseline,
        });
    }

    Ok(line)
}
