use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use fareline::{
    dataset::{self, Columns, DatasetError, DURATION_COLUMN, PRICE_COLUMN},
    figure::format_equation,
    fitting::{self, Line, Sample},
};

/// Fits a least-squares line to flight duration and price.
#[derive(Parser)]
#[command(author, version, about)]
struct Opts {
    /// CSV file with a header row
    data: Option<PathBuf>,

    /// Column holding the flight duration
    #[arg(long, default_value = DURATION_COLUMN)]
    x_column: String,

    /// Column holding the price
    #[arg(long, default_value = PRICE_COLUMN)]
    y_column: String,

    /// Slope of the candidate line
    #[arg(long)]
    slope: Option<f64>,

    /// Intercept of the candidate line
    #[arg(long)]
    intercept: Option<f64>,

    /// Print the fit and the candidate's squared error, then exit
    #[arg(long, requires = "data")]
    summary: bool,

    /// Increases log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Opts {
    fn columns(&self) -> Columns {
        Columns {
            x: self.x_column.clone(),
            y: self.y_column.clone(),
        }
    }

    fn candidate(&self) -> Line {
        Line::new(self.slope.unwrap_or(20.0), self.intercept.unwrap_or(50.0))
    }
}

fn print_summary(samples: &[Sample], candidate: Line) -> Result<(), DatasetError> {
    let total = fitting::squared_error(samples, candidate)?;
    println!(
        "candidate {}: sum of squared errors {:.2}",
        format_equation(candidate),
        total
    );
    let line = fitting::fit(samples)?;
    println!(
        "least squares {}: sum of squared errors {:.2}",
        format_equation(line),
        fitting::squared_error(samples, line)?
    );
    Ok(())
}

fn main() {
    let opts = Opts::parse();
    fareline::log::init(opts.verbose);

    let columns = opts.columns();
    let samples = match opts.data.as_ref() {
        Some(path) => match dataset::load(path, &columns) {
            Ok(samples) => samples,
            Err(err) => {
                error!("could not load {:?}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => Vec::new(),
    };

    if opts.summary {
        if let Err(err) = print_summary(&samples, opts.candidate()) {
            error!("{}", err);
            std::process::exit(1);
        }
        return;
    }

    info!("opening window with {} samples", samples.len());
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Fareline",
        native_options,
        Box::new(move |cc| {
            Box::new(fareline::FitApp::new(cc, samples, move |settings| {
                if let Some(path) = opts.data.as_ref() {
                    settings.data_path = path.display().to_string();
                    settings.columns = columns;
                }
                if let Some(slope) = opts.slope {
                    settings.candidate.slope = slope;
                }
                if let Some(intercept) = opts.intercept {
                    settings.candidate.intercept = intercept;
                }
            }))
        }),
    );
}
