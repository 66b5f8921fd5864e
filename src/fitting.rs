use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("degenerate input: x values have no variance, slope is undefined")]
    DegenerateInput,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Signed vertical distance, positive when the line lies above the sample.
    pub fn residual(&self, sample: &Sample) -> f64 {
        self.predict(sample.x) - sample.y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub total_squared_error: f64,
    /// One entry per sample, in sample order.
    pub residuals: Vec<f64>,
}

/// Builds a sample set from two parallel columns.
pub fn samples_from_columns(xs: &[f64], ys: &[f64]) -> Result<Vec<Sample>, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::InvalidInput(format!(
            "got {} x values but {} y values",
            xs.len(),
            ys.len()
        )));
    }
    Ok(xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| Sample { x, y })
        .collect())
}

fn validate(samples: &[Sample]) -> Result<(), FitError> {
    if samples.is_empty() {
        return Err(FitError::InvalidInput("sample set is empty".to_string()));
    }
    match samples
        .iter()
        .position(|s| !s.x.is_finite() || !s.y.is_finite())
    {
        Some(index) => Err(FitError::InvalidInput(format!(
            "sample {} is not finite: ({}, {})",
            index, samples[index].x, samples[index].y
        ))),
        None => Ok(()),
    }
}

/// Sum of squared residuals together with the residuals themselves.
///
/// An empty sample set is rejected rather than evaluated to zero.
pub fn evaluate(samples: &[Sample], line: Line) -> Result<Evaluation, FitError> {
    validate(samples)?;
    let residuals = samples.iter().map(|s| line.residual(s)).collect_vec();
    let total_squared_error = residuals.iter().fold(0.0, |acc, r| acc + r * r);
    Ok(Evaluation {
        total_squared_error,
        residuals,
    })
}

/// Same total as [`evaluate`] without collecting the residuals.
pub fn squared_error(samples: &[Sample], line: Line) -> Result<f64, FitError> {
    validate(samples)?;
    Ok(samples.iter().fold(0.0, |acc, s| {
        let r = line.residual(s);
        acc + r * r
    }))
}

/// Ordinary least squares fit of `y` against `x`.
///
/// Uses the centred form `Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²`, which is the closed
/// form `(nΣxy - ΣxΣy) / (nΣx² - (Σx)²)` rearranged. Fails with
/// [`FitError::DegenerateInput`] when every x is the same.
pub fn fit(samples: &[Sample]) -> Result<Line, FitError> {
    validate(samples)?;
    let first_x = samples[0].x;
    if samples.iter().all(|s| s.x == first_x) {
        return Err(FitError::DegenerateInput);
    }

    let n = samples.len() as f64;
    let mean_x = samples.iter().map(|s| s.x).sum::<f64>() / n;
    let mean_y = samples.iter().map(|s| s.y).sum::<f64>() / n;

    let (x_squared, xy) = samples.iter().fold((0.0, 0.0), |(xx, xy), s| {
        let dev_x = s.x - mean_x;
        (xx + dev_x * dev_x, xy + dev_x * (s.y - mean_y))
    });
    if x_squared == 0.0 || !x_squared.is_finite() {
        return Err(FitError::DegenerateInput);
    }

    let slope = xy / x_squared;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(FitError::DegenerateInput);
    }
    Ok(Line { slope, intercept })
}
