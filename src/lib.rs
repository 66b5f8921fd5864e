mod app;
pub mod dataset;
pub mod figure;
pub mod fitting;
pub mod log;
pub mod render;
pub use app::{FitApp, Settings};

/// Range the plotted lines span, in hours.
pub const X_RANGE: (f64, f64) = (0.0, 12.5);
/// Price axis limits.
pub const Y_RANGE: (f64, f64) = (0.0, 365.0);
