use std::{fs::File, io::Read, path::Path};

use log::{debug, info};

use crate::fitting::{FitError, Sample};

pub const DURATION_COLUMN: &str = "flightTimeInHours";
pub const PRICE_COLUMN: &str = "totalFare";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("line {line}: cannot read {value:?} in column {column} as a number")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("dataset has no rows")]
    Empty,

    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Names of the columns holding x (duration) and y (price).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Columns {
    pub x: String,
    pub y: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            x: DURATION_COLUMN.to_string(),
            y: PRICE_COLUMN.to_string(),
        }
    }
}

pub fn load(path: impl AsRef<Path>, columns: &Columns) -> Result<Vec<Sample>, DatasetError> {
    let path = path.as_ref();
    let samples = from_reader(File::open(path)?, columns)?;
    info!("loaded {} samples from {:?}", samples.len(), path);
    Ok(samples)
}

/// Reads samples from CSV with a header row. Columns other than the two
/// named ones are ignored.
pub fn from_reader<R: Read>(reader: R, columns: &Columns) -> Result<Vec<Sample>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };
    let x_index = find(&columns.x)?;
    let y_index = find(&columns.y)?;
    debug!(
        "reading x from column {} and y from column {}",
        x_index, y_index
    );

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let parse = |index: usize, column: &str| {
            let value = record.get(index).unwrap_or_default();
            value
                .parse::<f64>()
                .map_err(|_| DatasetError::InvalidValue {
                    line,
                    column: column.to_string(),
                    value: value.to_string(),
                })
        };
        samples.push(Sample {
            x: parse(x_index, &columns.x)?,
            y: parse(y_index, &columns.y)?,
        });
    }

    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_columns() {
        let csv = "\
legId,flightTimeInHours,totalFare,airline
a,1.5,120.0,XX
b, 3.25 ,199.99,YY
c,11,340,ZZ
";
        let samples = from_reader(csv.as_bytes(), &Columns::default()).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample { x: 1.5, y: 120.0 },
                Sample { x: 3.25, y: 199.99 },
                Sample { x: 11.0, y: 340.0 },
            ]
        );
    }

    #[test]
    fn custom_columns() {
        let csv = "hours,price\n2,90\n";
        let columns = Columns {
            x: "hours".to_string(),
            y: "price".to_string(),
        };
        assert_eq!(
            from_reader(csv.as_bytes(), &columns).unwrap(),
            vec![Sample { x: 2.0, y: 90.0 }]
        );
    }

    #[test]
    fn missing_column() {
        let csv = "flightTimeInHours,baseFare\n1,2\n";
        match from_reader(csv.as_bytes(), &Columns::default()) {
            Err(DatasetError::MissingColumn(name)) => assert_eq!(name, PRICE_COLUMN),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn invalid_value_reports_line() {
        let csv = "flightTimeInHours,totalFare\n1,2\n2,n/a\n";
        match from_reader(csv.as_bytes(), &Columns::default()) {
            Err(DatasetError::InvalidValue {
                line,
                column,
                value,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, PRICE_COLUMN);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn header_only_is_empty() {
        let csv = "flightTimeInHours,totalFare\n";
        assert!(matches!(
            from_reader(csv.as_bytes(), &Columns::default()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load("/definitely/not/here.csv", &Columns::default()),
            Err(DatasetError::Io(_))
        ));
    }
}
