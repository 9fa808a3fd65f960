pub mod error;

pub use error::{Error, Result};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use core_types::Bar;
use rust_decimal::Decimal;
use serde::Deserialize;

/// One row of a daily OHLCV CSV export (`Date,Open,High,Low,Close,Volume`,
/// dates formatted `YYYY-MM-DD`).
#[derive(Debug, Deserialize)]
struct CsvBar {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: Decimal,
    #[serde(rename = "High")]
    high: Decimal,
    #[serde(rename = "Low")]
    low: Decimal,
    #[serde(rename = "Close")]
    close: Decimal,
    #[serde(rename = "Volume")]
    volume: Decimal,
}

impl From<CsvBar> for Bar {
    fn from(row: CsvBar) -> Self {
        // Daily bars carry no intraday time; stamp them at UTC midnight.
        let timestamp = row
            .date
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis();
        Bar {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

/// Reads a daily bar series from any CSV reader.
///
/// Row ordering is not validated here; the evaluator owns the timestamp
/// monotonicity invariant and rejects out-of-order series at call time.
pub fn read_bars(reader: impl Read) -> Result<Vec<Bar>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();
    for record in csv_reader.deserialize::<CsvBar>() {
        bars.push(record?.into());
    }
    Ok(bars)
}

/// Loads a daily bar series from a CSV file on disk.
pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_bars(BufReader::new(file))
}
