use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single time-stamped OHLCV market observation.
///
/// Bars are ordered by timestamp and immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Open time of the interval, in epoch milliseconds (UTC).
    pub timestamp: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// A discrete trading signal emitted at a specific bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
}

/// The strategy's current holding state.
///
/// Exactly one value at any time; transitions only on crossover events.
/// The strategy never pyramids or shorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Flat,
    Long,
}

/// A signal together with the bar index it fired on and the position that
/// resulted from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalEvent {
    pub index: usize,
    pub signal: Signal,
    pub position: Position,
}

/// A trading symbol identifier (e.g. "VTI").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
