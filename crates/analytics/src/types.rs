use chrono::{DateTime, Utc};
use core_types::Symbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A record of a single completed round trip, from buy to sell.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub quantity: Decimal,
    /// Net of fees.
    pub pnl: Decimal,
    pub fees: Decimal,
}

/// A point in the portfolio's equity curve.
#[derive(Debug, Clone, Serialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub value: Decimal,
}

/// A summary of a strategy's performance over a backtest period.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PerformanceReport {
    pub net_pnl_absolute: Decimal,
    pub net_pnl_percentage: f64,
    pub max_drawdown_absolute: Decimal,
    pub max_drawdown_percentage: f64,
    pub sharpe_ratio: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub total_trades: u32,
}

impl PerformanceReport {
    pub fn new() -> Self {
        Self::default()
    }
}
