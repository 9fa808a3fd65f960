use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Simulation parameters for a backtest run.
#[derive(Debug, Clone, Deserialize)]
pub struct BacktestSettings {
    #[serde(default = "default_initial_capital")]
    pub initial_capital: Decimal,
    /// Commission charged on each fill, as a fraction of traded value
    /// (e.g. 0.0025 for 0.25%).
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,
    /// Fixed number of units bought per entry.
    #[serde(default = "default_stake")]
    pub stake: Decimal,
    #[serde(default)]
    pub open_position_policy: OpenPositionPolicy,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
            commission_rate: default_commission_rate(),
            stake: default_stake(),
            open_position_policy: OpenPositionPolicy::default(),
        }
    }
}

/// What to do with a long still open when the bar series ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenPositionPolicy {
    /// Leave it open; realized P&L reflects completed round trips only.
    #[default]
    Ignore,
    /// Close it synthetically at the final bar's close.
    MarkToMarket,
}

fn default_initial_capital() -> Decimal {
    dec!(10_000)
}

fn default_commission_rate() -> Decimal {
    dec!(0.0025)
}

fn default_stake() -> Decimal {
    dec!(1)
}
