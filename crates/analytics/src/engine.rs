use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{EquityPoint, PerformanceReport, Trade};

/// Calculates performance metrics from completed trades and the equity
/// curve.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a full performance report.
    ///
    /// An empty trade list yields a default (all-zero) report.
    pub fn calculate(
        &self,
        initial_capital: Decimal,
        trades: &[Trade],
        equity_curve: &[EquityPoint],
    ) -> PerformanceReport {
        let mut report = PerformanceReport::new();
        if trades.is_empty() {
            return report;
        }

        report.total_trades = trades.len() as u32;

        // Net P&L, absolute and as a percentage of starting capital.
        report.net_pnl_absolute = trades.iter().map(|t| t.pnl).sum();
        if initial_capital > dec!(0) {
            report.net_pnl_percentage = (report.net_pnl_absolute / initial_capital)
                .to_f64()
                .unwrap_or(0.0)
                * 100.0;
        }

        // Win rate and profit factor.
        let winning: Vec<&Trade> = trades.iter().filter(|t| t.pnl > dec!(0)).collect();
        let losing: Vec<&Trade> = trades.iter().filter(|t| t.pnl < dec!(0)).collect();
        report.win_rate = (winning.len() as f64 / report.total_trades as f64) * 100.0;

        let gross_profit: Decimal = winning.iter().map(|t| t.pnl).sum();
        let gross_loss: Decimal = losing.iter().map(|t| t.pnl).sum::<Decimal>().abs();
        report.profit_factor = if gross_loss > dec!(0) {
            (gross_profit / gross_loss).to_f64().unwrap_or(0.0)
        } else {
            f64::INFINITY // Pure profit
        };

        // Max drawdown against the running equity peak.
        let mut peak_equity = initial_capital;
        let mut max_drawdown = dec!(0);
        for point in equity_curve {
            peak_equity = peak_equity.max(point.value);
            let drawdown = peak_equity - point.value;
            max_drawdown = max_drawdown.max(drawdown);
        }
        report.max_drawdown_absolute = max_drawdown;
        if peak_equity > dec!(0) {
            report.max_drawdown_percentage =
                (max_drawdown / peak_equity).to_f64().unwrap_or(0.0) * 100.0;
        }

        // Periodic Sharpe over equity-curve returns. To annualize,
        // multiply by sqrt(periods per year).
        if equity_curve.len() > 1 {
            let returns: Vec<f64> = equity_curve
                .windows(2)
                .map(|w| (w[1].value / w[0].value - dec!(1)).to_f64().unwrap_or(0.0))
                .collect();
            let mean_return = returns.iter().sum::<f64>() / returns.len() as f64;
            let variance = returns
                .iter()
                .map(|r| (*r - mean_return).powi(2))
                .sum::<f64>()
                / returns.len() as f64;
            let std_dev = variance.sqrt();
            report.sharpe_ratio = if std_dev > 0.0 {
                mean_return / std_dev
            } else {
                0.0
            };
        }

        report
    }
}
