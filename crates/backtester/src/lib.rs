pub mod types;

use analytics::{AnalyticsEngine, EquityPoint, PerformanceReport, Trade};
use chrono::{DateTime, TimeZone, Utc};
use core_types::{Bar, Result, Signal, SignalEvent, Symbol};
use crossover::{CrossoverEvaluator, CrossoverSettings};
use rust_decimal::Decimal;
use tracing::info;

use crate::types::{BacktestSettings, OpenPositionPolicy};

/// Everything a backtest run produces.
#[derive(Debug)]
pub struct BacktestOutcome {
    pub report: PerformanceReport,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub signals: Vec<SignalEvent>,
}

/// The lot currently held, between a buy fill and its sell fill.
#[derive(Debug, Clone)]
struct OpenLot {
    entry_time: i64,
    entry_price: Decimal,
    quantity: Decimal,
    entry_fee: Decimal,
}

/// The engine for running historical backtests of the crossover strategy.
///
/// Fills happen at the close of the bar the signal fired on, with a
/// proportional commission on each fill. One equity point is recorded per
/// bar, marking any open lot at that bar's close.
#[derive(Debug)]
pub struct Backtester {
    symbol: Symbol,
    settings: BacktestSettings,
    evaluator: CrossoverEvaluator,
    cash: Decimal,
    open_lot: Option<OpenLot>,
    trades: Vec<Trade>,
    equity_curve: Vec<EquityPoint>,
    signals: Vec<SignalEvent>,
}

impl Backtester {
    /// Builds a backtester; fails with `InvalidConfiguration` if the
    /// crossover windows are invalid, before any bar is processed.
    pub fn new(
        symbol: Symbol,
        crossover: CrossoverSettings,
        settings: BacktestSettings,
    ) -> Result<Self> {
        let evaluator = CrossoverEvaluator::new(crossover)?;
        let cash = settings.initial_capital;
        Ok(Self {
            symbol,
            settings,
            evaluator,
            cash,
            open_lot: None,
            trades: Vec::new(),
            equity_curve: Vec::new(),
            signals: Vec::new(),
        })
    }

    pub fn run(mut self, bars: &[Bar]) -> Result<BacktestOutcome> {
        info!(
            symbol = %self.symbol,
            fast = self.evaluator.settings().fast_period,
            slow = self.evaluator.settings().slow_period,
            bars = bars.len(),
            "starting backtest"
        );

        for bar in bars {
            if let Some(event) = self.evaluator.on_bar(bar)? {
                match event.signal {
                    Signal::Buy => self.open_position(bar),
                    Signal::Sell => self.close_position(bar),
                }
                self.signals.push(event);
            }
            self.record_equity(bar);
        }

        if self.open_lot.is_some()
            && self.settings.open_position_policy == OpenPositionPolicy::MarkToMarket
        {
            if let Some(last) = bars.last() {
                info!(price = %last.close, "marking open position to market at end of data");
                self.close_position(last);
            }
        }

        let report = AnalyticsEngine::new().calculate(
            self.settings.initial_capital,
            &self.trades,
            &self.equity_curve,
        );
        info!(
            trades = self.trades.len(),
            net_pnl = %report.net_pnl_absolute,
            "backtest finished"
        );

        Ok(BacktestOutcome {
            report,
            trades: self.trades,
            equity_curve: self.equity_curve,
            signals: self.signals,
        })
    }

    fn open_position(&mut self, bar: &Bar) {
        let quantity = self.settings.stake;
        let cost = quantity * bar.close;
        let fee = cost * self.settings.commission_rate;
        self.cash -= cost + fee;
        self.open_lot = Some(OpenLot {
            entry_time: bar.timestamp,
            entry_price: bar.close,
            quantity,
            entry_fee: fee,
        });
        info!(time = %millis_to_utc(bar.timestamp), price = %bar.close, %fee, "buy filled");
    }

    fn close_position(&mut self, bar: &Bar) {
        let Some(lot) = self.open_lot.take() else {
            return;
        };
        let proceeds = lot.quantity * bar.close;
        let exit_fee = proceeds * self.settings.commission_rate;
        self.cash += proceeds - exit_fee;

        let fees = lot.entry_fee + exit_fee;
        let pnl = (bar.close - lot.entry_price) * lot.quantity - fees;
        info!(time = %millis_to_utc(bar.timestamp), price = %bar.close, %pnl, "sell filled");

        self.trades.push(Trade {
            symbol: self.symbol.clone(),
            entry_time: millis_to_utc(lot.entry_time),
            exit_time: millis_to_utc(bar.timestamp),
            entry_price: lot.entry_price,
            exit_price: bar.close,
            quantity: lot.quantity,
            pnl,
            fees,
        });
    }

    fn record_equity(&mut self, bar: &Bar) {
        let holdings = self
            .open_lot
            .as_ref()
            .map(|lot| lot.quantity * bar.close)
            .unwrap_or(Decimal::ZERO);
        self.equity_curve.push(EquityPoint {
            timestamp: millis_to_utc(bar.timestamp),
            value: self.cash + holdings,
        });
    }
}

fn millis_to_utc(timestamp: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(timestamp).single().unwrap_or_default()
}
