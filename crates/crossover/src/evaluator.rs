use core_types::{Bar, Error, Position, Result, Signal, SignalEvent};
use rust_decimal::Decimal;

use crate::sma::SmaWindow;
use crate::types::CrossoverSettings;

/// The stateful SMA crossover evaluator.
///
/// Bars are fed one at a time through `on_bar`. Once both averages are
/// defined, each new bar is compared against the averages at the previous
/// bar:
///
/// - fast moved from `<= slow` to `> slow` while flat: emit `Buy`, go long.
/// - fast moved from `>= slow` to `< slow` while long: emit `Sell`, go flat.
///
/// A tie (`fast == slow`) never triggers by itself; a signal requires a
/// strict inequality reversal across consecutive bars. At most one signal
/// is emitted per bar.
#[derive(Debug)]
pub struct CrossoverEvaluator {
    settings: CrossoverSettings,
    fast: SmaWindow,
    slow: SmaWindow,
    /// Fast and slow averages at the previous bar, once both were defined.
    prev: Option<(Decimal, Decimal)>,
    position: Position,
    last_timestamp: Option<i64>,
    index: usize,
}

impl CrossoverEvaluator {
    /// Validates the window configuration and builds a fresh evaluator.
    ///
    /// Fails with `InvalidConfiguration` before any bar is processed if
    /// either window length is zero or the fast window is not strictly
    /// shorter than the slow one.
    pub fn new(settings: CrossoverSettings) -> Result<Self> {
        if settings.fast_period == 0 || settings.slow_period == 0 {
            return Err(Error::InvalidConfiguration {
                reason: "window lengths must be positive".to_string(),
            });
        }
        if settings.fast_period >= settings.slow_period {
            return Err(Error::InvalidConfiguration {
                reason: format!(
                    "fast window ({}) must be shorter than slow window ({})",
                    settings.fast_period, settings.slow_period
                ),
            });
        }

        Ok(Self {
            fast: SmaWindow::new(settings.fast_period),
            slow: SmaWindow::new(settings.slow_period),
            settings,
            prev: None,
            position: Position::Flat,
            last_timestamp: None,
            index: 0,
        })
    }

    pub fn settings(&self) -> &CrossoverSettings {
        &self.settings
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Processes the next bar and returns the signal it produced, if any.
    ///
    /// Bars before the slow window fills produce no signal; that is a
    /// normal condition, not an error. Timestamps must be strictly
    /// increasing across calls.
    pub fn on_bar(&mut self, bar: &Bar) -> Result<Option<SignalEvent>> {
        if let Some(last) = self.last_timestamp {
            if bar.timestamp <= last {
                return Err(Error::InvalidInput {
                    reason: format!(
                        "bar timestamps must be strictly increasing (saw {} after {})",
                        bar.timestamp, last
                    ),
                });
            }
        }
        self.last_timestamp = Some(bar.timestamp);

        let index = self.index;
        self.index += 1;

        let fast = self.fast.update(bar.close);
        let slow = self.slow.update(bar.close);
        let (Some(fast), Some(slow)) = (fast, slow) else {
            return Ok(None);
        };

        let signal = match self.prev.replace((fast, slow)) {
            Some((prev_fast, prev_slow)) => {
                if fast > slow && prev_fast <= prev_slow && self.position == Position::Flat {
                    self.position = Position::Long;
                    Some(Signal::Buy)
                } else if fast < slow && prev_fast >= prev_slow && self.position == Position::Long {
                    self.position = Position::Flat;
                    Some(Signal::Sell)
                } else {
                    None
                }
            }
            // First bar with both averages defined; nothing to compare yet.
            None => None,
        };

        Ok(signal.map(|signal| SignalEvent {
            index,
            signal,
            position: self.position,
        }))
    }
}

/// Evaluates a full bar series with a fresh evaluator.
///
/// Returns the ordered list of (index, signal, resulting position) events.
/// Fewer than `slow_period` bars yields an empty list. An open long at the
/// end of the series is left open; what to do with it is the caller's
/// policy.
pub fn evaluate(settings: CrossoverSettings, bars: &[Bar]) -> Result<Vec<SignalEvent>> {
    let mut evaluator = CrossoverEvaluator::new(settings)?;
    let mut events = Vec::new();
    for bar in bars {
        if let Some(event) = evaluator.on_bar(bar)? {
            events.push(event);
        }
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const DAY_MS: i64 = 86_400_000;

    fn bars_from_closes(closes: &[i64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let close = Decimal::from(close);
                Bar {
                    timestamp: i as i64 * DAY_MS,
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: Decimal::ZERO,
                }
            })
            .collect()
    }

    fn settings(fast: u32, slow: u32) -> CrossoverSettings {
        CrossoverSettings {
            fast_period: fast,
            slow_period: slow,
        }
    }

    #[test]
    fn buy_index_matches_hand_computed_means() {
        // With fast=2, slow=3 the series crosses down at index 3 (ignored
        // while flat: 2-mean 5.5 < 3-mean 7 after 10 >= 10) and crosses up
        // at index 6 (2-mean 10.5 > 3-mean 22/3 after 1 <= 1).
        let bars = bars_from_closes(&[10, 10, 10, 1, 1, 1, 20, 20, 20]);
        let events = evaluate(settings(2, 3), &bars).unwrap();
        assert_eq!(
            events,
            vec![SignalEvent {
                index: 6,
                signal: Signal::Buy,
                position: Position::Long,
            }]
        );
    }

    #[test]
    fn signals_strictly_alternate_starting_with_buy() {
        let bars = bars_from_closes(&[10, 10, 10, 1, 1, 1, 20, 20, 20, 1, 1, 1, 20, 20, 20]);
        let events = evaluate(settings(2, 3), &bars).unwrap();
        assert!(events.len() >= 2);
        for (i, event) in events.iter().enumerate() {
            let expected = if i % 2 == 0 { Signal::Buy } else { Signal::Sell };
            assert_eq!(event.signal, expected);
            let expected_position = match event.signal {
                Signal::Buy => Position::Long,
                Signal::Sell => Position::Flat,
            };
            assert_eq!(event.position, expected_position);
        }
    }

    #[test]
    fn series_shorter_than_slow_window_yields_nothing() {
        let closes: Vec<i64> = (0..29).map(|i| 100 + i).collect();
        let bars = bars_from_closes(&closes);
        let events = evaluate(settings(10, 30), &bars).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn constant_price_never_signals() {
        let bars = bars_from_closes(&[5; 60]);
        let events = evaluate(settings(10, 30), &bars).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn single_upward_flip_produces_exactly_one_buy() {
        // V-shaped series: the fast average starts below the slow one,
        // crosses above exactly once on the way up and never crosses back.
        let closes = [10, 9, 8, 7, 6, 5, 6, 7, 8, 9, 10, 11, 12];
        let bars = bars_from_closes(&closes);
        let events = evaluate(settings(3, 5), &bars).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].signal, Signal::Buy);
        assert_eq!(events[0].position, Position::Long);
    }

    #[test]
    fn downward_cross_while_flat_is_ignored() {
        // The first crossover in this series is downward; with no open
        // position it must not emit a Sell.
        let bars = bars_from_closes(&[10, 10, 10, 1, 1, 1]);
        let events = evaluate(settings(2, 3), &bars).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let bars = bars_from_closes(&[10, 10, 10, 1, 1, 1, 20, 20, 20, 1, 1, 1]);
        let first = evaluate(settings(2, 3), &bars).unwrap();
        let second = evaluate(settings(2, 3), &bars).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fast_window_not_shorter_than_slow_is_rejected() {
        let err = CrossoverEvaluator::new(settings(30, 10)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));

        let err = CrossoverEvaluator::new(settings(10, 10)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = CrossoverEvaluator::new(settings(0, 30)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn non_monotonic_timestamps_are_rejected() {
        let mut bars = bars_from_closes(&[10, 11, 12]);
        bars[2].timestamp = bars[1].timestamp;
        let err = evaluate(settings(2, 3), &bars).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn incremental_and_batch_evaluation_agree() {
        let bars = bars_from_closes(&[10, 10, 10, 1, 1, 1, 20, 20, 20, 1, 1, 1]);
        let batch = evaluate(settings(2, 3), &bars).unwrap();

        let mut evaluator = CrossoverEvaluator::new(settings(2, 3)).unwrap();
        let mut incremental = Vec::new();
        for bar in &bars {
            if let Some(event) = evaluator.on_bar(bar).unwrap() {
                incremental.push(event);
            }
        }
        assert_eq!(batch, incremental);
        assert_eq!(evaluator.position(), Position::Flat);
    }

    #[test]
    fn tie_between_averages_does_not_signal() {
        // Both averages meet exactly at 20 on the final bars without a
        // strict reversal, so nothing may fire after the initial buy.
        let bars = bars_from_closes(&[10, 10, 10, 1, 1, 1, 20, 20, 20]);
        let mut evaluator = CrossoverEvaluator::new(settings(2, 3)).unwrap();
        let mut events = Vec::new();
        for bar in &bars {
            if let Some(event) = evaluator.on_bar(bar).unwrap() {
                events.push(event);
            }
        }
        assert_eq!(events.len(), 1);
        assert_eq!(evaluator.position(), Position::Long);
    }
}
