use std::collections::VecDeque;

use rust_decimal::Decimal;

/// Simple moving average over the last `period` closes.
///
/// Maintained incrementally with a running sum, so each update is O(1).
/// The mean is undefined until `period` closes have been observed.
#[derive(Debug, Clone)]
pub struct SmaWindow {
    period: usize,
    closes: VecDeque<Decimal>,
    sum: Decimal,
}

impl SmaWindow {
    pub fn new(period: u32) -> Self {
        let period = period as usize;
        Self {
            period,
            closes: VecDeque::with_capacity(period + 1),
            sum: Decimal::ZERO,
        }
    }

    /// Pushes a close and returns the mean of the last `period` closes,
    /// or `None` while the window is still filling.
    pub fn update(&mut self, close: Decimal) -> Option<Decimal> {
        self.closes.push_back(close);
        self.sum += close;
        if self.closes.len() > self.period {
            if let Some(evicted) = self.closes.pop_front() {
                self.sum -= evicted;
            }
        }
        if self.closes.len() == self.period {
            Some(self.sum / Decimal::from(self.period as u64))
        } else {
            None
        }
    }
}
