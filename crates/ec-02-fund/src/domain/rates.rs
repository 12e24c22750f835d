//! Rate policy arithmetic.
//!
//! Every rate is an exact `i128` rational; products against share amounts
//! round half-away-from-zero to integer shares. Identical inputs produce
//! identical shares on every node, with no dependence on platform float
//! width or rounding mode.

use shared_types::{ShareAmount, Timestamp, PERCENT_SCALE, SECONDS_PER_DAY};

/// Days of rate decay per month of elapsed time.
const DAYS_PER_MONTH: i128 = 30;

/// An exact non-negative rational rate. The denominator is always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rate {
    num: i128,
    den: i128,
}

impl Rate {
    /// The zero rate.
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// A percent in hundred-thousandths as a fraction of one.
    pub fn from_percent(percent: u32) -> Self {
        Self {
            num: percent as i128,
            den: PERCENT_SCALE as i128,
        }
    }

    /// The per-day share of a whole-period percent.
    pub fn per_day(percent: u32, period_days: u32) -> Self {
        if period_days == 0 {
            return Self::ZERO;
        }
        Self {
            num: percent as i128,
            den: PERCENT_SCALE as i128 * period_days as i128,
        }
    }

    /// The variant-2 daily rate: `day_percent` reduced by one month-share of
    /// `reduction_per_month` for each elapsed day beyond the first, clamped
    /// at zero.
    pub fn decayed_daily(day_percent: u32, reduction_per_month: u32, days_passed: i64) -> Self {
        let num = day_percent as i128 * DAYS_PER_MONTH
            - reduction_per_month as i128 * (days_passed as i128 - 1);
        if num <= 0 {
            return Self::ZERO;
        }
        Self {
            num,
            den: PERCENT_SCALE as i128 * DAYS_PER_MONTH,
        }
    }

    /// True if the rate is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// `rate × amount`, rounded half-away-from-zero to integer shares.
    pub fn mul_round(&self, amount: ShareAmount) -> ShareAmount {
        round_half_away(self.num * amount as i128, self.den)
    }
}

/// Rounds `num / den` (with `den > 0`) half-away-from-zero.
pub(crate) fn round_half_away(num: i128, den: i128) -> ShareAmount {
    debug_assert!(den > 0);
    let rounded = if num >= 0 {
        (2 * num + den) / (2 * den)
    } else {
        (2 * num - den) / (2 * den)
    };
    rounded as ShareAmount
}

/// Whole days elapsed between two timestamps; zero when `head` precedes
/// `prev`.
pub fn days_between(prev: Timestamp, head: Timestamp) -> i64 {
    (head.saturating_sub(prev) / SECONDS_PER_DAY) as i64
}
