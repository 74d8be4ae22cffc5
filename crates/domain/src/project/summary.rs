//! Project summary aggregation.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use store::Entry;

/// Fraction digits of the daily average.
const AVERAGE_SCALE: u32 = 2;

/// Aggregate over every entry of a project. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Exact sum of all time spent.
    pub total_time_spent: Decimal,

    /// Number of distinct entry dates.
    pub total_days: usize,

    /// `total_time_spent / total_days`, rounded half-to-even to two
    /// fraction digits; zero when either operand is zero.
    pub average_time_spent_per_day: Decimal,
}

impl ProjectSummary {
    /// Aggregates the given entries.
    pub fn from_entries(entries: &[Entry]) -> Self {
        let total_time_spent: Decimal = entries.iter().map(|e| e.time_spent).sum();
        let total_days = entries
            .iter()
            .map(|e| e.date)
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_time_spent,
            total_days,
            average_time_spent_per_day: average_per_day(total_time_spent, total_days),
        }
    }

    /// Summary of a project without entries.
    pub fn empty() -> Self {
        Self::from_entries(&[])
    }
}

fn average_per_day(total_time_spent: Decimal, total_days: usize) -> Decimal {
    if total_time_spent.is_zero() || total_days == 0 {
        return Decimal::ZERO;
    }

    let mut average = (total_time_spent / Decimal::from(total_days))
        .round_dp_with_strategy(AVERAGE_SCALE, RoundingStrategy::MidpointNearestEven);
    average.rescale(AVERAGE_SCALE);
    average
}
