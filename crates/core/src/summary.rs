//! Per-meal tally of one day's orders.

use chrono::NaiveDate;

use crate::order::{Order, orders_on};

/// Orders for one meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealTally {
    pub meal: String,
    pub count: usize,
    /// Who ordered it, in the order the orders were given.
    pub users: Vec<String>,
}

/// Today's orders grouped by meal, most ordered first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySummary {
    pub tallies: Vec<MealTally>,
    pub total: usize,
}

impl DailySummary {
    /// Group the orders of `day` by meal name.
    ///
    /// Groups are sorted by descending count; equal counts keep the order in
    /// which the meal first appears in `orders`.
    #[must_use]
    pub fn for_day(orders: &[Order], day: NaiveDate) -> Self {
        let mut tallies: Vec<MealTally> = Vec::new();
        for order in orders_on(orders, day) {
            match tallies.iter_mut().find(|t| t.meal == order.meal) {
                Some(tally) => {
                    tally.count += 1;
                    tally.users.push(order.user.clone());
                }
                None => tallies.push(MealTally {
                    meal: order.meal.clone(),
                    count: 1,
                    users: vec![order.user.clone()],
                }),
            }
        }

        // sort_by is stable
        tallies.sort_by(|a, b| b.count.cmp(&a.count));
        let total = tallies.iter().map(|t| t.count).sum();
        Self { tallies, total }
    }

    /// Share of `tally` in the day's total, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // order counts are tiny
    pub fn percentage(&self, tally: &MealTally) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        tally.count as f64 / self.total as f64 * 100.0
    }

    /// Returns `true` if nobody ordered on that day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}
