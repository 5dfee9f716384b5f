//! Expansion of a learning event into review dates, and its reversal.
//!
//! Both operations work on an in-memory [`ReviewPlan`]; persisting the result
//! is the caller's job, done once per operation.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::constants::SCHEDULE_INTERVALS;
use crate::store::ReviewPlan;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("review date {offset} days after {initial} is out of range")]
    DateOutOfRange { initial: NaiveDate, offset: u32 },
}

/// Outcome of removing a topic from every date of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalResult {
    /// The topic was removed from these dates, ascending.
    Removed(Vec<NaiveDate>),
    NotFound,
}

impl RemovalResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

/// Spaced-repetition scheduler over a fixed interval table.
#[derive(Debug, Clone, Copy)]
pub struct ReviewScheduler {
    intervals: &'static [u32],
}

impl Default for ReviewScheduler {
    fn default() -> Self {
        Self {
            intervals: SCHEDULE_INTERVALS,
        }
    }
}

impl ReviewScheduler {
    pub fn new(intervals: &'static [u32]) -> Self {
        Self { intervals }
    }

    pub fn intervals(&self) -> &'static [u32] {
        self.intervals
    }

    /// Review dates for a topic learned on `initial`, in table order.
    pub fn review_dates(&self, initial: NaiveDate) -> Result<Vec<NaiveDate>, ScheduleError> {
        self.intervals
            .iter()
            .map(|&offset| {
                initial
                    .checked_add_days(Days::new(u64::from(offset)))
                    .ok_or(ScheduleError::DateOutOfRange { initial, offset })
            })
            .collect()
    }

    /// Adds `topic` to every review date derived from `initial`.
    ///
    /// Dates already holding the topic are left as they are, so repeating the
    /// call is a no-op. All dates are computed before the plan is touched.
    /// Returns the dates that gained the topic.
    pub fn schedule_topic(
        &self,
        plan: &mut ReviewPlan,
        topic: &str,
        initial: NaiveDate,
    ) -> Result<Vec<NaiveDate>, ScheduleError> {
        let dates = self.review_dates(initial)?;
        let mut added = Vec::new();

        for date in dates {
            if plan.contains(date, topic) {
                continue;
            }
            let mut topics = plan.get(date).to_vec();
            topics.push(topic.to_string());
            plan.put(date, topics);
            added.push(date);
        }

        Ok(added)
    }

    /// Removes `topic` from every date in the plan, regardless of which
    /// learning event put it there. Dates left empty are dropped.
    pub fn remove_topic(&self, plan: &mut ReviewPlan, topic: &str) -> RemovalResult {
        let affected: Vec<NaiveDate> = plan
            .iter()
            .filter(|(_, topics)| topics.iter().any(|t| t == topic))
            .map(|(date, _)| date)
            .collect();

        if affected.is_empty() {
            return RemovalResult::NotFound;
        }

        for &date in &affected {
            let remaining: Vec<String> = plan
                .get(date)
                .iter()
                .filter(|t| t.as_str() != topic)
                .cloned()
                .collect();
            plan.put(date, remaining);
        }

        RemovalResult::Removed(affected)
    }
}
