use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::scheduler::{RemovalResult, ReviewScheduler, ScheduleError};
use crate::store::{ReviewPlan, StoreError, TaskStore};
use crate::validation::{normalize_topic, validate_lookup};

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("invalid topic: {0}")]
    InvalidTopic(&'static str),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Interface the presentation layer talks to.
///
/// Every mutation is applied to a working copy of the plan and persisted
/// once; the store adopts the copy even if the write fails, so the session
/// keeps running on the newest state while the error reports the stale file.
#[derive(Debug)]
pub struct Planner {
    store: TaskStore,
    scheduler: ReviewScheduler,
}

impl Planner {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PlannerError> {
        Ok(Self::new(TaskStore::open(path)?, ReviewScheduler::default()))
    }

    pub fn new(store: TaskStore, scheduler: ReviewScheduler) -> Self {
        Self { store, scheduler }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn plan(&self) -> &ReviewPlan {
        self.store.plan()
    }

    pub fn get_topics_for_date(&self, date: NaiveDate) -> &[String] {
        self.store.get(date)
    }

    pub fn has_topics_on_date(&self, date: NaiveDate) -> bool {
        self.store.plan().has_topics(date)
    }

    /// Schedules `topic` from `date` and persists. Returns the dates that
    /// gained the topic; empty when it was already fully scheduled.
    pub fn add_learning_event(
        &mut self,
        topic: &str,
        date: NaiveDate,
    ) -> Result<Vec<NaiveDate>, PlannerError> {
        let topic = normalize_topic(topic).map_err(PlannerError::InvalidTopic)?;

        let mut working = self.store.plan().clone();
        let added = self.scheduler.schedule_topic(&mut working, &topic, date)?;
        if added.is_empty() {
            tracing::debug!(%topic, %date, "Topic already scheduled");
            return Ok(added);
        }

        tracing::info!(%topic, %date, dates = added.len(), "Scheduled topic");
        self.persist(working)?;
        Ok(added)
    }

    /// Removes `topic` from every date and persists. The trimmed text is
    /// matched first, then the text as given, so topics stored with
    /// surrounding whitespace stay removable. `NotFound` leaves the store and
    /// the file untouched.
    pub fn remove_topic_everywhere(&mut self, topic: &str) -> Result<RemovalResult, PlannerError> {
        validate_lookup(topic).map_err(PlannerError::InvalidTopic)?;

        let mut working = self.store.plan().clone();
        let trimmed = topic.trim();
        let mut result = self.scheduler.remove_topic(&mut working, trimmed);
        if result == RemovalResult::NotFound && trimmed != topic {
            result = self.scheduler.remove_topic(&mut working, topic);
        }
        match &result {
            RemovalResult::NotFound => {
                tracing::info!(%topic, "Topic not found for removal");
                return Ok(result);
            }
            RemovalResult::Removed(dates) => {
                tracing::info!(%topic, dates = dates.len(), "Removed topic");
            }
        }

        self.persist(working)?;
        Ok(result)
    }

    fn persist(&mut self, plan: ReviewPlan) -> Result<(), PlannerError> {
        if let Err(e) = self.store.save(plan) {
            tracing::error!(error = %e, "Failed to persist task store");
            return Err(e.into());
        }
        Ok(())
    }
}
