use std::collections::BTreeMap;

use chrono::NaiveDate;

/// In-memory review plan: calendar day to the topics due that day.
///
/// Maintains two invariants on every mutation:
/// - a date is present only while its topic list is non-empty;
/// - a topic appears at most once per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPlan {
    days: BTreeMap<NaiveDate, Vec<String>>,
}

impl ReviewPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan from raw per-day lists, collapsing duplicates and dropping
    /// empty days. The flag reports whether anything had to be normalized.
    pub fn from_days<I>(days: I) -> (Self, bool)
    where
        I: IntoIterator<Item = (NaiveDate, Vec<String>)>,
    {
        let mut plan = Self::new();
        let mut normalized = false;
        for (date, topics) in days {
            let mut unique: Vec<String> = Vec::with_capacity(topics.len());
            for topic in topics {
                if unique.contains(&topic) {
                    normalized = true;
                    continue;
                }
                unique.push(topic);
            }
            if unique.is_empty() {
                normalized = true;
            }
            plan.put(date, unique);
        }
        (plan, normalized)
    }

    /// Topics due on `date`, empty if none.
    pub fn get(&self, date: NaiveDate) -> &[String] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the list for `date`; an empty list removes the date.
    pub fn put(&mut self, date: NaiveDate, topics: Vec<String>) {
        if topics.is_empty() {
            self.days.remove(&date);
        } else {
            self.days.insert(date, topics);
        }
    }

    pub fn has_topics(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn contains(&self, date: NaiveDate, topic: &str) -> bool {
        self.get(date).iter().any(|t| t == topic)
    }

    /// Dates with at least one topic, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[String])> + '_ {
        self.days.iter().map(|(date, topics)| (*date, topics.as_slice()))
    }

    /// Number of dates holding topics.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
