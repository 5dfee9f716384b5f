use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use recall_planner::constants::SCHEDULE_INTERVALS;
use recall_planner::planner::Planner;

pub struct TestPlanner {
    pub dir: TempDir,
    pub path: PathBuf,
    pub planner: Planner,
}

impl TestPlanner {
    pub fn reopen(&self) -> Planner {
        Planner::open(&self.path).expect("reopen planner")
    }
}

pub fn spawn_planner() -> TestPlanner {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("memory_schedule_tasks.json");
    let planner = Planner::open(&path).expect("open planner");
    TestPlanner { dir, path, planner }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn review_dates_from(initial: NaiveDate) -> Vec<NaiveDate> {
    SCHEDULE_INTERVALS
        .iter()
        .map(|&o| initial + Days::new(u64::from(o)))
        .collect()
}
