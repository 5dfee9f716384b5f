/// Day offsets from the initial learning date at which a topic is due for review
pub const SCHEDULE_INTERVALS: &[u32] = &[0, 1, 3, 6, 13, 27, 55, 111, 223, 364];

/// Default task file, relative to the working directory
pub const DEFAULT_TASK_FILE: &str = "memory_schedule_tasks.json";

/// Date key format used in the task file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Month title format for the calendar header
pub const MONTH_TITLE_FORMAT: &str = "%B %Y";

/// Indentation of the pretty-printed task file
pub const TASK_FILE_INDENT: &[u8] = b"    ";

pub const QUOTES: &[&str] = &[
    "The future belongs to those who prepare for it today.",
    "Small progress is still progress.",
    "Every day is a chance to learn something new.",
    "Success is the sum of small efforts, repeated daily.",
    "Consistency is the key to mastery.",
];
