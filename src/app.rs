//! Line-oriented terminal front end.
//!
//! One interaction runs `Idle -> DateSelected -> {AddingTopic | RemovingTopic} -> Idle`;
//! every prompt is modal, and a blank answer or `c` backs out without mutation.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use crate::calendar::{MonthCursor, MonthView};
use crate::constants::DATE_FORMAT;
use crate::planner::{Planner, PlannerError};
use crate::scheduler::RemovalResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    DateSelected(NaiveDate),
    AddingTopic(NaiveDate),
    RemovingTopic(NaiveDate),
}

pub struct Session<R, W> {
    planner: Planner,
    cursor: MonthCursor,
    state: Interaction,
    header: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        planner: Planner,
        today: NaiveDate,
        header: impl Into<String>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            planner,
            cursor: MonthCursor::containing(today),
            state: Interaction::Idle,
            header: header.into(),
            input,
            output,
        }
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn state(&self) -> Interaction {
        self.state
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn into_parts(self) -> (Planner, W) {
        (self.planner, self.output)
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.header)?;
        loop {
            if self.state == Interaction::Idle {
                let view = MonthView::build(self.cursor, self.planner.plan());
                write!(self.output, "\n{}", view.render())?;
            }
            write!(self.output, "{}", self.prompt())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if !self.handle(line.trim_end_matches(&['\r', '\n'][..]))? {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&self) -> &'static str {
        match self.state {
            Interaction::Idle => "Day (1-31 or YYYY-MM-DD), [p]rev, [n]ext, [q]uit: ",
            Interaction::DateSelected(_) => "[a]dd task | [r]emove task | [c]ancel: ",
            Interaction::AddingTopic(_) => "Enter the topic you learned: ",
            Interaction::RemovingTopic(_) => "Enter the task to remove: ",
        }
    }

    /// Feeds one answer to the current prompt. Returns `false` on quit.
    /// Topic answers are passed on untrimmed; a blank one cancels.
    pub fn handle(&mut self, answer: &str) -> io::Result<bool> {
        match self.state {
            Interaction::Idle => return self.handle_idle(answer),
            Interaction::DateSelected(date) => self.handle_choice(date, answer)?,
            Interaction::AddingTopic(date) => {
                self.state = Interaction::Idle;
                if !answer.trim().is_empty() {
                    self.add(answer, date)?;
                }
            }
            Interaction::RemovingTopic(_) => {
                self.state = Interaction::Idle;
                if !answer.trim().is_empty() {
                    self.remove(answer)?;
                }
            }
        }
        Ok(true)
    }

    fn handle_idle(&mut self, answer: &str) -> io::Result<bool> {
        let answer = answer.trim();
        match answer.to_ascii_lowercase().as_str() {
            "" => {}
            "q" | "quit" => return Ok(false),
            "n" | "next" => self.cursor = self.cursor.next(),
            "p" | "prev" => self.cursor = self.cursor.prev(),
            other => match self.parse_date(other) {
                Some(date) => {
                    self.cursor = MonthCursor::containing(date);
                    self.select(date)?;
                }
                None => writeln!(self.output, "No such day: {answer}")?,
            },
        }
        Ok(true)
    }

    fn parse_date(&self, answer: &str) -> Option<NaiveDate> {
        if let Ok(day) = answer.parse::<u32>() {
            return self.cursor.day(day);
        }
        NaiveDate::parse_from_str(answer, DATE_FORMAT).ok()
    }

    fn select(&mut self, date: NaiveDate) -> io::Result<()> {
        self.state = Interaction::DateSelected(date);
        writeln!(self.output, "\nTasks for {}:\n", date.format(DATE_FORMAT))?;
        let topics = self.planner.get_topics_for_date(date);
        if topics.is_empty() {
            writeln!(self.output, "No tasks scheduled.")?;
        }
        for topic in topics {
            writeln!(self.output, "- {topic}")?;
        }
        writeln!(self.output)
    }

    fn handle_choice(&mut self, date: NaiveDate, answer: &str) -> io::Result<()> {
        self.state = match answer.trim().to_ascii_lowercase().as_str() {
            "a" | "add" => Interaction::AddingTopic(date),
            "r" | "remove" => {
                if self.planner.has_topics_on_date(date) {
                    Interaction::RemovingTopic(date)
                } else {
                    writeln!(self.output, "No tasks to remove on this date.")?;
                    Interaction::Idle
                }
            }
            _ => Interaction::Idle,
        };
        Ok(())
    }

    fn add(&mut self, topic: &str, date: NaiveDate) -> io::Result<()> {
        match self.planner.add_learning_event(topic, date) {
            Ok(added) if added.is_empty() => {
                writeln!(self.output, "'{}' is already scheduled from this date.", topic.trim())
            }
            Ok(added) => writeln!(
                self.output,
                "Scheduled '{}' for review on {} dates.",
                topic.trim(),
                added.len()
            ),
            Err(e) => self.report(e),
        }
    }

    fn remove(&mut self, topic: &str) -> io::Result<()> {
        match self.planner.remove_topic_everywhere(topic) {
            Ok(RemovalResult::Removed(_)) => {
                writeln!(self.output, "Task '{}' removed successfully!", topic.trim())
            }
            Ok(RemovalResult::NotFound) => {
                writeln!(self.output, "Task '{}' is not scheduled on any date.", topic.trim())
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, error: PlannerError) -> io::Result<()> {
        match error {
            PlannerError::Store(e) => writeln!(
                self.output,
                "Warning: changes could not be saved ({e}). They are kept for this session only."
            ),
            other => writeln!(self.output, "Error: {other}"),
        }
    }
}
