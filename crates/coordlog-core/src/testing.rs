//! In-memory `ActionQuery` used by unit tests.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::aggregate::{ActionQuery, Identified};
use crate::scope::parse_utc;

#[derive(Debug, Clone, PartialEq)]
pub struct Rec {
    pub id: u32,
    pub at: DateTime<Utc>,
    pub note: String,
}

impl Rec {
    pub fn at(id: u32, ts: &str) -> Self {
        Self {
            id,
            at: parse_utc(ts).unwrap(),
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }
}

impl Identified for Rec {
    type Id = u32;

    fn identity(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Error)]
#[error("store unavailable")]
pub struct Unavailable;

pub type Call = (String, DateTime<Utc>, DateTime<Utc>);

pub struct FakeQuery {
    records: Vec<Rec>,
    fail_after: Option<usize>,
    calls: RefCell<Vec<Call>>,
}

impl FakeQuery {
    pub fn new(records: Vec<Rec>) -> Self {
        Self {
            records,
            fail_after: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Succeeds for the first `n` calls, then fails every call.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl ActionQuery for FakeQuery {
    type Record = Rec;
    type Error = Unavailable;

    fn actions_for_date_range(
        &self,
        job_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Rec>, Unavailable> {
        let mut calls = self.calls.borrow_mut();
        calls.push((job_id.to_string(), start, end));
        if self.fail_after.is_some_and(|n| calls.len() > n) {
            return Err(Unavailable);
        }
        Ok(self
            .records
            .iter()
            .filter(|r| start <= r.at && r.at <= end)
            .cloned()
            .collect())
    }
}
