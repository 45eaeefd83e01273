//! Work-session log

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::record_store::{LoadStatus, RecordStore};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d @ %H:%M:%S";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Session {
    pub start: String,
    pub end: Option<String>,
}

/// What `end_session` did. Closing a session is not supported yet, so this
/// never changes the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSession {
    NotImplemented,
}

pub struct TimeLog {
    store: RecordStore<Session>,
    sessions: Vec<Session>,
    status: LoadStatus,
}

impl TimeLog {
    pub fn open(store: RecordStore<Session>) -> Self {
        let loaded = store.load();
        Self {
            store,
            sessions: loaded.records,
            status: loaded.status,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn start_session(&mut self) -> Result<&Session, StoreError> {
        self.start_session_at(Local::now().naive_local())
    }

    pub fn start_session_at(&mut self, at: NaiveDateTime) -> Result<&Session, StoreError> {
        self.sessions.push(Session {
            start: at.format(TIMESTAMP_FORMAT).to_string(),
            end: None,
        });
        if let Err(e) = self.store.save(&self.sessions) {
            self.sessions.pop();
            return Err(e);
        }
        Ok(&self.sessions[self.sessions.len() - 1])
    }

    pub fn end_session(&self) -> EndSession {
        EndSession::NotImplemented
    }
}
