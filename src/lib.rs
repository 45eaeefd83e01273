//! Desk Kit - a menu-driven personal productivity suite
//!
//! Five small tools share one binary: a task list, a file organizer, a note
//! search, an email drafter and a work-session log. The task list and the
//! session log persist through [`record_store::RecordStore`].

pub mod config;
pub mod email;
pub mod error;
pub mod menu;
pub mod note_search;
pub mod organizer;
pub mod record_store;
pub mod task;
pub mod task_list;
pub mod time_log;
pub mod ui;
