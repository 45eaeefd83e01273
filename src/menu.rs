//! Numbered text menus for every tool in the suite

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{BufRead, Write};
use std::path::Path;
use thiserror::Error;

use crate::config::Config;
use crate::email::EmailTemplate;
use crate::error::TaskError;
use crate::note_search::search_notes;
use crate::organizer::organize;
use crate::record_store::LoadStatus;
use crate::task_list::TaskList;
use crate::time_log::{EndSession, TimeLog};
use crate::ui;

pub const INTERRUPTED_MESSAGE: &str = "Program interrupted by user. Exiting gracefully.";

/// Input ended while a prompt was waiting.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct Interrupted;

pub struct App<R, W> {
    config: Config,
    input: R,
    output: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(config: Config, input: R, output: W) -> Self {
        Self {
            config,
            input,
            output,
            interactive: false,
        }
    }

    /// Allow views that take over the real terminal. Off by default.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<()> {
        match self.main_menu() {
            Err(e) if e.is::<Interrupted>() => {
                writeln!(self.output, "\n\n{INTERRUPTED_MESSAGE}")?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            self.clear_screen()?;
            writeln!(self.output, "{}", "=".repeat(35))?;
            writeln!(self.output, "        Desk Kit Utility Suite")?;
            writeln!(self.output, "{}", "=".repeat(35))?;
            writeln!(self.output, "1. Task Manager")?;
            writeln!(self.output, "2. File Organizer")?;
            writeln!(self.output, "3. Note Search")?;
            writeln!(self.output, "4. Email Drafter")?;
            writeln!(self.output, "5. Time Log")?;
            writeln!(self.output, "0. Quit")?;
            writeln!(self.output, "{}", "=".repeat(35))?;

            let choice = self.prompt("\n> Pick a module: ")?;
            match choice.trim() {
                "1" => self.task_menu()?,
                "2" => self.organizer_menu()?,
                "3" => self.note_menu()?,
                "4" => self.email_menu()?,
                "5" => self.time_log_menu()?,
                "0" => {
                    writeln!(self.output, "\nShutting down. See ya later!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice. Pick 0-5.")?;
                    self.pause("Press Enter to continue...")?;
                }
            }
        }
    }

    // Tasks

    fn task_menu(&mut self) -> Result<()> {
        loop {
            self.clear_screen()?;
            writeln!(self.output, "--- TASK MANAGER ---")?;
            writeln!(self.output, "1. See my list")?;
            writeln!(self.output, "2. Add a new task")?;
            writeln!(self.output, "3. Toggle task status")?;
            writeln!(self.output, "4. Board view")?;
            writeln!(self.output, "0. Back to main")?;

            let choice = self.prompt("\n> What do you need? ")?;
            match choice.trim() {
                "1" => {
                    let list = self.open_tasks()?;
                    self.print_tasks(&list)?;
                }
                "2" => self.add_task()?,
                "3" => self.toggle_task()?,
                "4" => self.task_board()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Input '1', '2', '3', '4', or '0'.")?,
            }
            self.pause("\nPress Enter to continue...")?;
        }
    }

    fn open_tasks(&mut self) -> Result<TaskList> {
        let list = TaskList::open(self.config.task_store());
        self.report_load(list.load_status())?;
        Ok(list)
    }

    fn print_tasks(&mut self, list: &TaskList) -> Result<()> {
        if list.tasks().is_empty() {
            writeln!(self.output, "\nNothing on the list right now.\n")?;
            return Ok(());
        }

        writeln!(self.output, "\n[ YOUR TASKS ]\n")?;
        for (i, t) in list.tasks().iter().enumerate() {
            writeln!(
                self.output,
                "{}. {:<30} | Due: {} | Status: {}",
                i + 1,
                t.title,
                t.due_date,
                t.status
            )?;
        }
        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(())
    }

    fn add_task(&mut self) -> Result<()> {
        let title = self.prompt("\nWhat's the task called? ")?;
        let due_date = self.prompt("When's it due? (YYYY-MM-DD): ")?;

        let mut list = self.open_tasks()?;
        match list.add(&title, &due_date) {
            Ok(added) => {
                if !added.due_date_valid {
                    writeln!(
                        self.output,
                        "Date doesn't look like YYYY-MM-DD. Saved it anyway."
                    )?;
                }
                writeln!(self.output, "\nTask {} saved.\n", added.position)?;
            }
            Err(TaskError::Store(e)) => writeln!(self.output, "Couldn't save the task: {e}")?,
            Err(e) => writeln!(self.output, "{e}. Nothing saved.")?,
        }
        Ok(())
    }

    fn toggle_task(&mut self) -> Result<()> {
        let mut list = self.open_tasks()?;
        if list.tasks().is_empty() {
            writeln!(self.output, "\nNo tasks to update yet.\n")?;
            return Ok(());
        }
        self.print_tasks(&list)?;

        let answer = self.prompt("\nEnter the number of the task to toggle: ")?;
        let Ok(position) = answer.trim().parse::<usize>() else {
            writeln!(self.output, "Please enter a number.")?;
            return Ok(());
        };

        match list.toggle(position) {
            Ok(status) => writeln!(self.output, "\nTask {position} is now {status}.\n")?,
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(())
    }

    fn task_board(&mut self) -> Result<()> {
        if !self.interactive {
            writeln!(self.output, "Board view needs an interactive terminal.")?;
            return Ok(());
        }
        let mut list = self.open_tasks()?;
        ui::show_board(&mut list)?;
        Ok(())
    }

    // File organizer

    fn organizer_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n--- FILE ORGANIZER ---")?;
            writeln!(self.output, "1. Organize a folder")?;
            writeln!(self.output, "0. Back")?;

            let choice = self.prompt("\n> Choice: ")?;
            match choice.trim() {
                "1" => {
                    self.organize_folder()?;
                    self.pause("\nPress Enter to return to the menu...")?;
                }
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid. Try 1 or 0.")?,
            }
        }
    }

    fn organize_folder(&mut self) -> Result<()> {
        let dir = self.prompt("\nPath to the folder: ")?;

        writeln!(self.output, "\n--- Scanning and moving files... ---")?;
        let report = match organize(Path::new(dir.trim())) {
            Ok(report) => report,
            Err(e) => {
                writeln!(self.output, "{e}")?;
                return Ok(());
            }
        };

        for failure in &report.failures {
            writeln!(
                self.output,
                "FAILED to move {}: {}",
                failure.file, failure.reason
            )?;
        }
        for (category, count) in report.counts_by_category() {
            writeln!(self.output, "  {category}: {count}")?;
        }
        writeln!(
            self.output,
            "\nDone! Moved {} files.\n",
            report.moved_count()
        )?;
        Ok(())
    }

    // Note search

    fn note_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n--- NOTE SEARCH ---")?;
            writeln!(self.output, "1. Search my notes")?;
            writeln!(self.output, "0. Back")?;

            let choice = self.prompt("\n> Go: ")?;
            match choice.trim() {
                "1" => self.search()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "1 or 0, please.")?,
            }
        }
    }

    fn search(&mut self) -> Result<()> {
        let dir = self.prompt("\nWhere are the notes located? ")?;
        let dir = Path::new(dir.trim());
        if !dir.is_dir() {
            writeln!(self.output, "Can't find that folder. Check the path.")?;
            return Ok(());
        }
        let term = self.prompt("What keyword are you looking for? ")?;

        match search_notes(dir, &term, &self.config.note_extensions) {
            Ok(found) if found.is_empty() => writeln!(
                self.output,
                "Couldn't find '{}' anywhere. Try another word.",
                term.trim()
            )?,
            Ok(found) => {
                writeln!(self.output, "\nFound it in these files:")?;
                for name in found {
                    writeln!(self.output, " - {name}")?;
                }
            }
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(())
    }

    // Email

    fn email_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n--- EMAIL DRAFTER ---")?;
            writeln!(self.output, "1. Draft a quick email")?;
            writeln!(self.output, "0. Back")?;

            let choice = self.prompt("\n> Pick: ")?;
            match choice.trim() {
                "1" => {
                    self.draft_email()?;
                    self.pause("\nPress Enter to continue...")?;
                }
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid. Back.")?,
            }
        }
    }

    fn draft_email(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Templates ---\n")?;
        for (i, template) in EmailTemplate::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, template.label())?;
        }

        let choice = self.prompt("\nTemplate number: ")?;
        let Some(template) = EmailTemplate::from_choice(&choice) else {
            writeln!(self.output, "Unknown template. Pick 1-4.")?;
            return Ok(());
        };

        let mut values = Vec::new();
        for field in template.fields() {
            values.push(self.prompt(&format!("{field}: "))?);
        }

        let draft = template.render(&values);
        writeln!(self.output, "\n--- YOUR EMAIL DRAFT ---\n")?;
        writeln!(self.output, "{draft}")?;
        Ok(())
    }

    // Time log

    fn time_log_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n--- TIME LOG ---")?;
            writeln!(self.output, "1. Start a session")?;
            writeln!(self.output, "2. View history")?;
            writeln!(self.output, "3. End the current session")?;
            writeln!(self.output, "0. Back")?;

            let choice = self.prompt("\n> Choice: ")?;
            match choice.trim() {
                "1" => self.start_session()?,
                "2" => self.print_sessions()?,
                "3" => {
                    let log = self.open_time_log()?;
                    match log.end_session() {
                        EndSession::NotImplemented => writeln!(
                            self.output,
                            "\nEnding a session is not implemented yet. Nothing changed.\n"
                        )?,
                    }
                }
                "0" => return Ok(()),
                _ => writeln!(self.output, "Bad input.")?,
            }
        }
    }

    fn open_time_log(&mut self) -> Result<TimeLog> {
        let log = TimeLog::open(self.config.session_store());
        self.report_load(log.load_status())?;
        Ok(log)
    }

    fn start_session(&mut self) -> Result<()> {
        let mut log = self.open_time_log()?;
        match log.start_session() {
            Ok(session) => writeln!(
                self.output,
                "\n[Session started @ {}] Get to work!\n",
                session.start
            )?,
            Err(e) => writeln!(self.output, "Couldn't save the session: {e}")?,
        }
        Ok(())
    }

    fn print_sessions(&mut self) -> Result<()> {
        let log = self.open_time_log()?;
        if log.sessions().is_empty() {
            writeln!(self.output, "\nNothing logged yet. Start a session!\n")?;
            return Ok(());
        }

        writeln!(self.output, "\n--- WORK SESSION LOG ---\n")?;
        for (i, s) in log.sessions().iter().enumerate() {
            writeln!(
                self.output,
                "{}. Started: {} | Ended: {}",
                i + 1,
                s.start,
                s.end.as_deref().unwrap_or("still active")
            )?;
        }
        Ok(())
    }

    // Console helpers

    fn report_load(&mut self, status: &LoadStatus) -> Result<()> {
        if let Some(warning) = status.warning() {
            writeln!(self.output, "{warning}")?;
        }
        Ok(())
    }

    /// Print `message` and read one line, without the trailing newline.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD so a stray byte is just bad input.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(Interrupted.into());
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn pause(&mut self, message: &str) -> Result<()> {
        self.prompt(message).map(|_| ())
    }

    fn clear_screen(&mut self) -> Result<()> {
        if self.config.clear_screen {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}
