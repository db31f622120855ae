//! Line-oriented terminal front-end hosting the list and edit screens.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::api::TaskClient;
use crate::config::Config;
use crate::screens::{
    EditEvent, EditScreen, ListEvent, ListScreen, NoticeKind, Notices, Treatment,
};

const LIST_HELP: &str = "commands: title <text> | desc <text> | add | toggle <n> | delete <n> | edit <n> | refresh | quit";
const EDIT_HELP: &str = "commands: title <text> | desc <text> | save | back | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Desc(String),
    Add,
    Toggle(usize),
    Delete(usize),
    Edit(usize),
    Refresh,
    Save,
    Back,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs a row number")]
    MissingRow(&'static str),
    #[error("`{0}` is not a row number")]
    BadRow(String),
}

impl Command {
    /// Parses one input line. Row numbers are 1-based and become 0-based indices.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word {
            "title" => Ok(Command::Title(rest.to_string())),
            "desc" => Ok(Command::Desc(rest.to_string())),
            "add" => Ok(Command::Add),
            "toggle" => row("toggle", rest).map(Command::Toggle),
            "delete" => row("delete", rest).map(Command::Delete),
            "edit" => row("edit", rest).map(Command::Edit),
            "refresh" => Ok(Command::Refresh),
            "save" => Ok(Command::Save),
            "back" => Ok(Command::Back),
            "help" | "" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn row(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingRow(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CommandError::BadRow(arg.to_string())),
    }
}

// === Rendering ===
pub fn render_list(screen: &ListScreen) -> String {
    let mut out = String::from("== Tasks ==\n");
    if screen.tasks().is_empty() {
        out.push_str("  (no tasks)\n");
    }
    for (i, row) in screen.rows().enumerate() {
        let mark = match row.treatment {
            Treatment::Completed => 'x',
            Treatment::Pending => ' ',
        };
        out.push_str(&format!(
            "{:>3}. [{}] {}  <{}>\n",
            i + 1,
            mark,
            row.task.title,
            row.action.label()
        ));
        if !row.task.description.is_empty() {
            out.push_str(&format!("       {}\n", row.task.description));
        }
        out.push_str(&format!("       {}\n", row.task.status_text()));
    }
    out.push_str(&format!(
        "new: title=\"{}\" desc=\"{}\"\n",
        screen.title(),
        screen.description()
    ));
    out
}

pub fn render_edit(screen: &EditScreen) -> String {
    format!(
        "== Edit task #{} ==\ntitle: {}\ndesc:  {}\n",
        screen.id(),
        screen.title(),
        screen.description()
    )
}

async fn next_edit_event(edit: &mut Option<EditScreen>) -> Option<EditEvent> {
    match edit {
        Some(screen) => screen.next_event().await,
        None => std::future::pending().await,
    }
}

pub struct Shell {
    config: Config,
    client: Arc<TaskClient>,
    list: ListScreen,
    edit: Option<EditScreen>,
    shown_until: Option<Instant>,
}
impl Shell {
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(TaskClient::new(&config)?);
        let list = ListScreen::new(Arc::clone(&client), &config);
        Ok(Self {
            config,
            client,
            list,
            edit: None,
            shown_until: None,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("{LIST_HELP}");
        self.list.on_visible();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Some(event) = self.list.next_event() => self.apply_list_event(event),
                Some(event) = next_edit_event(&mut self.edit) => self.apply_edit_event(event),
            }
        }
        Ok(())
    }

    fn apply_list_event(&mut self, event: ListEvent) {
        self.list.apply(event);
        self.show_notices();
        if self.edit.is_none() {
            print!("{}", render_list(&self.list));
        }
    }

    fn apply_edit_event(&mut self, event: EditEvent) {
        if let Some(edit) = self.edit.as_mut() {
            edit.apply(event);
        }
        self.show_notices();
        self.close_edit_if_done();
    }

    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                return true;
            }
        };
        debug!(?command, "shell command");
        if command == Command::Quit {
            return false;
        }
        if self.edit.is_some() {
            self.handle_edit_command(command);
        } else {
            self.handle_list_command(command);
        }
        self.show_notices();
        true
    }

    fn handle_list_command(&mut self, command: Command) {
        match command {
            Command::Title(text) => self.list.set_title(text),
            Command::Desc(text) => self.list.set_description(text),
            Command::Add => {
                // validation failures surface as a notice
                let _ = self.list.add();
            }
            Command::Toggle(i) => self.report_missing_row(|list| list.toggle_status(i)),
            Command::Delete(i) => self.report_missing_row(|list| list.delete(i)),
            Command::Edit(i) => match self.list.open(i) {
                Some(args) => {
                    let edit = EditScreen::new(Arc::clone(&self.client), &self.config, args);
                    print!("{}", render_edit(&edit));
                    println!("{EDIT_HELP}");
                    self.edit = Some(edit);
                }
                None => println!("no such task"),
            },
            Command::Refresh => self.list.on_visible(),
            Command::Help => println!("{LIST_HELP}"),
            _ => println!("not available on the list"),
        }
    }

    fn handle_edit_command(&mut self, command: Command) {
        if command == Command::Back {
            self.edit = None;
            self.list.on_visible();
            return;
        }
        let Some(edit) = self.edit.as_mut() else {
            return;
        };
        match command {
            Command::Title(text) => edit.set_title(text),
            Command::Desc(text) => edit.set_description(text),
            Command::Save => edit.save(),
            Command::Help => println!("{EDIT_HELP}"),
            _ => println!("not available while editing"),
        }
    }

    fn report_missing_row(&mut self, action: impl FnOnce(&mut ListScreen) -> bool) {
        if !action(&mut self.list) {
            println!("no such task");
        }
    }

    fn close_edit_if_done(&mut self) {
        if self.edit.as_ref().is_some_and(EditScreen::is_closed) {
            self.edit = None;
            self.list.on_visible();
        }
    }

    // Prints notices raised since the last call.
    fn show_notices(&mut self) {
        let mut fresh = Vec::new();
        collect_fresh(self.list.notices(), self.shown_until, &mut fresh);
        if let Some(edit) = &self.edit {
            collect_fresh(edit.notices(), self.shown_until, &mut fresh);
        }
        fresh.sort_by_key(|(at, _, _)| *at);
        for (at, kind, message) in fresh {
            match kind {
                NoticeKind::Info => println!("* {message}"),
                NoticeKind::Error => println!("! {message}"),
            }
            self.shown_until = Some(at);
        }
    }
}

fn collect_fresh(
    notices: &Notices,
    shown_until: Option<Instant>,
    out: &mut Vec<(Instant, NoticeKind, String)>,
) {
    for notice in notices.active() {
        if shown_until.map_or(true, |t| notice.raised_at > t) {
            out.push((notice.raised_at, notice.kind, notice.message.clone()));
        }
    }
}
