//! Interactive terminal session
//!
//! Reads one command per line and drives the list page, the comparison
//! panel and the detail view. Panel transitions that happen later, such as
//! the delayed clear after a close, are reported by a separate task
//! listening on the event bus.

use ce_api::CountrySource;
use ce_comparison::{PanelState, PanelStateChangedData};
use ce_event_bus::EventBus;
use ce_selection::SelectionChange;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::page::{DetailPage, ListPage, ViewState};
use crate::render::{render_comparison, render_detail, render_table};

pub const HELP: &str = "\
Commands:
  search <text>   filter the list by name (no text clears the filter)
  list            show the filtered list
  toggle <name>   add or remove a country from the comparison
  close           close the comparison panel
  compare         show the comparison panel
  show <name>     show a country's details (name or URL slug)
  reload          fetch the country list again
  help            show this help
  quit            leave";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the query; an empty string clears it
    Search(String),
    List,
    Toggle(String),
    Close,
    Compare,
    Show(String),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{0}' needs a country name")]
    MissingArgument(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse a line; the search text is kept exactly as typed after the
    /// first space
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        let name = |cmd: &'static str| {
            let name = rest.trim();
            if name.is_empty() {
                Err(CommandError::MissingArgument(cmd))
            } else {
                Ok(name.to_string())
            }
        };

        match word.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "search" => Ok(Command::Search(rest.to_string())),
            "list" | "ls" => Ok(Command::List),
            "toggle" => name("toggle").map(Command::Toggle),
            "close" => Ok(Command::Close),
            "compare" => Ok(Command::Compare),
            "show" => name("show").map(Command::Show),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// A terminal session over one list page
pub struct Session {
    list: ListPage,
    source: Arc<dyn CountrySource>,
}

impl Session {
    pub fn new(list: ListPage, source: Arc<dyn CountrySource>) -> Self {
        Self { list, source }
    }

    pub fn list(&self) -> &ListPage {
        &self.list
    }

    /// Load the country list and render the first screen
    pub async fn start(&mut self) -> String {
        self.list.load().await;
        self.render_list()
    }

    pub async fn execute(&mut self, command: Command) -> Outcome {
        debug!(?command, "Executing command");
        let output = match command {
            Command::Search(query) => {
                self.list.set_query(query);
                self.render_list()
            }
            Command::List => self.render_list(),
            Command::Toggle(name) => match self.list.toggle(&name) {
                Ok(change) => {
                    let name = self
                        .list
                        .find(&name)
                        .map(|c| c.common_name().to_string())
                        .unwrap_or(name);
                    describe_change(&name, &change)
                }
                Err(e) => e.to_string(),
            },
            Command::Close => {
                if self.list.panel().is_visible() {
                    self.list.close_panel();
                    "Closing comparison.".to_string()
                } else {
                    "The comparison panel is not open.".to_string()
                }
            }
            Command::Compare => match self.list.comparison() {
                Some(cards) => render_comparison(&cards),
                None => "The comparison panel is not open.".to_string(),
            },
            Command::Show(name) => {
                let mut detail = DetailPage::new(&name);
                match detail.load(self.source.as_ref()).await {
                    ViewState::Ready(view) => render_detail(view),
                    ViewState::Failed(message) => format!("Error: {message}"),
                    ViewState::Loading => "Loading...".to_string(),
                }
            }
            Command::Reload => {
                self.list.load().await;
                self.render_list()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Print(output)
    }

    fn render_list(&self) -> String {
        match self.list.state() {
            ViewState::Loading => "Loading...".to_string(),
            ViewState::Failed(message) => format!("Error: {message}"),
            ViewState::Ready(_) => render_table(&self.list.rows()),
        }
    }
}

fn describe_change(name: &str, change: &SelectionChange) -> String {
    match change {
        SelectionChange::Added { len } => format!("Added {name} to the comparison ({len}/2)."),
        SelectionChange::Removed { now_empty: true } => {
            format!("Removed {name}; closing comparison.")
        }
        SelectionChange::Removed { now_empty: false } => {
            format!("Removed {name} from the comparison.")
        }
        SelectionChange::Replaced { previous } => {
            format!("Replaced {} with {name}.", previous.common_name())
        }
    }
}

/// Describe a panel transition for the terminal
pub fn describe_transition(data: &PanelStateChangedData) -> String {
    match data.new_state {
        PanelState::Visible => "[comparison panel opened]",
        PanelState::Closing => "[comparison panel closing]",
        PanelState::Hidden => "[comparison panel closed, selection cleared]",
    }
    .to_string()
}

/// Spawn a task that reports every panel transition through `report`
pub fn spawn_panel_reporter<F>(event_bus: &EventBus, mut report: F) -> JoinHandle<()>
where
    F: FnMut(String) + Send + 'static,
{
    let mut rx = event_bus.subscribe_typed::<PanelStateChangedData>();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => report(describe_transition(&event.data)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Panel reporter lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
