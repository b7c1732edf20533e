//! User input events for the interactive browser.
//!
//! Each line typed at the prompt becomes one [`InputEvent`]. Lines starting
//! with `:` are commands; anything else is the new content of the search box.

use std::str::FromStr;

use super::{EpisodeCode, ShowId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// New search box content. Empty clears the search.
    Search(String),

    /// Selection control change.
    Pick(PickTarget),

    /// Show selection change. `None` clears the selection.
    SelectShow(Option<ShowId>),

    /// Return to the show listing.
    ShowCatalog,

    /// List the options of the selection control.
    Options,

    /// Throw away all state and start over.
    Reload,

    Help,

    Quit,
}

/// What the user picked in the selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    All,
    /// 1-based option number as printed in the option list.
    Number(usize),
    Code(EpisodeCode),
}

impl InputEvent {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Search(line.to_string()));
        };

        let mut parts = command.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "pick" | "p" => arg.parse().map(Self::Pick),
            "show" | "s" => parse_show(arg).map(Self::SelectShow),
            "shows" => Ok(Self::ShowCatalog),
            "options" | "o" => Ok(Self::Options),
            "reload" | "r" => Ok(Self::Reload),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            "" => Err("Empty command, try :help".to_string()),
            other => Err(format!("Unknown command ':{other}', try :help")),
        }
    }
}

impl FromStr for PickTarget {
    type Err = String;

    /// `all` (or empty, or `0`), a 1-based option number, or a display code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arg = s.trim();
        if arg.is_empty() || arg.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        if let Ok(number) = arg.parse::<usize>() {
            return match number {
                0 => Ok(Self::All),
                n => Ok(Self::Number(n)),
            };
        }

        arg.parse::<EpisodeCode>().map(Self::Code)
    }
}

fn parse_show(arg: &str) -> Result<Option<ShowId>, String> {
    if arg.is_empty() || arg.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    arg.parse::<ShowId>()
        .map(Some)
        .map_err(|_| format!("Invalid show id '{arg}'"))
}
