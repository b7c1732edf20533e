//! Plain-text rendering of a [`Screen`] for the terminal.

use std::fmt::Write as _;

use crate::services::filter::strip_markup;
use crate::services::selection::SelectOption;
use crate::services::{Card, Screen, SelectionKey};

pub struct TerminalSurface {
    width: usize,
}

impl TerminalSurface {
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    #[must_use]
    pub fn format(&self, screen: &Screen) -> String {
        let mut out = String::new();

        match screen {
            Screen::Message { text, is_error } => {
                let icon = if *is_error { "✗" } else { "…" };
                let _ = writeln!(out, "\n    {icon} {text}\n");
            }
            Screen::Listing {
                show,
                view,
                search,
                selection,
                options,
            } => {
                if let Some(show) = show {
                    let name = show.name.as_deref().unwrap_or("Show");
                    let _ = writeln!(out, "{name} (#{})", show.id);
                    let _ = writeln!(out, "{:=<width$}", "", width = self.width);
                }

                if !search.is_empty() {
                    let _ = writeln!(out, "Search: \"{search}\"");
                }
                if let SelectionKey::Index(i) = selection {
                    if let Some(option) = options.get(i + 1) {
                        let _ = writeln!(out, "Selected: {}", option.label);
                    }
                }

                for card in &view.cards {
                    out.push('\n');
                    self.write_card(&mut out, card);
                }

                out.push('\n');
                let _ = writeln!(out, "{:-<width$}", "", width = self.width);
                let _ = writeln!(out, "{}", view.status);
            }
        }

        out
    }

    fn write_card(&self, out: &mut String, card: &Card) {
        match &card.code {
            Some(code) => {
                let _ = writeln!(out, "{code}  {}", card.title);
            }
            None => {
                let _ = writeln!(out, "{}", card.title);
            }
        }

        if !card.details.is_empty() {
            let _ = writeln!(out, "  {}", card.details.join(" · "));
        }
        let _ = writeln!(out, "  Image: {}", card.image);

        if let Some(summary) = card.summary_html.as_deref() {
            for line in self.summary_text(summary).lines() {
                if !line.trim().is_empty() {
                    let _ = writeln!(out, "  {line}");
                }
            }
        }
    }

    /// Summary markup rendered to text as-is, without sanitizing.
    fn summary_text(&self, html: &str) -> String {
        let width = self.width.saturating_sub(2).max(10);
        html2text::from_read(html.as_bytes(), width).unwrap_or_else(|_| strip_markup(html))
    }

    /// One line per option, numbered the way `:pick` expects.
    #[must_use]
    pub fn format_options(&self, options: &[SelectOption]) -> String {
        let mut out = String::new();
        for (number, option) in options.iter().enumerate() {
            let _ = writeln!(out, "{number:>4}  {}", option.label);
        }
        out
    }

    pub fn print(&self, screen: &Screen) {
        print!("{}", self.format(screen));
    }
}

pub const HELP: &str = "\
Type text to search, an empty line clears the search.

  :pick <n|code|all>   jump to one item (see :options), or show all
  :options             list the selection options
  :show <id|none>      open the episodes of a show
  :shows               back to the show list
  :reload              start over, dropping the cache
  :help                this text
  :quit                leave
";
