use crate::error::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::process::{Command, Stdio};
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};
use tracing::debug;

/// Listings longer than this go through the pager.
const PAGE_LINES: usize = 40;

/// Line-oriented input and output for the menus.
pub trait Console {
    /// Reads one trimmed line; `None` once input has ended.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn print(&mut self, text: &str);

    /// Tab-completion candidates offered for the following prompts.
    fn set_completions(&mut self, _candidates: Vec<String>) {}

    /// Prints a possibly long listing.
    fn page(&mut self, text: &str) {
        self.print(text);
    }
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub candidates: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let matches = self
            .candidates
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            })
            .collect();
        Ok((0, matches))
    }
}

/// The interactive terminal: rustyline input with history, stdout output.
pub struct TerminalConsole {
    editor: Editor<CompleteHelper, DefaultHistory>,
    pager: bool,
}

impl TerminalConsole {
    pub fn new(pager: bool) -> Result<Self> {
        let config = rustyline::Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CompleteHelper { candidates: vec![] }));
        Ok(TerminalConsole { editor, pager })
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    self.editor.add_history_entry(trimmed.as_str())?;
                }
                Ok(Some(trimmed))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    fn set_completions(&mut self, candidates: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.candidates = candidates;
        }
    }

    fn page(&mut self, text: &str) {
        if self.pager && text.lines().count() > PAGE_LINES {
            paginate(text);
        } else {
            println!("{}", text);
        }
    }
}

/// Pipes `content` through `less -R`, then `more`, then plain stdout.
fn paginate(content: &str) {
    let spawned = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match spawned {
        Ok(pager) => pager,
        Err(err) => {
            debug!(%err, "no pager available");
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // quitting the pager early closes the pipe
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    let _ = pager.wait();
}

pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

pub fn heading(text: &str) -> String {
    format!("\n{}", text.bold())
}

pub fn success(text: &str) -> String {
    text.green().to_string()
}

pub fn failure(text: &str) -> String {
    text.red().to_string()
}

/// Replays canned input lines and records everything shown.
#[cfg(test)]
pub struct ScriptedConsole {
    input: std::collections::VecDeque<String>,
    pub output: String,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        colored::control::set_override(false);
        ScriptedConsole {
            input: lines.iter().map(|l| l.to_string()).collect(),
            output: String::new(),
        }
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.output.push_str(prompt);
        let line = self.input.pop_front();
        if let Some(line) = &line {
            self.output.push_str(line);
            self.output.push('\n');
        }
        Ok(line.map(|l| l.trim().to_string()))
    }

    fn print(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::Aircraft;

    #[test]
    fn test_completion_filters_by_prefix() {
        let helper = CompleteHelper {
            candidates: vec!["A320".into(), "A350".into(), "B737".into()],
        };
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);
        let (start, pairs) = helper.complete("A3", 2, &ctx).unwrap();
        assert_eq!(start, 0);
        let shown: Vec<_> = pairs.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(shown, vec!["A320", "A350"]);
    }

    #[test]
    fn test_table_has_headers() {
        let rendered = table([Aircraft::new("A320", 150).unwrap()]);
        assert!(rendered.contains("Model"));
        assert!(rendered.contains("A320"));
    }

    #[test]
    fn test_scripted_console_ends() {
        let mut console = ScriptedConsole::new(&[" 1 "]);
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("1"));
        assert_eq!(console.read_line("> ").unwrap(), None);
        console.print("bye");
        assert!(console.output.ends_with("bye\n"));
    }
}
