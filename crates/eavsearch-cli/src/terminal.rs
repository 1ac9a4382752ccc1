//! Terminal prompter backed by rustyline

use eavsearch_core::errors::{Result, SearchError};
use eavsearch_core::prompt::Prompter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Reads answers from the terminal (or piped stdin) line by line
///
/// The editor is created on first use, so automated runs never touch the
/// terminal.
#[derive(Default)]
pub struct TerminalPrompter {
    editor: Option<DefaultEditor>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    fn editor(&mut self) -> Result<&mut DefaultEditor> {
        if self.editor.is_none() {
            self.editor = Some(DefaultEditor::new().map_err(|e| SearchError::Io {
                op: "init_terminal".to_string(),
                message: e.to_string(),
            })?);
        }
        self.editor.as_mut().ok_or_else(|| SearchError::Internal {
            message: "terminal editor unavailable".to_string(),
        })
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, rendered: &str) -> Result<String> {
        match self.editor()?.readline(rendered) {
            Ok(line) => Ok(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Err(SearchError::UserCancelled),
            Err(e) => Err(SearchError::Io {
                op: "read_line".to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }
}
