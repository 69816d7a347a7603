use crate::traits::AuthorSource;
use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Asks for the author name on stdout and reads one line from stdin.
pub struct StdinPrompt;

impl AuthorSource for StdinPrompt {
    fn author(&mut self) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "Enter author: ")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// An author name given up front, e.g. on the command line.
pub struct FixedAuthor(pub String);

impl AuthorSource for FixedAuthor {
    fn author(&mut self) -> Result<String> {
        Ok(self.0.clone())
    }
}
