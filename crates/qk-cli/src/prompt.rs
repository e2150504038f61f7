//! Line-oriented input.

use std::io::{self, BufRead, Write};

/// Reads trimmed answers to printed prompts.
pub struct Prompt {
    reader: Box<dyn BufRead>,
    line: String,
}

impl Prompt {
    /// Read from standard input.
    pub fn stdin() -> Self {
        Self::new(Box::new(io::stdin().lock()))
    }

    pub fn new(reader: Box<dyn BufRead>) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Print `prompt` and read one line. `None` means end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>, String> {
        print!("{prompt}");
        io::stdout().flush().map_err(|e| e.to_string())?;

        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => {
                println!();
                Ok(None)
            }
            Ok(_) => Ok(Some(self.line.trim().to_string())),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Ask a yes/no question. A blank answer takes `default`; end of input
    /// answers no.
    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        let answer = self.ask(&format!("{prompt} {hint}: "))?;
        Ok(match answer.as_deref().map(str::to_lowercase).as_deref() {
            None => false,
            Some("") => default,
            Some("y" | "yes") => true,
            Some(_) => false,
        })
    }
}
