// src/system/console.rs

use dialoguer::{Confirm, theme::ColorfulTheme};
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented user interaction used by the menu engine and handlers.
pub trait Console {
    /// Shows `prompt` and reads one line with the line ending removed.
    /// `Ok(None)` means the input is closed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write_line(&mut self, text: &str);

    /// Asks a yes/no question. An empty answer picks `default`; `Ok(None)`
    /// means the input is closed.
    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<Option<bool>>;
}

/// Parses a typed yes/no answer. Blank input gives `default`.
pub fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Console bound to the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn write_line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<Option<bool>> {
        if io::stdin().is_terminal() {
            return Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(default)
                .interact_opt()
                .map_err(|e| io::Error::other(e.to_string()));
        }

        // Piped input: fall back to a plain y/n line.
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let Some(answer) = self.read_line(&format!("{} {} ", prompt, hint))? else {
                return Ok(None);
            };
            if let Some(choice) = parse_yes_no(&answer, default) {
                return Ok(Some(choice));
            }
        }
    }
}

#[cfg(test)]
pub use scripted::ScriptedConsole;

#[cfg(test)]
mod scripted {
    use super::{Console, parse_yes_no};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::rc::Rc;

    /// Replays canned input lines and records everything written.
    #[derive(Debug, Default)]
    pub struct ScriptedConsole {
        inputs: VecDeque<String>,
        output: Rc<RefCell<Vec<String>>>,
    }

    impl ScriptedConsole {
        pub fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                output: Rc::default(),
            }
        }

        /// Shared handle to the recorded output, usable after the console
        /// has been moved into a workspace.
        pub fn output(&self) -> Rc<RefCell<Vec<String>>> {
            Rc::clone(&self.output)
        }
    }

    impl Console for ScriptedConsole {
        fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.output.borrow_mut().push(prompt.to_string());
            Ok(self.inputs.pop_front())
        }

        fn write_line(&mut self, text: &str) {
            self.output.borrow_mut().push(text.to_string());
        }

        fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<Option<bool>> {
            loop {
                let Some(answer) = self.read_line(prompt)? else {
                    return Ok(None);
                };
                if let Some(choice) = parse_yes_no(&answer, default) {
                    return Ok(Some(choice));
                }
            }
        }
    }
}
