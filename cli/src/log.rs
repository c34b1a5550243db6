use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::{ColoredString, Colorize};
use solpot_client::{Level, Report};

const LEVEL_WIDTH: usize = 8;
const DIVIDER_WIDTH: usize = 60;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Prints a bold, prominent title for major sections of output.
pub fn print_title(text: &str) {
    println!("{}", format!("\n{}", text).bold());
}

/// Append-only file of everything reported at error level.
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Writes `<timestamp> - <LEVEL> - <message>` as one line.
    pub fn append(&self, level: Level, message: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{} - {} - {}", timestamp(), level, message)
    }
}

/// Timestamped, coloured, levelled console lines. A message identical to the one printed
/// just before it is not printed again; errors always reach the failure log.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    failures: FailureLog,
    last_message: Option<String>,
}

impl ConsoleReporter {
    pub fn stdout(failures: FailureLog) -> Self {
        Self::new(io::stdout(), failures)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, failures: FailureLog) -> Self {
        Self {
            out,
            failures,
            last_message: None,
        }
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, line: ColoredString) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            ::log::warn!("Failed to write to console: {}", e);
        }
    }
}

fn paint(level: Level, line: String) -> ColoredString {
    match level {
        Level::Info => line.bright_black(),
        Level::Success => line.bright_green(),
        Level::Warning => line.bright_yellow(),
        Level::Error => line.bright_red(),
        Level::Step => line.bright_blue(),
    }
}

impl<W: Write> Report for ConsoleReporter<W> {
    fn report(&mut self, level: Level, message: &str) {
        if level == Level::Error {
            if let Err(e) = self.failures.append(level, message) {
                ::log::warn!("Failed to append to failure log: {}", e);
            }
        }

        if self.last_message.as_deref() == Some(message) {
            return;
        }

        let label = format!("[{:<width$}]", level.as_str(), width = LEVEL_WIDTH);
        self.emit(paint(level, format!("[{}] {} {}", timestamp(), label, message)));
        self.last_message = Some(message.to_string());
    }

    fn divider(&mut self) {
        self.emit("~".repeat(DIVIDER_WIDTH).bright_white());
    }
}
