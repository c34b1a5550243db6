use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
    Step,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Step => "STEP",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for the human facing progress report.
///
/// Implementations decide where lines go. Error level reports are expected to be kept
/// in the persistent failure log as well as shown.
pub trait Report {
    fn report(&mut self, level: Level, message: &str);

    /// A plain separator line between sections of output.
    fn divider(&mut self);

    fn info(&mut self, message: &str) {
        self.report(Level::Info, message);
    }

    fn success(&mut self, message: &str) {
        self.report(Level::Success, message);
    }

    fn warning(&mut self, message: &str) {
        self.report(Level::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.report(Level::Error, message);
    }

    fn step(&mut self, message: &str) {
        self.report(Level::Step, message);
    }
}
