use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

pub struct Logger {
    use_colors: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    pub fn banner(&self, version: &str) {
        self.log(
            LogLevel::Info,
            &format!("----------------------------- hearth v{} -----------------------------", version),
        );
        self.log(LogLevel::Info, "");
    }

    /// A `> ...` progress line with a timestamp prefix.
    pub fn message(&self, message: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        if self.use_colors {
            println!("\x1b[90m[{}]\x1b[0m > {}", timestamp, message);
        } else {
            println!("[{}] > {}", timestamp, message);
        }
        let _ = std::io::stdout().flush();
    }

    /// An indented continuation line under the previous message.
    pub fn detail(&self, message: &str) {
        self.log(LogLevel::Info, &format!("    {}", message));
    }

    pub fn step_banner(&self, step: &str) {
        let divider = "-".repeat(50);
        self.log(LogLevel::Info, &divider);
        self.log(LogLevel::Info, &format!("{:^50}", step));
        self.log(LogLevel::Info, &divider);
    }

    pub fn error(&self, message: &str) {
        if self.use_colors {
            eprintln!("\x1b[31m{}\x1b[0m", message);
        } else {
            eprintln!("{}", message);
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if self.use_colors {
            let color = match level {
                LogLevel::Debug => "\x1b[90m",
                LogLevel::Info => "\x1b[37m",
                LogLevel::Warning => "\x1b[33m",
                LogLevel::Error => "\x1b[31m",
            };
            println!("{}{}\x1b[0m", color, message);
        } else {
            println!("{}", message);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
