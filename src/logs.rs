use std::io::{stderr, Error as IoError, Stderr, Write};
use std::time::Instant;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub enum LogEvent {
    Debug(String),
    Info(String),
    Warn(String),
    Error(String),
}

impl LogEvent {
    pub fn level(&self) -> Level {
        match self {
            Self::Debug(_) => Level::Debug,
            Self::Info(_) => Level::Info,
            Self::Warn(_) => Level::Warn,
            Self::Error(_) => Level::Error,
        }
    }
}

/// Leveled, colored messages on a terminal stream.
#[derive(Debug)]
pub struct Logger<T: Write> {
    tty: T,
    threshold: Level,
    colored: bool,
}

impl Logger<Stderr> {
    pub fn new_stderr(threshold: Level) -> Self {
        let colored = termion::is_tty(&stderr());
        Self::new(stderr(), threshold, colored)
    }
}

impl<T: Write> Logger<T> {
    pub fn new(tty: T, threshold: Level, colored: bool) -> Self {
        Self {
            tty,
            threshold,
            colored,
        }
    }

    pub fn log(&mut self, event: LogEvent) -> Result<(), IoError> {
        if event.level() < self.threshold {
            return Ok(());
        }
        match event {
            LogEvent::Debug(msg) => self.log_message("DEBUG", msg, termion::color::LightBlack),
            LogEvent::Info(msg) => self.log_message("INFO", msg, termion::color::LightBlue),
            LogEvent::Warn(msg) => self.log_message("WARN", msg, termion::color::LightYellow),
            LogEvent::Error(msg) => self.log_message("ERROR", msg, termion::color::LightRed),
        }
    }

    pub fn debug(&mut self, msg: impl Into<String>) -> Result<(), IoError> {
        self.log(LogEvent::Debug(msg.into()))
    }

    pub fn info(&mut self, msg: impl Into<String>) -> Result<(), IoError> {
        self.log(LogEvent::Info(msg.into()))
    }

    pub fn warn(&mut self, msg: impl Into<String>) -> Result<(), IoError> {
        self.log(LogEvent::Warn(msg.into()))
    }

    pub fn error(&mut self, msg: impl Into<String>) -> Result<(), IoError> {
        self.log(LogEvent::Error(msg.into()))
    }

    fn log_message(
        &mut self,
        label: &'static str,
        msg: String,
        color: impl termion::color::Color,
    ) -> Result<(), IoError> {
        let msg = msg.replace('\t', "    ");
        if self.colored {
            let color = termion::color::Fg(color);
            let reset = termion::style::Reset;
            writeln!(self.tty, "{color}[{label}] {reset}{msg}")?;
        } else {
            writeln!(self.tty, "[{label}] {msg}")?;
        }
        self.tty.flush()
    }

    pub fn into_inner(self) -> T {
        self.tty
    }
}

/// The loading indicator: a bar of arrows sweeping while work is pending.
#[derive(Debug)]
pub struct Spinner<T: Write> {
    tty: T,
    msg: String,
    frame: usize,
    time: Instant,
}

impl<T: Write> Spinner<T> {
    const BAR_WIDTH: usize = 16;
    pub const FRAME_DURATION: f64 = 0.1;

    pub fn new(tty: T, msg: impl Into<String>) -> Result<Self, IoError> {
        let mut spinner = Self {
            tty,
            msg: msg.into(),
            frame: 0,
            time: Instant::now(),
        };
        spinner.show()?;
        Ok(spinner)
    }

    /// Advances the animation if a frame's worth of time has passed.
    pub fn update(&mut self) -> Result<(), IoError> {
        let now = Instant::now();
        let dt = now.duration_since(self.time).as_secs_f64();
        if dt >= Self::FRAME_DURATION {
            self.time = now;
            self.frame = (self.frame + 1) % Self::BAR_WIDTH;
            self.show()?;
        }
        Ok(())
    }

    fn arrows(&self) -> String {
        let mut arrows = vec!['▷'; Self::BAR_WIDTH];
        for i in self.frame..self.frame + 3 {
            arrows[i % Self::BAR_WIDTH] = '▶';
        }
        arrows.into_iter().collect()
    }

    fn show(&mut self) -> Result<(), IoError> {
        let color = termion::color::Fg(termion::color::LightBlue);
        let reset = termion::style::Reset;
        let clear = termion::clear::UntilNewline;
        let arrows = self.arrows();
        write!(self.tty, "\r{color}[{arrows}] {reset}{}{clear}", self.msg)?;
        self.tty.flush()
    }

    /// Erases the indicator so whatever replaces it starts on a clean line.
    pub fn finish(mut self) -> Result<T, IoError> {
        write!(self.tty, "\r{}", termion::clear::CurrentLine)?;
        self.tty.flush()?;
        Ok(self.tty)
    }
}
