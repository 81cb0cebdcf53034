use std::sync::OnceLock;

use core::str::FromStr;

use termcolor::{WriteColor, StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use parking_lot::Mutex;

mod error;
mod filter;
pub mod fmt;

pub use error::LogError;
pub use filter::Filters;
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec, SegmentSpec};

use crate::Result;

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

fn default_fmt(tag: &str, color: Color) -> LogFmt {
    let mut fmt = LogFmt::default();
    LogFmtBuilder::new(&mut fmt)
        .text(tag, |spec| spec.with_color_spec(|c| { c.set_fg(Some(color)).set_bold(true); }))
        .text(" ", |spec| spec)
        .target(|spec| spec.with_color_spec(|c| { c.set_dimmed(true); }))
        .text(": ", |spec| spec)
        .message(|spec| spec);
    fmt
}

/// Writes one record laid out by `fmt`, followed by a newline.
pub fn write_record<W: WriteColor>(
    out: &mut W,
    fmt: &LogFmt,
    target: &str,
    msg: core::fmt::Arguments,
) -> Result<()>
{
    for segment in fmt {
        let (spec, text) = match segment {
            SegmentSpec::Message(spec) => (spec, None),
            SegmentSpec::Target(spec) => (spec, Some(target)),
            SegmentSpec::Text(text, spec) => (spec, Some(text.as_str())),
        };
        if let Some(color_spec) = &spec.color_spec {
            out.set_color(color_spec)?;
        }
        match text {
            Some(text) => out.write_all(text.as_bytes())?,
            None => write!(out, "{}", msg)?,
        }
        if spec.color_spec.is_some() {
            out.reset()?;
        }
    }
    out.write_all(b"\n")?;
    Ok(())
}

struct Logger {
    stderr: StandardStream,
    error_fmt: LogFmt,
    warn_fmt: LogFmt,
    info_fmt: LogFmt,
    debug_fmt: LogFmt,
    trace_fmt: LogFmt,
    filters: Filters,
}

impl Logger {

    fn new(filters: Filters) -> Self {
        Self {
            stderr: StandardStream::stderr(ColorChoice::Auto),
            error_fmt: default_fmt("[ERROR]", Color::Red),
            warn_fmt: default_fmt("[WARN]", Color::Yellow),
            info_fmt: default_fmt("[INFO]", Color::Green),
            debug_fmt: default_fmt("[DEBUG]", Color::Blue),
            trace_fmt: default_fmt("[TRACE]", Color::Cyan),
            filters,
        }
    }

    fn log(&mut self, target: &str, level: Level, msg: core::fmt::Arguments) -> Result<bool> {
        if !self.filters.enabled(target, level) {
            return Ok(false)
        }
        let fmt = match level {
            Level::Error => &self.error_fmt,
            Level::Warn => &self.warn_fmt,
            Level::Info => &self.info_fmt,
            Level::Debug => &self.debug_fmt,
            Level::Trace => &self.trace_fmt,
        };
        let mut stderr = self.stderr.lock();
        write_record(&mut stderr, fmt, target, msg)?;
        Ok(true)
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Initializes the global logger with filters read from `RUST_LOG`.
///
/// Later calls have no effect.
pub fn init() {
    if LOGGER.get().is_some() { return }
    init_with_filters(Filters::from_env());
}

/// Returns `false` if the logger was already initialized.
pub fn init_with_filters(filters: Filters) -> bool {
    LOGGER.set(Mutex::new(Logger::new(filters))).is_ok()
}

#[inline(always)]
pub fn enabled(target: &str, level: Level) -> bool {
    LOGGER
        .get()
        .is_some_and(|logger| logger.lock().filters.enabled(target, level))
}

/// Logs `args` for `target`. Returns whether anything was written.
#[inline(always)]
pub fn log(target: &str, level: Level, args: core::fmt::Arguments) -> Result<bool> {
    match LOGGER.get() {
        Some(logger) => logger.lock().log(target, level, args),
        None => Ok(false),
    }
}

macro_rules! fmt_setters {
    ($($level:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[inline(always)]
                pub fn [<$level _fmt>](mut f: impl FnMut(&mut LogFmtBuilder)) {
                    if let Some(logger) = LOGGER.get() {
                        let mut logger = logger.lock();
                        let mut builder = LogFmtBuilder::new(&mut logger.[<$level _fmt>]);
                        f(&mut builder);
                    }
                }
            )+
        }
    };
}

fmt_setters!(error, warn, info, debug, trace);

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::Level::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}
