//! Process-wide `tracing` setup.
//!
//! Records go to stdout and, once [`enable_file_logging`] is called, to a log
//! file as well. The level filter and the stdout gate can both be changed
//! after startup, which is how the loaded [`Settings`] are applied.

use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber, debug};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::Settings;

/// One line per event: local timestamp, level, source location, fields.
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if ansi {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
            write!(writer, "{}{:>5}\x1b[0m ", level_color(meta.level()), meta.level())?;
        } else {
            write!(writer, "{timestamp} {:>5} ", meta.level())?;
        }

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file
                .strip_prefix("src/")
                .or_else(|| file.strip_prefix("src\\"))
                .unwrap_or(file);
            if ansi {
                write!(writer, "\x1b[36m{file}:{line}\x1b[0m ")?;
            } else {
                write!(writer, "{file}:{line} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

// --- Late-bound file writer ---

type SharedFile = Arc<Mutex<Option<File>>>;

fn lock_file(slot: &SharedFile) -> MutexGuard<'_, Option<File>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes to the log file once one is set; discards until then.
#[derive(Clone)]
struct FileSlot(SharedFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(lock_file(&self.0))
    }
}

// --- Handles kept after init ---

type Reloader = Box<dyn Fn(EnvFilter) -> Result<()> + Send + Sync>;

struct Handles {
    level: Reloader,
    stdout: Reloader,
    file: SharedFile,
}

fn reloader<S>(
    handle: reload::Handle<EnvFilter, S>,
    what: &'static str,
) -> Reloader
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| {
        handle
            .reload(filter)
            .with_context(|| format!("{what} reload failed"))
    })
}

static HANDLES: OnceLock<Handles> = OnceLock::new();
static APP_NAME: OnceLock<String> = OnceLock::new();

fn handles() -> Result<&'static Handles> {
    HANDLES
        .get()
        .ok_or_else(|| anyhow::anyhow!("logging not yet initialized"))
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

// --- Public API ---

/// Initializes logging. Call once at startup.
///
/// - Stdout: colored when attached to a terminal, plain when piped.
/// - File: inactive until [`enable_file_logging`] is called.
/// - Level: INFO by default, or overridden by the RUST_LOG env var.
///
/// Later calls are ignored.
pub fn init_default_logging() {
    let _ = app_name();

    let file: SharedFile = Arc::new(Mutex::new(None));

    // Global ceiling for both layers.
    let (level_filter, level_handle) = reload::Layer::new(default_filter());
    // Stdout on/off; "trace" lets everything under the ceiling through.
    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(FileSlot(file.clone()));

    let installed = tracing_subscriber::registry()
        .with(level_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        let _ = HANDLES.set(Handles {
            level: reloader(level_handle, "filter"),
            stdout: reloader(stdout_handle, "stdout"),
            file,
        });
    }
}

/// Changes the active log filter at runtime.
///
/// Accepts a bare level ("error", "warn", "info", "debug", "trace") or any
/// full `EnvFilter` directive.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid log level '{level}'"))?;
    (handles()?.level)(filter)
}

/// Shows or hides stdout log output without affecting file logging.
pub fn set_stdout_enabled(enabled: bool) -> Result<()> {
    let filter = if enabled {
        EnvFilter::new("trace")
    } else {
        EnvFilter::new("off")
    };
    (handles()?.stdout)(filter)
}

/// Starts appending log output to `path`, replacing any open log file.
///
/// The directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let handles = handles()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    *lock_file(&handles.file) = Some(file);
    Ok(())
}

/// Closes the current log file.
pub fn disable_file_logging() {
    if let Some(handles) = HANDLES.get() {
        *lock_file(&handles.file) = None;
    }
}

/// Returns the process name derived from the executable path, or "app".
pub fn app_name() -> &'static str {
    APP_NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "app".to_string())
    })
}

/// Applies the logging part of the loaded settings.
///
/// `RUST_LOG`, when set, wins over the configured level.
pub fn apply_settings(settings: &Settings) -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        set_log_level(&settings.log_level)?;
    }
    set_stdout_enabled(settings.log_stdout)?;

    match &settings.log_file {
        Some(path) => enable_file_logging(path)?,
        None => disable_file_logging(),
    }

    debug!(?settings, "logging configured");
    Ok(())
}
