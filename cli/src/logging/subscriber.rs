//! The global subscriber: console output plus a per-tool log file.
//!
//! The dispatcher opens an `action` span carrying `action` and, once the
//! handler returns, `outcome`. The file layer tags every line logged inside
//! that span with the action and writes a `finish` line when it closes.
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

use super::format::{Kind, file_line};
use super::utils::{clock, log_file_path, started_at};

/// Captures the text of one named field.
struct FieldText {
    name: &'static str,
    value: Option<String>,
}

impl FieldText {
    const fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }
}

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.name {
            self.value = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == self.name {
            self.value = Some(format!("{value:?}"));
        }
    }
}

fn message(event: &tracing::Event<'_>) -> String {
    let mut text = FieldText::new("message");
    event.record(&mut text);
    text.value.unwrap_or_default()
}

/// Identifier stored on an `action` span.
struct ActionName(String);

/// Outcome recorded on an `action` span.
struct Outcome(String);

/// Appends every event, tagged with its action, to the tool's log file.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open `<log dir>/<tool>.log`, or `None` when there is nowhere to write.
    pub(super) fn new(tool: &str) -> Option<Self> {
        Self::at(&log_file_path(tool)?, tool).ok()
    }

    /// Start a fresh log at `path` with a run header for `tool`.
    pub(super) fn at(path: &Path, tool: &str) -> io::Result<Self> {
        let mut file = fs::File::create(path)?;
        writeln!(
            file,
            "# react-{tool} {} started {}",
            crate::VERSION,
            started_at(&Utc::now())
        )?;
        if let Ok(cwd) = std::env::current_dir() {
            writeln!(file, "# working directory {}", cwd.display())?;
        }
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    fn write(&self, tag: &str, action: Option<&str>, msg: &str) {
        let line = file_line(&clock(&Utc::now()), tag, action, msg);
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for FileLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut action = FieldText::new("action");
        attrs.record(&mut action);
        if let (Some(name), Some(span)) = (action.value, ctx.span(id)) {
            span.extensions_mut().insert(ActionName(name));
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let mut outcome = FieldText::new("outcome");
        values.record(&mut outcome);
        if let (Some(value), Some(span)) = (outcome.value, ctx.span(id)) {
            span.extensions_mut().replace(Outcome(value));
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: Context<'_, S>) {
        let action = ctx.event_scope(event).and_then(|scope| {
            scope
                .into_iter()
                .find_map(|span| span.extensions().get::<ActionName>().map(|a| a.0.clone()))
        });
        let kind = Kind::of(event.metadata());
        self.write(kind.tag(), action.as_deref(), &message(event));
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let extensions = span.extensions();
        if let Some(ActionName(action)) = extensions.get::<ActionName>() {
            let outcome = extensions
                .get::<Outcome>()
                .map_or("unknown", |o| o.0.as_str());
            self.write("finish", Some(action.as_str()), outcome);
        }
    }
}

/// Console style: stage headers in bold blue, dry-run reports marked,
/// warnings and errors labelled.
#[derive(Debug)]
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let msg = message(event);
        match Kind::of(event.metadata()) {
            Kind::Error => writeln!(writer, "\x1b[31merror:\x1b[0m {msg}"),
            Kind::Warn => writeln!(writer, "\x1b[33mwarning:\x1b[0m {msg}"),
            Kind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Kind::DryRun => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            Kind::Info => writeln!(writer, "  {msg}"),
            Kind::Debug => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Install the global subscriber for `tool`. Call once at startup.
///
/// The console shows `INFO` and up (`DEBUG` with `verbose`); warnings and
/// errors go to stderr. The log file records everything from `DEBUG` up.
pub fn init_subscriber(verbose: bool, tool: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(tool).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
