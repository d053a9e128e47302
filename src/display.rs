//! Console presentation of payloads and streamed events.

use crate::provider::{Outcome, StreamObserver};
use crossterm::style::{Color, Stylize};
use serde_json::Value;
use std::io::{self, Write};

/// Width of banner rules.
const RULE_WIDTH: usize = 60;
/// Base64 characters kept when truncating for display.
pub const TRUNCATE_AT: usize = 100;
/// Raw strings longer than this are checked for base64 content.
const RAW_BASE64_MIN: usize = 200;

/// Shorten embedded base64 image data for display. The value sent over the
/// wire is never modified.
pub fn truncate_base64(value: &Value, max_len: usize) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), truncate_base64(v, max_len)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|v| truncate_base64(v, max_len)).collect()),
        Value::String(s) => Value::String(truncate_str(s, max_len)),
        other => other.clone(),
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.starts_with("data:")
        && let Some((prefix, data)) = s.split_once(";base64,")
    {
        let len = data.chars().count();
        if len > max_len {
            let head: String = data.chars().take(max_len).collect();
            return format!("{prefix};base64,{head}... [truncated {len} chars]");
        }
        return s.to_string();
    }

    let len = s.chars().count();
    if len > RAW_BASE64_MIN && looks_like_base64(s) {
        let head: String = s.chars().take(max_len).collect();
        return format!("{head}... [truncated {len} chars]");
    }
    s.to_string()
}

/// Alphanumeric once `+`, `/` and `=` are removed.
fn looks_like_base64(s: &str) -> bool {
    let mut rest = s.chars().filter(|c| !matches!(c, '+' | '/' | '=')).peekable();
    rest.peek().is_some() && rest.all(char::is_alphanumeric)
}

/// Writes the demo output: payload, events, and final text.
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn banner(&mut self, title: &str, color: Color) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "{}", rule.as_str().with(color).bold())?;
        writeln!(self.out, "{}", title.with(color).bold())?;
        writeln!(self.out, "{}", rule.as_str().with(color).bold())
    }

    /// Print the outbound request body with base64 data shortened.
    pub fn payload(&mut self, title: &str, payload: &Value) -> io::Result<()> {
        writeln!(self.out)?;
        self.banner(title, Color::Blue)?;
        let shown = truncate_base64(payload, TRUNCATE_AT);
        writeln!(self.out, "{}", serde_json::to_string_pretty(&shown)?)?;
        writeln!(self.out)
    }

    pub fn stream_start(&mut self) -> io::Result<()> {
        self.banner("Streaming Response", Color::Green)
    }

    pub fn event(&mut self, event: &Value) -> io::Result<()> {
        let pretty = serde_json::to_string_pretty(event)?;
        writeln!(self.out, "{}", pretty.with(Color::Cyan))?;
        self.out.flush()
    }

    pub fn sentinel(&mut self, sentinel: &str) -> io::Result<()> {
        writeln!(self.out, "{}", format!("data: {sentinel}").with(Color::Cyan))
    }

    /// Print the completion notice and, if any text arrived, the accumulated text.
    pub fn complete(&mut self, outcome: &Outcome) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}\n", "Stream complete.".with(Color::Green))?;

        if !outcome.text.is_empty() {
            self.banner("Accumulated Text Response", Color::Yellow)?;
            writeln!(self.out, "{}", outcome.text)?;
            writeln!(self.out, "\n{}\n", "=".repeat(RULE_WIDTH).with(Color::Yellow))?;
        }
        self.out.flush()
    }
}

/// Echoes events as they are decoded.
pub struct EventPrinter<'a, W: Write> {
    console: &'a mut Console<W>,
    sentinel: Option<&'static str>,
}

impl<'a, W: Write> EventPrinter<'a, W> {
    pub fn new(console: &'a mut Console<W>, sentinel: Option<&'static str>) -> Self {
        Self { console, sentinel }
    }
}

impl<W: Write> StreamObserver for EventPrinter<'_, W> {
    fn on_event(&mut self, event: &Value) {
        if let Err(e) = self.console.event(event) {
            tracing::debug!("Failed to print event: {e}");
        }
    }

    fn on_done(&mut self) {
        if let Some(sentinel) = self.sentinel
            && let Err(e) = self.console.sentinel(sentinel)
        {
            tracing::debug!("Failed to print sentinel: {e}");
        }
    }
}

/// Print a fatal diagnostic in red on stderr.
pub fn print_error(message: &str) {
    eprintln!("{}", message.with(Color::Red));
}
