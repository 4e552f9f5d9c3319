//! Console message relay and capture.
//!
//! In-page console output arrives as CDP `Runtime.consoleAPICalled` events.
//! This module parses those events into [`ConsoleMessage`]s and hands them to
//! a [`ConsoleSink`]. The sink is registered when a page is opened and stays
//! active until the process exits; it is never unregistered.
//!
//! Two sinks are provided: [`StdoutRelay`] forwards each message verbatim to
//! stdout in arrival order (the harness's relay behavior), and
//! [`ConsoleCapture`] accumulates messages for later querying (used by
//! library consumers and tests).

use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// The severity level of a console message.
///
/// Maps directly to JavaScript console methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()`
    Error,
    /// `console.debug()`
    Debug,
    /// Catch-all for other console APIs
    Other,
}

impl ConsoleLevel {
    /// Returns true if this is an error-level message.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ConsoleLevel::Error)
    }
}

impl From<&str> for ConsoleLevel {
    fn from(s: &str) -> Self {
        match s {
            "log" => ConsoleLevel::Log,
            "info" => ConsoleLevel::Info,
            "warning" => ConsoleLevel::Warning,
            "error" => ConsoleLevel::Error,
            "debug" => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

impl From<&EventConsoleApiCalled> for ConsoleLevel {
    fn from(event: &EventConsoleApiCalled) -> Self {
        use chromiumoxide::cdp::js_protocol::runtime::ConsoleApiCalledType;

        match event.r#type {
            ConsoleApiCalledType::Log => ConsoleLevel::Log,
            ConsoleApiCalledType::Info => ConsoleLevel::Info,
            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
            ConsoleApiCalledType::Error => ConsoleLevel::Error,
            ConsoleApiCalledType::Debug => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

/// A console message emitted by a loaded page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleMessage {
    /// Severity level (log, warn, error, etc.)
    pub level: ConsoleLevel,

    /// The formatted message text. Multiple arguments are joined with spaces.
    pub text: String,

    /// Source location if available (e.g., "app.js:42:10").
    pub source: Option<String>,
}

impl ConsoleMessage {
    /// Creates a new console message.
    #[must_use]
    pub fn new(level: ConsoleLevel, text: String) -> Self {
        Self {
            level,
            text,
            source: None,
        }
    }

    /// Creates a message with source location.
    #[must_use]
    pub fn with_source(mut self, source: String) -> Self {
        self.source = Some(source);
        self
    }
}

/// Destination for console messages relayed from a page.
///
/// A sink is registered once per page and receives messages in emission
/// order for the rest of the process lifetime. Implementations must not
/// block: `emit` is called from the CDP event listener task.
pub trait ConsoleSink: Send + Sync {
    /// Delivers one console message.
    fn emit(&self, message: ConsoleMessage);
}

/// Sink that writes each message's text verbatim to stdout, one per line.
///
/// This is the harness relay: whatever the page logs shows up on the
/// harness's own output stream, in emission order, with no reformatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutRelay;

impl ConsoleSink for StdoutRelay {
    fn emit(&self, message: ConsoleMessage) {
        println!("{}", message.text);
    }
}

/// Thread-safe console message accumulator.
///
/// Cheaply cloneable (Arc); messages are accumulated in arrival order and
/// can be filtered by level. Accumulation (rather than a channel) keeps the
/// API simple: consumers query the snapshot as often as they like and
/// ordering is preserved.
#[derive(Debug, Clone, Default)]
pub struct ConsoleCapture {
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
}

impl ConsoleCapture {
    /// Creates a new, empty console capture.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured messages as a snapshot, in arrival order.
    #[must_use]
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Returns messages filtered by level.
    #[must_use]
    pub fn messages_with_level(&self, level: ConsoleLevel) -> Vec<ConsoleMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.level == level)
            .collect()
    }

    /// Returns all error-level messages.
    #[must_use]
    pub fn errors(&self) -> Vec<ConsoleMessage> {
        self.messages_with_level(ConsoleLevel::Error)
    }

    /// Returns the count of error messages without cloning.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|m| m.level.is_error())
            .count()
    }

    /// Returns true if any error messages were captured.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Clears all captured messages.
    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }

    /// Returns the total number of messages captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns true if no messages have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConsoleSink for ConsoleCapture {
    /// Appends the message to the buffer.
    ///
    /// If the internal mutex is poisoned the message is dropped: a panic
    /// while holding the lock means the process is already failing, and the
    /// missing message is the lesser concern.
    fn emit(&self, message: ConsoleMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }
}

/// Parses a CDP `EventConsoleApiCalled` into a [`ConsoleMessage`].
///
/// Arguments are formatted and joined with spaces; non-primitive arguments
/// render as `<object>`. The first stack frame, when present, becomes the
/// source location.
pub(crate) fn parse_console_event(event: &EventConsoleApiCalled) -> ConsoleMessage {
    let level = ConsoleLevel::from(event);

    let text = event
        .args
        .iter()
        .map(|arg| {
            arg.value
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or("<object>")
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut message = ConsoleMessage::new(level, text);

    if let Some(stack_trace) = &event.stack_trace {
        if let Some(frame) = stack_trace.call_frames.first() {
            let source = format!(
                "{}:{}:{}",
                frame.url, frame.line_number, frame.column_number
            );
            message = message.with_source(source);
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_classification() {
        assert!(ConsoleLevel::Error.is_error());
        assert!(!ConsoleLevel::Warning.is_error());
        assert!(!ConsoleLevel::Log.is_error());
    }

    #[test]
    fn level_from_str() {
        assert_eq!(ConsoleLevel::from("log"), ConsoleLevel::Log);
        assert_eq!(ConsoleLevel::from("warning"), ConsoleLevel::Warning);
        assert_eq!(ConsoleLevel::from("timeEnd"), ConsoleLevel::Other);
    }

    #[test]
    fn capture_preserves_arrival_order() {
        let capture = ConsoleCapture::new();

        capture.emit(ConsoleMessage::new(ConsoleLevel::Log, "first".into()));
        capture.emit(ConsoleMessage::new(ConsoleLevel::Warning, "second".into()));
        capture.emit(ConsoleMessage::new(ConsoleLevel::Log, "third".into()));

        let texts: Vec<_> = capture.messages().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn capture_filtering_and_counts() {
        let capture = ConsoleCapture::new();

        capture.emit(ConsoleMessage::new(ConsoleLevel::Log, "log1".into()));
        capture.emit(ConsoleMessage::new(ConsoleLevel::Error, "err1".into()));
        capture.emit(ConsoleMessage::new(ConsoleLevel::Log, "log2".into()));

        assert_eq!(capture.len(), 3);
        assert_eq!(capture.error_count(), 1);
        assert!(capture.has_errors());

        let errors = capture.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].text, "err1");

        let logs = capture.messages_with_level(ConsoleLevel::Log);
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn capture_clear() {
        let capture = ConsoleCapture::new();
        capture.emit(ConsoleMessage::new(ConsoleLevel::Log, "text".into()));
        assert_eq!(capture.len(), 1);

        capture.clear();
        assert_eq!(capture.len(), 0);
        assert!(capture.is_empty());
    }
}
