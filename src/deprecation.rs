use std::{
    fmt,
    sync::{Arc, Mutex},
};

pub const LOG_TARGET: &str = "pagekit::deprecation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeprecationKind {
    Parameter,
    Property,
}

/// A legacy name that was used in place of its current replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deprecation {
    pub kind: DeprecationKind,
    pub legacy: &'static str,
    pub current: &'static str,
}

impl Deprecation {
    pub fn parameter(legacy: &'static str, current: &'static str) -> Self {
        Self {
            kind: DeprecationKind::Parameter,
            legacy,
            current,
        }
    }

    pub fn property(legacy: &'static str, current: &'static str) -> Self {
        Self {
            kind: DeprecationKind::Property,
            legacy,
            current,
        }
    }
}

impl fmt::Display for Deprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DeprecationKind::Parameter => "parameter",
            DeprecationKind::Property => "property",
        };

        write!(
            f,
            "The {} '{}' is deprecated, use '{}' instead.",
            kind, self.legacy, self.current
        )
    }
}

/// Receiver of deprecation notices. Reporting must never change a returned value.
pub trait DeprecationSink: fmt::Debug + Send + Sync {
    fn deprecated(&self, notice: &Deprecation);
}

/// Forwards notices to the `log` facade as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DeprecationSink for LogSink {
    fn deprecated(&self, notice: &Deprecation) {
        log::warn!(target: LOG_TARGET, "{}", notice);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl DeprecationSink for SilentSink {
    fn deprecated(&self, _notice: &Deprecation) {}
}

/// Keeps every rendered notice, oldest first.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Removes and returns the most recent notice.
    pub fn pop(&self) -> Option<String> {
        match self.messages.lock() {
            Ok(mut messages) => messages.pop(),
            Err(poisoned) => poisoned.into_inner().pop(),
        }
    }
}

impl DeprecationSink for RecordingSink {
    fn deprecated(&self, notice: &Deprecation) {
        let mut messages = match self.messages.lock() {
            Ok(messages) => messages,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.push(notice.to_string());
    }
}
