//! A single log event on its way to a handler.

use std::panic::Location;

use chrono::{DateTime, Local};

use crate::level::Level;
use crate::value::Attr;

/// Source position of the code that issued a logging call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// `file:line` using only the final path segment.
    pub fn short(&self) -> String {
        let file = self
            .file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file.as_str());
        format!("{file}:{}", self.line)
    }
}

impl From<&Location<'_>> for CallSite {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// One log event. Built per call, rendered synchronously, then dropped.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub call_site: Option<CallSite>,
    /// Per-call attributes in the order supplied; duplicates are kept.
    pub attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
            call_site: None,
            attrs: Vec::new(),
        }
    }

    pub fn with_call_site(mut self, call_site: impl Into<CallSite>) -> Self {
        self.call_site = Some(call_site.into());
        self
    }

    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn add(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }
}
