//! Event log for the binaries.
//!
//! Board events and diagnostics drained from a `GameState` are written as one
//! JSON object per line to the file named by `MATCH3_LOG_PATH` (or `--log`).
//! Diagnostics can also be echoed to stderr with a `[Component]` prefix.

use std::fs::{File, OpenOptions};
use std::io::Write;

use serde::Serialize;

use crate::core::{BoardEvent, Diagnostic};
use crate::types::Coord;

/// One line of the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub seq: u64,
    /// `"event"` or `"diagnostic"`
    pub kind: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<[i32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<[i32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<[i32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
}

impl LogRecord {
    fn new(seq: u64, kind: &'static str, name: &'static str) -> Self {
        Self {
            seq,
            kind,
            name,
            a: None,
            b: None,
            pass: None,
            count: None,
            at: None,
            retries: None,
        }
    }

    pub fn from_event(seq: u64, event: &BoardEvent) -> Self {
        let mut rec = Self::new(seq, "event", event.name());
        match *event {
            BoardEvent::SwapStarted { a, b }
            | BoardEvent::SwapCommitted { a, b }
            | BoardEvent::SwapReverted { a, b } => {
                rec.a = Some(xy(a));
                rec.b = Some(xy(b));
            }
            BoardEvent::PassCleared { pass, cleared } => {
                rec.pass = Some(pass);
                rec.count = Some(cleared);
            }
            BoardEvent::Collapsed { pass, moved } => {
                rec.pass = Some(pass);
                rec.count = Some(moved);
            }
            BoardEvent::Refilled { pass, spawned } => {
                rec.pass = Some(pass);
                rec.count = Some(spawned);
            }
            BoardEvent::CascadeFinished { passes } => rec.pass = Some(passes),
            BoardEvent::CascadeStarted | BoardEvent::Restarted => {}
        }
        rec
    }

    pub fn from_diagnostic(seq: u64, diagnostic: &Diagnostic) -> Self {
        let mut rec = Self::new(seq, "diagnostic", diagnostic.name());
        match *diagnostic {
            Diagnostic::FillExhausted { x, y, retries } => {
                rec.at = Some([x, y]);
                rec.retries = Some(retries);
            }
            Diagnostic::CascadeBoundReached { passes } => rec.pass = Some(passes),
        }
        rec
    }
}

fn xy(c: Coord) -> [i32; 2] {
    [c.x, c.y]
}

/// Human-readable diagnostic line, without the component prefix
pub fn describe(diagnostic: &Diagnostic) -> String {
    match *diagnostic {
        Diagnostic::FillExhausted { x, y, retries } => format!(
            "fill exhausted at ({}, {}) after {} retries; kept a matching color",
            x, y, retries
        ),
        Diagnostic::CascadeBoundReached { passes } => {
            format!("cascade stopped after {} passes with matches left", passes)
        }
    }
}

pub struct EventLog {
    component: &'static str,
    echo: bool,
    file: Option<File>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog {
    /// Log that only echoes (when `echo` is set)
    pub fn new(component: &'static str, echo: bool) -> Self {
        Self {
            component,
            echo,
            file: None,
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    /// Log appending to `path`. An unopenable file disables file logging.
    pub fn open(path: Option<&str>, component: &'static str, echo: bool) -> Self {
        let mut log = Self::new(component, echo);
        if let Some(path) = path {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(f) => log.file = Some(f),
                Err(e) => {
                    if echo {
                        eprintln!("[{}] cannot open log {}: {}", component, path, e);
                    }
                }
            }
        }
        log
    }

    pub fn is_writing(&self) -> bool {
        self.file.is_some()
    }

    /// Records written so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record_events(&mut self, events: &[BoardEvent]) {
        for event in events {
            self.seq += 1;
            let rec = LogRecord::from_event(self.seq, event);
            self.write(&rec);
        }
    }

    pub fn record_diagnostics(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            if self.echo {
                eprintln!("[{}] {}", self.component, describe(diagnostic));
            }
            self.seq += 1;
            let rec = LogRecord::from_diagnostic(self.seq, diagnostic);
            self.write(&rec);
        }
    }

    fn write(&mut self, rec: &LogRecord) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, rec).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if file.write_all(&self.buf).is_err() {
            // Stop writing after the first I/O failure.
            self.file = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_record_serializes_compactly() {
        let rec = LogRecord::from_event(3, &BoardEvent::PassCleared { pass: 2, cleared: 5 });
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(
            json,
            r#"{"seq":3,"kind":"event","name":"pass_cleared","pass":2,"count":5}"#
        );
    }

    #[test]
    fn swap_record_carries_coords() {
        let rec = LogRecord::from_event(
            1,
            &BoardEvent::SwapReverted {
                a: Coord::new(0, 1),
                b: Coord::new(1, 1),
            },
        );
        assert_eq!(rec.a, Some([0, 1]));
        assert_eq!(rec.b, Some([1, 1]));
        assert_eq!(rec.name, "swap_reverted");
    }

    #[test]
    fn diagnostic_record_and_text() {
        let d = Diagnostic::FillExhausted { x: 2, y: 3, retries: 100 };
        let rec = LogRecord::from_diagnostic(7, &d);
        assert_eq!(rec.kind, "diagnostic");
        assert_eq!(rec.at, Some([2, 3]));
        assert!(describe(&d).contains("(2, 3)"));
    }

    #[test]
    fn log_appends_json_lines() {
        let path = std::env::temp_dir().join(format!("match3-log-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let path_str = path.to_string_lossy().to_string();

        let mut log = EventLog::open(Some(&path_str), "Test", false);
        assert!(log.is_writing());
        log.record_events(&[BoardEvent::CascadeStarted, BoardEvent::CascadeFinished { passes: 1 }]);
        log.record_diagnostics(&[Diagnostic::CascadeBoundReached { passes: 100 }]);
        assert_eq!(log.seq(), 3);
        drop(log);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["name"], "cascade_started");
        assert_eq!(lines[1]["pass"], 1);
        assert_eq!(lines[2]["kind"], "diagnostic");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn log_without_path_counts_only() {
        let mut log = EventLog::open(None, "Test", false);
        assert!(!log.is_writing());
        log.record_events(&[BoardEvent::Restarted]);
        assert_eq!(log.seq(), 1);
    }
}
