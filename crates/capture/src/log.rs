// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared call history with an optional JSONL mirror.

use crate::interaction::{CallArgs, CallOutcome, InterceptedCall};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// History of the calls one stub answered.
///
/// Clones share the same history. Sequence numbers are unique for the
/// lifetime of the log, [`clear`](Self::clear) included, so mirror lines
/// never repeat a `seq`.
#[derive(Clone)]
pub struct CaptureLog {
    shared: Arc<Shared>,
}

struct Shared {
    start: Instant,
    next_seq: AtomicU64,
    calls: Mutex<Vec<InterceptedCall>>,
    mirror: Option<Mirror>,
}

/// Append-only JSONL copy of every recorded call
struct Mirror {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl Mirror {
    fn append(&self, call: &InterceptedCall) {
        let line = match serde_json::to_string(call) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(
                    "cannot serialize call {} for {}: {}",
                    call.seq,
                    self.path.display(),
                    e
                );
                return;
            }
        };
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line).and_then(|()| writer.flush()) {
            tracing::warn!(
                "dropped call {} from {}: {}",
                call.seq,
                self.path.display(),
                e
            );
        }
    }
}

impl CaptureLog {
    /// In-memory log
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Log that also appends each call to `path` as one JSON line.
    ///
    /// Existing content is kept.
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self::build(Some(Mirror {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })))
    }

    fn build(mirror: Option<Mirror>) -> Self {
        Self {
            shared: Arc::new(Shared {
                start: Instant::now(),
                next_seq: AtomicU64::new(0),
                calls: Mutex::new(Vec::new()),
                mirror,
            }),
        }
    }

    /// Record a call and return its sequence number
    pub fn record(&self, args: CallArgs, outcome: CallOutcome) -> u64 {
        let shared = &self.shared;
        // Held across the mirror write so file order matches `seq` order
        let mut calls = shared.calls.lock();
        let call = InterceptedCall {
            seq: shared.next_seq.fetch_add(1, Ordering::Relaxed),
            timestamp: SystemTime::now(),
            elapsed: shared.start.elapsed(),
            args,
            outcome,
        };
        if let Some(mirror) = &shared.mirror {
            mirror.append(&call);
        }
        let seq = call.seq;
        calls.push(call);
        seq
    }

    /// Every recorded call, oldest first
    pub fn calls(&self) -> Vec<InterceptedCall> {
        self.shared.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<InterceptedCall> {
        self.shared.calls.lock().last().cloned()
    }

    /// Calls made to exactly `url`
    pub fn for_url(&self, url: &str) -> Vec<InterceptedCall> {
        self.filtered(|c| c.args.url == url)
    }

    /// Calls made with `method` (case-insensitive)
    pub fn for_method(&self, method: &str) -> Vec<InterceptedCall> {
        self.filtered(|c| c.args.method.eq_ignore_ascii_case(method))
    }

    /// Calls the stub could not answer
    pub fn failures(&self) -> Vec<InterceptedCall> {
        self.filtered(|c| matches!(c.outcome, CallOutcome::Failed { .. }))
    }

    fn filtered(&self, keep: impl Fn(&InterceptedCall) -> bool) -> Vec<InterceptedCall> {
        self.shared
            .calls
            .lock()
            .iter()
            .filter(|c| keep(c))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shared.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.calls.lock().is_empty()
    }

    /// Forget recorded calls. Sequence numbering and the mirror continue.
    pub fn clear(&self) {
        self.shared.calls.lock().clear();
    }

    /// File the log mirrors to, if any
    pub fn mirror_path(&self) -> Option<&Path> {
        self.shared.mirror.as_ref().map(|m| m.path.as_path())
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CaptureLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureLog")
            .field("calls", &self.len())
            .field("mirror", &self.mirror_path())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
