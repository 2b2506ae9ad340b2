//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use triggerkit::action::DispatchMessage;
use triggerkit::dispatch::{ActionDispatcher, Completion, DispatchSink};
use triggerkit::poll::PollRegistry;

/// Sink that records every message it is handed.
#[derive(Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<DispatchMessage>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<DispatchMessage> {
        self.messages.lock().clone()
    }

    pub fn kinds(&self) -> Vec<String> {
        self.messages.lock().iter().map(|m| m.kind.clone()).collect()
    }

    pub fn count_of(&self, kind: &str) -> usize {
        self.messages.lock().iter().filter(|m| m.kind == kind).count()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl DispatchSink for RecordingSink {
    fn dispatch(&self, message: DispatchMessage) -> Completion {
        self.messages.lock().push(message);
        Completion::done()
    }
}

/// Dispatcher over a fresh registry that records into the returned sink.
pub fn recording_dispatcher() -> (ActionDispatcher, RecordingSink) {
    recording_dispatcher_with(PollRegistry::new())
}

pub fn recording_dispatcher_with(registry: PollRegistry) -> (ActionDispatcher, RecordingSink) {
    let sink = RecordingSink::new();
    let dispatcher = ActionDispatcher::new(Arc::new(sink.clone()), registry);
    (dispatcher, sink)
}

/// Write `content` to a file named `name` inside a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (temp_dir, path)
}
