//! Recording sinks and helpers for tests

use std::{
    sync::Mutex,
    time::Duration,
};

use crate::services::{DisplaySink, Notifier};

/// Remembers every text it was asked to show
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    texts: Mutex<Vec<String>>,
}

impl RecordingDisplay {
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.texts.lock().unwrap().last().cloned()
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_text(&self, text: &str) {
        self.texts.lock().unwrap().push(text.to_string());
    }
}

/// Remembers every notification it was asked to deliver
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Let spawned tasks process pending events; advances paused time by 1ms
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
