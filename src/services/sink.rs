// src/services/sink.rs
//
// Display surfaces that receive rendered documents. The session only hands
// markup over; it never waits on or reads back from the sink.

use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle(pub u64);

pub trait Sink {
    /// Shows the first document and returns the handle later updates target.
    fn initialize(&mut self, markup: &str) -> DisplayHandle;
    fn update(&mut self, handle: DisplayHandle, markup: &str);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullSink {
    next_handle: u64,
}

impl Sink for NullSink {
    fn initialize(&mut self, _markup: &str) -> DisplayHandle {
        self.next_handle += 1;
        DisplayHandle(self.next_handle)
    }

    fn update(&mut self, _handle: DisplayHandle, _markup: &str) {}
}

/// Keeps every document it was given, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Vec<(DisplayHandle, String)>,
    next_handle: u64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[(DisplayHandle, String)] {
        &self.documents
    }

    pub fn last(&self) -> Option<&str> {
        self.documents.last().map(|(_, markup)| markup.as_str())
    }

    pub fn update_count(&self) -> usize {
        self.documents.len()
    }
}

impl Sink for MemorySink {
    fn initialize(&mut self, markup: &str) -> DisplayHandle {
        self.next_handle += 1;
        let handle = DisplayHandle(self.next_handle);
        self.documents.push((handle, markup.to_string()));
        handle
    }

    fn update(&mut self, handle: DisplayHandle, markup: &str) {
        self.documents.push((handle, markup.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkMessage {
    Initialize(DisplayHandle, String),
    Update(DisplayHandle, String),
}

/// Forwards documents to another thread, typically a viewer window.
#[derive(Debug)]
pub struct ChannelSink {
    sender: Sender<SinkMessage>,
    next_handle: u64,
}

impl ChannelSink {
    pub fn new(sender: Sender<SinkMessage>) -> Self {
        Self {
            sender,
            next_handle: 0,
        }
    }

    fn send(&self, message: SinkMessage) {
        if self.sender.send(message).is_err() {
            tracing::debug!("display receiver dropped, document discarded");
        }
    }
}

impl Sink for ChannelSink {
    fn initialize(&mut self, markup: &str) -> DisplayHandle {
        self.next_handle += 1;
        let handle = DisplayHandle(self.next_handle);
        self.send(SinkMessage::Initialize(handle, markup.to_string()));
        handle
    }

    fn update(&mut self, handle: DisplayHandle, markup: &str) {
        self.send(SinkMessage::Update(handle, markup.to_string()));
    }
}
