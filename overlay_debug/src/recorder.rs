// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording and JSON-lines export.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it
//! receives, in arrival order. [`RecorderSink::export_json_lines`] writes
//! them out as one JSON object per line for offline inspection.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Value, json};

use overlay_core::envelope::Envelope;
use overlay_core::trace::{
    ElementUpdatedEvent, ExtentEvent, MutationEvent, RejectedEvent, TraceSink, UpdateHandler,
    VisibleEvent,
};

// ---------------------------------------------------------------------------
// RecordedEvent
// ---------------------------------------------------------------------------

/// An event captured by a [`RecorderSink`].
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`MutationEvent`].
    Mutation(MutationEvent),
    /// A [`RejectedEvent`].
    Rejected(RejectedEvent),
    /// A [`VisibleEvent`].
    Visible(VisibleEvent),
    /// An [`ExtentEvent`].
    Extent(ExtentEvent),
    /// An [`ElementUpdatedEvent`].
    ElementUpdated(ElementUpdatedEvent),
}

impl RecordedEvent {
    /// Returns the event name used in exported records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mutation(_) => "mutation",
            Self::Rejected(_) => "rejected",
            Self::Visible(_) => "visible",
            Self::Extent(_) => "extent",
            Self::ElementUpdated(_) => "element_updated",
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Mutation(e) => json!({
                "event": self.name(),
                "layer": e.layer.raw(),
                "op": e.kind.as_str(),
                "attached": e.attached,
                "detached": e.detached,
                "len": e.len,
            }),
            Self::Rejected(e) => json!({
                "event": self.name(),
                "layer": e.layer.raw(),
                "op": e.kind.as_str(),
                "element": e.error.element().raw(),
                "reason": e.error.to_string(),
            }),
            Self::Visible(e) => json!({
                "event": self.name(),
                "layer": e.layer.raw(),
                "zoom": e.zoom,
                "visible": e.visible,
                "restyled": e.restyled,
            }),
            Self::Extent(e) => json!({
                "event": self.name(),
                "layer": e.layer.raw(),
                "elements": e.elements,
                "extent": envelope_json(e.extent),
            }),
            Self::ElementUpdated(e) => json!({
                "event": self.name(),
                "layer": e.layer.raw(),
                "element": e.element.raw(),
                "handler": match e.handler {
                    UpdateHandler::Geometry => "geometry",
                    UpdateHandler::Base => "base",
                },
                "render_requested": e.render_requested,
            }),
        }
    }
}

fn envelope_json(envelope: Envelope) -> Value {
    match envelope.rect() {
        Some(r) => json!([r.x0, r.y0, r.x1, r.y1]),
        None => Value::Null,
    }
}

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that stores events in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.lock().clone()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Discards all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Writes every recorded event as one JSON object per line.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `writer`.
    pub fn export_json_lines(&self, writer: &mut dyn Write) -> io::Result<()> {
        let events = self.events();
        for event in &events {
            serde_json::to_writer(&mut *writer, &event.to_json())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: RecordedEvent) {
        self.lock().push(event);
    }
}

impl TraceSink for RecorderSink {
    fn on_mutation(&self, e: &MutationEvent) {
        self.push(RecordedEvent::Mutation(*e));
    }

    fn on_rejected(&self, e: &RejectedEvent) {
        self.push(RecordedEvent::Rejected(*e));
    }

    fn on_visible(&self, e: &VisibleEvent) {
        self.push(RecordedEvent::Visible(*e));
    }

    fn on_extent(&self, e: &ExtentEvent) {
        self.push(RecordedEvent::Extent(*e));
    }

    fn on_element_updated(&self, e: &ElementUpdatedEvent) {
        self.push(RecordedEvent::ElementUpdated(*e));
    }
}
