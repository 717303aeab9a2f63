// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Layers call
//! sinks through a shared reference from any thread, so the writer sits
//! behind a mutex.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use overlay_core::trace::{
    ElementUpdatedEvent, ExtentEvent, MutationEvent, RejectedEvent, TraceSink, UpdateHandler,
    VisibleEvent,
};

use crate::format_envelope;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write + Send = Box<dyn Write + Send>> {
    writer: Mutex<W>,
}

impl<W: Write + Send> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn line(&self, args: std::fmt::Arguments<'_>) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.write_fmt(args);
        let _ = writer.write_all(b"\n");
    }
}

fn handler_name(handler: UpdateHandler) -> &'static str {
    match handler {
        UpdateHandler::Geometry => "geometry",
        UpdateHandler::Base => "base",
    }
}

impl<W: Write + Send> TraceSink for PrettyPrintSink<W> {
    fn on_mutation(&self, e: &MutationEvent) {
        self.line(format_args!(
            "[{}] layer={} attached={} detached={} len={}",
            e.kind.as_str(),
            e.layer.raw(),
            e.attached,
            e.detached,
            e.len,
        ));
    }

    fn on_rejected(&self, e: &RejectedEvent) {
        self.line(format_args!(
            "[rejected] layer={} op={} element={} reason={}",
            e.layer.raw(),
            e.kind.as_str(),
            e.error.element().raw(),
            e.error,
        ));
    }

    fn on_visible(&self, e: &VisibleEvent) {
        let restyled = if e.restyled { " restyled" } else { "" };
        self.line(format_args!(
            "[visible] layer={} zoom={} visible={}{restyled}",
            e.layer.raw(),
            e.zoom,
            e.visible,
        ));
    }

    fn on_extent(&self, e: &ExtentEvent) {
        self.line(format_args!(
            "[extent] layer={} elements={} extent={}",
            e.layer.raw(),
            e.elements,
            format_envelope(e.extent),
        ));
    }

    fn on_element_updated(&self, e: &ElementUpdatedEvent) {
        let render = if e.render_requested { " render" } else { "" };
        self.line(format_args!(
            "[updated] layer={} element={} handler={}{render}",
            e.layer.raw(),
            e.element.raw(),
            handler_name(e.handler),
        ));
    }
}
