// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, recording, and tracing bridges for overlay diagnostics.
//!
//! This crate provides [`TraceSink`](overlay_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — in-memory recording with JSON-lines export.
//! - [`tracing_sink::TracingSink`] — forwards events to the `tracing`
//!   ecosystem as structured fields.

use kurbo::Rect;
use overlay_core::envelope::Envelope;

pub mod pretty;
pub mod recorder;
pub mod tracing_sink;

/// Formats an envelope as `[x0,y0 x1,y1]`, or `empty`.
pub(crate) fn format_envelope(envelope: Envelope) -> String {
    match envelope.rect() {
        Some(Rect { x0, y0, x1, y1 }) => format!("[{x0},{y0} {x1},{y1}]"),
        None => String::from("empty"),
    }
}
