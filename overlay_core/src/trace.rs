// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layer operations.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! layer calls after each public operation. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! Layers are shared between threads, so sinks are `Send + Sync` and take
//! `&self`. A sink is always invoked after the layer lock has been released.
//!
//! [`Tracer`] wraps an optional shared sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing and the sink passed to
//! [`Tracer::new`] is dropped. When **on**, each method performs a single
//! `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use std::sync::Arc;

use crate::envelope::Envelope;
use crate::error::OverlayError;
use crate::layer::{ElementId, LayerId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which store mutation produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// `replace_all`.
    ReplaceAll,
    /// `add_all`.
    AddAll,
    /// `remove_all`.
    RemoveAll,
    /// `clear`.
    Clear,
}

impl MutationKind {
    /// Returns the operation name in snake case.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReplaceAll => "replace_all",
            Self::AddAll => "add_all",
            Self::RemoveAll => "remove_all",
            Self::Clear => "clear",
        }
    }
}

/// Which handler processed an element update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateHandler {
    /// The element had the geometry capability; its internal state was
    /// recomputed by the layer.
    Geometry,
    /// The update was delegated to the base layer.
    Base,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a store mutation commits.
#[derive(Clone, Copy, Debug)]
pub struct MutationEvent {
    /// Layer that was mutated.
    pub layer: LayerId,
    /// Which mutation ran.
    pub kind: MutationKind,
    /// Elements attached by this mutation.
    pub attached: usize,
    /// Elements detached by this mutation.
    pub detached: usize,
    /// Store length after the mutation.
    pub len: usize,
}

/// Emitted when a mutation is rejected during validation.
#[derive(Clone, Copy, Debug)]
pub struct RejectedEvent {
    /// Layer the mutation targeted.
    pub layer: LayerId,
    /// Which mutation was attempted.
    pub kind: MutationKind,
    /// Why it was rejected.
    pub error: OverlayError,
}

/// Emitted after the visible set is recomputed for a new view.
#[derive(Clone, Copy, Debug)]
pub struct VisibleEvent {
    /// Layer whose visible set was republished.
    pub layer: LayerId,
    /// Zoom level of the view.
    pub zoom: u8,
    /// Number of elements in the visible set.
    pub visible: usize,
    /// Whether active styles were re-resolved for a zoom change.
    pub restyled: bool,
}

/// Emitted after the data extent is computed.
#[derive(Clone, Copy, Debug)]
pub struct ExtentEvent {
    /// Layer whose extent was computed.
    pub layer: LayerId,
    /// Number of element envelopes aggregated.
    pub elements: usize,
    /// Resulting extent in external coordinates.
    pub extent: Envelope,
}

/// Emitted after an element update is handled.
#[derive(Clone, Copy, Debug)]
pub struct ElementUpdatedEvent {
    /// Layer that handled the update.
    pub layer: LayerId,
    /// Element that changed.
    pub element: ElementId,
    /// Which handler ran.
    pub handler: UpdateHandler,
    /// Whether a render was requested.
    pub render_requested: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from overlay layers.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink: Send + Sync {
    /// Called after a store mutation commits.
    fn on_mutation(&self, e: &MutationEvent) {
        _ = e;
    }

    /// Called when a mutation is rejected.
    fn on_rejected(&self, e: &RejectedEvent) {
        _ = e;
    }

    /// Called after the visible set is recomputed.
    fn on_visible(&self, e: &VisibleEvent) {
        _ = e;
    }

    /// Called after the data extent is computed.
    fn on_extent(&self, e: &ExtentEvent) {
        _ = e;
    }

    /// Called after an element update is handled.
    fn on_element_updated(&self, e: &ElementUpdatedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional shared [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
#[derive(Clone, Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Arc<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Arc<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Emits a [`MutationEvent`].
    #[inline]
    pub fn mutation(&self, e: &MutationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.on_mutation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RejectedEvent`].
    #[inline]
    pub fn rejected(&self, e: &RejectedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.on_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`VisibleEvent`].
    #[inline]
    pub fn visible(&self, e: &VisibleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.on_visible(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ExtentEvent`].
    #[inline]
    pub fn extent(&self, e: &ExtentEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.on_extent(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ElementUpdatedEvent`].
    #[inline]
    pub fn element_updated(&self, e: &ElementUpdatedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &self.sink {
            s.on_element_updated(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
