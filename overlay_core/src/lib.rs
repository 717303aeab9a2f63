// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thread-safe overlay geometry layer for interactive map editing.
//!
//! `overlay_core` holds transient "overlay" geometry, typically the editing
//! handles drawn at the corners and vertices of shapes a user is editing. An
//! editing thread mutates the layer while a rendering thread keeps reading
//! the visible set and the data extent.
//!
//! # Architecture
//!
//! ```text
//!   Editing controller
//!       │ replace_all / add_all / remove_all / clear
//!       ▼
//!   attach / detach (unlocked) ──► swap Arc<[_]> + publish (locked)
//!                                           │
//!                 ┌─────────────────────────┘
//!                 ▼
//!   Renderer: recompute_visible() ──► visible_elements()
//!             data_extent()       ──► base extent ∪ projected envelopes
//!             take_changes()      ──► OverlayChanges
//! ```
//!
//! **[`layer`]** — The [`OverlayLayer`](layer::OverlayLayer): element store,
//! attach/detach lifecycle, extent aggregation, and visible-set publication.
//!
//! **[`element`]** — The [`Element`](element::Element) and
//! [`Geometry`](element::Geometry) traits implemented by application
//! geometry, and the [`Attachment`](element::Attachment) back-reference slot.
//!
//! **[`envelope`]** — [`Envelope`](envelope::Envelope) bounding boxes and the
//! [`EnvelopeBuilder`](envelope::EnvelopeBuilder) accumulator.
//!
//! **[`projection`]** — The internal-to-external
//! [`Projection`](projection::Projection) contract.
//!
//! **[`backend`]** — Render trigger and base layer contracts for the host map
//! engine.
//!
//! **[`dirty`]** — Change-tracking channels drained by
//! [`take_changes`](layer::OverlayLayer::take_changes).
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! layer instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod backend;
pub mod config;
pub mod dirty;
pub mod element;
pub mod envelope;
pub mod error;
pub mod layer;
pub mod projection;
pub mod trace;
