// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change-tracking channel constants.
//!
//! Each layer records what happened to its elements between two renderer
//! drains in a [`DirtyTracker`](understory_dirty::DirtyTracker) keyed by raw
//! element id. Each channel is an independent category of change and is
//! local-only: overlay elements have no dependency edges between them.
//!
//! # Consumption
//!
//! [`OverlayLayer::take_changes`](crate::layer::OverlayLayer::take_changes)
//! drains every channel and surfaces the result as
//! [`OverlayChanges`](crate::layer::OverlayChanges).

use understory_dirty::Channel;

/// Element internal state was recomputed after a geometry update.
pub const GEOMETRY: Channel = Channel::new(0);

/// Element active style was re-resolved for a new zoom level.
pub const STYLE: Channel = Channel::new(1);
