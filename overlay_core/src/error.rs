// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by layer mutations.

use thiserror::Error;

use crate::layer::ElementId;

/// A rejected mutation.
///
/// Every variant is an invalid-argument condition detected before the layer
/// changes anything: no element is attached, detached, or published when an
/// error is returned.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum OverlayError {
    /// The same element appears more than once in one batch.
    #[error("element {0:?} appears more than once in the batch")]
    DuplicateElement(ElementId),

    /// `add_all` was given an element this layer already owns.
    #[error("element {0:?} is already a member of this layer")]
    AlreadyMember(ElementId),
}

impl OverlayError {
    /// Returns whether this error stems from an invalid argument.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        match self {
            Self::DuplicateElement(_) | Self::AlreadyMember(_) => true,
        }
    }

    /// Returns the offending element.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        match *self {
            Self::DuplicateElement(id) | Self::AlreadyMember(id) => id,
        }
    }
}
