// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding envelopes.
//!
//! [`Envelope`] is the immutable snapshot type handed to callers. It wraps a
//! [`kurbo::Rect`] and adds an explicit empty state, so that the union of
//! "nothing" with a box is that box rather than a box stretched to the origin.
//!
//! [`EnvelopeBuilder`] is the mutable accumulator used while aggregating
//! extents. It only ever grows.

use kurbo::{Point, Rect};

/// An axis-aligned bounding box in some coordinate space, possibly empty.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Envelope {
    rect: Option<Rect>,
}

impl Envelope {
    /// The empty envelope. Identity element for [`union`](Self::union).
    pub const EMPTY: Self = Self { rect: None };

    /// Creates an envelope from two opposite corners.
    ///
    /// The coordinates are normalized, so the corners may be given in any
    /// order.
    #[must_use]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::from_rect(Rect::new(x0, y0, x1, y1))
    }

    /// Creates an envelope covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            rect: Some(rect.abs()),
        }
    }

    /// Returns whether this envelope contains no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rect.is_none()
    }

    /// Returns the covered rectangle, or `None` when empty.
    #[must_use]
    pub const fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Returns the four corners in `(min,min)`, `(max,min)`, `(max,max)`,
    /// `(min,max)` order, or `None` when empty.
    #[must_use]
    pub fn corners(&self) -> Option<[Point; 4]> {
        self.rect.map(|r| {
            [
                Point::new(r.x0, r.y0),
                Point::new(r.x1, r.y0),
                Point::new(r.x1, r.y1),
                Point::new(r.x0, r.y1),
            ]
        })
    }

    /// Returns the smallest envelope containing both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        match (self.rect, other.rect) {
            (Some(a), Some(b)) => Self { rect: Some(a.union(b)) },
            (Some(_), None) => self,
            (None, _) => other,
        }
    }

    /// Returns whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect.is_some_and(|r| {
            point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
        })
    }

    /// Returns whether `other` lies entirely inside this envelope.
    ///
    /// The empty envelope is contained by every envelope.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        match (self.rect, other.rect) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(b)) => b.x0 >= a.x0 && b.y0 >= a.y0 && b.x1 <= a.x1 && b.y1 <= a.y1,
        }
    }
}

impl From<Rect> for Envelope {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

/// Mutable accumulator for building an [`Envelope`] point by point.
///
/// Points with a non-finite coordinate are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvelopeBuilder {
    rect: Option<Rect>,
}

impl EnvelopeBuilder {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self { rect: None }
    }

    /// Creates an accumulator seeded with `envelope`.
    #[must_use]
    pub const fn from_envelope(envelope: Envelope) -> Self {
        Self {
            rect: envelope.rect,
        }
    }

    /// Grows the accumulator to include `point`.
    pub fn add_point(&mut self, point: Point) {
        if !point.is_finite() {
            return;
        }
        self.rect = Some(match self.rect {
            Some(r) => r.union_pt(point),
            None => Rect::from_points(point, point),
        });
    }

    /// Returns an immutable snapshot of the accumulated bounds.
    #[must_use]
    pub const fn build(&self) -> Envelope {
        Envelope { rect: self.rect }
    }
}
