// Copyright 2026 the Overlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate projection contract.
//!
//! The map engine stores geometry in an *internal* fixed coordinate space and
//! reports extents in *external* (real-world or display) coordinates. The
//! [`Projection`] trait is the boundary between the two. The layer only ever
//! needs the internal-to-external direction.
//!
//! Projections need not be affine. Callers that map a box must map its
//! corners one by one rather than assuming the image of a box is a box.

use kurbo::{Affine, Point};

/// Maps points from internal to external coordinates.
pub trait Projection: Send + Sync {
    /// Maps a point from internal to external coordinates.
    fn to_external(&self, point: Point) -> Point;
}

/// The identity projection. Internal and external coordinates coincide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl Projection for Identity {
    #[inline]
    fn to_external(&self, point: Point) -> Point {
        point
    }
}

/// A projection whose internal-to-external mapping is an affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineProjection(pub Affine);

impl Projection for AffineProjection {
    #[inline]
    fn to_external(&self, point: Point) -> Point {
        self.0 * point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_identity() {
        let p = Point::new(12.5, -3.0);
        assert_eq!(Identity.to_external(p), p);
    }

    #[test]
    fn affine_maps_points() {
        let proj = AffineProjection(Affine::scale(2.0).then_translate((10.0, 0.0).into()));
        assert_eq!(proj.to_external(Point::new(3.0, 4.0)), Point::new(16.0, 8.0));
    }
}
