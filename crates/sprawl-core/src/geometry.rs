//! Planar geometry helpers shared by the force kernel and the propagator.
//!
//! Positions and force vectors are plain `[f32; 2]` arrays. [`Separation`]
//! bundles everything a pairwise force law needs about two endpoints so
//! the delta and its norms are computed exactly once per message.

/// A 2D point or vector, `[x, y]`.
pub type Vec2 = [f32; 2];

/// Smallest distance a force law may divide by.
///
/// Coincident vertices are treated as this far apart so that forces
/// stay finite.
pub const MIN_DISTANCE: f32 = 1e-4;

/// Geometric relation between a vertex and a peer.
///
/// `dx`/`dy` point from the vertex towards the peer. `distance` and
/// `square_distance` are the raw (unclamped) norms; force laws apply
/// [`Separation::clamped`] before dividing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    /// Peer x minus own x.
    pub dx: f32,
    /// Peer y minus own y.
    pub dy: f32,
    /// Euclidean distance.
    pub distance: f32,
    /// Squared Euclidean distance.
    pub square_distance: f32,
}

impl Separation {
    /// Compute the separation from `from` towards `to`.
    pub fn between(from: Vec2, to: Vec2) -> Self {
        let dx = to[0] - from[0];
        let dy = to[1] - from[1];
        let square_distance = dx * dx + dy * dy;
        Self {
            dx,
            dy,
            distance: square_distance.sqrt(),
            square_distance,
        }
    }

    /// The same separation seen from the other endpoint.
    pub fn reversed(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            ..self
        }
    }

    /// Distances with the degenerate case substituted by [`MIN_DISTANCE`].
    ///
    /// Returns `(distance, square_distance)`. Non-finite inputs are also
    /// replaced, so a NaN coordinate cannot leak into a force sum.
    pub fn clamped(self) -> (f32, f32) {
        if self.distance.is_finite() && self.distance >= MIN_DISTANCE {
            (self.distance, self.square_distance.max(MIN_DISTANCE * MIN_DISTANCE))
        } else {
            (MIN_DISTANCE, MIN_DISTANCE * MIN_DISTANCE)
        }
    }

    /// Replace a degenerate separation with one of length [`MIN_DISTANCE`]
    /// pointing along `angle` (radians).
    ///
    /// Non-degenerate separations are returned unchanged. Gives stacked
    /// vertices a direction to push apart along.
    pub fn or_towards(self, angle: f32) -> Self {
        if self.distance.is_finite() && self.distance >= MIN_DISTANCE {
            return self;
        }
        Self {
            dx: MIN_DISTANCE * angle.cos(),
            dy: MIN_DISTANCE * angle.sin(),
            distance: MIN_DISTANCE,
            square_distance: MIN_DISTANCE * MIN_DISTANCE,
        }
    }

    /// Unit direction towards the peer, or `[0, 0]` for coincident points.
    pub fn unit(self) -> Vec2 {
        if self.distance.is_finite() && self.distance >= MIN_DISTANCE {
            [self.dx / self.distance, self.dy / self.distance]
        } else {
            [0.0, 0.0]
        }
    }
}

/// Component-wise sum.
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] + b[0], a[1] + b[1]]
}

/// Component-wise difference `a - b`.
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    [a[0] - b[0], a[1] - b[1]]
}

/// Scale a vector by `s`.
pub fn scale(v: Vec2, s: f32) -> Vec2 {
    [v[0] * s, v[1] * s]
}

/// Euclidean norm.
pub fn norm(v: Vec2) -> f32 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn separation_three_four_five() {
        let s = Separation::between([0.0, 0.0], [3.0, 4.0]);
        assert_eq!(s.dx, 3.0);
        assert_eq!(s.dy, 4.0);
        assert_eq!(s.distance, 5.0);
        assert_eq!(s.square_distance, 25.0);
        assert_eq!(s.unit(), [0.6, 0.8]);
    }

    #[test]
    fn coincident_points_clamp() {
        let s = Separation::between([1.5, -2.0], [1.5, -2.0]);
        assert_eq!(s.distance, 0.0);
        let (d, d2) = s.clamped();
        assert_eq!(d, MIN_DISTANCE);
        assert_eq!(d2, MIN_DISTANCE * MIN_DISTANCE);
        assert_eq!(s.unit(), [0.0, 0.0]);
    }

    #[test]
    fn nan_coordinates_clamp() {
        let s = Separation::between([f32::NAN, 0.0], [1.0, 1.0]);
        let (d, d2) = s.clamped();
        assert!(d.is_finite() && d2.is_finite());
        assert_eq!(s.unit(), [0.0, 0.0]);
    }

    #[test]
    fn coincident_points_take_fallback_direction() {
        let s = Separation::between([1.0, 1.0], [1.0, 1.0])
            .or_towards(std::f32::consts::FRAC_PI_2);
        assert_eq!(s.distance, MIN_DISTANCE);
        let [ux, uy] = s.unit();
        assert!(ux.abs() < 1e-6);
        assert!((uy - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fallback_leaves_real_separation_alone() {
        let s = Separation::between([0.0, 0.0], [3.0, 4.0]);
        assert_eq!(s.or_towards(1.0), s);
    }

    #[test]
    fn vector_helpers() {
        assert_eq!(add([1.0, 2.0], [3.0, 4.0]), [4.0, 6.0]);
        assert_eq!(sub([1.0, 2.0], [3.0, 4.0]), [-2.0, -2.0]);
        assert_eq!(scale([1.0, -2.0], 2.0), [2.0, -4.0]);
        assert_eq!(norm([3.0, 4.0]), 5.0);
    }

    proptest! {
        #[test]
        fn reversed_negates_delta_keeps_norms(
            ax in -1e3f32..1e3, ay in -1e3f32..1e3,
            bx in -1e3f32..1e3, by in -1e3f32..1e3,
        ) {
            let ab = Separation::between([ax, ay], [bx, by]);
            let ba = Separation::between([bx, by], [ax, ay]);
            prop_assert_eq!(ab.reversed().dx, ba.dx);
            prop_assert_eq!(ab.reversed().dy, ba.dy);
            prop_assert_eq!(ab.distance, ba.distance);
        }

        #[test]
        fn clamped_is_always_positive(
            ax in -1e3f32..1e3, ay in -1e3f32..1e3,
            bx in -1e3f32..1e3, by in -1e3f32..1e3,
        ) {
            let (d, d2) = Separation::between([ax, ay], [bx, by]).clamped();
            prop_assert!(d >= MIN_DISTANCE);
            prop_assert!(d2 > 0.0);
        }
    }
}
