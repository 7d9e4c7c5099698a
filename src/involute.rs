//! Involute-of-a-circle sampling.
//!
//! The flank of a spur gear tooth is the curve traced by the end of a taut
//! string unwound from the base circle. For parameter φ (the unwound angle):
//!
//! ```text
//! x = rb( cos φ + φ·sin φ )
//! y = rb( sin φ − φ·cos φ )
//! ```
//!
//! Samples are taken at evenly spaced φ and clamped so that the curve stops
//! exactly on a cutoff circle.

use crate::curve::Curve;
use crate::float_types::Real;
use crate::log::debug;
use nalgebra::{Point2, Vector2};

/// Sampling parameters for one involute curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Involute {
    /// Radius of the circle the string is unwound from.
    pub base_radius: Real,
    /// Radius at which the curve is clamped.
    pub max_radius: Real,
    /// Largest involute parameter φ that is sampled.
    pub max_angle: Real,
    /// Number of φ intervals between 0 and `max_angle`.
    pub steps: usize,
}

impl Involute {
    pub const fn new(base_radius: Real, max_radius: Real, max_angle: Real, steps: usize) -> Self {
        Involute {
            base_radius,
            max_radius,
            max_angle,
            steps,
        }
    }

    /// Sample the curve.
    ///
    /// Samples run from φ = 0 to φ = `max_angle` inclusive. The first sample
    /// whose radius exceeds `max_radius` is replaced by a point on the cutoff
    /// circle, found by interpolating by radius between it and the previous
    /// sample, and sampling stops there. Each point carries its polar angle;
    /// the clamped point's angle is interpolated with the same weight.
    ///
    /// When `base_radius >= max_radius` the curve is the single point
    /// `(base_radius, 0)`.
    ///
    /// # Panics
    /// If `steps` is zero.
    pub fn generate(&self) -> Curve {
        assert!(self.steps >= 1, "involute sampling needs at least one step");

        if self.base_radius >= self.max_radius {
            debug!(
                base_radius = self.base_radius,
                max_radius = self.max_radius,
                "involute starts outside its cutoff circle, returning a single point"
            );
            return Curve::with_angles(vec![Point2::new(self.base_radius, 0.0)], vec![0.0]);
        }

        let dphi = self.max_angle / self.steps as Real;
        let mut points = Vec::<Point2<Real>>::with_capacity(self.steps + 1);
        let mut angles = Vec::<Real>::with_capacity(self.steps + 1);
        let mut last_radius = self.base_radius;

        for i in 0..=self.steps {
            let phi = i as Real * dphi;
            let (x, y) = involute_xy(self.base_radius, phi);
            let radius = x.hypot(y);
            let polar = y.atan2(x);

            if radius > self.max_radius {
                // φ = 0 lies on the base circle, so there is always a previous sample here
                if let (Some(prev), Some(&prev_angle)) = (points.last().copied(), angles.last()) {
                    let a = (self.max_radius - last_radius) / (radius - last_radius);
                    let blended = prev.coords.lerp(&Vector2::new(x, y), a);
                    points.push(Point2::from(blended.normalize() * self.max_radius));
                    angles.push(prev_angle * (1.0 - a) + polar * a);
                }
                break;
            }

            points.push(Point2::new(x, y));
            angles.push(polar);
            last_radius = radius;
        }

        debug!(
            samples = points.len(),
            steps = self.steps,
            "sampled involute"
        );
        Curve::with_angles(points, angles)
    }
}

/// Sample an involute from `base_radius` out to `max_radius`.
///
/// Shorthand for [`Involute::generate`].
pub fn generate(base_radius: Real, max_radius: Real, max_angle: Real, steps: usize) -> Curve {
    Involute::new(base_radius, max_radius, max_angle, steps).generate()
}

/// Classic parametric involute of a circle calculation.
///
/// # Parameters
/// - `rb`: base-circle radius
/// - `phi`: involute parameter
///
/// # Returns
/// Cartesian coordinates (x, y) of the involute point
#[inline]
pub fn involute_xy(rb: Real, phi: Real) -> (Real, Real) {
    (
        rb * (phi.cos() + phi * phi.sin()),
        rb * (phi.sin() - phi * phi.cos()),
    )
}

/// Involute parameter φ = sqrt((r/rb)² - 1) at which the curve reaches radius `r`.
#[inline]
pub fn involute_angle_at_radius(r: Real, rb: Real) -> Real {
    ((r / rb).powi(2) - 1.0).max(0.0).sqrt()
}

/// Polar angle of the involute where it crosses radius `r`, i.e. the angle
/// between its start on the base circle and the crossing, seen from the center.
///
/// `sqrt(r² − rb²)/rb − acos(rb/r)`, which is `inv(α) = tan α − α` for the
/// pressure angle α at that radius.
#[inline]
pub fn involute_intersect_angle(rb: Real, r: Real) -> Real {
    (r * r - rb * rb).max(0.0).sqrt() / rb - (rb / r).clamp(-1.0, 1.0).acos()
}

/// Polar angle at which `curve` first crosses the circle of `radius`.
///
/// Looks for the first pair of consecutive samples whose radii bracket
/// `radius` and interpolates the stored polar angles by radius. Returns `None`
/// if the curve has no polar angles or never crosses the circle.
pub fn locate_cross_angle(radius: Real, curve: &Curve) -> Option<Real> {
    let angles = curve.angles()?;
    let points = curve.points();

    (0..points.len().saturating_sub(1)).find_map(|i| {
        let r1 = points[i].coords.norm();
        let r2 = points[i + 1].coords.norm();
        if r1 <= radius && radius < r2 {
            let a = (radius - r1) / (r2 - r1);
            Some(angles[i] * (1.0 - a) + angles[i + 1] * a)
        } else {
            None
        }
    })
}
