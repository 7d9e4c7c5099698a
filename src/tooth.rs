//! Single tooth construction.
//!
//! One flank is an involute from the base circle to the outer circle, with a
//! radial lead-in from the root circle. It is rotated so it crosses the pitch
//! circle on the x-axis, then mirrored about the x-axis and rotated by the
//! circular tooth angle to form the opposite flank.

use crate::curve::Curve;
use crate::errors::GearError;
use crate::float_types::{FRAC_PI_2, Real};
use crate::involute::{Involute, involute_angle_at_radius, locate_cross_angle};
use crate::log::{debug, warn};
use crate::spec::{DerivedDiameters, GearSpecification};
use crate::traits::Transform2D;
use nalgebra::{Matrix3, Point2};

/// Something about a profile worth telling the user, although it was built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileWarning {
    /// The root circle is larger than the base circle, so each flank starts
    /// with a short stretch of involute below the root circle.
    RootAboveBase { root_radius: Real, base_radius: Real },
}

/// The ordered boundary of one tooth: the leading flank from the root up to
/// the outer circle, followed by the trailing flank back down.
#[derive(Debug, Clone, PartialEq)]
pub struct ToothProfile {
    points: Vec<Point2<Real>>,
    flank_len: usize,
    crossing_angle: Real,
    tooth_angle: Real,
    warnings: Vec<ProfileWarning>,
}

impl ToothProfile {
    /// Validate `spec` and build its tooth.
    pub fn build(spec: &GearSpecification) -> Result<Self, GearError> {
        let diameters = spec.validate()?;
        Self::from_diameters(&diameters, spec.samples())
    }

    /// Build a tooth from already derived diameters, sampling each involute
    /// flank with `samples` steps.
    pub fn from_diameters(d: &DerivedDiameters, samples: usize) -> Result<Self, GearError> {
        let base_radius = d.base_radius();
        let outer_radius = d.outer_radius();
        let root_radius = d.root_radius();

        let mut warnings = Vec::new();
        if d.root_above_base() {
            warn!(
                root_radius,
                base_radius,
                "root circle lies outside the base circle, flank lead-in starts below the root"
            );
            warnings.push(ProfileWarning::RootAboveBase {
                root_radius,
                base_radius,
            });
        }

        // φ = π/2 reaches the outer circle for all usual pressure angles; steep
        // ones need a little more.
        let max_angle = FRAC_PI_2.max(1.1 * involute_angle_at_radius(outer_radius, base_radius));
        let involute = Involute::new(base_radius, outer_radius, max_angle, samples.max(1)).generate();

        // radial segment from the root (or base, whichever is lower) to the involute start
        let flank = involute.prepend(Point2::new(base_radius.min(root_radius), 0.0), 0.0);

        let (flank, crossing_angle) = align_to_pitch(&flank, d.pitch_radius())?;

        let tooth_angle = d.circular_tooth_angle();
        let opposite = flank.mirror_x().rotate(tooth_angle);

        debug!(
            flank_points = flank.len(),
            crossing_angle,
            tooth_angle,
            "built tooth profile"
        );

        let flank_len = flank.len();
        Ok(ToothProfile {
            points: flank.concat(&opposite).into_points(),
            flank_len,
            crossing_angle,
            tooth_angle,
            warnings,
        })
    }

    pub fn points(&self) -> &[Point2<Real>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2<Real>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points of the leading flank, root first.
    pub fn flank(&self) -> &[Point2<Real>] {
        &self.points[..self.flank_len]
    }

    /// Points of the trailing flank, tip first.
    pub fn opposite_flank(&self) -> &[Point2<Real>] {
        &self.points[self.flank_len..]
    }

    /// Polar angle at which the unaligned involute crossed the pitch circle;
    /// the flank was rotated back by this much.
    pub const fn crossing_angle(&self) -> Real {
        self.crossing_angle
    }

    /// Angle between the two flanks' pitch circle crossings.
    pub const fn tooth_angle(&self) -> Real {
        self.tooth_angle
    }

    pub fn warnings(&self) -> &[ProfileWarning] {
        &self.warnings
    }

    /// The same tooth rotated so that it is symmetric about the x-axis.
    pub fn symmetric(&self) -> Self {
        self.rotate(-self.tooth_angle / 2.0)
    }
}

impl Transform2D for ToothProfile {
    fn transform(&self, matrix: &Matrix3<Real>) -> Self {
        ToothProfile {
            points: self.points.iter().map(|p| matrix.transform_point(p)).collect(),
            ..self.clone()
        }
    }

    fn reversed(&self) -> Self {
        ToothProfile {
            points: self.points.iter().rev().copied().collect(),
            flank_len: self.points.len() - self.flank_len,
            ..self.clone()
        }
    }
}

/// Rotate `curve` about the origin so that its first crossing of
/// `pitch_radius` lands on the positive x-axis.
///
/// Returns the rotated curve and the polar angle the crossing had before.
pub fn align_to_pitch(curve: &Curve, pitch_radius: Real) -> Result<(Curve, Real), GearError> {
    let crossing = locate_cross_angle(pitch_radius, curve)
        .ok_or(GearError::PitchCircleNotCrossed { pitch_radius })?;
    Ok((curve.rotate(-crossing), crossing))
}
