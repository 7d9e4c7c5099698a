//! Sampled planar curves.

use crate::float_types::Real;
use crate::traits::Transform2D;
use nalgebra::{Matrix3, Point2, Rotation2};

/// An ordered sequence of sampled points, optionally carrying the polar angle
/// (`atan2(y, x)`) each sample was produced at.
///
/// Angles survive rotations, mirroring and positive uniform scaling, which
/// all map polar angles predictably. Any other transform drops them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    points: Vec<Point2<Real>>,
    angles: Option<Vec<Real>>,
}

impl Curve {
    pub const fn new(points: Vec<Point2<Real>>) -> Self {
        Curve {
            points,
            angles: None,
        }
    }

    /// Build a curve with one polar angle per point.
    ///
    /// If the lengths disagree the angles are discarded.
    pub fn with_angles(points: Vec<Point2<Real>>, angles: Vec<Real>) -> Self {
        let angles = (angles.len() == points.len()).then_some(angles);
        Curve { points, angles }
    }

    pub fn points(&self) -> &[Point2<Real>] {
        &self.points
    }

    pub fn angles(&self) -> Option<&[Real]> {
        self.angles.as_deref()
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

    pub fn first(&self) -> Option<&Point2<Real>> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2<Real>> {
        self.points.last()
    }

    /// Distance of every point from the origin, in order.
    pub fn radii(&self) -> impl Iterator<Item = Real> + '_ {
        self.points.iter().map(|p| p.coords.norm())
    }

    /// Largest distance of any point from the origin (0 for an empty curve).
    pub fn max_radius(&self) -> Real {
        self.radii().fold(0.0, Real::max)
    }

    /// A new curve with `point` (at polar `angle`) inserted before the first sample.
    pub fn prepend(&self, point: Point2<Real>, angle: Real) -> Self {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.push(point);
        points.extend_from_slice(&self.points);

        let angles = self.angles.as_ref().map(|angles| {
            let mut out = Vec::with_capacity(angles.len() + 1);
            out.push(angle);
            out.extend_from_slice(angles);
            out
        });

        Curve { points, angles }
    }

    /// This curve followed by `other`. Angles are kept only when both sides carry them.
    pub fn concat(&self, other: &Curve) -> Self {
        let mut points = self.points.clone();
        points.extend_from_slice(&other.points);

        let angles = match (&self.angles, &other.angles) {
            (Some(a), Some(b)) => {
                let mut out = a.clone();
                out.extend_from_slice(b);
                Some(out)
            },
            _ => None,
        };

        Curve { points, angles }
    }
}

impl From<Vec<Point2<Real>>> for Curve {
    fn from(points: Vec<Point2<Real>>) -> Self {
        Curve::new(points)
    }
}

impl Transform2D for Curve {
    fn transform(&self, matrix: &Matrix3<Real>) -> Self {
        Curve::new(self.points.iter().map(|p| matrix.transform_point(p)).collect())
    }

    fn reversed(&self) -> Self {
        let points = self.points.iter().rev().copied().collect();
        let angles = self
            .angles
            .as_ref()
            .map(|angles| angles.iter().rev().copied().collect());
        Curve { points, angles }
    }

    fn rotate(&self, angle: Real) -> Self {
        let rotation = Rotation2::new(angle);
        Curve {
            points: self.points.iter().map(|p| rotation * p).collect(),
            angles: self
                .angles
                .as_ref()
                .map(|angles| angles.iter().map(|a| a + angle).collect()),
        }
    }

    fn scale(&self, factor: Real) -> Self {
        let points = self.points.iter().map(|p| Point2::from(p.coords * factor)).collect();
        let angles = if factor > 0.0 { self.angles.clone() } else { None };
        Curve { points, angles }
    }

    fn mirror_x(&self) -> Self {
        Curve {
            points: self.points.iter().rev().map(|p| Point2::new(p.x, -p.y)).collect(),
            angles: self
                .angles
                .as_ref()
                .map(|angles| angles.iter().rev().map(|a| -a).collect()),
        }
    }
}
