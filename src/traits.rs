use crate::float_types::Real;
use nalgebra::{Matrix3, Rotation2, Translation2, Vector2};

/// Rigid and uniform transformations of planar point sequences.
///
/// Every operation returns a new value; nothing is mutated in place.
pub trait Transform2D: Sized + Clone {
    /// Apply a homogeneous 3x3 matrix to every point.
    fn transform(&self, matrix: &Matrix3<Real>) -> Self;

    /// Same points, opposite traversal order.
    fn reversed(&self) -> Self;

    /// Returns a new Self rotated about the origin by `angle` radians (counter-clockwise).
    fn rotate(&self, angle: Real) -> Self {
        self.transform(&Rotation2::new(angle).to_homogeneous())
    }

    /// Returns a new Self rotated about the origin by `degrees`.
    fn rotate_degrees(&self, degrees: Real) -> Self {
        self.rotate(degrees.to_radians())
    }

    /// Returns a new Self translated by x and y.
    fn translate(&self, x: Real, y: Real) -> Self {
        self.transform(&Translation2::new(x, y).to_homogeneous())
    }

    /// Uniform scaling about the origin.
    fn scale(&self, factor: Real) -> Self {
        self.transform(&Matrix3::new_scaling(factor))
    }

    /// Reflect about the x-axis and reverse the point order, so the mirrored
    /// copy is traversed in the same rotational sense as the original.
    fn mirror_x(&self) -> Self {
        let reflection = Matrix3::new_nonuniform_scaling(&Vector2::new(1.0, -1.0));
        self.transform(&reflection).reversed()
    }
}
