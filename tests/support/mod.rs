//! Test support library
//! Provides various helper functions & utilities for tests.

#![allow(dead_code)]

use gearwright::float_types::Real;
use gearwright::{Gear, GearSpecification};
use nalgebra::Point2;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Smallest and largest distance from the origin over `points`.
pub fn radial_extent(points: &[Point2<Real>]) -> (Real, Real) {
    points
        .iter()
        .map(|p| p.coords.norm())
        .fold((Real::MAX, Real::MIN), |(lo, hi), r| (lo.min(r), hi.max(r)))
}

/// Generate a gear the test expects to be valid.
pub fn gear(spec: &GearSpecification) -> Gear {
    match Gear::generate(spec) {
        Ok(gear) => gear,
        Err(err) => panic!("{spec:?} should generate: {err}"),
    }
}
