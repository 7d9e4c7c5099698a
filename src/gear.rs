//! Full gear outlines: replicating a tooth around the center.

use crate::errors::GearError;
use crate::float_types::{Real, TAU};
use crate::log::{debug, info};
use crate::spec::{DerivedDiameters, GearSpecification};
use crate::tooth::{ProfileWarning, ToothProfile};
use crate::traits::Transform2D;
use geo::{LineString, Polygon as GeoPolygon};
use nalgebra::{Matrix3, Point2, Point3, Rotation2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Closed outer boundary of a gear: `teeth` rotated copies of a tooth followed
/// by a copy of the first point.
///
/// Adjacent teeth are not welded; see [`GearOutline::welded`].
#[derive(Debug, Clone, PartialEq)]
pub struct GearOutline {
    points: Vec<Point2<Real>>,
    teeth: usize,
}

impl GearOutline {
    /// Rotate `tooth` by `i·360°/teeth` for each `i` in `0..teeth`, append
    /// every copy in order and close the loop with the first point.
    pub fn assemble(tooth: &ToothProfile, teeth: usize) -> Self {
        let mut points = Vec::<Point2<Real>>::with_capacity(tooth.len() * teeth + 1);
        for tooth_idx in 0..teeth {
            let rotation = Rotation2::new((tooth_idx as Real) * TAU / (teeth as Real));
            points.extend(tooth.points().iter().map(|p| rotation * p));
        }
        // Close path
        if let Some(&first) = points.first() {
            points.push(first);
        }

        debug!(teeth, points = points.len(), "assembled gear outline");
        GearOutline { points, teeth }
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

    pub const fn teeth(&self) -> usize {
        self.teeth
    }

    /// Is the last point the first point again?
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// The outline with runs of consecutive points closer than `tolerance`
    /// collapsed to their first point. The closing point is kept.
    pub fn welded(&self, tolerance: Real) -> Vec<Point2<Real>> {
        let mut out: Vec<Point2<Real>> = Vec::with_capacity(self.points.len());
        for (i, p) in self.points.iter().enumerate() {
            let is_closing = i + 1 == self.points.len() && i > 0;
            let duplicate = out.last().is_some_and(|last| (p - last).norm() < tolerance);
            if is_closing || !duplicate {
                out.push(*p);
            }
        }
        out
    }

    /// Distance from the center to the nearest part of the outline.
    ///
    /// Each tooth gap is bridged by a straight chord between the root points
    /// of adjacent teeth, so this is somewhat less than the root radius.
    /// Returns 0 for an empty outline.
    pub fn inner_radius(&self) -> Real {
        let nearest = self
            .points
            .windows(2)
            .map(|pair| distance_to_segment(&pair[0], &pair[1]))
            .fold(Real::MAX, Real::min);
        match self.points.as_slice() {
            [] => 0.0,
            [only] => only.coords.norm(),
            _ => nearest,
        }
    }

    /// Lift the outline into the z = 0 plane.
    pub fn to_points3(&self) -> Vec<Point3<Real>> {
        self.points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect()
    }

    /// A `geo` polygon of the gear face. A positive `bore_radius` becomes an
    /// interior ring approximated by `bore_segments` straight segments.
    ///
    /// The ring is not checked against the outline: a bore at or above
    /// [`GearOutline::inner_radius`] yields an invalid polygon. [`Gear::generate`]
    /// rejects such bores.
    pub fn to_polygon(&self, bore_radius: Real, bore_segments: usize) -> GeoPolygon<Real> {
        let exterior: LineString<Real> = self
            .welded(crate::float_types::tolerance())
            .iter()
            .map(|p| (p.x, p.y))
            .collect::<Vec<_>>()
            .into();

        let mut interiors = Vec::new();
        if bore_radius > 0.0 {
            let segments = bore_segments.max(3);
            // clockwise, as holes conventionally are
            let hole: Vec<(Real, Real)> = (0..=segments)
                .map(|i| {
                    let theta = -TAU * (i as Real) / (segments as Real);
                    (bore_radius * theta.cos(), bore_radius * theta.sin())
                })
                .collect();
            interiors.push(LineString::from(hole));
        }

        GeoPolygon::new(exterior, interiors)
    }
}

/// Distance from the origin to the segment `a`..`b`.
fn distance_to_segment(a: &Point2<Real>, b: &Point2<Real>) -> Real {
    let d = b - a;
    let len2 = d.norm_squared();
    if len2 == 0.0 {
        return a.coords.norm();
    }
    let t = (-a.coords.dot(&d) / len2).clamp(0.0, 1.0);
    (a.coords + d * t).norm()
}

impl Transform2D for GearOutline {
    fn transform(&self, matrix: &Matrix3<Real>) -> Self {
        GearOutline {
            points: self.points.iter().map(|p| matrix.transform_point(p)).collect(),
            teeth: self.teeth,
        }
    }

    fn reversed(&self) -> Self {
        GearOutline {
            points: self.points.iter().rev().copied().collect(),
            teeth: self.teeth,
        }
    }
}

/// Everything produced for one specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Gear {
    spec: GearSpecification,
    diameters: DerivedDiameters,
    tooth: ToothProfile,
    outline: GearOutline,
}

impl Gear {
    /// Validate `spec`, build its tooth and assemble the outline.
    ///
    /// A bore must also stay clear of the chords between teeth, see
    /// [`GearOutline::inner_radius`].
    pub fn generate(spec: &GearSpecification) -> Result<Gear, GearError> {
        let diameters = spec.validate()?;
        let tooth = ToothProfile::from_diameters(&diameters, spec.samples())?;
        let outline = GearOutline::assemble(&tooth, spec.teeth());

        let clearance = outline.inner_radius();
        if spec.bore_radius() > 0.0 && spec.bore_radius() >= clearance {
            return Err(GearError::BoreCutsOutline {
                bore_radius: spec.bore_radius(),
                clearance,
            });
        }

        info!(
            teeth = spec.teeth(),
            pitch_diameter = diameters.pitch,
            outer_diameter = diameters.outer,
            points = outline.len(),
            "generated gear"
        );

        Ok(Gear {
            spec: *spec,
            diameters,
            tooth,
            outline,
        })
    }

    pub const fn spec(&self) -> &GearSpecification {
        &self.spec
    }

    pub const fn diameters(&self) -> &DerivedDiameters {
        &self.diameters
    }

    pub const fn tooth(&self) -> &ToothProfile {
        &self.tooth
    }

    pub const fn outline(&self) -> &GearOutline {
        &self.outline
    }

    pub fn into_outline(self) -> GearOutline {
        self.outline
    }

    pub fn warnings(&self) -> &[ProfileWarning] {
        self.tooth.warnings()
    }

    /// Gear face with the specification's bore as a hole.
    pub fn to_polygon(&self, bore_segments: usize) -> GeoPolygon<Real> {
        self.outline.to_polygon(self.spec.bore_radius(), bore_segments)
    }
}

/// Generate one gear per specification, in order.
///
/// Gears are independent, so with the `parallel` feature they are built on
/// the rayon thread pool.
pub fn generate_batch(specs: &[GearSpecification]) -> Vec<Result<Gear, GearError>> {
    #[cfg(feature = "parallel")]
    {
        specs.par_iter().map(Gear::generate).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        specs.iter().map(Gear::generate).collect()
    }
}

/// A gear living in a host document: the last valid specification and the
/// geometry generated from it.
///
/// The host calls [`GearFeature::set_spec`] or
/// [`GearFeature::on_property_changed`] when the user edits a parameter; the
/// gear is regenerated immediately. A rejected edit leaves the previous
/// specification and geometry in place.
#[derive(Debug, Clone, PartialEq)]
pub struct GearFeature {
    gear: Gear,
}

impl GearFeature {
    pub fn new(spec: GearSpecification) -> Result<Self, GearError> {
        Ok(GearFeature {
            gear: Gear::generate(&spec)?,
        })
    }

    pub const fn spec(&self) -> &GearSpecification {
        self.gear.spec()
    }

    pub const fn gear(&self) -> &Gear {
        &self.gear
    }

    /// Replace the specification and regenerate.
    pub fn set_spec(&mut self, spec: GearSpecification) -> Result<&Gear, GearError> {
        if spec != self.gear.spec {
            self.gear = Gear::generate(&spec)?;
        }
        Ok(&self.gear)
    }

    /// Apply an edit to the current specification and regenerate.
    pub fn on_property_changed<F>(&mut self, edit: F) -> Result<&Gear, GearError>
    where
        F: FnOnce(GearSpecification) -> GearSpecification,
    {
        let spec = edit(self.gear.spec);
        self.set_spec(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::PI;
    use crate::spec::ToothSize;
    use geo::Area;

    fn spec() -> GearSpecification {
        GearSpecification::new(20, ToothSize::DiametralPitch(12.0))
    }

    fn gear(spec: &GearSpecification) -> Gear {
        match Gear::generate(spec) {
            Ok(gear) => gear,
            Err(err) => panic!("gear should generate: {err}"),
        }
    }

    #[test]
    fn outline_has_n_teeth_plus_closing_point() {
        let g = gear(&spec());
        assert_eq!(g.outline().len(), 20 * g.tooth().len() + 1);
        assert!(g.outline().is_closed());
        assert_eq!(g.outline().teeth(), 20);
    }

    #[test]
    fn assemble_rotates_copies() {
        let g = gear(&spec());
        let n = g.tooth().len();
        let step = Rotation2::new(TAU / 20.0);
        let first = g.outline().points()[0];
        let second = g.outline().points()[n];
        assert!((step * first - second).norm() < 1e-12);
    }

    #[test]
    fn into_outline_keeps_the_assembled_points() {
        let g = gear(&spec());
        let expected = g.outline().clone();
        let outline = g.into_outline();
        assert_eq!(outline, expected);
        assert_eq!(outline.into_points().len(), expected.len());
    }

    #[test]
    fn assemble_nothing_is_empty() {
        let tooth = gear(&spec()).tooth().clone();
        let outline = GearOutline::assemble(&tooth, 0);
        assert!(outline.is_empty());
        assert!(!outline.is_closed());
    }

    #[test]
    fn welding_keeps_the_closing_point() {
        let g = gear(&GearSpecification::new(60, ToothSize::Module(1.0)));
        // root above base: both flanks of every tooth double their base point
        let welded = g.outline().welded(1e-9);
        assert_eq!(welded.len(), g.outline().len() - 2 * 60);
        assert_eq!(welded.first(), welded.last());
    }

    #[test]
    fn bore_is_a_hole() {
        let g = gear(&spec().with_bore_radius(0.25));
        let solid = g.outline().to_polygon(0.0, 32);
        let bored = g.to_polygon(32);
        assert_eq!(bored.interiors().len(), 1);
        assert!(solid.interiors().is_empty());
        assert!(bored.unsigned_area() < solid.unsigned_area());

        let d = g.diameters();
        let area = solid.unsigned_area();
        let inner = PI * d.root_radius().powi(2);
        let outer = PI * d.outer_radius().powi(2);
        assert!(inner < area && area < outer);
    }

    #[test]
    fn inner_radius_is_the_chord_between_teeth() {
        let g = gear(&spec());
        let n = g.tooth().len();
        let pts = g.outline().points();
        // last point of the first tooth to first point of the second
        let chord_mid = Point2::from((pts[n - 1].coords + pts[n].coords) / 2.0);

        let inner = g.outline().inner_radius();
        assert!((inner - chord_mid.coords.norm()).abs() < 1e-12);
        assert!(inner < g.diameters().root_radius());
    }

    #[test]
    fn bore_reaching_the_chords_is_rejected() {
        let root = DerivedDiameters::from_spec(&spec()).root_radius();
        let err = Gear::generate(&spec().with_bore_radius(root));
        assert!(matches!(err, Err(GearError::BoreCutsOutline { .. })));
        assert_eq!(err.err().and_then(|e| e.field()), Some(crate::errors::SpecField::BoreRadius));

        let inner = gear(&spec()).outline().inner_radius();
        let g = gear(&spec().with_bore_radius(0.99 * inner));
        let polygon = g.to_polygon(64);
        for ring in polygon.interiors() {
            assert!(ring.points().all(|p| p.x().hypot(p.y()) < inner));
        }
    }

    #[test]
    fn scaling_scales_the_outline() {
        let g = gear(&spec());
        let scaled = g.outline().scale(2.0);
        let r = g.outline().points()[0].coords.norm();
        assert!((scaled.points()[0].coords.norm() - 2.0 * r).abs() < 1e-12);
        assert_eq!(g.outline().to_points3()[0].z, 0.0);
    }

    #[test]
    fn batch_keeps_order_and_errors() {
        let specs = [spec(), spec().with_teeth(4), spec().with_teeth(30)];
        let results = generate_batch(&specs);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().map(|g| g.outline().teeth()), Ok(30));
    }

    #[test]
    fn feature_regenerates_on_change() {
        let feature = GearFeature::new(spec());
        assert!(feature.is_ok());
        let Ok(mut feature) = feature else { return };

        let teeth = feature
            .on_property_changed(|s| s.with_teeth(24))
            .map(|g| g.outline().teeth());
        assert_eq!(teeth, Ok(24));

        let rejected = feature.on_property_changed(|s| s.with_teeth(2));
        assert!(rejected.is_err());
        assert_eq!(feature.spec().teeth(), 24);
        assert_eq!(feature.gear().outline().teeth(), 24);
    }
}
