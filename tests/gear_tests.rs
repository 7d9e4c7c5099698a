mod support;

use gearwright::{
    CircleKind, Gear, GearError, GearFeature, GearSpecification, ProfileWarning, SpecField,
    ToothProfile, ToothSize, Transform2D,
    float_types::{PI, Real, TAU},
    involute::{self, involute_intersect_angle, locate_cross_angle},
};
use nalgebra::Point2;

fn dp12() -> GearSpecification {
    GearSpecification::new(20, ToothSize::DiametralPitch(12.0)).with_pressure_angle(20.0)
}

#[test]
fn reference_gear_diameters() {
    let d = dp12().validate();
    assert!(d.is_ok());
    let Ok(d) = d else { return };

    assert!(support::approx_eq(d.pitch, 20.0 / 12.0, 1e-6));
    assert!(support::approx_eq(d.outer, 22.0 / 12.0, 1e-6));
    assert!(support::approx_eq(d.root, 17.5 / 12.0, 1e-6));
    assert!(support::approx_eq(d.base, (20.0 / 12.0) * (20.0 as Real).to_radians().cos(), 1e-6));
    assert!(d.root < d.base && d.base < d.pitch && d.pitch < d.outer);
}

#[test]
fn module_gear_is_in_module_units() {
    let d = GearSpecification::new(30, ToothSize::Module(2.0)).validate();
    let Ok(d) = d else { panic!("module gear should validate") };
    assert!(support::approx_eq(d.pitch, 60.0, 1e-9));
    assert!(support::approx_eq(d.outer, 64.0, 1e-9));
    assert!(support::approx_eq(d.root, 55.0, 1e-9));
    assert!(support::approx_eq(d.module(), 2.0, 1e-12));
}

#[test]
fn involute_starts_on_base_and_stays_inside_cutoff() {
    let curve = involute::generate(1.0, 1.3, PI / 2.0, 50);
    assert_eq!(curve.first(), Some(&Point2::new(1.0, 0.0)));
    for r in curve.radii() {
        assert!(r <= 1.3 + 1e-9);
    }
    let last = curve.last().map(|p| p.coords.norm()).unwrap_or_default();
    assert!(support::approx_eq(last, 1.3, 1e-9));
}

#[test]
fn involute_degenerates_to_base_point() {
    let curve = involute::generate(2.0, 2.0, PI / 2.0, 50);
    assert_eq!(curve.points(), &[Point2::new(2.0, 0.0)]);
}

#[test]
fn pitch_crossing_matches_closed_form() {
    let d = dp12().validate();
    let Ok(d) = d else { panic!("reference gear should validate") };
    let curve = involute::generate(d.base_radius(), d.outer_radius(), PI / 2.0, 4000);
    let crossing = locate_cross_angle(d.pitch_radius(), &curve);
    let expected = involute_intersect_angle(d.base_radius(), d.pitch_radius());
    assert!(crossing.is_some());
    assert!(support::approx_eq(crossing.unwrap_or_default(), expected, 1e-6));
}

#[test]
fn outline_point_count_and_closure() {
    for (teeth, size) in [
        (20, ToothSize::DiametralPitch(12.0)),
        (6, ToothSize::Module(1.0)),
        (47, ToothSize::Module(0.5)),
    ] {
        let g = support::gear(&GearSpecification::new(teeth, size));
        let outline = g.outline().points();
        assert_eq!(outline.len(), teeth * g.tooth().len() + 1);
        assert_eq!(outline.first(), outline.last());
    }
}

#[test]
fn outline_stays_between_root_and_outer_circles() {
    let g = support::gear(&dp12());
    let d = g.diameters();
    let (lo, hi) = support::radial_extent(g.outline().points());
    assert!(lo >= d.root_radius() - 1e-9);
    assert!(hi <= d.outer_radius() + 1e-9);
    assert!(support::approx_eq(hi, d.outer_radius(), 1e-9));
}

#[test]
fn teeth_are_rotated_copies() {
    let g = support::gear(&dp12());
    let n = g.tooth().len();
    let pts = g.outline().points();
    for k in 1..20 {
        let copy = g.tooth().rotate(k as Real * TAU / 20.0);
        let copy_degrees = g.tooth().rotate_degrees(k as Real * 18.0);
        for (p, q) in copy.points().iter().zip(copy_degrees.points()) {
            assert!((p - q).norm() < 1e-12);
        }
        for (p, q) in copy.points().iter().zip(&pts[k * n..(k + 1) * n]) {
            assert!((p - q).norm() < 1e-9);
        }
    }
}

#[test]
fn tooth_thickness_shrinks_with_backlash() {
    let loose = support::gear(&dp12().with_backlash(0.5));
    let tight = support::gear(&dp12().with_backlash(0.0));
    assert!(loose.tooth().tooth_angle() < tight.tooth().tooth_angle());
    assert!(support::approx_eq(
        tight.tooth().tooth_angle(),
        TAU / 20.0 / 2.0,
        1e-12
    ));
}

#[test]
fn high_tooth_count_warns_but_builds() {
    let g = support::gear(&GearSpecification::new(80, ToothSize::Module(1.0)));
    assert!(matches!(g.warnings(), [ProfileWarning::RootAboveBase { .. }]));
    assert!(support::gear(&dp12()).warnings().is_empty());
}

#[test]
fn validation_errors_name_the_field() {
    let cases = [
        (dp12().with_teeth(5), SpecField::Teeth),
        (dp12().with_size(ToothSize::DiametralPitch(0.0)), SpecField::DiametralPitch),
        (dp12().with_size(ToothSize::Module(71.0)), SpecField::Module),
        (dp12().with_pressure_angle(90.0), SpecField::PressureAngle),
        (dp12().with_pressure_angle(0.0), SpecField::PressureAngle),
        (dp12().with_height(0.0), SpecField::Height),
        (dp12().with_bore_radius(-1.0), SpecField::BoreRadius),
        (dp12().with_backlash(-0.1), SpecField::Backlash),
        (dp12().with_samples(2), SpecField::Samples),
    ];
    for (spec, field) in cases {
        let err = Gear::generate(&spec).err();
        assert_eq!(err.as_ref().and_then(GearError::field), Some(field), "{spec:?}");
        assert!(matches!(err, Some(GearError::InvalidGearSpecification { .. })));
    }
}

#[test]
fn bore_must_fit_inside_root_circle() {
    let err = Gear::generate(&dp12().with_bore_radius(1.0));
    assert!(matches!(err, Err(GearError::BoreExceedsGear { .. })));
    assert!(Gear::generate(&dp12().with_bore_radius(0.25)).is_ok());
}

#[test]
fn configuration_file_round_trip() {
    let spec = GearSpecification::from_toml_str(
        r#"
        teeth = 24
        pressure_angle = 14.5
        bore_radius = 3.0

        [size]
        module = 1.5
        "#,
    );
    assert!(spec.is_ok());
    let Ok(spec) = spec else { return };
    assert_eq!(spec.teeth(), 24);
    assert_eq!(spec.size(), ToothSize::Module(1.5));
    assert_eq!(spec.samples(), 30);
    assert!(support::approx_eq(spec.backlash(), 0.05, 1e-12));

    let g = support::gear(&spec);
    assert_eq!(g.to_polygon(24).interiors().len(), 1);
}

#[test]
fn reference_circles_have_their_radii() {
    let g = support::gear(&dp12());
    for kind in CircleKind::ALL {
        let circle = g.diameters().reference_circle(kind, 64);
        let r = g.diameters().radius(kind);
        let (lo, hi) = support::radial_extent(circle.points());
        assert!(support::approx_eq(lo, r, 1e-9) && support::approx_eq(hi, r, 1e-9));
    }
}

#[test]
fn tooth_profile_builds_from_specification() {
    let tooth = ToothProfile::build(&dp12());
    let Ok(tooth) = tooth else { panic!("tooth should build") };
    assert_eq!(tooth.flank().len(), tooth.opposite_flank().len());
    // lead-in point, then involute samples up to the clamped tip
    assert!(tooth.flank().len() >= 3 && tooth.flank().len() <= 30 + 2);
    let radii: Vec<Real> = tooth.flank().iter().map(|p| p.coords.norm()).collect();
    assert!(radii.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn feature_keeps_last_valid_gear() {
    let feature = GearFeature::new(dp12());
    let Ok(mut feature) = feature else { panic!("feature should build") };
    let before = feature.gear().outline().clone();

    assert!(feature.on_property_changed(|s| s.with_pressure_angle(95.0)).is_err());
    assert_eq!(feature.gear().outline(), &before);

    let after = feature.set_spec(dp12().with_teeth(21)).map(|g| g.outline().len());
    assert!(after.is_ok());
    assert_ne!(after.unwrap_or_default(), before.len());
}
