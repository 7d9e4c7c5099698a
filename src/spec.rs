//! Gear specification, validation and the circle diameters derived from it.
//!
//! Dimensions follow the diametral-pitch convention: with `P` teeth per unit of
//! pitch diameter and `N` teeth,
//!
//! ```text
//! pitch diameter  Dp = N / P
//! outer diameter  Do = Dp + 2/P         (addendum 1/P)
//! root diameter   Dr = (N − 2.5) / P    (dedendum 1.25/P)
//! base diameter   Db = Dp · cos(α)
//! ```
//!
//! A module `m` is the reciprocal of the diametral pitch, so specifying a
//! module yields geometry in the module's length unit.

use crate::curve::Curve;
use crate::errors::{GearError, SpecField};
use crate::float_types::{INCH, PI, Real, TAU};
use crate::log::warn;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How big the teeth are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothSize {
    /// Teeth per unit of pitch diameter.
    DiametralPitch(Real),
    /// Pitch diameter per tooth.
    Module(Real),
}

impl ToothSize {
    pub const DIAMETRAL_PITCH_RANGE: (Real, Real) = (0.01, 1000.0);
    /// DIN 780 series, first and last entries.
    pub const MODULE_RANGE: (Real, Real) = (0.1, 70.0);

    /// The diametral pitch used by all diameter relations.
    pub fn diametral_pitch(&self) -> Real {
        match *self {
            ToothSize::DiametralPitch(p) => p,
            ToothSize::Module(m) => 1.0 / m,
        }
    }

    fn validate(&self) -> Result<(), GearError> {
        let (field, value, (lo, hi)) = match *self {
            ToothSize::DiametralPitch(p) => {
                (SpecField::DiametralPitch, p, Self::DIAMETRAL_PITCH_RANGE)
            },
            ToothSize::Module(m) => (SpecField::Module, m, Self::MODULE_RANGE),
        };
        if !(value.is_finite() && lo <= value && value <= hi) {
            let constraint = match field {
                SpecField::Module => "must be between 0.1 and 70",
                _ => "must be between 0.01 and 1000",
            };
            return Err(GearError::invalid(field, constraint, value));
        }
        Ok(())
    }
}

/// Immutable description of one spur gear.
///
/// Construct with [`GearSpecification::new`] and adjust with the `with_*`
/// methods; nothing is checked until [`GearSpecification::validate`] (or
/// anything that builds geometry) runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GearSpecification {
    teeth: usize,
    size: ToothSize,
    #[serde(default = "defaults::pressure_angle")]
    pressure_angle: Real,
    #[serde(default)]
    bore_radius: Real,
    #[serde(default = "defaults::samples")]
    samples: usize,
    #[serde(default = "defaults::backlash")]
    backlash: Real,
    #[serde(default = "defaults::height")]
    height: Real,
}

mod defaults {
    use crate::float_types::Real;

    pub const fn pressure_angle() -> Real {
        20.0
    }
    pub const fn samples() -> usize {
        30
    }
    pub const fn backlash() -> Real {
        0.05
    }
    pub const fn height() -> Real {
        1.0
    }
}

impl GearSpecification {
    pub const MIN_TEETH: usize = 6;
    pub const MIN_SAMPLES: usize = 3;
    /// Pressure angles outside this band still work but are unusual.
    pub const USUAL_PRESSURE_ANGLES: (Real, Real) = (14.5, 30.0);

    /// A specification with the default pressure angle (20°), no bore,
    /// 30 samples per flank, backlash 0.05 and unit height.
    pub const fn new(teeth: usize, size: ToothSize) -> Self {
        GearSpecification {
            teeth,
            size,
            pressure_angle: defaults::pressure_angle(),
            bore_radius: 0.0,
            samples: defaults::samples(),
            backlash: defaults::backlash(),
            height: defaults::height(),
        }
    }

    /// Parse a TOML document such as
    ///
    /// ```toml
    /// teeth = 20
    /// size = { diametral_pitch = 12.0 }
    /// pressure_angle = 20.0
    /// ```
    ///
    /// Omitted optional fields take their defaults. The result is not validated.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub const fn with_pressure_angle(mut self, degrees: Real) -> Self {
        self.pressure_angle = degrees;
        self
    }

    pub const fn with_bore_radius(mut self, radius: Real) -> Self {
        self.bore_radius = radius;
        self
    }

    pub const fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub const fn with_backlash(mut self, backlash: Real) -> Self {
        self.backlash = backlash;
        self
    }

    pub const fn with_height(mut self, height: Real) -> Self {
        self.height = height;
        self
    }

    pub const fn with_size(mut self, size: ToothSize) -> Self {
        self.size = size;
        self
    }

    pub const fn with_teeth(mut self, teeth: usize) -> Self {
        self.teeth = teeth;
        self
    }

    pub const fn teeth(&self) -> usize {
        self.teeth
    }

    pub const fn size(&self) -> ToothSize {
        self.size
    }

    /// Pressure angle in degrees.
    pub const fn pressure_angle(&self) -> Real {
        self.pressure_angle
    }

    pub const fn bore_radius(&self) -> Real {
        self.bore_radius
    }

    /// Involute sample count per flank.
    pub const fn samples(&self) -> usize {
        self.samples
    }

    pub const fn backlash(&self) -> Real {
        self.backlash
    }

    /// Extrusion height handed to solid-modelling consumers.
    pub const fn height(&self) -> Real {
        self.height
    }

    /// Check every field, then derive the circle diameters and check the bore
    /// against the root circle.
    pub fn validate(&self) -> Result<DerivedDiameters, GearError> {
        if self.teeth < Self::MIN_TEETH {
            return Err(GearError::invalid(
                SpecField::Teeth,
                "must be greater than 5",
                self.teeth as Real,
            ));
        }
        self.size.validate()?;
        if !(self.pressure_angle > 0.0 && self.pressure_angle < 90.0) {
            return Err(GearError::invalid(
                SpecField::PressureAngle,
                "must be strictly between 0 and 90 degrees",
                self.pressure_angle,
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(GearError::invalid(
                SpecField::Height,
                "must be positive",
                self.height,
            ));
        }
        if !(self.bore_radius.is_finite() && self.bore_radius >= 0.0) {
            return Err(GearError::invalid(
                SpecField::BoreRadius,
                "must not be negative",
                self.bore_radius,
            ));
        }
        if !(self.backlash.is_finite() && self.backlash >= 0.0) {
            return Err(GearError::invalid(
                SpecField::Backlash,
                "must not be negative",
                self.backlash,
            ));
        }
        if self.samples < Self::MIN_SAMPLES {
            return Err(GearError::invalid(
                SpecField::Samples,
                "must be at least 3",
                self.samples as Real,
            ));
        }

        let (lo, hi) = Self::USUAL_PRESSURE_ANGLES;
        if self.pressure_angle < lo || self.pressure_angle > hi {
            warn!(
                pressure_angle = self.pressure_angle,
                "pressure angle is outside the usual 14.5..30 degree range"
            );
        }

        let diameters = DerivedDiameters::from_spec(self);
        let root_radius = diameters.root_radius();
        if self.bore_radius > root_radius {
            return Err(GearError::BoreExceedsGear {
                bore_radius: self.bore_radius,
                root_radius,
            });
        }

        Ok(diameters)
    }
}

/// One of the four reference circles of a gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircleKind {
    Outer,
    Pitch,
    Base,
    Root,
}

impl CircleKind {
    pub const ALL: [CircleKind; 4] = [
        CircleKind::Outer,
        CircleKind::Pitch,
        CircleKind::Base,
        CircleKind::Root,
    ];
}

/// The circle diameters fixed by a specification, plus the tooth proportions
/// derived alongside them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedDiameters {
    pub outer: Real,
    pub pitch: Real,
    pub base: Real,
    pub root: Real,
    size: ToothSize,
    diametral_pitch: Real,
    teeth: usize,
    pressure_angle: Real,
    backlash: Real,
}

impl DerivedDiameters {
    /// Pure function of the specification; does not validate it.
    pub fn from_spec(spec: &GearSpecification) -> Self {
        let p = spec.size.diametral_pitch();
        let teeth = spec.teeth as Real;
        let pitch = teeth / p;

        DerivedDiameters {
            outer: pitch + 2.0 / p,
            pitch,
            base: pitch * spec.pressure_angle.to_radians().cos(),
            root: (teeth - 2.5) / p,
            size: spec.size,
            diametral_pitch: p,
            teeth: spec.teeth,
            pressure_angle: spec.pressure_angle,
            backlash: spec.backlash,
        }
    }

    pub fn outer_radius(&self) -> Real {
        self.outer / 2.0
    }

    pub fn pitch_radius(&self) -> Real {
        self.pitch / 2.0
    }

    pub fn base_radius(&self) -> Real {
        self.base / 2.0
    }

    pub fn root_radius(&self) -> Real {
        self.root / 2.0
    }

    pub const fn size(&self) -> ToothSize {
        self.size
    }

    /// Length unit of every diameter: millimetres for a module, inches for a
    /// diametral pitch.
    pub const fn unit(&self) -> &'static str {
        match self.size {
            ToothSize::Module(_) => "mm",
            ToothSize::DiametralPitch(_) => "in",
        }
    }

    pub const fn diametral_pitch(&self) -> Real {
        self.diametral_pitch
    }

    /// Pitch diameter per tooth, in the drawing's unit.
    pub fn module(&self) -> Real {
        1.0 / self.diametral_pitch
    }

    /// The module in millimetres whichever way the size was given.
    pub fn module_mm(&self) -> Real {
        match self.size {
            ToothSize::Module(m) => m,
            ToothSize::DiametralPitch(p) => INCH / p,
        }
    }

    /// The diametral pitch in teeth per inch whichever way the size was given.
    pub fn diametral_pitch_per_inch(&self) -> Real {
        match self.size {
            ToothSize::Module(m) => INCH / m,
            ToothSize::DiametralPitch(p) => p,
        }
    }

    pub fn addendum(&self) -> Real {
        1.0 / self.diametral_pitch
    }

    pub fn dedendum(&self) -> Real {
        1.25 / self.diametral_pitch
    }

    pub fn whole_depth(&self) -> Real {
        self.addendum() + self.dedendum()
    }

    /// Arc length between corresponding points of adjacent teeth on the pitch circle.
    pub fn circular_pitch(&self) -> Real {
        PI / self.diametral_pitch
    }

    /// Tooth thickness along the pitch circle, reduced by the backlash allowance.
    pub fn circular_tooth_thickness(&self) -> Real {
        self.circular_pitch() / (2.0 + self.backlash)
    }

    /// [`circular_tooth_thickness`](Self::circular_tooth_thickness) as an angle about the center.
    pub fn circular_tooth_angle(&self) -> Real {
        self.circular_tooth_thickness() * 2.0 / self.pitch
    }

    /// Angle between corresponding points of adjacent teeth.
    pub fn tooth_pitch_angle(&self) -> Real {
        TAU / self.teeth as Real
    }

    /// True when the root circle lies outside the base circle, so the radial
    /// lead-in of each flank starts below the root circle.
    pub fn root_above_base(&self) -> bool {
        self.root > self.base
    }

    pub fn radius(&self, kind: CircleKind) -> Real {
        match kind {
            CircleKind::Outer => self.outer_radius(),
            CircleKind::Pitch => self.pitch_radius(),
            CircleKind::Base => self.base_radius(),
            CircleKind::Root => self.root_radius(),
        }
    }

    /// A closed polyline approximating one reference circle, first point repeated at the end.
    pub fn reference_circle(&self, kind: CircleKind, segments: usize) -> Curve {
        let segments = segments.max(3);
        let radius = self.radius(kind);
        let mut points: Vec<Point2<Real>> = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                Point2::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        points.push(points[0]);
        Curve::new(points)
    }
}

impl Display for DerivedDiameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number Teeth:             {}", self.teeth)?;
        writeln!(f, "Unit:                     {}", self.unit())?;
        writeln!(f, "Module (mm):              {}", self.module_mm())?;
        writeln!(f, "Diametral Pitch (1/in):   {}", self.diametral_pitch_per_inch())?;
        writeln!(f, "Pressure Angle:           {}", self.pressure_angle)?;
        writeln!(f, "Circular Pitch:           {}", self.circular_pitch())?;
        writeln!(f, "Circular Tooth Thickness: {}", self.circular_tooth_thickness())?;
        writeln!(f, "Whole Depth:              {}", self.whole_depth())?;
        writeln!(f, "Addendum:                 {}", self.addendum())?;
        writeln!(f, "Dedendum:                 {}", self.dedendum())?;
        writeln!(f, "Outer Diameter:           {}", self.outer)?;
        writeln!(f, "Pitch Diameter:           {}", self.pitch)?;
        writeln!(f, "Base Diameter:            {}", self.base)?;
        writeln!(f, "Root Diameter:            {}", self.root)?;
        writeln!(f, "Outer Radius:             {}", self.outer_radius())?;
        writeln!(f, "Pitch Radius:             {}", self.pitch_radius())?;
        writeln!(f, "Base Radius:              {}", self.base_radius())?;
        write!(f, "Root Radius:              {}", self.root_radius())
    }
}
