//! Validation errors

use crate::float_types::Real;
use std::fmt::Display;

/// The user-editable field of a [`GearSpecification`](crate::spec::GearSpecification)
/// that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecField {
    Teeth,
    DiametralPitch,
    Module,
    PressureAngle,
    Height,
    BoreRadius,
    Backlash,
    Samples,
}

impl Display for SpecField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SpecField::Teeth => "teeth",
            SpecField::DiametralPitch => "diametral pitch",
            SpecField::Module => "module",
            SpecField::PressureAngle => "pressure angle",
            SpecField::Height => "height",
            SpecField::BoreRadius => "bore radius",
            SpecField::Backlash => "backlash",
            SpecField::Samples => "samples",
        };
        f.write_str(name)
    }
}

/// Everything that can go wrong while turning a specification into geometry.
///
/// Only the specification can be wrong: once it validates, curve generation,
/// alignment and assembly are total.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GearError {
    /// A single field is outside the range the tooth construction supports
    #[error("invalid gear specification: {field} {constraint} (got {value})")]
    InvalidGearSpecification {
        field: SpecField,
        constraint: &'static str,
        value: Real,
    },
    /// The center bore would cut into the root circle
    #[error("bore radius {bore_radius} exceeds the root radius {root_radius}")]
    BoreExceedsGear { bore_radius: Real, root_radius: Real },
    /// The bore reaches the straight segments joining adjacent teeth, which
    /// dip below the root circle
    #[error("bore radius {bore_radius} reaches the outline between teeth (clearance {clearance})")]
    BoreCutsOutline { bore_radius: Real, clearance: Real },
    /// The sampled involute never reaches the pitch circle
    #[error("involute does not cross the pitch circle (radius {pitch_radius})")]
    PitchCircleNotCrossed { pitch_radius: Real },
}

impl GearError {
    pub(crate) const fn invalid(field: SpecField, constraint: &'static str, value: Real) -> Self {
        GearError::InvalidGearSpecification {
            field,
            constraint,
            value,
        }
    }

    /// The offending field, if this is a field-level validation failure.
    pub const fn field(&self) -> Option<SpecField> {
        match self {
            GearError::InvalidGearSpecification { field, .. } => Some(*field),
            GearError::BoreExceedsGear { .. } | GearError::BoreCutsOutline { .. } => {
                Some(SpecField::BoreRadius)
            },
            GearError::PitchCircleNotCrossed { .. } => None,
        }
    }
}
