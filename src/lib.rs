//! Two-dimensional profiles of **involute spur gears**.
//!
//! A [`GearSpecification`] (tooth count, module or diametral pitch, pressure
//! angle, ...) fixes the outer, pitch, base and root circles. One tooth is
//! built from an involute flank that is aligned on the pitch circle, mirrored
//! and rotated by the tooth thickness; copies of it around the center form the
//! closed [`GearOutline`], which can be written as SVG or DXF.
//!
//! ```
//! use gearwright::{Gear, GearSpecification, ToothSize};
//!
//! let spec = GearSpecification::new(20, ToothSize::Module(2.0)).with_pressure_angle(20.0);
//! let gear = Gear::generate(&spec).unwrap();
//! assert_eq!(gear.outline().len(), 20 * gear.tooth().len() + 1);
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **svg-io**: SVG export through the `svg` crate
//! - **dxf-io**: DXF export through the `dxf` crate (a plain-text writer is always available)
//! - **tracing**: debug and warning events through `tracing`
//! - **cli**: the `gearwright` command line tool
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for batch generation

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod curve;
pub mod errors;
pub mod float_types;
pub mod gear;
pub mod involute;
pub mod io;
pub mod log;
pub mod spec;
pub mod tooth;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use curve::Curve;
pub use errors::{GearError, SpecField};
pub use gear::{Gear, GearFeature, GearOutline, generate_batch};
pub use spec::{CircleKind, DerivedDiameters, GearSpecification, ToothSize};
pub use tooth::{ProfileWarning, ToothProfile};
pub use traits::Transform2D;
