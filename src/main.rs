//! gearwright: generate an involute spur gear outline and write it as SVG or DXF.

use clap::Parser;
use gearwright::float_types::Real;
use gearwright::io::IoError;
use gearwright::{Gear, GearSpecification, ProfileWarning, ToothSize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Involute spur gear profile generator
#[derive(Parser, Debug)]
#[command(name = "gearwright", version)]
#[command(about = "Generate the 2-D outline of an involute spur gear")]
struct Args {
    /// TOML file holding a gear specification; other flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of teeth
    #[arg(long, short = 'n')]
    teeth: Option<usize>,

    /// Diametral pitch, teeth per inch of pitch diameter
    #[arg(long, conflicts_with = "module")]
    pitch: Option<Real>,

    /// Module, millimetres of pitch diameter per tooth
    #[arg(long)]
    module: Option<Real>,

    /// Pressure angle in degrees
    #[arg(long)]
    pressure_angle: Option<Real>,

    /// Radius of the center bore
    #[arg(long)]
    bore: Option<Real>,

    /// Involute samples per flank
    #[arg(long)]
    samples: Option<usize>,

    /// Backlash factor in the tooth thickness divisor
    #[arg(long)]
    backlash: Option<Real>,

    /// Extrusion height, carried into the report only
    #[arg(long)]
    height: Option<Real>,

    /// Distance below which consecutive outline points are merged
    #[arg(long)]
    tolerance: Option<Real>,

    /// Uniform scale applied on export
    #[arg(long, default_value_t = 1.0)]
    scale: Real,

    /// Write the outline as SVG
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the outline as DXF
    #[arg(long)]
    dxf: Option<PathBuf>,

    /// Draw the outer, pitch, base and root circles into the SVG
    #[arg(long)]
    circles: bool,

    /// Print the dimension report
    #[arg(long, short = 'r')]
    report: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gearwright=info")),
        )
        .init();

    let args = Args::parse();
    if let Some(tolerance) = args.tolerance {
        gearwright::float_types::set_tolerance(tolerance);
    }

    let spec = match specification(&args) {
        Ok(spec) => spec,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        },
    };

    let gear = match Gear::generate(&spec) {
        Ok(gear) => gear,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        },
    };

    for warning in gear.warnings() {
        match warning {
            ProfileWarning::RootAboveBase {
                root_radius,
                base_radius,
            } => eprintln!(
                "warning: root radius {root_radius} is larger than base radius {base_radius}"
            ),
        }
    }

    if args.report || (args.svg.is_none() && args.dxf.is_none()) {
        println!("{}", gear.diameters());
        println!("Height:                   {}", spec.height());
        println!("Outline Points:           {}", gear.outline().len());
        println!(
            "Welded Points:            {}",
            gear.outline().welded(gearwright::float_types::tolerance()).len()
        );
    }

    if let Err(err) = export(&gear, &args) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Start from the configuration file if there is one, then apply the flags.
fn specification(args: &Args) -> Result<GearSpecification, String> {
    let size = match (args.pitch, args.module) {
        (Some(p), _) => Some(ToothSize::DiametralPitch(p)),
        (None, Some(m)) => Some(ToothSize::Module(m)),
        (None, None) => None,
    };

    let mut spec = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            GearSpecification::from_toml_str(&text)
                .map_err(|e| format!("{}: {}", path.display(), IoError::from(e)))?
        },
        None => {
            let teeth = args.teeth.ok_or("--teeth is required without --config")?;
            let size = size.ok_or("one of --pitch or --module is required without --config")?;
            GearSpecification::new(teeth, size)
        },
    };

    if let Some(teeth) = args.teeth {
        spec = spec.with_teeth(teeth);
    }
    if let Some(size) = size {
        spec = spec.with_size(size);
    }
    if let Some(angle) = args.pressure_angle {
        spec = spec.with_pressure_angle(angle);
    }
    if let Some(bore) = args.bore {
        spec = spec.with_bore_radius(bore);
    }
    if let Some(samples) = args.samples {
        spec = spec.with_samples(samples);
    }
    if let Some(backlash) = args.backlash {
        spec = spec.with_backlash(backlash);
    }
    if let Some(height) = args.height {
        spec = spec.with_height(height);
    }
    Ok(spec)
}

fn export(gear: &Gear, args: &Args) -> Result<(), IoError> {
    if let Some(path) = &args.svg {
        write_svg(gear, path, args.scale, args.circles)?;
        tracing::info!(path = %path.display(), "wrote SVG");
    }

    if let Some(path) = &args.dxf {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("gear");
        let text = gear.outline().to_dxf_ascii(args.scale, name)?;
        std::fs::write(path, text)?;
        tracing::info!(path = %path.display(), "wrote DXF");
    }

    Ok(())
}

#[cfg(feature = "svg-io")]
fn write_svg(gear: &Gear, path: &Path, scale: Real, circles: bool) -> Result<(), IoError> {
    let text = gear.to_svg(scale, circles)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(not(feature = "svg-io"))]
fn write_svg(_gear: &Gear, _path: &Path, _scale: Real, _circles: bool) -> Result<(), IoError> {
    Err(IoError::MalformedInput(
        "SVG export needs the svg-io feature".to_string(),
    ))
}
