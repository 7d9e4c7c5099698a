//! Writes a small family of gears to `out/`: a 20 tooth, 12 diametral pitch
//! gear with its reference circles, a module 2 gear with a bore, and a batch
//! of module 1 gears with increasing tooth counts.

use gearwright::{Gear, GearSpecification, ToothSize, generate_batch};
use std::fs;

fn main() {
    let _ = fs::create_dir_all("out");

    let spec = GearSpecification::new(20, ToothSize::DiametralPitch(12.0));
    if let Ok(gear) = Gear::generate(&spec) {
        println!("{}", gear.diameters());
        if let Ok(svg) = gear.to_svg(100.0, true) {
            let _ = fs::write("out/dp12_n20.svg", svg);
        }
    }

    let spec = GearSpecification::new(32, ToothSize::Module(2.0))
        .with_pressure_angle(25.0)
        .with_bore_radius(8.0);
    if let Ok(dxf) = Gear::generate(&spec).map(|g| g.outline().to_dxf_ascii(1.0, "m2_n32")) {
        match dxf {
            Ok(dxf) => {
                let _ = fs::write("out/m2_n32.dxf", dxf);
            },
            Err(err) => eprintln!("m2_n32: {err}"),
        }
    }

    let specs: Vec<_> = [12, 18, 24, 36, 48, 60]
        .into_iter()
        .map(|teeth| GearSpecification::new(teeth, ToothSize::Module(1.0)))
        .collect();
    for (spec, gear) in specs.iter().zip(generate_batch(&specs)) {
        match gear {
            Ok(gear) => {
                if let Ok(svg) = gear.outline().to_svg(10.0) {
                    let _ = fs::write(format!("out/m1_n{}.svg", spec.teeth()), svg);
                }
            },
            Err(err) => eprintln!("{} teeth: {err}", spec.teeth()),
        }
    }
}
