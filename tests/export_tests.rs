mod support;

use gearwright::io::{IoError, dxf};
use gearwright::{GearSpecification, ToothSize};

fn gear() -> gearwright::Gear {
    support::gear(&GearSpecification::new(20, ToothSize::DiametralPitch(12.0)))
}

#[test]
fn dxf_has_one_line_per_outline_segment() {
    let g = gear();
    let text = g.outline().to_dxf_ascii(25.4, "dp12");
    assert!(text.is_ok());
    let text = text.unwrap_or_default();

    assert_eq!(text.matches("\nLINE\n").count(), g.outline().len() - 1);
    assert!(text.starts_with("  0\nSECTION\n  2\nHEADER\n"));
    assert!(text.ends_with("  0\nEOF\n"));
    assert_eq!(
        text.matches(&format!("  8\n{}\n 62\n{}\n", dxf::LINE_LAYER, dxf::LINE_COLOR)).count(),
        g.outline().len() - 1
    );
}

#[test]
fn dxf_of_nothing_fails() {
    assert!(matches!(dxf::to_dxf_ascii(&[], 1.0, "none"), Err(IoError::EmptyOutline)));
}

#[cfg(feature = "dxf-io")]
#[test]
fn dxf_crate_writer_matches_segment_count() {
    let g = gear();
    let drawing = dxf::to_dxf_drawing(g.outline().points(), 1.0);
    assert_eq!(drawing.entities().count(), g.outline().len() - 1);
    assert!(g.outline().to_dxf(1.0).is_ok());
}

#[cfg(feature = "svg-io")]
#[test]
fn svg_viewport_is_square_and_ten_percent_larger() {
    use gearwright::io::svg::svg_viewport;

    let g = gear();
    let scale = 100.0;
    let vp = svg_viewport(g.outline().points(), scale);
    let Some(vp) = vp else { panic!("outline has a viewport") };

    let (_, hi) = support::radial_extent(g.outline().points());
    // the outline reaches the outer circle in every direction, nearly
    assert!(support::approx_eq(vp.width, vp.height, 0.05 * vp.width));
    assert!(vp.width <= 1.1 * 2.0 * hi * scale + 1e-9);
    assert!(vp.width > 2.0 * hi * scale);

    for p in g.outline().points() {
        let (x, y) = vp.map(p);
        assert!(x >= 0.0 && x <= vp.width && y >= 0.0 && y <= vp.height);
    }
}

#[cfg(feature = "svg-io")]
#[test]
fn svg_document_holds_the_outline() {
    let g = gear();
    let svg = g.to_svg(100.0, false);
    assert!(svg.is_ok());
    let svg = svg.unwrap_or_default();
    assert!(svg.contains("viewBox=\"0 0 "));
    assert!(svg.contains("fill:none;stroke:black;stroke-width:1"));
    assert_eq!(svg.matches("<polyline").count(), 1);

    let with_circles = g.to_svg(100.0, true).unwrap_or_default();
    assert_eq!(with_circles.matches("<polyline").count(), 1 + 4);
}
