use super::IoError;
use crate::float_types::Real;
use crate::gear::{Gear, GearOutline};
use crate::spec::CircleKind;
use geo::{BoundingRect, LineString};
use nalgebra::Point2;
use svg::Document;
use svg::node::element::Polyline;

const OUTLINE_STYLE: &str = "fill:none;stroke:black;stroke-width:1";
const REFERENCE_STYLE: &str = "fill:none;stroke:grey;stroke-width:0.5;stroke-dasharray:2,2";

/// Visible region of an exported drawing, in output units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgViewport {
    /// Scaled x of the region's lower corner in the outline's frame.
    pub x: Real,
    /// Scaled y of the region's lower corner in the outline's frame.
    pub y: Real,
    pub width: Real,
    pub height: Real,
    scale: Real,
}

impl SvgViewport {
    /// Map a point of the outline's frame into the viewport, where the lower
    /// corner is at (0, 0).
    pub fn map(&self, p: &Point2<Real>) -> (Real, Real) {
        (self.scale * p.x - self.x, self.scale * p.y - self.y)
    }
}

/// The bounding box of `points`, grown by 10% about its center and scaled.
///
/// Returns `None` for an empty slice.
pub fn svg_viewport(points: &[Point2<Real>], scale: Real) -> Option<SvgViewport> {
    let line: LineString<Real> = points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>().into();
    let rect = line.bounding_rect()?;

    let center_x = (rect.min().x + rect.max().x) / 2.0;
    let center_y = (rect.min().y + rect.max().y) / 2.0;
    let half_x = (rect.max().x - center_x) * 1.1;
    let half_y = (rect.max().y - center_y) * 1.1;

    Some(SvgViewport {
        x: scale * (center_x - half_x),
        y: scale * (center_y - half_y),
        width: scale * 2.0 * half_x,
        height: scale * 2.0 * half_y,
        scale,
    })
}

fn polyline(points: &[Point2<Real>], viewport: &SvgViewport, style: &str) -> Polyline {
    let coords = points
        .iter()
        .map(|p| {
            let (x, y) = viewport.map(p);
            format!("{x:.6},{y:.6}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    Polyline::new().set("style", style).set("points", coords)
}

/// Render `points` as a single `<polyline>` in an SVG document fitted to them.
pub fn to_svg(points: &[Point2<Real>], scale: Real) -> Result<String, IoError> {
    to_svg_with_overlays(points, &[], scale)
}

/// Like [`to_svg`], with extra grey dashed polylines (reference circles and
/// the like) drawn behind the outline. The viewport is fitted to `points` only.
pub fn to_svg_with_overlays(
    points: &[Point2<Real>],
    overlays: &[&[Point2<Real>]],
    scale: Real,
) -> Result<String, IoError> {
    let viewport = svg_viewport(points, scale).ok_or(IoError::EmptyOutline)?;

    let mut document = Document::new()
        .set("width", viewport.width)
        .set("height", viewport.height)
        .set("viewBox", (0, 0, viewport.width, viewport.height));

    for overlay in overlays {
        document = document.add(polyline(overlay, &viewport, REFERENCE_STYLE));
    }
    document = document.add(polyline(points, &viewport, OUTLINE_STYLE));

    Ok(document.to_string())
}

impl GearOutline {
    pub fn to_svg(&self, scale: Real) -> Result<String, IoError> {
        to_svg(self.points(), scale)
    }
}

impl Gear {
    /// SVG of the outline, optionally with the outer, pitch, base and root
    /// circles drawn behind it.
    pub fn to_svg(&self, scale: Real, reference_circles: bool) -> Result<String, IoError> {
        if !reference_circles {
            return self.outline().to_svg(scale);
        }

        let circles: Vec<_> = CircleKind::ALL
            .iter()
            .map(|&kind| self.diameters().reference_circle(kind, 4 * self.spec().teeth()))
            .collect();
        let overlays: Vec<&[Point2<Real>]> = circles.iter().map(|c| c.points()).collect();
        to_svg_with_overlays(self.outline().points(), &overlays, scale)
    }
}
