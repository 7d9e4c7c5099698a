use super::IoError;
use crate::float_types::Real;
use crate::gear::GearOutline;
use nalgebra::Point2;

#[cfg(feature = "dxf-io")]
use dxf::entities::{Entity, EntityType, Line};
#[cfg(feature = "dxf-io")]
use dxf::{Color, Drawing, Point};

/// Layer every exported LINE is placed on.
pub const LINE_LAYER: &str = "2";
/// ACI color index of every exported LINE (cyan).
pub const LINE_COLOR: u8 = 4;

/// Export a polyline as a minimal ASCII DXF: empty HEADER, TABLES and BLOCKS
/// sections and one LINE entity per consecutive pair of points, all in the
/// z = 0 plane. `name` is written into a header comment.
pub fn to_dxf_ascii(points: &[Point2<Real>], scale: Real, name: &str) -> Result<String, IoError> {
    if points.is_empty() {
        return Err(IoError::EmptyOutline);
    }

    let mut out = String::new();
    section(&mut out, "HEADER");
    out.push_str("999\n");
    out.push_str(&format!("{name} by gearwright\n"));
    end_section(&mut out);
    section(&mut out, "TABLES");
    end_section(&mut out);
    section(&mut out, "BLOCKS");
    end_section(&mut out);
    section(&mut out, "ENTITIES");

    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        out.push_str("  0\nLINE\n");
        out.push_str(&format!("  8\n{LINE_LAYER}\n"));
        out.push_str(&format!(" 62\n{LINE_COLOR}\n"));
        out.push_str(&format!(" 10\n{:.6}\n 20\n{:.6}\n 30\n0.0\n", scale * start.x, scale * start.y));
        out.push_str(&format!(" 11\n{:.6}\n 21\n{:.6}\n 31\n0.0\n", scale * end.x, scale * end.y));
    }

    end_section(&mut out);
    out.push_str("  0\nEOF\n");
    Ok(out)
}

fn section(out: &mut String, name: &str) {
    out.push_str("  0\nSECTION\n  2\n");
    out.push_str(name);
    out.push('\n');
}

fn end_section(out: &mut String) {
    out.push_str("  0\nENDSEC\n");
}

/// Build a `dxf::Drawing` holding the same LINE entities as [`to_dxf_ascii`].
#[cfg(feature = "dxf-io")]
pub fn to_dxf_drawing(points: &[Point2<Real>], scale: Real) -> Drawing {
    let mut drawing = Drawing::new();

    for pair in points.windows(2) {
        #[allow(clippy::unnecessary_cast)]
        let line = Line::new(
            Point::new((scale * pair[0].x) as f64, (scale * pair[0].y) as f64, 0.0),
            Point::new((scale * pair[1].x) as f64, (scale * pair[1].y) as f64, 0.0),
        );
        let mut entity = Entity::new(EntityType::Line(line));
        entity.common.layer = LINE_LAYER.to_string();
        entity.common.color = Color::from_index(LINE_COLOR);
        drawing.add_entity(entity);
    }

    drawing
}

/// Serialize [`to_dxf_drawing`] with the `dxf` crate's writer.
#[cfg(feature = "dxf-io")]
pub fn to_dxf_bytes(points: &[Point2<Real>], scale: Real) -> Result<Vec<u8>, IoError> {
    if points.is_empty() {
        return Err(IoError::EmptyOutline);
    }
    let mut buffer = Vec::new();
    to_dxf_drawing(points, scale).save(&mut buffer)?;
    Ok(buffer)
}

impl GearOutline {
    pub fn to_dxf_ascii(&self, scale: Real, name: &str) -> Result<String, IoError> {
        self::to_dxf_ascii(self.points(), scale, name)
    }

    #[cfg(feature = "dxf-io")]
    pub fn to_dxf(&self, scale: Real) -> Result<Vec<u8>, IoError> {
        self::to_dxf_bytes(self.points(), scale)
    }
}
