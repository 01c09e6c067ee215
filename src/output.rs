//! Writers for flattening results.

use std::io::Write;

use svg_fmt::{BeginSvg, Circle, Color, EndSvg, Fill, PathOp, Stroke, Style};

use crate::cubic::CubicBezier;
use crate::error::Result;
use crate::flattened::Flattened;
use crate::point::Point2D;

pub const DEFAULT_DECIMALS: usize = 7;

/// Writes one `x,y` line per point with a fixed number of decimals, and an
/// empty line after each path.
pub fn write_csv<P, I>(paths: P, decimals: usize, output: &mut dyn Write) -> Result<()>
where
    P: IntoIterator<Item = I>,
    I: IntoIterator<Item = Point2D>,
{
    for path in paths {
        for p in path {
            writeln!(output, "{:.*},{:.*}", decimals, p.x, decimals, p.y)?;
        }
        writeln!(output)?;
    }

    Ok(())
}

/// Renders a curve, its control polygon and its flattened polyline as a
/// standalone svg document.
pub fn write_svg(curve: &CubicBezier, flattened: &Flattened, point_radius: f32, output: &mut dyn Write) -> Result<()> {
    fn back_point(p: Point2D, radius: f32, output: &mut dyn Write) -> Result<()> {
        let style: Style = Fill::Color(Color { r: 200, g: 200, b: 200 }).into();
        writeln!(output, "{}", Circle { x: p.x as f32, y: p.y as f32, radius: radius * 2.0, style, comment: None })?;
        Ok(())
    }

    fn point(p: Point2D, radius: f32, output: &mut dyn Write) -> Result<()> {
        let style: Style = Fill::Color(Color { r: 0, g: 0, b: 0 }).into();
        writeln!(output, "{}", Circle { x: p.x as f32, y: p.y as f32, radius, style, comment: None })?;
        let style: Style = Fill::Color(Color { r: 255, g: 255, b: 255 }).into();
        writeln!(output, "{}", Circle { x: p.x as f32, y: p.y as f32, radius: radius * 0.8, style, comment: None })?;
        Ok(())
    }

    // Shift everything so that the control points land in the positive
    // quadrant, with room for the point markers.
    let margin = point_radius as f64 * 4.0;
    let points = curve.points();
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let offset = Point2D { x: margin - min_x, y: margin - min_y };
    let [from, ctrl1, ctrl2, to] = points.map(|p| p + offset);

    writeln!(
        output,
        "{}",
        BeginSvg { w: (max_x - min_x + 2.0 * margin) as f32, h: (max_y - min_y + 2.0 * margin) as f32 }
    )?;

    writeln!(output, "{}", svg_fmt::Path {
        ops: vec![
            PathOp::MoveTo { x: from.x as f32, y: from.y as f32 },
            PathOp::LineTo { x: ctrl1.x as f32, y: ctrl1.y as f32 },
            PathOp::MoveTo { x: to.x as f32, y: to.y as f32 },
            PathOp::LineTo { x: ctrl2.x as f32, y: ctrl2.y as f32 },
        ],
        style: Stroke::Color(Color { r: 250, g: 180, b: 180 }, point_radius * 0.3).into(),
        comment: None,
    })?;

    writeln!(output, "{}", svg_fmt::Path {
        ops: vec![
            PathOp::MoveTo { x: from.x as f32, y: from.y as f32 },
            PathOp::CubicTo {
                ctrl1_x: ctrl1.x as f32,
                ctrl1_y: ctrl1.y as f32,
                ctrl2_x: ctrl2.x as f32,
                ctrl2_y: ctrl2.y as f32,
                x: to.x as f32,
                y: to.y as f32,
            },
        ],
        style: Stroke::Color(Color { r: 180, g: 200, b: 250 }, point_radius * 2.0).into(),
        comment: None,
    })?;

    let mut poly_line = Vec::with_capacity(flattened.len());
    for (i, p) in flattened.points.iter().enumerate() {
        let p = *p + offset;
        back_point(p, point_radius, output)?;
        if i == 0 {
            poly_line.push(PathOp::MoveTo { x: p.x as f32, y: p.y as f32 });
        } else {
            poly_line.push(PathOp::LineTo { x: p.x as f32, y: p.y as f32 });
        }
    }

    writeln!(output, "{}", svg_fmt::Path {
        ops: poly_line,
        style: Stroke::Color(Color { r: 0, g: 0, b: 0 }, point_radius * 0.2).into(),
        comment: None,
    })?;

    for p in &flattened.points {
        point(*p + offset, point_radius, output)?;
    }

    writeln!(output, "{}", EndSvg)?;

    Ok(())
}
