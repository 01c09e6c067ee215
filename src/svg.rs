//! Importing paths from svg documents.

use usvg::TreeParsing;

use crate::error::Result;
use crate::path::{BezierPath, PathPoint};
use crate::point::{point, Point2D};

/// Builds [`BezierPath`]s from the segments of an svg path.
///
/// Lines get handles on their anchors, quadratic curves are raised to
/// cubic ones.
#[derive(Default)]
struct PathCollector {
    paths: Vec<BezierPath>,
    current: Vec<PathPoint>,
}

impl PathCollector {
    fn move_to(&mut self, to: Point2D) {
        self.flush(false);
        self.current.push(PathPoint::corner(to));
    }

    fn line_to(&mut self, to: Point2D) {
        self.current.push(PathPoint::corner(to));
    }

    fn quadratic_to(&mut self, ctrl: Point2D, to: Point2D) {
        let Some(from) = self.current.last().map(|p| p.anchor) else {
            return self.move_to(to);
        };
        let ctrl1 = from + (ctrl - from) * (2.0 / 3.0);
        let ctrl2 = to + (ctrl - to) * (2.0 / 3.0);
        self.cubic_to(ctrl1, ctrl2, to);
    }

    fn cubic_to(&mut self, ctrl1: Point2D, ctrl2: Point2D, to: Point2D) {
        match self.current.last_mut() {
            Some(last) => last.handle_out = ctrl1,
            None => return self.move_to(to),
        }
        self.current.push(PathPoint { anchor: to, handle_in: ctrl2, handle_out: to });
    }

    fn close(&mut self) {
        // An explicit segment back to the start is folded into the closing one.
        if self.current.len() > 1 && self.current.first().map(|p| p.anchor) == self.current.last().map(|p| p.anchor) {
            if let Some(last) = self.current.pop() {
                self.current[0].handle_in = last.handle_in;
            }
        }
        self.flush(true);
    }

    fn flush(&mut self, closed: bool) {
        if !self.current.is_empty() {
            let points = std::mem::take(&mut self.current);
            self.paths.push(BezierPath::new(points, closed));
        }
    }
}

/// Parses an svg document and returns its paths with the transforms of
/// their groups applied. Every sub-path becomes its own [`BezierPath`].
pub fn load_paths(svg_source: &str) -> Result<Vec<BezierPath>> {
    let opt = usvg::Options::default();
    let rtree = usvg::Tree::from_str(svg_source, &opt)?;

    let mut collector = PathCollector::default();
    for node in rtree.root.descendants() {
        use usvg::NodeExt;
        // The node itself comes first, then its parents.
        let transforms: Vec<_> = node.ancestors().map(|n| n.transform()).collect();
        let transform = |p: usvg::tiny_skia_path::Point| {
            let (mut x, mut y) = (p.x as f64, p.y as f64);
            for t in &transforms {
                (x, y) = (
                    t.sx as f64 * x + t.kx as f64 * y + t.tx as f64,
                    t.ky as f64 * x + t.sy as f64 * y + t.ty as f64,
                );
            }
            point(x, y)
        };

        if let usvg::NodeKind::Path(ref usvg_path) = *node.borrow() {
            for segment in usvg_path.data.segments() {
                use usvg::tiny_skia_path::PathSegment;
                match segment {
                    PathSegment::MoveTo(p) => collector.move_to(transform(p)),
                    PathSegment::LineTo(p) => collector.line_to(transform(p)),
                    PathSegment::QuadTo(ctrl, to) => collector.quadratic_to(transform(ctrl), transform(to)),
                    PathSegment::CubicTo(ctrl1, ctrl2, to) => {
                        collector.cubic_to(transform(ctrl1), transform(ctrl2), transform(to))
                    }
                    PathSegment::Close => collector.close(),
                }
            }
            collector.flush(false);
        }
    }

    log::debug!("loaded {} paths", collector.paths.len());

    Ok(collector.paths)
}

/// Reads and parses an svg file, see [`load_paths`].
pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Vec<BezierPath>> {
    let source = std::fs::read_to_string(path)?;
    load_paths(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlattenError;
    use approx::assert_relative_eq;

    const DOCUMENT: &str = r#"
<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <path d="M 10 10 C 20 0 40 0 50 10 L 50 50 Z" fill="none" stroke="black"/>
  <path d="M 0 0 Q 10 20 20 0" transform="translate(5 5)" fill="none" stroke="black"/>
</svg>
"#;

    #[test]
    fn paths_of_a_document() {
        let paths = load_paths(DOCUMENT).unwrap();
        assert_eq!(paths.len(), 2);

        let closed = &paths[0];
        assert!(closed.closed);
        assert_eq!(closed.points.len(), 3);
        assert_eq!(closed.segment_count(), 3);
        assert_eq!(closed.points[0].anchor, point(10.0, 10.0));
        let top = closed.segment(0).evaluate(0.5);
        assert_relative_eq!(top.x, 30.0, epsilon = 1e-4);
        assert_relative_eq!(top.y, 2.5, epsilon = 1e-4);
        assert!(closed.segment(1).is_straight());

        let quad = &paths[1];
        assert!(!quad.closed);
        assert_eq!(quad.segment_count(), 1);
        let curve = quad.segment(0);
        assert_relative_eq!(curve.p0().x, 5.0, epsilon = 1e-4);
        assert_relative_eq!(curve.p1().x, 25.0, epsilon = 1e-4);
        let mid = curve.evaluate(0.5);
        assert_relative_eq!(mid.x, 15.0, epsilon = 1e-4);
        assert_relative_eq!(mid.y, 15.0, epsilon = 1e-4);
    }

    #[test]
    fn closing_segment_is_folded() {
        let mut collector = PathCollector::default();
        collector.move_to(point(0.0, 0.0));
        collector.cubic_to(point(5.0, -5.0), point(10.0, -5.0), point(10.0, 0.0));
        collector.cubic_to(point(10.0, 10.0), point(0.0, 10.0), point(0.0, 0.0));
        collector.close();

        let path = &collector.paths[0];
        assert!(path.closed);
        assert_eq!(path.points.len(), 2);
        assert_eq!(path.points[0].handle_in, point(0.0, 10.0));
        assert_eq!(path.segment(1).c0(), point(10.0, 10.0));
    }

    #[test]
    fn invalid_document() {
        assert!(matches!(load_paths("not an svg"), Err(FlattenError::Svg(_))));
        assert!(matches!(load_file("/does/not/exist.svg"), Err(FlattenError::Io(_))));
    }
}
