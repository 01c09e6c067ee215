//! Curves and measurements shared by the tests and the benchmarks.

pub mod table;

#[cfg(test)]
mod correctness;

use crate::cubic::CubicBezier;
use crate::flatness::Line;
use crate::flattened::Flattened;
use crate::point::point;

pub static TOLERANCES: [f64; 8] = [0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0];

/// The inflected curve of the flattening regression tests.
pub fn s_curve() -> CubicBezier {
    CubicBezier::new(point(0.0, 0.0), point(50.0, 10.0), point(150.0, -10.0), point(200.0, 0.0))
}

/// Curves without cusps and with handles off their anchors.
pub fn generate_bezier_curves() -> Vec<CubicBezier> {
    vec![
        s_curve(),
        // Arch.
        CubicBezier::new(point(0.0, 0.0), point(0.0, 100.0), point(100.0, 100.0), point(100.0, 0.0)),
        // Loop closing on its start.
        CubicBezier::new(point(0.0, 0.0), point(100.0, 100.0), point(-100.0, 100.0), point(0.0, 0.0)),
        // Self intersecting.
        CubicBezier::new(point(0.0, 0.0), point(150.0, 100.0), point(-50.0, 100.0), point(100.0, 0.0)),
        CubicBezier::new(point(10.0, 10.0), point(10.0, 60.0), point(60.0, 10.0), point(60.0, 60.0)),
        // U turn.
        CubicBezier::new(point(0.0, 0.0), point(300.0, 0.0), point(300.0, 300.0), point(0.0, 300.0)),
        CubicBezier::new(point(0.0, 0.0), point(1.0, 2.0), point(3.0, 2.0), point(4.0, 0.0)),
        // One handle on its anchor.
        CubicBezier::new(point(0.0, 0.0), point(0.0, 0.0), point(100.0, 50.0), point(100.0, 100.0)),
        CubicBezier::new(point(-20.0, 35.0), point(80.0, -40.0), point(120.0, 90.0), point(170.0, 5.0)),
    ]
}

/// Curves that every strategy flattens to a single edge.
pub fn generate_degenerate_curves() -> Vec<CubicBezier> {
    vec![
        CubicBezier::line(point(3.0, 3.0), point(3.0, 3.0)),
        CubicBezier::line(point(0.0, 0.0), point(10.0, 5.0)),
        CubicBezier::new(point(0.0, 0.0), point(1.0, 0.0), point(9.0, 0.0), point(10.0, 0.0)),
        // Overshoots its end and comes back along the same line.
        CubicBezier::new(point(0.0, 0.0), point(20.0, 0.0), point(-10.0, 0.0), point(10.0, 0.0)),
    ]
}

/// Largest distance between the curve and the line through each edge,
/// measured at `samples` points per edge.
pub fn max_deviation(curve: &CubicBezier, flattened: &Flattened, samples: u32) -> f64 {
    let mut max: f64 = 0.0;
    for (params, points) in flattened.params.windows(2).zip(flattened.points.windows(2)) {
        let (t0, t1) = (params[0], params[1]);
        for i in 1..samples {
            let p = curve.evaluate(t0 + (t1 - t0) * i as f64 / samples as f64);
            let d = match Line::through(points[0], points[1]) {
                Some(line) => line.distance_to_point(p),
                None => points[0].distance_to(p),
            };
            max = max.max(d);
        }
    }

    max
}
