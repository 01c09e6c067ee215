use crate::algorithms::straight::break_straight_line;
use crate::config::FlattenConfig;
use crate::cubic::CubicBezier;
use crate::flatness::is_flat;
use crate::flattened::Flattened;

/// Splits the curve at `n` equal parameter steps, with the smallest `n` for
/// which the midpoint of every piece is within tolerance of its chord.
pub fn flatten_cubic(curve: &CubicBezier, config: &FlattenConfig) -> Flattened {
    if curve.is_straight() {
        return break_straight_line(curve, config);
    }

    let n = division_count(curve, config);
    let params = (0..=n).map(|i| division_param(i, n)).collect();

    Flattened::from_params(curve, params)
}

/// Number of equal parameter steps needed to flatten the curve.
///
/// The search starts at two pieces. A single piece is only accepted when
/// two pieces are, since the midpoint of an inflected curve can sit right
/// on the chord.
pub fn division_count(curve: &CubicBezier, config: &FlattenConfig) -> u32 {
    let mut n = 2.min(config.max_divisions);
    loop {
        if divisions_are_flat(curve, config, n) {
            break;
        }
        if n >= config.max_divisions {
            log::warn!(
                "equal subdivision reached the division limit ({}), result exceeds the tolerance",
                config.max_divisions
            );
            return n;
        }
        n += 1;
    }

    if n == 2 && divisions_are_flat(curve, config, 1) {
        return 1;
    }

    n
}

#[inline]
fn division_param(i: u32, n: u32) -> f64 {
    if i == n {
        1.0
    } else {
        i as f64 / n as f64
    }
}

fn divisions_are_flat(curve: &CubicBezier, config: &FlattenConfig, n: u32) -> bool {
    let mut t = 0.0;
    let mut from = curve.p0();
    for i in 1..=n {
        let t_next = division_param(i, n);
        let to = curve.evaluate(t_next);
        let mid = curve.evaluate((t + t_next) * 0.5);
        if !is_flat(config, from, to, mid) {
            return false;
        }
        t = t_next;
        from = to;
    }

    true
}
