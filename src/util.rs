use arrayvec::ArrayVec;

/// Real roots of `a * x^2 + b * x + c = 0`, in ascending order.
///
/// Falls back to the linear equation when `a` is zero. A double root is
/// reported once.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> ArrayVec<f64, 2> {
    let mut roots = ArrayVec::new();

    if a == 0.0 {
        if b != 0.0 {
            roots.push(-c / b);
        }
        return roots;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return roots;
    }

    if discriminant == 0.0 {
        roots.push(-b / (2.0 * a));
        return roots;
    }

    // Avoids the cancellation of -b + sqrt(d) when a is tiny compared to b.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let r1 = q / a;
    let r2 = if q != 0.0 { c / q } else { -r1 };
    if r1 < r2 {
        roots.push(r1);
        roots.push(r2);
    } else {
        roots.push(r2);
        roots.push(r1);
    }

    roots
}

/// Composite Simpson integration of `f` over `[0, x]` with `n` (even)
/// sub-intervals.
#[inline]
pub fn simpson<F: Fn(f64) -> f64>(f: F, x: f64, n: u32) -> f64 {
    let n = (n.max(2) + 1) & !1;
    let h = x / n as f64;

    let mut sum = f(0.0) + f(x);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(h * i as f64);
    }

    sum * h / 3.0
}

#[test]
fn quadratic_roots() {
    let roots = solve_quadratic(1.0, -3.0, 2.0);
    assert_eq!(roots.as_slice(), &[1.0, 2.0]);

    let roots = solve_quadratic(0.0, 2.0, -1.0);
    assert_eq!(roots.as_slice(), &[0.5]);

    assert!(solve_quadratic(0.0, 0.0, 1.0).is_empty());
    assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());

    let roots = solve_quadratic(1.0, -2.0, 1.0);
    assert_eq!(roots.as_slice(), &[1.0]);

    // b = 0 takes the signum of zero, which is positive.
    let roots = solve_quadratic(2.0, 0.0, -8.0);
    assert_eq!(roots.as_slice(), &[-2.0, 2.0]);
}

#[test]
fn simpson_polynomial() {
    // Simpson's rule is exact for cubics.
    let v = simpson(|x| x * x * x - x, 2.0, 4);
    assert!((v - 2.0).abs() < 1e-12);
    // Odd counts are rounded up.
    let v = simpson(|x| x * x, 3.0, 3);
    assert!((v - 9.0).abs() < 1e-12);
}
