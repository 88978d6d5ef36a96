//! Monotone cubic interpolation over curve points.
//!
//! Fritsch-Carlson tangents: exact at the knots, no overshoot between
//! them. Used to place inserted points on the existing curve shape.

/// A monotone cubic interpolant through a fixed set of knots.
#[derive(Debug, Clone)]
pub struct MonotoneSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    c1: Vec<f64>,
    c2: Vec<f64>,
    c3: Vec<f64>,
}

impl MonotoneSpline {
    /// Build from knots; needs at least two. Knots are sorted by x here.
    pub fn new(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut knots = points.to_vec();
        knots.sort_by(|a, b| a.0.total_cmp(&b.0));
        let xs: Vec<f64> = knots.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = knots.iter().map(|p| p.1).collect();

        // Consecutive differences and secant slopes.
        let mut dxs = Vec::with_capacity(xs.len() - 1);
        let mut ms = Vec::with_capacity(xs.len() - 1);
        for i in 0..xs.len() - 1 {
            let dx = xs[i + 1] - xs[i];
            dxs.push(dx);
            ms.push((ys[i + 1] - ys[i]) / dx);
        }

        // Degree-1 coefficients: harmonic-mean tangents, flattened at
        // local extrema so the interpolant stays monotone per segment.
        let mut c1 = Vec::with_capacity(xs.len());
        c1.push(ms[0]);
        for i in 0..dxs.len() - 1 {
            let m = ms[i];
            let m_next = ms[i + 1];
            if m * m_next <= 0.0 {
                c1.push(0.0);
            } else {
                let common = dxs[i] + dxs[i + 1];
                c1.push(3.0 * common / ((common + dxs[i + 1]) / m + (common + dxs[i]) / m_next));
            }
        }
        c1.push(ms[ms.len() - 1]);

        // Degree-2 and degree-3 coefficients.
        let mut c2 = Vec::with_capacity(dxs.len());
        let mut c3 = Vec::with_capacity(dxs.len());
        for i in 0..c1.len() - 1 {
            let t = c1[i];
            let m = ms[i];
            let inv_dx = 1.0 / dxs[i];
            let common = t + c1[i + 1] - 2.0 * m;
            c2.push((m - t - common) * inv_dx);
            c3.push(common * inv_dx * inv_dx);
        }

        Some(Self { xs, ys, c1, c2, c3 })
    }

    /// Evaluate at `x`. Exact at every knot; extrapolates with the nearest
    /// segment's polynomial outside the knot range.
    pub fn eval(&self, x: f64) -> f64 {
        let last = self.xs.len() - 1;
        if x == self.xs[last] {
            return self.ys[last];
        }
        let segment = match self.xs.binary_search_by(|knot| knot.total_cmp(&x)) {
            Ok(i) => return self.ys[i],
            Err(i) => i.saturating_sub(1).min(self.c3.len() - 1),
        };
        let diff = x - self.xs[segment];
        self.ys[segment] + self.c1[segment] * diff + self.c2[segment] * diff.powi(2)
            + self.c3[segment] * diff.powi(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_two_knots() {
        assert!(MonotoneSpline::new(&[]).is_none());
        assert!(MonotoneSpline::new(&[(0.0, 5.0)]).is_none());
        assert!(MonotoneSpline::new(&[(0.0, 5.0), (10.0, 6.0)]).is_some());
    }

    #[test]
    fn test_exact_at_knots() {
        let spline =
            MonotoneSpline::new(&[(0.0, 245.0), (360.0, 216.0), (1080.0, 27.0), (1440.0, 12.0)])
                .unwrap();
        assert_eq!(spline.eval(0.0), 245.0);
        assert_eq!(spline.eval(360.0), 216.0);
        assert_eq!(spline.eval(1080.0), 27.0);
        assert_eq!(spline.eval(1440.0), 12.0);
    }

    #[test]
    fn test_two_knots_interpolate_linearly() {
        let spline = MonotoneSpline::new(&[(0.0, 0.0), (10.0, 10.0)]).unwrap();
        assert!((spline.eval(5.0) - 5.0).abs() < 1e-9);
        assert!((spline.eval(2.5) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_flat_curve_stays_flat() {
        let spline = MonotoneSpline::new(&[(0.0, 200.0), (720.0, 200.0), (1440.0, 200.0)]).unwrap();
        for x in [1.0, 300.0, 700.0, 1000.0, 1439.0] {
            assert!((spline.eval(x) - 200.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_overshoot_between_knots() {
        let spline = MonotoneSpline::new(&[(0.0, 0.0), (600.0, 100.0), (1440.0, 110.0)]).unwrap();
        for i in 0..=100 {
            let x = 1440.0 * f64::from(i) / 100.0;
            let y = spline.eval(x);
            assert!((0.0..=110.0).contains(&y), "overshoot at x={x}: {y}");
        }
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let spline = MonotoneSpline::new(&[(1440.0, 12.0), (0.0, 245.0), (720.0, 100.0)]).unwrap();
        assert_eq!(spline.eval(0.0), 245.0);
        assert_eq!(spline.eval(1440.0), 12.0);
    }
}
