/// Cubic spline over tabulated knots with pre-computed second derivatives,
/// as stored in the Elam tables.
///
/// Knots must be strictly increasing. Points outside the knot range are
/// extrapolated from the first or last interval.
#[derive(Debug, Clone, Copy)]
pub struct Spline<'a> {
    x: &'a [f64],
    y: &'a [f64],
    y2: &'a [f64],
}

impl<'a> Spline<'a> {
    /// Returns `None` unless all three slices have the same length of at
    /// least two knots.
    pub fn new(x: &'a [f64], y: &'a [f64], y2: &'a [f64]) -> Option<Self> {
        if x.len() < 2 || x.len() != y.len() || x.len() != y2.len() {
            return None;
        }
        Some(Spline { x, y, y2 })
    }

    pub fn eval(&self, at: f64) -> f64 {
        let n = self.x.len();
        let hi = self.x.partition_point(|&v| v < at).clamp(1, n - 1);
        let lo = hi - 1;

        let h = self.x[hi] - self.x[lo];
        debug_assert!(h > 0.0, "spline knots must be strictly increasing");

        let a = (self.x[hi] - at) / h;
        let b = (at - self.x[lo]) / h;

        a * self.y[lo]
            + b * self.y[hi]
            + (h * h / 6.0) * ((a * a - 1.0) * a * self.y2[lo] + (b * b - 1.0) * b * self.y2[hi])
    }
}
