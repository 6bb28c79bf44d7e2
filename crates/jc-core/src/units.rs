//! SI time quantities.

use uom::si::f64::Time as UomTime;

// Public canonical unit types (SI, f64)
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Seconds as a plain float, for the numeric kernels.
#[inline]
pub fn as_secs(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        assert_eq!(as_secs(s(0.1)), 0.1);
        assert_eq!(as_secs(s(0.25) + s(0.25)), 0.5);
    }

    #[test]
    fn negative_time_is_representable() {
        assert!(as_secs(s(-2.0)) < 0.0);
    }
}
