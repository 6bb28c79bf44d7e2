/// Floating point type used throughout system
pub type Real = f64;

/// Clamp `v` to `[min, max]` only when the range is well ordered.
///
/// An inverted or NaN range disables the limit and `v` passes through.
#[inline]
pub fn clamp_ordered(v: Real, min: Real, max: Real) -> Real {
    if max >= min { v.clamp(min, max) } else { v }
}
