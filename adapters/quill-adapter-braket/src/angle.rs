//! Half-turn angle normalization.

/// Fold an angle in half-turns into the range `(-2, 2]`.
///
/// Some Braket gates only accept angles within `(-2π, 2π)` under verbatim
/// compilation, while transpiled circuits can carry arbitrary multiples.
/// Values already in range are returned unchanged, so the function is
/// exactly idempotent.
#[inline]
pub fn normalize_angle(n: f64) -> f64 {
    if n > -2.0 && n <= 2.0 {
        return n;
    }
    let n0 = n.rem_euclid(4.0);
    if n0 > 2.0 { n0 - 4.0 } else { n0 }
}
