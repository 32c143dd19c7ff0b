/// Linear interpolation from `a` to `b`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Quintic smoothstep `t³(t(6t−15)+10)`; first and second derivatives vanish at 0 and 1.
pub(crate) fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Move `value` toward `target` by fraction `t`.
pub(crate) fn mix(value: f64, target: f64, t: f64) -> f64 {
    value + (target - value) * t
}
