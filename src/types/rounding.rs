//! The display rounding policy shared by every provider adapter.

/// Rounds a temperature or rain value to the nearest integer, halves upward.
///
/// Ties go toward positive infinity (`-2.5` becomes `-2`, `2.5` becomes `3`),
/// and negative zero is normalized so it never renders as `-0`. Applying the
/// policy to an already rounded value returns it unchanged.
///
/// # Examples
///
/// ```
/// use forecastkit::round_display;
///
/// assert_eq!(round_display(22.5), 23.0);
/// assert_eq!(round_display(-2.5), -2.0);
/// assert_eq!(round_display(round_display(17.49)), 17.0);
/// ```
pub fn round_display(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
