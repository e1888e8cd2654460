//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into `[min, max]`.
///
/// Non-finite values are mapped to zero, so a NaN produced upstream can never
/// reach an actuator.
pub fn clamp_finite<T>(value: T, min: T, max: T) -> T
where
    T: Float
{
    if !value.is_finite() {
        return T::zero()
    }

    value.max(min).min(max)
}

/// Clamp an actuator demand into the normalised `[-1, 1]` range.
pub fn norm_dem<T>(value: T) -> T
where
    T: Float
{
    clamp_finite(value, -T::one(), T::one())
}

/// Wrap an angle in degrees into the range `[-180, 180)`.
pub fn wrap_180<T>(angle_deg: T) -> T
where
    T: Float
{
    let half_turn = T::from(180.0).unwrap();
    let full_turn = T::from(360.0).unwrap();

    rem_euclid(angle_deg + half_turn, full_turn) - half_turn
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}
