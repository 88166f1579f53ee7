//! Euclidean greatest common divisor.

/// Greatest common divisor of two non-negative integers.
///
/// `gcd(a, 0) == a`, so `gcd(0, 0) == 0`.
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// Greatest common divisor of every value, `0` for an empty input.
pub fn gcd_of<I>(values: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    values.into_iter().fold(0, gcd)
}
