/// Computes the greatest common divisor of two numbers.
///
/// The result is always non-negative.
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a.abs()
}
