// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Truncating conversions from the two widest primitives.
//!
//! Attribute stores accept values from callers in whatever width they happen
//! to hold and narrow them to the storage width. The conversions follow the
//! `as` operator exactly: integer narrowing keeps the low bits, float to
//! integer truncates toward zero and saturates at the bounds, and `NaN`
//! becomes zero.

/// A trait for primitives that can be narrowed from `i64` and `f64`.
///
/// # Examples
///
/// ```rust
/// # use waypoint_core::num::cast::TruncatingCast;
/// assert_eq!(i8::from_i64_truncating(300), 44);
/// assert_eq!(i16::from_f64_truncating(-7.9), -7);
/// assert_eq!(f32::from_i64_truncating(3), 3.0);
/// ```
pub trait TruncatingCast: Sized {
    /// Converts `v` with `as` semantics.
    fn from_i64_truncating(v: i64) -> Self;

    /// Converts `v` with `as` semantics.
    fn from_f64_truncating(v: f64) -> Self;
}

macro_rules! impl_truncating_cast {
    ($($t:ty),+ $(,)?) => {
        $(
            impl TruncatingCast for $t {
                #[inline(always)]
                fn from_i64_truncating(v: i64) -> Self {
                    v as $t
                }

                #[inline(always)]
                fn from_f64_truncating(v: f64) -> Self {
                    v as $t
                }
            }
        )+
    };
}

impl_truncating_cast!(i8, i16, i32, i64, isize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_narrowing_keeps_low_bits() {
        assert_eq!(i8::from_i64_truncating(128), -128);
        assert_eq!(i8::from_i64_truncating(-129), 127);
        assert_eq!(i16::from_i64_truncating(65_537), 1);
        assert_eq!(i64::from_i64_truncating(i64::MIN), i64::MIN);
    }

    #[test]
    fn test_float_to_integer_truncates_and_saturates() {
        assert_eq!(i32::from_f64_truncating(2.99), 2);
        assert_eq!(i32::from_f64_truncating(-2.99), -2);
        assert_eq!(i8::from_f64_truncating(1e9), i8::MAX);
        assert_eq!(i8::from_f64_truncating(f64::NAN), 0);
    }

    #[test]
    fn test_float_targets() {
        assert_eq!(f64::from_i64_truncating(-5), -5.0);
        assert_eq!(f32::from_f64_truncating(0.5), 0.5);
    }
}
