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

//! Rounding tolerances for cost comparisons.
//!
//! Floating point deltas of moves that do not change the tour length are
//! rarely exactly zero. Comparing them against zero lets the search accept
//! rounding noise, and two such moves can undo each other forever. The
//! tolerance of a float type grows with the magnitude it is compared at.
//! Integer types are exact and report zero.

/// A trait for cost types that can tell rounding noise from a real change.
pub trait NoiseTolerance: Sized {
    /// Returns the largest difference that still counts as noise when values
    /// of magnitude `scale` are compared.
    fn noise_tolerance(scale: Self) -> Self;
}

macro_rules! impl_noise_tolerance_exact {
    ($($t:ty),+ $(,)?) => {
        $(
            impl NoiseTolerance for $t {
                #[inline(always)]
                fn noise_tolerance(_scale: Self) -> Self {
                    0
                }
            }
        )+
    };
}

macro_rules! impl_noise_tolerance_float {
    ($($t:ty => $rel:expr),+ $(,)?) => {
        $(
            impl NoiseTolerance for $t {
                #[inline(always)]
                fn noise_tolerance(scale: Self) -> Self {
                    let tolerance = scale.abs() * ($rel as $t);
                    // NaN and infinite scales carry no usable magnitude.
                    if tolerance.is_finite() { tolerance } else { 0.0 }
                }
            }
        )+
    };
}

impl_noise_tolerance_exact!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_noise_tolerance_float!(f32 => 1e-5, f64 => 1e-10);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_exact() {
        assert_eq!(i64::noise_tolerance(1_000_000), 0);
        assert_eq!(i32::noise_tolerance(-7), 0);
        assert_eq!(u8::noise_tolerance(255), 0);
    }

    #[test]
    fn test_float_tolerance_scales_with_magnitude() {
        assert_eq!(f64::noise_tolerance(0.0), 0.0);
        assert!((f64::noise_tolerance(4.0) - 4e-10).abs() < 1e-20);
        assert_eq!(f64::noise_tolerance(-4.0), f64::noise_tolerance(4.0));
        assert!(f32::noise_tolerance(100.0) > 0.0);
    }

    #[test]
    fn test_float_tolerance_swallows_rounding_noise() {
        let a = 0.1f64 + 0.2 + 0.3;
        let b = 0.3f64 + 0.2 + 0.1;
        assert_ne!(a - b, 0.0);
        assert!((a - b).abs() <= f64::noise_tolerance(a));
    }

    #[test]
    fn test_non_finite_scale_gives_zero() {
        assert_eq!(f64::noise_tolerance(f64::INFINITY), 0.0);
        assert_eq!(f64::noise_tolerance(f64::NAN), 0.0);
    }
}
