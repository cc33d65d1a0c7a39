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

//! # Value Trait Aliases
//!
//! Two bundles of bounds used throughout the workspace.
//!
//! - `EdgeValue` is the element type of a candidate edge attribute store. It
//!   covers exactly the six primitive widths `i8`, `i16`, `i32`, `i64`, `f32`
//!   and `f64` and carries static introspection (`ValueRange`) so callers can
//!   ask a store which values it can hold without knowing its width.
//! - `CostNumeric` is the type of tour lengths and move deltas. Integer costs
//!   (rounded distances) and floating point costs are both supported.

use crate::num::{
    cast::TruncatingCast,
    constants::{MinusOne, PlusOne, Zero},
    ops::wrapping_arithmetic::{WrappingAddVal, WrappingSubVal},
    tolerance::NoiseTolerance,
};
use num_traits::{AsPrimitive, Num, NumCast};

/// Static description of the values a storage width can represent.
pub trait ValueRange {
    /// `true` for floating point widths.
    const FLOATS_ALLOWED: bool;

    /// Smallest storable value, as `i64`. Floating point widths report `i64::MIN`.
    const MIN_ALLOWED: i64;

    /// Largest storable value, as `i64`. Floating point widths report `i64::MAX`.
    const MAX_ALLOWED: i64;
}

macro_rules! impl_value_range_int {
    ($($t:ty),+ $(,)?) => {
        $(
            impl ValueRange for $t {
                const FLOATS_ALLOWED: bool = false;
                const MIN_ALLOWED: i64 = <$t>::MIN as i64;
                const MAX_ALLOWED: i64 = <$t>::MAX as i64;
            }
        )+
    };
}

macro_rules! impl_value_range_float {
    ($($t:ty),+ $(,)?) => {
        $(
            impl ValueRange for $t {
                const FLOATS_ALLOWED: bool = true;
                const MIN_ALLOWED: i64 = i64::MIN;
                const MAX_ALLOWED: i64 = i64::MAX;
            }
        )+
    };
}

impl_value_range_int!(i8, i16, i32, i64);
impl_value_range_float!(f32, f64);

/// A trait alias for the element type of candidate edge stores.
pub trait EdgeValue:
    Copy
    + PartialEq
    + PartialOrd
    + Default
    + std::fmt::Debug
    + std::fmt::Display
    + Zero
    + PlusOne
    + MinusOne
    + WrappingAddVal
    + WrappingSubVal
    + TruncatingCast
    + ValueRange
    + AsPrimitive<i64>
    + AsPrimitive<f64>
    + Send
    + Sync
    + 'static
{
}

impl<T> EdgeValue for T where
    T: Copy
        + PartialEq
        + PartialOrd
        + Default
        + std::fmt::Debug
        + std::fmt::Display
        + Zero
        + PlusOne
        + MinusOne
        + WrappingAddVal
        + WrappingSubVal
        + TruncatingCast
        + ValueRange
        + AsPrimitive<i64>
        + AsPrimitive<f64>
        + Send
        + Sync
        + 'static
{
}

/// A trait alias for tour lengths and move deltas.
///
/// Deltas are computed as `added - removed`, so the type must be signed in
/// practice; unsigned types satisfy the bounds but cannot express improvements.
pub trait CostNumeric:
    Num
    + NumCast
    + NoiseTolerance
    + Copy
    + PartialOrd
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
}

impl<T> CostNumeric for T where
    T: Num
        + NumCast
        + NoiseTolerance
        + Copy
        + PartialOrd
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + 'static
{
}
