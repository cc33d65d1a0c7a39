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

//! By-value wrapping arithmetic.
//!
//! Integer widths wrap around on overflow in every build profile, which is the
//! contract attribute stores promise for narrow counters. Floating point widths
//! have no overflow to speak of and fall back to plain IEEE arithmetic, so a
//! single generic read-modify-write path covers every storage width.

use core::ops::{Add, Sub};

/// A trait for types that support wrapping addition by value.
///
/// # Examples
///
/// ```rust
/// # use waypoint_core::num::ops::wrapping_arithmetic::WrappingAddVal;
/// let a: i8 = 127;
/// assert_eq!(a.wrapping_add_val(1), -128);
/// let b: f32 = 1.5;
/// assert_eq!(b.wrapping_add_val(2.0), 3.5);
/// ```
pub trait WrappingAddVal: Sized + Add<Self, Output = Self> {
    /// Adds `v`, wrapping around at the boundary of the type.
    fn wrapping_add_val(self, v: Self) -> Self;
}

/// A trait for types that support wrapping subtraction by value.
///
/// # Examples
///
/// ```rust
/// # use waypoint_core::num::ops::wrapping_arithmetic::WrappingSubVal;
/// let a: i16 = i16::MIN;
/// assert_eq!(a.wrapping_sub_val(1), i16::MAX);
/// ```
pub trait WrappingSubVal: Sized + Sub<Self, Output = Self> {
    /// Subtracts `v`, wrapping around at the boundary of the type.
    fn wrapping_sub_val(self, v: Self) -> Self;
}

macro_rules! wrapping_impl_val {
    ($trait_name:ident, $method:ident, $src_method:ident, $($t:ty),+ $(,)?) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: $t) -> $t {
                    <$t>::$src_method(self, v)
                }
            }
        )+
    };
}

macro_rules! float_impl_val {
    ($trait_name:ident, $method:ident, $op:tt, $($t:ty),+ $(,)?) => {
        $(
            impl $trait_name for $t {
                #[inline(always)]
                fn $method(self, v: $t) -> $t {
                    self $op v
                }
            }
        )+
    };
}

wrapping_impl_val!(WrappingAddVal, wrapping_add_val, wrapping_add, i8, i16, i32, i64, isize);
wrapping_impl_val!(WrappingAddVal, wrapping_add_val, wrapping_add, u8, u16, u32, u64, usize);
float_impl_val!(WrappingAddVal, wrapping_add_val, +, f32, f64);

wrapping_impl_val!(WrappingSubVal, wrapping_sub_val, wrapping_sub, i8, i16, i32, i64, isize);
wrapping_impl_val!(WrappingSubVal, wrapping_sub_val, wrapping_sub, u8, u16, u32, u64, usize);
float_impl_val!(WrappingSubVal, wrapping_sub_val, -, f32, f64);
