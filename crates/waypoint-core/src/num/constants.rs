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

//! Associated-constant traits for the primitive widths used by edge attribute
//! stores and tour costs. Floats are covered as well, so generic code can name
//! `V::ZERO` regardless of whether the backing storage is integral.

/// A trait for numeric types that have a constant representing -1.
pub trait MinusOne {
    /// The constant representing -1 for the implementing type.
    const MINUS_ONE: Self;
}

/// A trait for numeric types that have a constant representing +1.
pub trait PlusOne {
    /// The constant representing +1 for the implementing type.
    const PLUS_ONE: Self;
}

/// A trait for numeric types that have a constant representing 0.
pub trait Zero {
    /// The constant representing 0 for the implementing type.
    const ZERO: Self;
}

macro_rules! impl_const_for {
    ($trait_name:ident, $const_name:ident, $value:expr, $($t:ty),+ $(,)?) => {
        $(
            impl $trait_name for $t {
                const $const_name: Self = $value;
            }
        )+
    };
}

impl_const_for!(MinusOne, MINUS_ONE, -1, i8, i16, i32, i64, isize);
impl_const_for!(MinusOne, MINUS_ONE, -1.0, f32, f64);

impl_const_for!(PlusOne, PLUS_ONE, 1, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_const_for!(PlusOne, PLUS_ONE, 1.0, f32, f64);

impl_const_for!(Zero, ZERO, 0, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_const_for!(Zero, ZERO, 0.0, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_is_zero<T>() -> bool
    where
        T: MinusOne + PlusOne + Zero + std::ops::Add<Output = T> + PartialEq,
    {
        T::MINUS_ONE + T::PLUS_ONE == T::ZERO
    }

    #[test]
    fn test_constants_cancel_out() {
        assert!(sum_is_zero::<i8>());
        assert!(sum_is_zero::<i16>());
        assert!(sum_is_zero::<i32>());
        assert!(sum_is_zero::<i64>());
        assert!(sum_is_zero::<f32>());
        assert!(sum_is_zero::<f64>());
    }

    #[test]
    fn test_unsigned_constants() {
        assert_eq!(<u8 as Zero>::ZERO, 0);
        assert_eq!(<usize as PlusOne>::PLUS_ONE, 1);
    }
}
