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

//! # Strongly Typed One-Based Identifiers
//!
//! Phantom-typed wrappers around `usize` for identifiers that are numbered
//! from one, as city ids are in every tour file format. `TypedId<T>` keeps the
//! external one-based id and converts to the zero-based storage slot on
//! demand, so arena offsets such as `(id - 1) * stride` never need to be spelled
//! out at the call site.
//!
//! ## Usage
//!
//! ```rust
//! use waypoint_core::utils::id::{TypedId, TypedIdTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct CityTag;
//! impl TypedIdTag for CityTag { const NAME: &'static str = "City"; }
//!
//! type City = TypedId<CityTag>;
//! let c = City::new(3);
//! assert_eq!(c.get(), 3);
//! assert_eq!(c.slot(), 2);
//! assert_eq!(City::from_slot(2), c);
//! assert_eq!(format!("{}", c), "City(3)");
//! ```

/// A trait to tag typed ids with a name for debugging and display purposes.
pub trait TypedIdTag: Clone {
    const NAME: &'static str;
}

/// A one-based identifier associated with a tag type `T`.
///
/// The value zero is never a valid id; `new(0)` panics.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedId<T> {
    id: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedId<T> {
    /// Creates a new id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is zero.
    #[inline(always)]
    pub const fn new(id: usize) -> Self {
        assert!(id != 0, "called `TypedId::new` with id 0: ids are one-based");
        Self {
            id,
            _marker: std::marker::PhantomData,
        }
    }

    /// Creates the id stored at the zero-based `slot`.
    #[inline(always)]
    pub const fn from_slot(slot: usize) -> Self {
        Self {
            id: slot + 1,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the one-based id.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.id
    }

    /// Returns the zero-based storage slot, `id - 1`.
    #[inline(always)]
    pub const fn slot(&self) -> usize {
        self.id - 1
    }
}

impl<T> std::fmt::Debug for TypedId<T>
where
    T: TypedIdTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.id)
    }
}

impl<T> std::fmt::Display for TypedId<T>
where
    T: TypedIdTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.id)
    }
}

impl<T> From<TypedId<T>> for usize {
    fn from(typed_id: TypedId<T>) -> Self {
        typed_id.id
    }
}
