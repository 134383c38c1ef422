// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Word-level primitives shared by the key schedule and the round functions.
//!

use num_traits::{AsPrimitive, PrimInt};

/// An unsigned machine word the cipher can operate on.
///
/// Rotations take the amount as a word as well, since RC5 derives it from the
/// data being mixed. The amount is reduced modulo the word width before use,
/// so rotating by the full width (or more) is well defined.
pub trait Word: PrimInt + AsPrimitive<u32> {
    /// Width of the word in bits.
    const BITS: u32;

    /// Circular left rotation by `n mod BITS`.
    #[inline]
    fn rotl(self, n: Self) -> Self {
        self.rotate_left(rotation_amount::<Self>(n.as_()))
    }

    /// Circular right rotation by `n mod BITS`.
    #[inline]
    fn rotr(self, n: Self) -> Self {
        self.rotate_right(rotation_amount::<Self>(n.as_()))
    }
}

impl Word for u32 {
    const BITS: u32 = u32::BITS;
}

#[inline]
fn rotation_amount<T: Word>(x: u32) -> u32 {
    x & (T::BITS - 1)
}
