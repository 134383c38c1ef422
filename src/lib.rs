// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This library provides an implementation of the RC5-32/12/16 block cipher
//!
//! The RC5 block cipher is a symmetric-key block cipher designed by Ron Rivest in 1994.
//! This crate fixes its parameters to 32-bit words (64-bit blocks), 12 rounds and a
//! 16-byte key.
//!
//! The core is three pure functions: [expand] turns a [Key] into a [KeyTable] of 26
//! round keys, and [encrypt] / [decrypt] transform one [Block] with that table. A
//! table can be shared read-only between any number of threads.
//!
//! The [batch] module runs the cipher over a sequence of words and renders the
//! result as uppercase hexadecimal text.
//!
//! ```
//! use rc5_fixed::{decrypt, encrypt, expand, Key};
//!
//! let table = expand(&Key::from(*b"0123456789abcdef"));
//! let ct = encrypt((0x12345678, 0x9ABCDEF0), &table);
//! assert_eq!(decrypt(ct, &table), (0x12345678, 0x9ABCDEF0));
//! ```
//!

mod algorithm;
pub mod batch;
mod error;
mod type_traits;

pub use crate::algorithm::*;
pub use crate::error::{Error, Result};
pub use crate::type_traits::Word;
