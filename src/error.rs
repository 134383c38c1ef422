// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Errors raised at the boundary of the cipher, before any block is transformed.

/// Result alias used by the fallible parts of the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The `Error` enum represents invalid input rejected before it reaches the cipher core.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The secret key was not exactly 16 bytes long.
    #[error("invalid key length: `{len}` bytes; expected 16")]
    InvalidKeyLength { len: usize },

    /// The textual key contained something other than hexadecimal digits.
    #[error("invalid key hex: `{0}`")]
    InvalidKeyHex(String),

    /// The word sequence had odd length, so its last block is incomplete.
    #[error("truncated block sequence: `{words}` words; expected an even count")]
    TruncatedBlockSequence { words: usize },

    /// A token of the input could not be read as a 32-bit hexadecimal word.
    #[error("invalid word `{token}` at position {index}; expected up to 8 hex digits")]
    InvalidWord { index: usize, token: String },
}
