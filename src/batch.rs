// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Runs the cipher over a flat sequence of 32-bit words and renders the result
//! as hexadecimal text.
//!
//! Every consecutive pair of words is one block. The output lists every word of
//! every resulting block as 8 uppercase hex digits, separated by single spaces.

use rayon::prelude::*;

use crate::algorithm::{decrypt, encrypt, expand, Block, Key, KeyTable};
use crate::error::{Error, Result};

/// Direction of the batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

/// Reads whitespace separated hexadecimal words, each with an optional `0x` prefix.
///
/// # Examples
///
/// ```
/// use rc5_fixed::batch::parse_words;
///
/// assert_eq!(parse_words("0x1 ff\n21A5DBEE").unwrap(), [1, 0xff, 0x21A5DBEE]);
/// ```
pub fn parse_words(text: &str) -> Result<Vec<u32>> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            parse_hex_word(token).ok_or_else(|| Error::InvalidWord {
                index,
                token: token.to_owned(),
            })
        })
        .collect()
}

fn parse_hex_word(token: &str) -> Option<u32> {
    let digits = strip_hex_prefix(token);
    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Reads a key written as 32 hexadecimal digits, first byte first.
///
/// Whitespace between the digits is ignored.
///
/// # Examples
///
/// ```
/// use rc5_fixed::batch::parse_key;
/// use rc5_fixed::Key;
///
/// let key = parse_key("00010203 04050607 08090A0B 0C0D0E0F").unwrap();
/// assert_eq!(key, Key::from_words([0x03020100, 0x07060504, 0x0B0A0908, 0x0F0E0D0C]));
/// ```
pub fn parse_key(text: &str) -> Result<Key> {
    let digits: String = text.split_whitespace().collect();
    let digits = strip_hex_prefix(&digits);

    if digits.len() % 2 != 0 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidKeyHex(text.trim().to_owned()));
    }

    let bytes = (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16))
        .collect::<std::result::Result<Vec<u8>, _>>()
        .map_err(|_| Error::InvalidKeyHex(text.trim().to_owned()))?;

    Key::try_from(&bytes[..])
}

/// Pairs consecutive words into blocks.
///
/// A trailing unpaired word is rejected rather than dropped.
pub fn blocks(words: &[u32]) -> Result<Vec<Block>> {
    if words.len() % 2 != 0 {
        return Err(Error::TruncatedBlockSequence { words: words.len() });
    }
    Ok(words.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

/// Expands `key` once and transforms every block of `words` in `mode`.
///
/// Blocks are independent, so they are processed in parallel; the output keeps
/// the input order.
pub fn process(words: &[u32], key: &Key, mode: Mode) -> Result<Vec<Block>> {
    let input = blocks(words)?;
    let table = expand(key);

    log::debug!("{mode:?}: {} blocks", input.len());

    let transform: fn(Block, &KeyTable) -> Block = match mode {
        Mode::Encrypt => encrypt,
        Mode::Decrypt => decrypt,
    };

    Ok(input
        .into_par_iter()
        .map(|block| transform(block, &table))
        .collect())
}

/// Renders blocks as `AAAAAAAA BBBBBBBB AAAAAAAA BBBBBBBB ...` with no trailing space.
///
/// # Examples
///
/// ```
/// use rc5_fixed::batch::format_blocks;
///
/// assert_eq!(format_blocks(&[(0xEEDBA521, 0x6D8F4B15)]), "EEDBA521 6D8F4B15");
/// assert_eq!(format_blocks(&[]), "");
/// ```
pub fn format_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|(a, b)| format!("{a:08X} {b:08X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a whole batch: pairs the words, transforms them and formats the result.
///
/// # Examples
///
/// ```
/// use rc5_fixed::batch::{run, Mode};
/// use rc5_fixed::Key;
///
/// let key = Key::from([0; 16]);
/// assert_eq!(run(&[0, 0], &key, Mode::Encrypt).unwrap(), "EEDBA521 6D8F4B15");
/// ```
pub fn run(words: &[u32], key: &Key, mode: Mode) -> Result<String> {
    Ok(format_blocks(&process(words, key, mode)?))
}
