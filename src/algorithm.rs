// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The implementaton details of the RC5-32/12/16 block cipher
//!
use crate::error::{Error, Result};
use crate::type_traits::Word;

/// Bits in a word (`w`).
pub const WORD_BITS: u32 = 32;
/// Bytes in a word (`u = w / 8`).
pub const WORD_BYTES: usize = (WORD_BITS / 8) as usize;
/// Number of rounds (`r`).
pub const ROUNDS: usize = 12;
/// Bytes in the secret key (`b`).
pub const KEY_BYTES: usize = 16;
/// Words the key is packed into (`c = b / u`).
pub const KEY_WORDS: usize = KEY_BYTES / WORD_BYTES;
/// Entries of the expanded key table (`t = 2 * (r + 1)`).
pub const TABLE_LEN: usize = 2 * (ROUNDS + 1);
/// Iterations of the key schedule mixing loop (`v = 3 * max(t, c)`).
pub const MIX_STEPS: usize = 3 * const_max(TABLE_LEN, KEY_WORDS);
/// Bytes in a block (two words).
pub const BLOCK_BYTES: usize = 2 * WORD_BYTES;

/// `Odd((e - 2) * 2^32)`
pub const P32: u32 = 0xB7E1_5163;
/// `Odd((phi - 1) * 2^32)`
pub const Q32: u32 = 0x9E37_79B9;

/// Expanded round keys derived from a [Key].
pub type KeyTable = [u32; TABLE_LEN];

/// A 64-bit block as its two 32-bit halves `(A, B)`.
pub type Block = (u32, u32);

const fn const_max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// A 128-bit RC5 secret key.
///
/// The bytes are kept in the order they were given; the key schedule packs
/// them into little-endian words.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Key([u8; KEY_BYTES]);

impl Key {
    /// Builds a key from four 32-bit words laid out in little-endian memory order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_fixed::Key;
    ///
    /// let key = Key::from_words([0x03020100, 0x07060504, 0x0B0A0908, 0x0F0E0D0C]);
    /// assert_eq!(key.as_bytes()[..4], [0x00, 0x01, 0x02, 0x03]);
    /// ```
    pub fn from_words(words: [u32; KEY_WORDS]) -> Key {
        let mut bytes = [0; KEY_BYTES];
        for (chunk, word) in bytes.chunks_exact_mut(WORD_BYTES).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Key(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_BYTES] {
        &self.0
    }
}

impl From<[u8; KEY_BYTES]> for Key {
    fn from(bytes: [u8; KEY_BYTES]) -> Self {
        Key(bytes)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        bytes
            .try_into()
            .map(Key)
            .map_err(|_| Error::InvalidKeyLength { len: bytes.len() })
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key(..)")
    }
}

/// Expands a secret key into the table of round keys.
///
/// Pure function of the key: the same key always yields the same table.
///
/// # Examples
///
/// ```
/// use rc5_fixed::{expand, Key, TABLE_LEN};
///
/// let key = Key::from([0; 16]);
/// let table = expand(&key);
/// assert_eq!(table.len(), TABLE_LEN);
/// assert_eq!(table, expand(&key));
/// ```
pub fn expand(key: &Key) -> KeyTable {
    let mut s_arr = init_s_array();
    let mut l_arr = init_l_array(key);

    mix_sl_arrays(&mut s_arr, &mut l_arr);

    log::trace!("expanded key schedule: {TABLE_LEN} words after {MIX_STEPS} mixing steps");
    s_arr
}

fn init_s_array() -> KeyTable {
    let mut s_arr = [0; TABLE_LEN];
    let s = std::iter::successors(Some(P32), |x| Some(x.wrapping_add(Q32)));
    for (si, value) in s_arr.iter_mut().zip(s) {
        *si = value;
    }
    s_arr
}

fn init_l_array(key: &Key) -> [u32; KEY_WORDS] {
    let mut l_arr = [0u32; KEY_WORDS];
    // walk the bytes backwards so each word ends up little-endian
    for (i, &byte) in key.as_bytes().iter().enumerate().rev() {
        let li = &mut l_arr[i / WORD_BYTES];
        *li = (*li << 8).wrapping_add(u32::from(byte));
    }
    l_arr
}

fn mix_sl_arrays(s_arr: &mut KeyTable, l_arr: &mut [u32; KEY_WORDS]) {
    let mut a = 0u32;
    let mut b = 0u32;
    let mut i = 0;
    let mut j = 0;

    for _ in 0..MIX_STEPS {
        // A = S[i] = (S[i] + A + B) <<< 3
        s_arr[i] = s_arr[i].wrapping_add(a).wrapping_add(b).rotl(3);
        a = s_arr[i];
        // B = L[j] = (L[j] + A + B) <<< (A + B)
        let ab = a.wrapping_add(b);
        l_arr[j] = l_arr[j].wrapping_add(ab).rotl(ab);
        b = l_arr[j];

        i = (i + 1) % TABLE_LEN;
        j = (j + 1) % KEY_WORDS;
    }
}

/// Encrypts one block with the given table.
///
/// # Examples
///
/// ```
/// use rc5_fixed::{encrypt, expand, Key};
///
/// let table = expand(&Key::from([0; 16]));
/// assert_eq!(encrypt((0, 0), &table), (0xEEDBA521, 0x6D8F4B15));
/// ```
pub fn encrypt(block: Block, table: &KeyTable) -> Block {
    let (mut a, mut b) = block;
    a = a.wrapping_add(table[0]);
    b = b.wrapping_add(table[1]);

    for i in 1..=ROUNDS {
        // A = ((A ^ B) <<< B) + S[2*i]
        // B = ((B ^ A) <<< A) + S[2*i + 1]
        a = (a ^ b).rotl(b).wrapping_add(table[2 * i]);
        b = (b ^ a).rotl(a).wrapping_add(table[2 * i + 1]);
    }

    (a, b)
}

/// Decrypts one block with the given table; the inverse of [encrypt].
///
/// # Examples
///
/// ```
/// use rc5_fixed::{decrypt, expand, Key};
///
/// let table = expand(&Key::from([0; 16]));
/// assert_eq!(decrypt((0xEEDBA521, 0x6D8F4B15), &table), (0, 0));
/// ```
pub fn decrypt(block: Block, table: &KeyTable) -> Block {
    let (mut a, mut b) = block;

    for i in (1..=ROUNDS).rev() {
        // B = ((B - S[2*i + 1]) >>> A) ^ A
        b = b.wrapping_sub(table[2 * i + 1]).rotr(a) ^ a;
        // A = ((A - S[2*i]) >>> B) ^ B
        a = a.wrapping_sub(table[2 * i]).rotr(b) ^ b;
    }

    (a.wrapping_sub(table[0]), b.wrapping_sub(table[1]))
}

/// The RC5 struct holds the expanded table of one key.
///
/// It is cheap to copy around and can be shared between threads; every method
/// only reads the table.
#[derive(Clone, Copy)]
pub struct RC5 {
    table: KeyTable,
}

impl RC5 {
    /// Creates a new RC5 instance, running the key schedule once.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_fixed::{Key, RC5};
    ///
    /// let rc5 = RC5::new(&Key::from(*b"0123456789abcdef"));
    /// ```
    pub fn new(key: &Key) -> RC5 {
        RC5 { table: expand(key) }
    }

    /// Creates a new RC5 instance from a byte slice that must be exactly 16 bytes long.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_fixed::{Error, RC5};
    ///
    /// assert!(RC5::from_slice(&[0; 16]).is_ok());
    /// assert_eq!(
    ///     RC5::from_slice(b"my secret key").err(),
    ///     Some(Error::InvalidKeyLength { len: 13 })
    /// );
    /// ```
    pub fn from_slice(key: &[u8]) -> Result<RC5> {
        Ok(RC5::new(&Key::try_from(key)?))
    }

    pub fn table(&self) -> &KeyTable {
        &self.table
    }

    /// Encrypts the two-word block represented by the references `a` and `b`.
    ///
    /// The encrypted values are written back to the same references.
    pub fn encrypt_words(&self, a: &mut u32, b: &mut u32) {
        (*a, *b) = encrypt((*a, *b), &self.table);
    }

    /// Decrypts the two-word block represented by the references `a` and `b`.
    ///
    /// The decrypted values are written back to the same references.
    pub fn decrypt_words(&self, a: &mut u32, b: &mut u32) {
        (*a, *b) = decrypt((*a, *b), &self.table);
    }

    /// Encrypts an 8-byte block in place, reading each half as a little-endian word.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_fixed::{Key, RC5};
    ///
    /// let key = Key::from([
    ///     0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
    ///     0x0E, 0x0F,
    /// ]);
    /// let rc5 = RC5::new(&key);
    ///
    /// let mut block = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
    /// rc5.encrypt_block(&mut block);
    /// assert_eq!(block, [0x2D, 0xDC, 0x14, 0x9B, 0xCF, 0x08, 0x8B, 0x9E]);
    /// ```
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
        let out = encrypt(block_to_words(block), &self.table);
        words_to_block(out, block);
    }

    /// Decrypts an 8-byte block in place, reading each half as a little-endian word.
    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
        let out = decrypt(block_to_words(block), &self.table);
        words_to_block(out, block);
    }
}

fn block_to_words(block: &[u8; BLOCK_BYTES]) -> Block {
    let mut a = [0; WORD_BYTES];
    let mut b = [0; WORD_BYTES];
    a.copy_from_slice(&block[..WORD_BYTES]);
    b.copy_from_slice(&block[WORD_BYTES..]);
    (u32::from_le_bytes(a), u32::from_le_bytes(b))
}

fn words_to_block((a, b): Block, block: &mut [u8; BLOCK_BYTES]) {
    block[..WORD_BYTES].copy_from_slice(&a.to_le_bytes());
    block[WORD_BYTES..].copy_from_slice(&b.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_00_0F: [u8; KEY_BYTES] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
        0x0F,
    ];

    const KEY_2B: [u8; KEY_BYTES] = [
        0x2B, 0xD6, 0x45, 0x9F, 0x82, 0xC5, 0xB3, 0x00, 0x95, 0x2C, 0x49, 0x10, 0x48, 0x81, 0xFF,
        0x48,
    ];

    #[test]
    fn derived_parameters() {
        assert_eq!(WORD_BYTES, 4);
        assert_eq!(KEY_WORDS, 4);
        assert_eq!(TABLE_LEN, 26);
        assert_eq!(MIX_STEPS, 78);
        assert_eq!(BLOCK_BYTES, 8);
    }

    #[test]
    fn s_array_seeded_with_magic_constants() {
        let s_arr = init_s_array();
        assert_eq!(s_arr[0], P32);
        assert_eq!(s_arr[1], 0x5618_CB1C);
        for i in 1..TABLE_LEN {
            assert_eq!(s_arr[i], s_arr[i - 1].wrapping_add(Q32));
        }
    }

    #[test]
    fn l_array_is_little_endian() {
        let l_arr = init_l_array(&Key::from(KEY_00_0F));
        assert_eq!(l_arr, [0x03020100, 0x07060504, 0x0B0A0908, 0x0F0E0D0C]);
    }

    #[test]
    fn key_from_words_matches_bytes() {
        let from_words = Key::from_words([0x03020100, 0x07060504, 0x0B0A0908, 0x0F0E0D0C]);
        assert_eq!(from_words, Key::from(KEY_00_0F));
    }

    #[test]
    fn invalid_key_size() {
        for len in [0, 8, 15, 17, 32] {
            let key = vec![0; len];
            let res = Key::try_from(&key[..]);
            assert!(matches!(
                res,
                Err(Error::InvalidKeyLength { len: error_len })
                if error_len == len
            ));
        }
    }

    #[test]
    fn key_debug_is_redacted() {
        assert_eq!(format!("{:?}", Key::from(KEY_2B)), "Key(..)");
    }

    #[test]
    fn encode_zero_key() {
        let table = expand(&Key::from([0; KEY_BYTES]));
        assert_eq!(encrypt((0, 0), &table), (0xEEDBA521, 0x6D8F4B15));
    }

    #[test]
    fn encode_chained_vectors() {
        let key = [
            0x91, 0x5F, 0x46, 0x19, 0xBE, 0x41, 0xB2, 0x51, 0x63, 0x55, 0xA5, 0x01, 0x10, 0xA9,
            0xCE, 0x91,
        ];
        let table = expand(&Key::from(key));
        assert_eq!(
            encrypt((0xEEDBA521, 0x6D8F4B15), &table),
            (0xAC13C0F7, 0x52892B5B)
        );

        let key = [
            0x78, 0x33, 0x48, 0xE7, 0x5A, 0xEB, 0x0F, 0x2F, 0xD7, 0xB1, 0x69, 0xBB, 0x8D, 0xC1,
            0x67, 0x87,
        ];
        let table = expand(&Key::from(key));
        assert_eq!(
            encrypt((0xAC13C0F7, 0x52892B5B), &table),
            (0xB7B3422F, 0x92FC6903)
        );
    }

    #[test]
    fn encode_chained_vectors_as_bytes() {
        let mut block = [0; BLOCK_BYTES];
        RC5::new(&Key::from([0; KEY_BYTES])).encrypt_block(&mut block);
        assert_eq!(block, [0x21, 0xA5, 0xDB, 0xEE, 0x15, 0x4B, 0x8F, 0x6D]);

        let key = [
            0x91, 0x5F, 0x46, 0x19, 0xBE, 0x41, 0xB2, 0x51, 0x63, 0x55, 0xA5, 0x01, 0x10, 0xA9,
            0xCE, 0x91,
        ];
        RC5::new(&Key::from(key)).encrypt_block(&mut block);
        assert_eq!(block, [0xF7, 0xC0, 0x13, 0xAC, 0x5B, 0x2B, 0x89, 0x52]);

        let key = [
            0x78, 0x33, 0x48, 0xE7, 0x5A, 0xEB, 0x0F, 0x2F, 0xD7, 0xB1, 0x69, 0xBB, 0x8D, 0xC1,
            0x67, 0x87,
        ];
        RC5::new(&Key::from(key)).encrypt_block(&mut block);
        assert_eq!(block, [0x2F, 0x42, 0xB3, 0xB7, 0x03, 0x69, 0xFC, 0x92]);

        let (a, b) = block_to_words(&block);
        assert_eq!((a, b), (0xB7B3422F, 0x92FC6903));
    }

    #[test]
    fn copied_handle_shares_table() {
        let rc5 = RC5::new(&Key::from(KEY_2B));
        let copy = rc5;
        assert_eq!(copy.table(), rc5.table());
    }

    #[test]
    fn encode_a() {
        let mut pt = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
        let ct = [0x2D, 0xDC, 0x14, 0x9B, 0xCF, 0x08, 0x8B, 0x9E];
        let rc5 = RC5::new(&Key::from(KEY_00_0F));
        rc5.encrypt_block(&mut pt);
        assert_eq!(ct, pt);
    }

    #[test]
    fn encode_b() {
        let mut pt = [0xEA, 0x02, 0x47, 0x14, 0xAD, 0x5C, 0x4D, 0x84];
        let ct = [0x11, 0xE4, 0x3B, 0x86, 0xD2, 0x31, 0xEA, 0x64];
        let rc5 = RC5::new(&Key::from(KEY_2B));
        rc5.encrypt_block(&mut pt);
        assert_eq!(ct, pt);
    }

    #[test]
    fn decode_a() {
        let pt = [0x96, 0x95, 0x0D, 0xDA, 0x65, 0x4A, 0x3D, 0x62];
        let mut ct = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
        let rc5 = RC5::new(&Key::from(KEY_00_0F));
        rc5.decrypt_block(&mut ct);
        assert_eq!(pt, ct);
    }

    #[test]
    fn decode_b() {
        let pt = [0x63, 0x8B, 0x3A, 0x5E, 0xF7, 0x2B, 0x66, 0x3F];
        let mut ct = [0xEA, 0x02, 0x47, 0x14, 0xAD, 0x5C, 0x4D, 0x84];
        let rc5 = RC5::new(&Key::from(KEY_2B));
        rc5.decrypt_block(&mut ct);
        assert_eq!(pt, ct);
    }

    #[test]
    fn words_match_blocks() {
        let rc5 = RC5::new(&Key::from(KEY_00_0F));
        let mut a = 0x33221100;
        let mut b = 0x77665544;
        rc5.encrypt_words(&mut a, &mut b);
        assert_eq!((a, b), (0x9B14DC2D, 0x9E8B08CF));

        rc5.decrypt_words(&mut a, &mut b);
        assert_eq!((a, b), (0x33221100, 0x77665544));
    }

    #[test]
    fn decrypt_inverts_encrypt() {
        let table = expand(&Key::from(KEY_2B));
        for block in [(0, 0), (u32::MAX, u32::MAX), (0x12345678, 0x9ABCDEF0), (1, 0)] {
            assert_eq!(decrypt(encrypt(block, &table), &table), block);
            assert_eq!(encrypt(decrypt(block, &table), &table), block);
        }
    }

    #[test]
    fn expand_is_deterministic() {
        let key = Key::from(KEY_2B);
        assert_eq!(expand(&key), expand(&key));
        assert_eq!(RC5::new(&key).table(), &expand(&key));
    }

    #[test]
    fn single_bit_key_change_changes_table() {
        let base = expand(&Key::from(KEY_00_0F));
        for byte in 0..KEY_BYTES {
            for bit in 0..8 {
                let mut key = KEY_00_0F;
                key[byte] ^= 1 << bit;
                assert_ne!(expand(&Key::from(key)), base, "byte {byte} bit {bit}");
            }
        }
    }
}
