//! Fast conversion of `u64` to its canonical base-10 ASCII text.
//!
//! The digit count is computed up front in O(1) from the position of the
//! highest set bit plus a single comparison against a power of ten, then the
//! digits are emitted back to front two at a time from a table of the 100
//! two-digit pairs. Output is nul-terminated so it can be handed to C APIs
//! directly.
//!
//! ```
//! let mut buffer = itoa64::Buffer::new();
//! assert_eq!(buffer.format(18446744073709551615), "18446744073709551615");
//! ```
//!
//! # Cargo features
//!
//! - `std` (default): implements `std::error::Error` for [`Error`]. Implies
//!   `alloc`.
//! - `alloc`: enables [`format`], which returns an owned `String`.
//! - `portable-clz`: counts leading zeros with [`Portable`] rather than the
//!   compiler intrinsic.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::cast_possible_truncation, clippy::unreadable_literal)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod traits;

pub use crate::traits::{Intrinsic, LeadingZeros, Portable};

use crate::traits::Clz;
#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};
use core::ffi::CStr;
use core::fmt;
use core::mem::MaybeUninit;
use core::slice;
use core::str;

/// Number of digits in `u64::MAX`.
pub const MAX_DIGITS: usize = 20;

/// Bytes needed to format any `u64` with [`format_into`]: the digits, the nul
/// terminator and one byte of headroom.
pub const BUFFER_SIZE: usize = MAX_DIGITS + 2;

// The 100 two-digit pairs "00" to "99", most significant digit first.
static DIGIT_PAIRS: [[u8; 2]; 100] = {
    let mut pairs = [[0; 2]; 100];
    let mut i = 0;
    while i < 100 {
        pairs[i] = [b'0' + (i / 10) as u8, b'0' + (i % 10) as u8];
        i += 1;
    }
    pairs
};

// floor(log10(2**(64 - clz))), rounded up so that it is exact or one too high
// for every value with that many leading zeros. Hacker's Delight 11-4.
#[rustfmt::skip]
static CLZ_TO_LOG10: [u8; 64] = [
    19, 19, 19, 19, 18, 18, 18, 17, 17, 17, 16, 16, 16, 16, 15, 15, //  0-15
    15, 14, 14, 14, 13, 13, 13, 13, 12, 12, 12, 11, 11, 11, 10, 10, // 16-31
    10, 10,  9,  9,  9,  8,  8,  8,  7,  7,  7,  7,  6,  6,  6,  5, // 32-47
     5,  5,  4,  4,  4,  4,  3,  3,  3,  2,  2,  2,  1,  1,  1,  1, // 48-63
];

static POW10: [u64; 20] = {
    let mut pow10 = [1; 20];
    let mut i = 1;
    while i < 20 {
        pow10[i] = pow10[i - 1] * 10;
        i += 1;
    }
    pow10
};

/// Returns the number of leading zero bits of `x`, or 64 if `x` is zero.
///
/// Uses [`Intrinsic`] unless the `portable-clz` feature selects
/// [`Portable`].
#[inline]
pub fn count_leading_zeros(x: u64) -> u32 {
    Clz::count(x)
}

/// Returns the number of decimal digits of `x`, without leading zeros.
///
/// # Panics
///
/// Panics if `x` is zero. Zero has no highest set bit to estimate from; it is
/// formatted as `"0"` by a separate branch in every writer of this crate.
#[inline]
pub fn decimal_digit_count(x: u64) -> u32 {
    let log10 = u32::from(CLZ_TO_LOG10[count_leading_zeros(x) as usize]);
    log10 - u32::from(x < POW10[log10 as usize]) + 1
}

fn digit_len(value: u64) -> usize {
    if value == 0 {
        1
    } else {
        decimal_digit_count(value) as usize
    }
}

// Writes the `size` digits of `value` followed by a nul to `buffer`, touching
// exactly `size + 1` bytes. `size` must be `digit_len(value)`.
unsafe fn write(buffer: *mut u8, mut value: u64, size: usize) {
    debug_assert_eq!(size, digit_len(value));

    unsafe { buffer.add(size).write(b'\0') };
    if value == 0 {
        unsafe { buffer.write(b'0') };
        return;
    }

    let mut cursor = unsafe { buffer.add(size) };
    // Only whole pairs of what remains are taken, so a leading digit is never
    // padded with a zero.
    while value >= 10 {
        let pair = DIGIT_PAIRS[(value % 100) as usize];
        unsafe {
            cursor = cursor.sub(2);
            cursor.cast::<[u8; 2]>().write(pair);
        }
        value /= 100;
    }
    if value != 0 {
        unsafe { cursor.sub(1).write(b'0' + value as u8) };
    }
}

/// Writes the decimal digits of `value` followed by a nul byte to `buf` and
/// returns the number of digits, which excludes the nul.
///
/// # Safety
///
/// `buf` must be valid for writes of `decimal_digit_count(value) + 2` bytes,
/// or 2 bytes if `value` is zero. [`BUFFER_SIZE`] bytes are always enough.
pub unsafe fn format_into(value: u64, buf: *mut u8) -> u32 {
    let size = digit_len(value);
    unsafe { write(buf, value, size) };
    size as u32
}

/// Like [`format_into`] but bounds-checked against `buf`.
///
/// Needs room for the digits and the nul terminator. Returns the number of
/// digits written.
pub fn try_format_into(value: u64, buf: &mut [u8]) -> Result<usize, Error> {
    let size = digit_len(value);
    if buf.len() <= size {
        return Err(Error::buffer_too_small(size + 1, buf.len()));
    }
    unsafe { write(buf.as_mut_ptr(), value, size) };
    Ok(size)
}

/// Formats `value` into a newly allocated `String`.
///
/// The allocation holds the digits and a trailing nul outside the string's
/// length, nothing more.
#[cfg(feature = "alloc")]
pub fn format(value: u64) -> String {
    let size = digit_len(value);
    let mut bytes = Vec::<u8>::with_capacity(size + 1);
    unsafe {
        write(bytes.as_mut_ptr(), value, size);
        bytes.set_len(size);
        String::from_utf8_unchecked(bytes)
    }
}

/// A stack buffer for formatting integers without allocating.
///
/// ```
/// let mut buffer = itoa64::Buffer::new();
/// assert_eq!(buffer.format(100), "100");
/// assert_eq!(buffer.format_c_str(7).to_bytes_with_nul(), b"7\0");
/// ```
pub struct Buffer {
    bytes: [MaybeUninit<u8>; BUFFER_SIZE],
}

impl Buffer {
    pub fn new() -> Self {
        let bytes = [MaybeUninit::<u8>::uninit(); BUFFER_SIZE];
        Buffer { bytes }
    }

    /// Formats `value` into this buffer and returns the digits.
    pub fn format(&mut self, value: u64) -> &str {
        unsafe {
            let len = format_into(value, self.bytes.as_mut_ptr().cast::<u8>()) as usize;
            let slice = slice::from_raw_parts(self.bytes.as_ptr().cast::<u8>(), len);
            str::from_utf8_unchecked(slice)
        }
    }

    /// Formats `value` into this buffer and returns the digits with their nul
    /// terminator.
    pub fn format_c_str(&mut self, value: u64) -> &CStr {
        unsafe {
            let len = format_into(value, self.bytes.as_mut_ptr().cast::<u8>()) as usize;
            let slice = slice::from_raw_parts(self.bytes.as_ptr().cast::<u8>(), len + 1);
            CStr::from_bytes_with_nul_unchecked(slice)
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::new()
    }
}

/// An error returned by [`try_format_into`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    const fn buffer_too_small(needed: usize, available: usize) -> Self {
        Error {
            kind: ErrorKind::BufferTooSmall { needed, available },
        }
    }

    /// Bytes the output needed, including the nul terminator.
    pub fn needed(&self) -> usize {
        match self.kind {
            ErrorKind::BufferTooSmall { needed, .. } => needed,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ErrorKind {
    BufferTooSmall { needed: usize, available: usize },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "output buffer too small: need {needed} bytes, have {available}"
            ),
        }
    }
}
