#![allow(clippy::unreadable_literal)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ffi::CStr;

fn u64toa(value: u64) -> String {
    itoa64::Buffer::new().format(value).to_owned()
}

// Checks every entry point against the itoa crate and std formatting.
fn check(value: u64) {
    let want = itoa::Buffer::new().format(value).to_owned();
    assert_eq!(want, value.to_string());

    let owned = itoa64::format(value);
    assert_eq!(owned, want, "format({value})");
    assert_eq!(owned.parse::<u64>(), Ok(value));

    let mut buffer = [0xffu8; itoa64::BUFFER_SIZE];
    let n = unsafe { itoa64::format_into(value, buffer.as_mut_ptr()) } as usize;
    assert_eq!(&buffer[..n], want.as_bytes(), "format_into({value})");
    assert_eq!(buffer[n], b'\0');

    let mut stack = itoa64::Buffer::new();
    assert_eq!(stack.format(value), want);
    assert_eq!(stack.format_c_str(value).to_bytes(), want.as_bytes());

    if value != 0 {
        assert_eq!(itoa64::decimal_digit_count(value) as usize, want.len());
        assert_ne!(owned.as_bytes()[0], b'0');
    }
}

#[test]
fn zero() {
    assert_eq!(u64toa(0), "0");
    assert_eq!(itoa64::format(0), "0");
    assert_eq!(itoa64::format(0).len(), 1);
}

#[test]
fn literals() {
    assert_eq!(u64toa(7), "7");
    assert_eq!(u64toa(10), "10");
    assert_eq!(u64toa(100), "100");
    assert_eq!(u64toa(18446744073709551615), "18446744073709551615");

    let mut buffer = [0xffu8; 8];
    let n = unsafe { itoa64::format_into(999, buffer.as_mut_ptr()) };
    assert_eq!(n, 3);
    assert_eq!(&buffer[..4], b"999\0");
}

#[test]
fn continuous_range() {
    for i in 0..=1u64 << 15 {
        check(i);
        check(i.wrapping_sub(1));
        check(i + 1);
    }
}

#[test]
fn power_of_two_boundaries() {
    for k in 0..64 {
        let value = 1u64 << k;
        check(value - 1);
        check(value);
        check(value + 1);
    }
}

#[test]
fn power_of_ten_boundaries() {
    let mut value = 1u64;
    for _ in 1..20 {
        value *= 10;
        check(value - 1);
        check(value);
        check(value + 1);
    }
}

#[test]
fn random() {
    let mut rng = StdRng::seed_from_u64(0x1d3f_07a5);
    for _ in 0..100_000 {
        // Uniform over the bit length, not the value, so short numbers are
        // sampled as often as long ones.
        let shift = rng.gen_range(0..64);
        check(rng.gen::<u64>() >> shift);
    }
}

#[test]
fn owned_capacity() {
    let s = itoa64::format(12345);
    assert_eq!(s.len(), 5);
    assert!(s.capacity() >= 6);
}

#[test]
fn c_str() {
    let mut buffer = itoa64::Buffer::default();
    let s: &CStr = buffer.format_c_str(18446744073709551557);
    assert_eq!(s.to_bytes_with_nul(), b"18446744073709551557\0");
    assert_eq!(buffer.format_c_str(0).to_bytes_with_nul(), b"0\0");
}

#[test]
fn try_format_into() {
    let mut buffer = [0u8; 4];
    assert_eq!(itoa64::try_format_into(999, &mut buffer), Ok(3));
    assert_eq!(&buffer, b"999\0");

    let err = itoa64::try_format_into(1000, &mut buffer).unwrap_err();
    assert_eq!(err.needed(), 5);
    assert_eq!(
        err.to_string(),
        "output buffer too small: need 5 bytes, have 4",
    );

    assert_eq!(itoa64::try_format_into(0, &mut buffer[..2]), Ok(1));
    assert!(itoa64::try_format_into(0, &mut buffer[..1]).is_err());
    assert!(itoa64::try_format_into(0, &mut []).is_err());

    let mut full = [0u8; 21];
    assert_eq!(itoa64::try_format_into(u64::MAX, &mut full), Ok(20));
    assert!(itoa64::try_format_into(u64::MAX, &mut full[..20]).is_err());

    let err: Box<dyn std::error::Error> = Box::new(err);
    assert!(err.to_string().starts_with("output buffer too small"));
}
