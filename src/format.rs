//! Number to character conversions for printing over Hell.
//!
//! Everything is formatted into a fixed stack buffer; the client then sends
//! the buffer one glyph at a time.

use tinyvec::ArrayVec;

/// Formatted characters. 64 is enough for a `u64` in base 2.
pub type Digits = ArrayVec<[u8; 64]>;

/// Fraction digits used when a float is printed without an explicit count.
pub const DEFAULT_FLOAT_DIGITS: u8 = 2;
/// Fraction digits beyond this carry no information for an `f64`.
pub const MAX_FRACTION_DIGITS: u8 = 32;
/// Largest magnitude printed as digits, everything above is "ovf".
pub const FLOAT_LIMIT: f64 = 4294967040.0;

/// Bases outside of `2..=36` fall back to decimal.
pub fn radix(base: u8) -> u8 {
    if (2..=36).contains(&base) {
        base
    } else {
        10
    }
}

/// Formats `n` in `base` using `0-9A-Z` digits.
pub fn format_unsigned(mut n: u64, base: u8) -> Digits {
    let base = radix(base) as u64;
    let mut digits = Digits::new();

    loop {
        let digit = (n % base) as u8;
        n /= base;

        digits.push(if digit < 10 { b'0' + digit } else { b'A' + digit - 10 });
        if n == 0 {
            break;
        }
    }

    digits.reverse();
    digits
}

/// Formats `n` in `base`.
///
/// Only decimal gets a sign. Other bases print the two's complement bit
/// pattern, so `-1` in base 16 is `FFFFFFFFFFFFFFFF`.
pub fn format_signed(n: i64, base: u8) -> Digits {
    if radix(base) != 10 || n >= 0 {
        return format_unsigned(n as u64, base);
    }

    let mut digits = Digits::new();
    digits.push(b'-');
    digits.extend_from_slice(&format_unsigned(n.unsigned_abs(), 10));
    digits
}

/// Formats `number` with `digits` fraction digits, rounding half up.
///
/// NaN, infinities and magnitudes beyond [`FLOAT_LIMIT`] come out as `nan`,
/// `inf` and `ovf`. `digits` is capped at [`MAX_FRACTION_DIGITS`].
pub fn format_float(mut number: f64, digits: u8) -> Digits {
    let mut out = Digits::new();

    let code: Option<&[u8]> = if number.is_nan() {
        Some(b"nan")
    } else if number.is_infinite() {
        Some(b"inf")
    } else if number > FLOAT_LIMIT || number < -FLOAT_LIMIT {
        Some(b"ovf")
    } else {
        None
    };
    if let Some(code) = code {
        out.extend_from_slice(code);
        return out;
    }

    if number < 0.0 {
        out.push(b'-');
        number = -number;
    }

    let digits = digits.min(MAX_FRACTION_DIGITS);

    // Round correctly so that 1.999 with 2 digits prints as "2.00"
    let mut rounding = 0.5;
    for _ in 0..digits {
        rounding /= 10.0;
    }
    number += rounding;

    let int_part = number as u64;
    let mut remainder = number - int_part as f64;
    out.extend_from_slice(&format_unsigned(int_part, 10));

    if digits > 0 {
        out.push(b'.');
    }

    for _ in 0..digits {
        remainder *= 10.0;
        let digit = (remainder as u8).min(9);
        out.push(b'0' + digit);
        remainder -= digit as f64;
    }

    out
}
