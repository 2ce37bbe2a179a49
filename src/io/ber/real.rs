//! ITU-T X.690 | ISO/IEC 8825-1, 8.5: the contents octets of REAL values.
//!
//! Decoding supports the binary form with base 2, 8 or 16 and any scale factor, the decimal form
//! (ISO 6093 NR1, NR2 and NR3) and the special values. Encoding always uses base 2 with a scale
//! factor of zero and an odd mantissa, so that the encoding of a value is unique.
//!
//! Exponents are limited to -1024..=1023 in both directions. Tiny subnormal values whose odd
//! mantissa needs a smaller exponent cannot be encoded and fail with a range violation.

use crate::io::buf::{minimal_octet_count, OctetBuffer};
use crate::io::err::Error;
use byteorder::{ByteOrder, NetworkEndian};
use std::convert::TryFrom;

const TYPE_NAME: &str = "REAL";

const FORM_MASK: u8 = 0b11_000000;
const FORM_DECIMAL: u8 = 0b00_000000;
const FORM_SPECIAL: u8 = 0b01_000000;

const BINARY_BIT: u8 = 0b1_0000000;
const BINARY_SIGN_BIT: u8 = 0b0_1_000000;
const BINARY_BASE_MASK: u8 = 0b00_11_0000;
const BINARY_BASE_2: u8 = 0b00_00_0000;
const BINARY_BASE_8: u8 = 0b00_01_0000;
const BINARY_BASE_16: u8 = 0b00_10_0000;
const BINARY_SCALE_MASK: u8 = 0b0000_11_00;
const BINARY_SCALE_SHIFT: u8 = 2;
const BINARY_EXPONENT_MASK: u8 = 0b000000_11;
const BINARY_EXPONENT_ONE_OCTET: u8 = 0b000000_00;
const BINARY_EXPONENT_TWO_OCTETS: u8 = 0b000000_01;

const MANTISSA_MAX_OCTETS: usize = 7;

const EXPONENT_MIN: i32 = -1024;
const EXPONENT_MAX: i32 = 1023;

const SPECIAL_PLUS_INFINITY: u8 = 0x40;
const SPECIAL_MINUS_INFINITY: u8 = 0x41;
const SPECIAL_NOT_A_NUMBER: u8 = 0x42;
const SPECIAL_MINUS_ZERO: u8 = 0x43;

const DECIMAL_NR_MASK: u8 = 0b00_111111;

const F64_FRACTION_BITS: i32 = 52;
const F64_FRACTION_MASK: u64 = (1 << F64_FRACTION_BITS) - 1;
const F64_EXPONENT_MASK: u64 = 0x7FF;
const F64_EXPONENT_BIAS: i32 = 1023;
const F64_EXPONENT_MIN: i32 = -1022;
const F64_EXPONENT_MAX: i32 = 1023;
const F64_SIGN_BIT: u64 = 1 << 63;
/// The exponent of the least significant fraction bit of a subnormal value
const F64_SUBNORMAL_EXPONENT: i32 = F64_EXPONENT_MIN - F64_FRACTION_BITS;

pub fn decode_real(content: &[u8]) -> Result<f64, Error> {
    let first = match content.first() {
        None => return Ok(0.0),
        Some(first) => *first,
    };

    if first & BINARY_BIT != 0 {
        decode_binary(first, &content[1..])
    } else if first & FORM_MASK == FORM_DECIMAL {
        decode_decimal(first & DECIMAL_NR_MASK, &content[1..])
    } else {
        debug_assert_eq!(FORM_SPECIAL, first & FORM_MASK);
        decode_special(content)
    }
}

fn decode_special(content: &[u8]) -> Result<f64, Error> {
    match content {
        [SPECIAL_PLUS_INFINITY] => Ok(f64::INFINITY),
        [SPECIAL_MINUS_INFINITY] => Ok(f64::NEG_INFINITY),
        [SPECIAL_NOT_A_NUMBER] => Ok(f64::NAN),
        [SPECIAL_MINUS_ZERO] => Ok(-0.0),
        [_] => Err(Error::framing_violation(
            TYPE_NAME,
            "unknown special real value",
        )),
        _ => Err(Error::framing_violation(
            TYPE_NAME,
            "a special real value consists of exactly one contents octet",
        )),
    }
}

/// 8.5.8, the character encoding of ISO 6093
fn decode_decimal(form: u8, digits: &[u8]) -> Result<f64, Error> {
    if !(1..=3).contains(&form) {
        return Err(Error::framing_violation(
            TYPE_NAME,
            "the decimal form must be NR1, NR2 or NR3",
        ));
    }

    let text = std::str::from_utf8(digits).map_err(|_| Error::invalid_utf8())?;
    let text = text.trim_start_matches(' ');
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | ',' | 'E' | 'e');
    if text.is_empty() || !text.chars().all(allowed) {
        return Err(Error::framing_violation(
            TYPE_NAME,
            "the decimal form must only contain digits, a sign, a decimal mark and an exponent",
        ));
    }

    text.replace(',', ".").parse::<f64>().map_err(|_| {
        Error::framing_violation(TYPE_NAME, "malformed decimal number")
    })
}

/// 8.5.7, `mantissa * 2^scale * base^exponent`
fn decode_binary(first: u8, content: &[u8]) -> Result<f64, Error> {
    let negative = first & BINARY_SIGN_BIT != 0;
    let base_bits = match first & BINARY_BASE_MASK {
        BINARY_BASE_2 => 1,
        BINARY_BASE_8 => 3,
        BINARY_BASE_16 => 4,
        _ => {
            return Err(Error::framing_violation(
                TYPE_NAME,
                "the base selector 0b11 is reserved",
            ))
        }
    };
    let scale = i32::from((first & BINARY_SCALE_MASK) >> BINARY_SCALE_SHIFT);

    let exponent_len = match first & BINARY_EXPONENT_MASK {
        BINARY_EXPONENT_ONE_OCTET => 1,
        BINARY_EXPONENT_TWO_OCTETS => 2,
        _ => {
            return Err(Error::range_violation(
                "REAL exponents wider than two octets are not supported",
            ))
        }
    };

    if content.len() <= exponent_len {
        return Err(Error::framing_violation(
            TYPE_NAME,
            "the binary form requires the exponent and at least one mantissa octet",
        ));
    }

    let exponent = NetworkEndian::read_int(&content[..exponent_len], exponent_len) as i32;
    if !(EXPONENT_MIN..=EXPONENT_MAX).contains(&exponent) {
        return Err(Error::range_violation(format!(
            "REAL exponent {} is outside of {}..={}",
            exponent, EXPONENT_MIN, EXPONENT_MAX
        )));
    }
    let mantissa_octets = &content[exponent_len..];
    if mantissa_octets.len() > MANTISSA_MAX_OCTETS {
        return Err(Error::range_violation(format!(
            "REAL mantissa with {} octets, at most {} are supported",
            mantissa_octets.len(),
            MANTISSA_MAX_OCTETS
        )));
    }
    let mantissa = NetworkEndian::read_uint(mantissa_octets, mantissa_octets.len());

    if mantissa == 0 {
        return Ok(if negative { -0.0 } else { 0.0 });
    }

    assemble(negative, mantissa, scale + exponent * base_bits)
}

/// Builds the IEEE 754 double of `mantissa * 2^exponent` bit by bit. Mantissa bits beyond the
/// precision of a double are truncated.
fn assemble(negative: bool, mantissa: u64, exponent: i32) -> Result<f64, Error> {
    let top = 63 - mantissa.leading_zeros() as i32;
    let normalized = exponent + top;

    if normalized > F64_EXPONENT_MAX {
        return Err(Error::range_violation(
            "REAL value exceeds the range of a double",
        ));
    }

    let bits = if normalized >= F64_EXPONENT_MIN {
        let fraction = if top >= F64_FRACTION_BITS {
            mantissa >> (top - F64_FRACTION_BITS)
        } else {
            mantissa << (F64_FRACTION_BITS - top)
        };
        (((normalized + F64_EXPONENT_BIAS) as u64) << F64_FRACTION_BITS)
            | (fraction & F64_FRACTION_MASK)
    } else {
        let shift = exponent - F64_SUBNORMAL_EXPONENT;
        let fraction = if shift >= 0 {
            mantissa << shift
        } else if -shift < 64 {
            mantissa >> -shift
        } else {
            0
        };
        if fraction == 0 {
            return Err(Error::range_violation(
                "REAL value is too small for a double",
            ));
        }
        fraction
    };

    let sign = if negative { F64_SIGN_BIT } else { 0 };
    Ok(f64::from_bits(sign | bits))
}

/// 8.5.7 with base 2 and a scale factor of zero. The mantissa is odd unless the value is
/// zero, the exponent uses one octet if possible and two octets otherwise. Nothing is written
/// if the exponent would fall below -1024.
pub fn encode_real(buffer: &mut OctetBuffer, value: f64) -> Result<(), Error> {
    if value.is_nan() {
        buffer.write_octet(SPECIAL_NOT_A_NUMBER);
    } else if value.is_infinite() {
        buffer.write_octet(if value.is_sign_positive() {
            SPECIAL_PLUS_INFINITY
        } else {
            SPECIAL_MINUS_INFINITY
        });
    } else if value == 0.0 {
        if value.is_sign_negative() {
            buffer.write_octet(SPECIAL_MINUS_ZERO);
        }
    } else {
        let bits = value.to_bits();
        let biased = ((bits >> F64_FRACTION_BITS) & F64_EXPONENT_MASK) as i32;
        let fraction = bits & F64_FRACTION_MASK;

        let (mut mantissa, mut exponent) = if biased == 0 {
            (fraction, F64_SUBNORMAL_EXPONENT)
        } else {
            (
                fraction | (1 << F64_FRACTION_BITS),
                biased - F64_EXPONENT_BIAS - F64_FRACTION_BITS,
            )
        };

        let trailing_zeros = mantissa.trailing_zeros();
        mantissa >>= trailing_zeros;
        exponent += trailing_zeros as i32;

        if exponent < EXPONENT_MIN {
            return Err(Error::range_violation(format!(
                "REAL value {:e} needs the exponent {}, the smallest supported is {}",
                value, exponent, EXPONENT_MIN
            )));
        }

        let mut first = BINARY_BIT | BINARY_BASE_2;
        if value.is_sign_negative() {
            first |= BINARY_SIGN_BIT;
        }

        if let Ok(exponent) = i8::try_from(exponent) {
            buffer.write_octet(first | BINARY_EXPONENT_ONE_OCTET);
            buffer.write_octet(exponent as u8);
        } else {
            // at most 971 for a double
            buffer.write_octet(first | BINARY_EXPONENT_TWO_OCTETS);
            buffer.write_octets(&(exponent as i16).to_be_bytes());
        }

        let mantissa_len = minimal_octet_count(mantissa);
        let mut octets = [0u8; 8];
        NetworkEndian::write_uint(&mut octets[..mantissa_len], mantissa, mantissa_len);
        buffer.write_octets(&octets[..mantissa_len]);
    }
    Ok(())
}
