//! # Big-Endian Field Readers
//!
//! Primitive readers for the fixed-offset fields of an LHT65N uplink. Every read
//! is bounds checked against the payload and fails with
//! [`DecodeError::OutOfBounds`] instead of yielding a partial value.

use crate::error::DecodeError;
use nom::{
    number::complete::{be_i16, be_u16, be_u32, be_u8},
    IResult,
};

fn read_be<'a, T>(
    bytes: &'a [u8],
    offset: usize,
    size: usize,
    parser: impl Fn(&'a [u8]) -> IResult<&'a [u8], T>,
) -> Result<T, DecodeError> {
    let out_of_bounds = || DecodeError::OutOfBounds {
        offset,
        size,
        len: bytes.len(),
    };

    let end = offset.checked_add(size).ok_or_else(out_of_bounds)?;
    let field = bytes.get(offset..end).ok_or_else(out_of_bounds)?;

    parser(field)
        .map(|(_, value)| value)
        .map_err(|_| out_of_bounds())
}

/// Reads a single byte.
pub fn read_u8(bytes: &[u8], offset: usize) -> Result<u8, DecodeError> {
    read_be(bytes, offset, 1, be_u8)
}

/// Reads a big-endian 16-bit value and sign-extends it.
pub fn read_signed_be16(bytes: &[u8], offset: usize) -> Result<i16, DecodeError> {
    read_be(bytes, offset, 2, be_i16)
}

/// Reads a big-endian unsigned 16-bit value.
pub fn read_unsigned_be16(bytes: &[u8], offset: usize) -> Result<u16, DecodeError> {
    read_be(bytes, offset, 2, be_u16)
}

/// Reads a big-endian unsigned 32-bit value.
pub fn read_unsigned_be32(bytes: &[u8], offset: usize) -> Result<u32, DecodeError> {
    read_be(bytes, offset, 4, be_u32)
}

/// Signed hundredths, e.g. `0x0A31` -> 26.09.
pub fn read_centi_celsius(bytes: &[u8], offset: usize) -> Result<f64, DecodeError> {
    Ok(f64::from(read_signed_be16(bytes, offset)?) / 100.0)
}

/// 12-bit relative humidity in tenths of a percent.
pub fn read_humidity(bytes: &[u8], offset: usize) -> Result<f64, DecodeError> {
    Ok(f64::from(read_unsigned_be16(bytes, offset)? & 0x0FFF) / 10.0)
}
