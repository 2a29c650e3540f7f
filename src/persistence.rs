//! Low-level primitives for the binary persisted-state format.
//!
//! All integers are 4-byte signed little-endian, strings are length-prefixed
//! UTF-8 (an `i32` byte count followed by the bytes), and floating-point
//! values are 8-byte IEEE-754 little-endian. Truncation anywhere surfaces as
//! a persistence error rather than a bare IO error.

use std::io::{ErrorKind, Read, Write};

use crate::error::{MinervaError, Result};

/// Upper bound on a persisted identifier's byte length; anything larger is
/// treated as a corrupt length prefix.
const MAX_STRING_LEN: i32 = 4096;

pub(crate) fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

pub(crate) fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

pub(crate) fn write_f64<W: Write>(writer: &mut W, value: f64) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

pub(crate) fn read_f64<R: Read>(reader: &mut R) -> Result<f64> {
    let mut buf = [0u8; 8];
    read_exact(reader, &mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

pub(crate) fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    write_i32(writer, value.len() as i32)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

pub(crate) fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_i32(reader)?;
    if !(0..=MAX_STRING_LEN).contains(&len) {
        return Err(MinervaError::persistence(format!(
            "invalid string length {}",
            len
        )));
    }
    let mut buf = vec![0u8; len as usize];
    read_exact(reader, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|_| MinervaError::persistence("string is not valid UTF-8".to_string()))
}

/// Read a count field that must be at least 1 (layer counts and widths).
pub(crate) fn read_count<R: Read>(reader: &mut R, what: &str) -> Result<usize> {
    let value = read_i32(reader)?;
    if value < 1 {
        return Err(MinervaError::persistence(format!(
            "invalid {}: {}",
            what, value
        )));
    }
    Ok(value as usize)
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|err| {
        if err.kind() == ErrorKind::UnexpectedEof {
            MinervaError::persistence("unexpected end of persisted state".to_string())
        } else {
            MinervaError::from(err)
        }
    })
}
