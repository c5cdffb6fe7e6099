//! Fixed-width layout primitives.
//!
//! Account state and instruction data share the same wire conventions:
//! single-byte tags, 8-byte little-endian unsigned integers, raw 32-byte
//! public keys. No padding and no length prefixes; every width is known
//! from the type alone.

use {
    crate::error::EscrowError,
    solana_program::pubkey::{Pubkey, PUBKEY_BYTES},
    std::convert::TryInto,
};

/// Append a single byte.
pub fn pack_u8(value: u8, buf: &mut Vec<u8>) {
    buf.push(value);
}

/// Append a u64 as 8 little-endian bytes.
pub fn pack_u64(value: u64, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Append a pubkey as its raw 32 bytes.
pub fn pack_pubkey(value: &Pubkey, buf: &mut Vec<u8>) {
    buf.extend_from_slice(value.as_ref());
}

/// Split a single byte off the front of `input`.
pub fn unpack_u8(input: &[u8]) -> Result<(u8, &[u8]), EscrowError> {
    let (&byte, rest) = input.split_first().ok_or(EscrowError::LengthMismatch)?;
    Ok((byte, rest))
}

/// Split a little-endian u64 off the front of `input`.
pub fn unpack_u64(input: &[u8]) -> Result<(u64, &[u8]), EscrowError> {
    if input.len() < 8 {
        return Err(EscrowError::LengthMismatch);
    }
    let (bytes, rest) = input.split_at(8);
    let value = bytes
        .try_into()
        .map(u64::from_le_bytes)
        .map_err(|_| EscrowError::LengthMismatch)?;
    Ok((value, rest))
}

/// Split a pubkey off the front of `input`.
pub fn unpack_pubkey(input: &[u8]) -> Result<(Pubkey, &[u8]), EscrowError> {
    if input.len() < PUBKEY_BYTES {
        return Err(EscrowError::LengthMismatch);
    }
    let (key, rest) = input.split_at(PUBKEY_BYTES);
    Ok((Pubkey::new(key), rest))
}
