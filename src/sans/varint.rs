//! Base-128 variable-length unsigned integers.
//!
//! Each byte carries seven bits of the value, least significant group first.
//! A set top bit marks that another byte follows.

use alloc::vec::Vec;

use super::cursor::Corruption;

/// The longest encoding of a 64-bit value.
pub const MAX_LEN: usize = 10;

/// Decode a variable-length integer from the start of a slice.
///
/// Returns the value and the number of bytes it occupied.
pub fn decode(r: &[u8]) -> Result<(u64, usize), Corruption> {
    let mut value = 0;

    for (i, &b) in r.iter().take(MAX_LEN).enumerate() {
        let bits = u64::from(b & 0x7F);
        let shift = 7 * i as u32;

        // The tenth byte may only contribute the 64th bit, and must end.
        if i == MAX_LEN - 1 && (bits > 1 || b & 0x80 != 0) {
            Err(Corruption::VarintOverflow)?;
        }

        value |= bits << shift;

        if b & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(Corruption::EndOfSlice {
        needed: r.len() + 1,
        remaining: r.len(),
    })
}

/// Append the encoding of a value to a buffer.
pub fn encode(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let b = (value & 0x7F) as u8;
        value >>= 7;

        if value == 0 {
            out.push(b);
            break;
        }

        out.push(b | 0x80);
    }
}
