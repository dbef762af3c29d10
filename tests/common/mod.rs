#![allow(dead_code)]

//! Builders of synthetic GRIB messages.

pub mod grib1;
pub mod grib2;

/// Sign-and-magnitude encoding of `value` in `n_bytes` bytes.
pub fn sign_magnitude(value: i64, n_bytes: usize) -> Vec<u8> {
    let mut bytes = value.unsigned_abs().to_be_bytes()[8 - n_bytes..].to_vec();
    if value < 0 {
        bytes[0] |= 0x80;
    }
    bytes
}

/// Packs `values` into `nbits`-bit big-endian fields, padding the last octet
/// with zero bits. Returns the packed octets and the number of padding bits.
pub fn pack_bits(values: &[u32], nbits: usize) -> (Vec<u8>, u8) {
    let total_bits = values.len() * nbits;
    let mut buf = vec![0_u8; total_bits.div_ceil(8)];
    for (k, value) in values.iter().enumerate() {
        for bit in 0..nbits {
            if (value >> (nbits - 1 - bit)) & 1 == 1 {
                let pos = k * nbits + bit;
                buf[pos / 8] |= 0x80 >> (pos % 8);
            }
        }
    }
    let padding = (buf.len() * 8 - total_bits) as u8;
    (buf, padding)
}

/// Bit map with the given points present.
pub fn bitmap(present: &[bool]) -> Vec<u8> {
    let values = present.iter().map(|p| u32::from(*p)).collect::<Vec<_>>();
    pack_bits(&values, 1).0
}

pub const IBM_1_8499522E_6: [u8; 4] = [0x3c, 0x1f, 0x09, 0x7c];
pub const IBM_270_466796875: [u8; 4] = [0x43, 0x10, 0xe7, 0x78];
pub const IBM_248_018386841: [u8; 4] = [0x42, 0xf8, 0x04, 0xb5];
pub const IBM_118_625: [u8; 4] = [0x42, 0x76, 0xa0, 0x00];
pub const IBM_90: [u8; 4] = [0x42, 0x5a, 0x00, 0x00];
pub const IBM_ZERO: [u8; 4] = [0x00, 0x00, 0x00, 0x00];
