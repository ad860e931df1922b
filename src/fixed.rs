//! Fixed-point numbers (8.8 and 16.16).
//!
//! Both formats are decoded as `integer + fraction / max_fraction`,
//! where `max_fraction` is the largest value the fraction
//! can hold (`255` and `65535` respectively), not `2^n`.

/// 8.8 fixed-point, e.g. preferred volume in `mvhd`.
pub fn fixed_8_8(bytes: [u8; 2]) -> f64 {
    bytes[0] as f64 + bytes[1] as f64 / u8::MAX as f64
}

/// 16.16 fixed-point, e.g. preferred rate in `mvhd`
/// or track width and height in `tkhd`.
pub fn fixed_16_16(bytes: [u8; 4]) -> f64 {
    let integer = u16::from_be_bytes([bytes[0], bytes[1]]);
    let fraction = u16::from_be_bytes([bytes[2], bytes[3]]);
    integer as f64 + fraction as f64 / u16::MAX as f64
}

/// Decodes a fixed-point number of `bytes.len()` bytes.
/// Returns `None` for widths other than 2 or 4.
pub fn fixed(bytes: &[u8]) -> Option<f64> {
    match bytes {
        [i, f] => Some(fixed_8_8([*i, *f])),
        [a, b, c, d] => Some(fixed_16_16([*a, *b, *c, *d])),
        _ => None,
    }
}
