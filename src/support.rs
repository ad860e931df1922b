use time::{Duration, PrimitiveDateTime};

use crate::mp4_time_zero;

/// Seconds since MP4 time zero (1904-01-01) as datetime.
/// `None` on overflow.
pub(crate) fn since_time_zero(seconds: u64) -> Option<PrimitiveDateTime> {
    let seconds = i64::try_from(seconds).ok()?;
    mp4_time_zero().checked_add(Duration::seconds(seconds))
}

/// String up to (excluding) the first zero byte,
/// or all of `bytes` if there is none.
/// Maps 0-255 to `char`, exceeding ascii.
pub(crate) fn null_terminated(bytes: &[u8]) -> String {
    bytes.iter()
        .take_while(|b| **b != 0)
        .map(|b| *b as char)
        .collect()
}

/// Counted string, i.e. first byte specifies number of bytes.
/// `None` if the count exceeds the data.
pub(crate) fn counted_string(bytes: &[u8]) -> Option<String> {
    let (count, rest) = bytes.split_first()?;
    let string = rest.get(..*count as usize)?;
    Some(null_terminated(string))
}

/// `hdlr` component name.
/// QuickTime uses a counted string, MP4 a null terminated one,
/// and some devices neither.
pub(crate) fn component_name(bytes: &[u8]) -> String {
    match bytes.first() {
        Some(count) if *count as usize + 1 == bytes.len() && *count > 0 => {
            counted_string(bytes).unwrap_or_default()
        }
        _ => null_terminated(bytes),
    }
}
