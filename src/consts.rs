use time::{macros::datetime, PrimitiveDateTime};

/// Header size for atoms with a 32-bit size.
pub const HEADER_SIZE: u8 = 8;

/// Header size for atoms with a 64-bit (extended) size,
/// signalled by a 32-bit size of `1`.
pub const HEADER_SIZE_EXTENDED: u8 = 16;

/// Default maximum nesting depth.
/// Real files rarely exceed 10 levels
/// (`moov/trak/mdia/minf/stbl/...`).
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Time zero for MP4/QuickTime containers. Midnight January 1, 1904.
pub const fn mp4_time_zero() -> PrimitiveDateTime {
    datetime!(1904-01-01 0:00)
}
