//! Media header atom (`mdhd`).
//!
//! Similar to `mvhd`,
//! but only describes a single track (`trak`).
//!
//! Location: `moov/trak/mdia/mdhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/media_header_atom>

use time::{ext::NumericalDuration, Duration, PrimitiveDateTime};

use super::FieldKind;
use crate::support::since_time_zero;

typed_atom! {
    /// Media header atom ('mdhd'). One per track (`trak`).
    /// Specifies the characteristics of a media (`mdia`), including time scale and duration.
    pub struct Mdhd for [Mdhd] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        creation_time: u64 = FieldKind::Versioned,
        modification_time: u64 = FieldKind::Versioned,
        time_scale: u32 = FieldKind::U32,
        duration: u64 = FieldKind::Versioned,
        /// Packed ISO-639-2/T language code
        /// (QuickTime also allows Macintosh language codes < 0x400).
        language: u16 = FieldKind::U16,
        quality: u16 = FieldKind::U16,
    }
}

impl Mdhd {
    /// Media duration. `None` if time scale is 0.
    pub fn duration(&self) -> Option<Duration> {
        match self.time_scale {
            0 => None,
            scale => Some((self.duration as f64 / scale as f64).seconds()),
        }
    }

    pub fn creation_time(&self) -> Option<PrimitiveDateTime> {
        since_time_zero(self.creation_time)
    }

    pub fn modification_time(&self) -> Option<PrimitiveDateTime> {
        since_time_zero(self.modification_time)
    }

    /// Unpacks the three letter ISO-639-2/T language code,
    /// e.g. `und`. Returns `None` for Macintosh language codes.
    pub fn language(&self) -> Option<String> {
        if self.language < 0x400 {
            return None;
        }
        Some(
            [10_u16, 5, 0]
                .iter()
                .map(|shift| (((self.language >> shift) & 0x1F) as u8 + 0x60) as char)
                .collect(),
        )
    }
}
