//! Track header atom (`tkhd`).
//!
//! Location: `moov/trak[multiple]/tkhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/track_header_atom>

use time::PrimitiveDateTime;

use super::FieldKind;
use crate::support::since_time_zero;

typed_atom! {
    /// Track header atom (`tkhd`).
    ///
    /// Location: `moov/trak[multiple]/tkhd`
    ///
    /// See: <https://developer.apple.com/documentation/quicktime-file-format/track_header_atom>
    pub struct Tkhd for [Tkhd] {
        version: u8 = FieldKind::U8,
        /// Bit 0: enabled, bit 1: in movie,
        /// bit 2: in preview, bit 3: in poster.
        flags: Vec<u8> = FieldKind::Bytes(3),
        /// Seconds since midnight, 1904-01-01 UTC
        creation_time: u64 = FieldKind::Versioned,
        /// Seconds since midnight, 1904-01-01 UTC
        modification_time: u64 = FieldKind::Versioned,
        /// Uniquely identifies the track.
        /// Value 0 cannot be used.
        track_id: u32 = FieldKind::U32,
        reserved1: Vec<u8> = FieldKind::Bytes(4),
        /// Duration of this track,
        /// in the movie's time coordinate system.
        duration: u64 = FieldKind::Versioned,
        reserved2: Vec<u8> = FieldKind::Bytes(8),
        /// This track's spatial priority in its movie.
        layer: u16 = FieldKind::U16,
        /// Identifies a collection of movie tracks that contain alternate data for one another.
        alternate_group: u16 = FieldKind::U16,
        /// 1.0 indicates normal volume.
        volume: f64 = FieldKind::Fixed(2),
        reserved3: Vec<u8> = FieldKind::Bytes(2),
        matrix_structure: Vec<u8> = FieldKind::Bytes(36),
        /// Width of this track in pixels.
        track_width: f64 = FieldKind::Fixed(4),
        /// Height of this track in pixels.
        track_height: f64 = FieldKind::Fixed(4),
    }
}

impl Tkhd {
    /// Track enabled flag.
    pub fn is_enabled(&self) -> bool {
        self.flags.last().is_some_and(|f| f & 1 == 1)
    }

    /// This track's duration in seconds,
    /// given the movie time scale from `mvhd`.
    pub fn duration_sec(&self, time_scale: u32) -> Option<f64> {
        match time_scale {
            0 => None,
            scale => Some(self.duration as f64 / scale as f64),
        }
    }

    /// Creation datetime for this track.
    pub fn creation_time(&self) -> Option<PrimitiveDateTime> {
        since_time_zero(self.creation_time)
    }

    /// Modification datetime for this track.
    pub fn modification_time(&self) -> Option<PrimitiveDateTime> {
        since_time_zero(self.modification_time)
    }
}
