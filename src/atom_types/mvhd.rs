//! Movie header atom (`mvhd`).
//!
//! Location: `moov/mvhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/movie_header_atom>

use time::{ext::NumericalDuration, Duration, PrimitiveDateTime};

use super::FieldKind;
use crate::support::since_time_zero;

typed_atom! {
    /// Movie header atom (`mvhd`).
    ///
    /// Location: `moov/mvhd`
    ///
    /// See: <https://developer.apple.com/documentation/quicktime-file-format/movie_header_atom>
    pub struct Mvhd for [Mvhd] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        /// Seconds since midnight, 1904-01-01 UTC
        creation_time: u64 = FieldKind::Versioned,
        /// Seconds since midnight, 1904-01-01 UTC
        modification_time: u64 = FieldKind::Versioned,
        /// Number of time units that pass in one second
        time_scale: u32 = FieldKind::U32,
        /// Unscaled duration. I.e. "time units"
        /// that require dividing by time scale
        /// to derive a value in seconds.
        ///
        /// Corresponds to the longest track.
        duration: u64 = FieldKind::Versioned,
        /// Fixed point number (16.16)
        /// representing preferred play rate
        /// (1.0 = normal playback).
        preferred_rate: f64 = FieldKind::Fixed(4),
        /// Fixed point number (8.8)
        /// representing preferred volume
        /// (1.0 = full volume).
        preferred_volume: f64 = FieldKind::Fixed(2),
        reserved: Vec<u8> = FieldKind::Bytes(10),
        /// Row-major 3x3 matrix
        matrix: Vec<u8> = FieldKind::Bytes(36),
        preview_time: u32 = FieldKind::U32,
        preview_duration: u32 = FieldKind::U32,
        poster_time: u32 = FieldKind::U32,
        selection_time: u32 = FieldKind::U32,
        selection_duration: u32 = FieldKind::U32,
        current_time: u32 = FieldKind::U32,
        next_track_id: u32 = FieldKind::U32,
    }
}

impl Mvhd {
    /// Creation time as UTC datetime.
    /// May default to MP4 time zero
    /// `1904-01-01 00:00:00` depending on device and settings.
    pub fn creation_time(&self) -> Option<PrimitiveDateTime> {
        since_time_zero(self.creation_time)
    }

    /// Modification time as UTC datetime.
    pub fn modification_time(&self) -> Option<PrimitiveDateTime> {
        since_time_zero(self.modification_time)
    }

    /// Duration of the longest track.
    /// `None` if time scale is 0.
    pub fn duration(&self) -> Option<Duration> {
        match self.time_scale {
            0 => None,
            scale => Some((self.duration as f64 / scale as f64).seconds()),
        }
    }
}
