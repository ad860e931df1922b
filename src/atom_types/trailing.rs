//! Decoders for leaf data following the fixed fields.

use std::io::{Cursor, Read};

use binrw::{BinRead, BinReaderExt};

use crate::{
    fixed::fixed_16_16,
    reader::{AtomReader, Span},
    support::{component_name, null_terminated},
    FourCC, QtError,
};

use super::{Fields, Trailing};

/// Size in bytes of a single edit list entry.
pub(crate) const EDIT_LIST_ENTRY_SIZE: u64 = 12;

/// Data decoded after an atom's fixed fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    None,
    /// `elst` entries.
    EditList(Vec<EditListEntry>),
    /// `alis` record, kept opaque.
    Alias(Vec<u8>),
    /// `url ` data and the string before its first zero byte.
    Url { data: Vec<u8>, url: String },
    /// `ftyp` compatible brands.
    Brands(Vec<FourCC>),
    /// `hdlr` component name.
    ComponentName(String),
}

/// Single edit in an edit list (`elst`).
#[derive(Debug, Clone, PartialEq, BinRead)]
#[br(big)]
pub struct EditListEntry {
    /// Unscaled duration of this edit, in movie time scale.
    pub track_duration: u32,
    /// Starting time within the media of this edit,
    /// in media time scale. `-1` for an empty edit.
    pub media_time: i32,
    /// Relative rate at which to play the media (16.16 fixed-point).
    #[br(map(|data: [u8; 4]| fixed_16_16(data)))]
    pub media_rate: f64,
}

impl EditListEntry {
    /// `true` for an empty edit, i.e. a gap in the track.
    pub fn is_empty(&self) -> bool {
        self.media_time == -1
    }
}

/// Runs the `trailing` decoder over what is left of `span`,
/// storing the result in `payload`. On failure `payload`
/// holds whatever was decoded before it.
pub(crate) fn decode<R: Read>(
    reader: &mut AtomReader<R>,
    span: Span,
    trailing: Trailing,
    fields: &Fields,
    payload: &mut Payload,
) -> Result<(), QtError> {
    match trailing {
        Trailing::EditList => {
            let count = fields.uint("num_edits").unwrap_or(0);
            // Guard allocation against bogus counts
            let capacity = match reader.remaining(span) {
                Some(rem) => count.min(rem / EDIT_LIST_ENTRY_SIZE),
                None => count.min(1024),
            };
            *payload = Payload::EditList(Vec::with_capacity(capacity as usize));
            if let Payload::EditList(entries) = payload {
                for _ in 0..count {
                    let buf = reader.read_array::<12>(span)?;
                    entries.push(Cursor::new(buf).read_be::<EditListEntry>()?);
                }
            }
        }
        Trailing::Alias => {
            *payload = Payload::Alias(reader.read_to_end(span)?);
        }
        Trailing::Url => {
            let data = reader.read_to_end(span)?;
            let url = null_terminated(&data);
            *payload = Payload::Url { data, url };
        }
        Trailing::Brands => {
            let data = reader.read_to_end(span)?;
            let brands = data
                .chunks_exact(4)
                .map(|c| FourCC([c[0], c[1], c[2], c[3]]))
                .collect();
            *payload = Payload::Brands(brands);
        }
        Trailing::ComponentName => {
            let data = reader.read_to_end(span)?;
            *payload = Payload::ComponentName(component_name(&data));
        }
    }

    Ok(())
}
