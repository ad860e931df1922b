use proptest::prelude::*;

use crate::{
    parse, parse_one, AtomKind, FourCC, Mdhd, Mvhd, ParseOptions, Parser, Payload, QtError,
    SampleTable, Tkhd, Url, Vmhd,
};

fn atom(name: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
    out.extend_from_slice(name);
    out.extend_from_slice(body);
    out
}

fn atom64(name: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = 1_u32.to_be_bytes().to_vec();
    out.extend_from_slice(name);
    out.extend_from_slice(&((body.len() + 16) as u64).to_be_bytes());
    out.extend_from_slice(body);
    out
}

fn container(name: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    atom(name, &children.concat())
}

/// Version and 3 byte flags.
fn full(version: u8, flags: u32) -> Vec<u8> {
    let mut out = vec![version];
    out.extend_from_slice(&flags.to_be_bytes()[1..]);
    out
}

fn mvhd_body(version: u8, creation: u64, time_scale: u32, duration: u64) -> Vec<u8> {
    let mut b = full(version, 0);
    match version {
        0 => {
            b.extend_from_slice(&(creation as u32).to_be_bytes());
            b.extend_from_slice(&(creation as u32).to_be_bytes());
            b.extend_from_slice(&time_scale.to_be_bytes());
            b.extend_from_slice(&(duration as u32).to_be_bytes());
        }
        _ => {
            b.extend_from_slice(&creation.to_be_bytes());
            b.extend_from_slice(&creation.to_be_bytes());
            b.extend_from_slice(&time_scale.to_be_bytes());
            b.extend_from_slice(&duration.to_be_bytes());
        }
    }
    b.extend_from_slice(&[0, 1, 0, 0]); // rate 1.0
    b.extend_from_slice(&[1, 0]); // volume 1.0
    b.extend_from_slice(&[0; 10]); // reserved
    b.extend_from_slice(&[0; 36]); // matrix
    for v in [0_u32, 0, 0, 0, 0, 0, 3] {
        b.extend_from_slice(&v.to_be_bytes());
    }
    b
}

fn tkhd_body(track_id: u32, duration: u32, width: u16, height: u16) -> Vec<u8> {
    let mut b = full(0, 0x000003);
    b.extend_from_slice(&[0; 8]); // creation, modification
    b.extend_from_slice(&track_id.to_be_bytes());
    b.extend_from_slice(&[0; 4]);
    b.extend_from_slice(&duration.to_be_bytes());
    b.extend_from_slice(&[0; 8]);
    b.extend_from_slice(&[0, 0, 0, 0]); // layer, alternate group
    b.extend_from_slice(&[0, 0]); // volume
    b.extend_from_slice(&[0; 2]);
    b.extend_from_slice(&[0; 36]);
    b.extend_from_slice(&width.to_be_bytes());
    b.extend_from_slice(&[0, 0]);
    b.extend_from_slice(&height.to_be_bytes());
    b.extend_from_slice(&[0, 0]);
    b
}

fn mdhd_body(time_scale: u32, duration: u32) -> Vec<u8> {
    let mut b = full(0, 0);
    b.extend_from_slice(&[0; 8]);
    b.extend_from_slice(&time_scale.to_be_bytes());
    b.extend_from_slice(&duration.to_be_bytes());
    b.extend_from_slice(&0x55C4_u16.to_be_bytes()); // "und"
    b.extend_from_slice(&[0, 0]);
    b
}

fn hdlr_body(sub_type: &[u8; 4], name: &[u8]) -> Vec<u8> {
    let mut b = full(0, 0);
    b.extend_from_slice(b"mhlr");
    b.extend_from_slice(sub_type);
    b.extend_from_slice(&[0; 12]);
    b.extend_from_slice(name);
    b
}

fn elst_body(entries: &[(u32, i32)]) -> Vec<u8> {
    let mut b = full(0, 0);
    b.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for (duration, time) in entries.iter() {
        b.extend_from_slice(&duration.to_be_bytes());
        b.extend_from_slice(&time.to_be_bytes());
        b.extend_from_slice(&[0, 1, 0, 0]);
    }
    b
}

/// A small but complete movie.
fn movie() -> Vec<u8> {
    let mut url = full(0, 0);
    url.extend_from_slice(b"file:///a.mov\0");
    let mut dref = full(0, 0);
    dref.extend_from_slice(&1_u32.to_be_bytes());
    dref.extend_from_slice(&atom(b"url ", &url));

    let mut stsd = full(0, 0);
    stsd.extend_from_slice(&1_u32.to_be_bytes());
    stsd.extend_from_slice(&[0xAB; 20]); // sample description, never decoded

    let mut vmhd = full(0, 1);
    vmhd.extend_from_slice(&[0, 0x40, 0x80, 0, 0x80, 0, 0x80, 0]);

    let mut ftyp = b"qt  ".to_vec();
    ftyp.extend_from_slice(&0x2005_0300_u32.to_be_bytes());
    ftyp.extend_from_slice(b"qt  ");

    [
        atom(b"ftyp", &ftyp),
        container(b"moov", &[
            atom(b"mvhd", &mvhd_body(0, 86_400, 600, 1200)),
            container(b"trak", &[
                atom(b"tkhd", &tkhd_body(1, 1200, 1920, 1080)),
                container(b"edts", &[atom(b"elst", &elst_body(&[(1200, 0)]))]),
                container(b"mdia", &[
                    atom(b"mdhd", &mdhd_body(24_000, 48_000)),
                    atom(b"hdlr", &hdlr_body(b"vide", b"\x0cVideoHandler")),
                    container(b"minf", &[
                        atom(b"vmhd", &vmhd),
                        container(b"dinf", &[atom(b"dref", &dref)]),
                        container(b"stbl", &[atom(b"stsd", &stsd)]),
                    ]),
                ]),
            ]),
        ]),
        atom(b"mdat", &[0xFF; 64]),
    ]
    .concat()
}

#[test]
fn ftyp_example() {
    let data = [
        0x00, 0x00, 0x00, 0x10, b'f', b't', b'y', b'p',
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x02, 0x00,
    ];
    let atoms = parse(&data[..]).unwrap();
    assert_eq!(atoms.len(), 1);
    let ftyp = &atoms[0];
    assert_eq!(ftyp.kind(), AtomKind::Ftyp);
    assert_eq!(ftyp.size(), 16);
    assert!(!ftyp.is_container());
    let typed = ftyp.get::<crate::Ftyp>().unwrap();
    assert_eq!(typed.major_brand, 1);
    assert_eq!(typed.minor_version, 512);
    assert_eq!(ftyp.brands(), Some(&[][..]));
}

#[test]
fn unknown_is_empty_container() {
    let atoms = parse(&b"\x00\x00\x00\x08zzzz"[..]).unwrap();
    assert_eq!(atoms.len(), 1);
    assert_eq!(atoms[0].kind(), AtomKind::Generic);
    assert!(atoms[0].is_container());
    assert!(atoms[0].children().is_empty());
    assert_eq!(atoms[0].name(), &FourCC::new(b"zzzz"));
}

#[test]
fn unknown_as_leaf() {
    let data = container(b"zzzz", &[atom(b"free", &[1, 2, 3])]);

    let atoms = parse(&data[..]).unwrap();
    assert_eq!(atoms[0].children().len(), 1);

    let options = ParseOptions::default().with_unknown_as_container(false);
    let atoms = Parser::with_options(&data[..], options).parse_sequence().unwrap();
    assert!(!atoms[0].is_container());
    assert!(atoms[0].children().is_empty());
    assert_eq!(atoms[0].consumed(), data.len() as u64);
}

#[test]
fn children_in_stream_order() {
    let data = container(b"moov", &[
        atom(b"free", &[]),
        atom(b"skip", &[0; 4]),
        atom(b"wide", &[]),
        container(b"udta", &[]),
    ]);
    let atoms = parse(&data[..]).unwrap();
    let names: Vec<String> = atoms[0].children().iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names, ["free", "skip", "wide", "udta"]);
    assert!(atoms[0].children()[3].children().is_empty());
    assert_eq!(atoms[0].children()[2].offset(), 8 + 8 + 12);
}

#[test]
fn full_movie() {
    let data = movie();
    let atoms = parse(&data[..]).unwrap();
    assert_eq!(atoms.len(), 3);
    assert_eq!(atoms.iter().map(|a| a.consumed()).sum::<u64>(), data.len() as u64);

    let ftyp = &atoms[0];
    assert_eq!(ftyp.get::<crate::Ftyp>().unwrap().major_brand(), FourCC::new(b"qt  "));
    assert_eq!(ftyp.brands(), Some(&[FourCC::new(b"qt  ")][..]));

    let moov = &atoms[1];
    let mvhd = moov.find_path("mvhd").and_then(|a| a.get::<Mvhd>()).unwrap();
    assert_eq!(mvhd.time_scale, 600);
    assert_eq!(mvhd.duration, 1200);
    assert_eq!(mvhd.duration().unwrap().as_seconds_f64(), 2.0);
    assert_eq!(mvhd.preferred_rate, 1.0);
    assert_eq!(mvhd.preferred_volume, 1.0);
    assert_eq!(mvhd.next_track_id, 3);
    assert_eq!(
        mvhd.creation_time().unwrap().date(),
        time::macros::date!(1904-01-02)
    );

    let tkhd = moov.find_path("trak/tkhd").and_then(|a| a.get::<Tkhd>()).unwrap();
    assert_eq!(tkhd.track_id, 1);
    assert!(tkhd.is_enabled());
    assert_eq!(tkhd.track_width, 1920.0);
    assert_eq!(tkhd.track_height, 1080.0);

    let elst = moov.find_path("trak/edts/elst").unwrap();
    assert_eq!(elst.edit_list().map(|e| e.len()), Some(1));
    assert_eq!(elst.edit_list().unwrap()[0].media_rate, 1.0);

    let mdhd = moov.find(&FourCC::new(b"mdhd")).and_then(|a| a.get::<Mdhd>()).unwrap();
    assert_eq!(mdhd.time_scale, 24_000);
    assert_eq!(mdhd.language().as_deref(), Some("und"));

    let hdlr = moov.find_path("trak/mdia/hdlr").unwrap();
    assert_eq!(hdlr.component_name(), Some("VideoHandler"));
    assert_eq!(hdlr.get::<crate::Hdlr>().unwrap().handler(), crate::ComponentType::Video);

    let vmhd = moov.find_path("trak/mdia/minf/vmhd").and_then(|a| a.get::<Vmhd>()).unwrap();
    assert_eq!(vmhd.graphics_mode, 0x40);
    assert_eq!(vmhd.rgb(), Some([0x8000; 3]));

    let dref = moov.find_path("trak/mdia/minf/dinf/dref").unwrap();
    assert!(dref.is_container());
    assert_eq!(dref.fields().uint("num_entries"), Some(1));
    let url = &dref.children()[0];
    assert_eq!(url.url(), Some("file:///a.mov"));
    assert!(!url.get::<Url>().unwrap().is_self_reference());
    assert!(url.get::<Mvhd>().is_none());

    let stsd = moov.find_path("trak/mdia/minf/stbl/stsd").unwrap();
    assert_eq!(stsd.get::<SampleTable>().unwrap().entry_count, 1);
    assert_eq!(stsd.consumed(), 8 + 8 + 20);

    let mdat = &atoms[2];
    assert_eq!(mdat.kind(), AtomKind::Mdat);
    assert!(mdat.children().is_empty());

    // one line per atom
    let listing = moov.to_string();
    assert_eq!(listing.lines().count(), moov.iter().count());
    assert!(listing.lines().any(|l| l.trim_start().starts_with("elst @")));
}

#[test]
fn edit_list_entries() {
    let data = atom(b"elst", &elst_body(&[(1000, -1), (2000, 0)]));
    assert_eq!(data.len(), 8 + 8 + 24);
    let elst = parse_one(&data[..]).unwrap().unwrap();
    let entries = elst.edit_list().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_empty());
    assert_eq!(entries[1].track_duration, 2000);
}

#[test]
fn edit_list_short_body() {
    let mut body = elst_body(&[(1000, 0), (2000, 0)]);
    body.truncate(body.len() - 6);
    let data = [atom(b"free", &[]), atom(b"elst", &body)].concat();

    let err = parse(&data[..]).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.atoms.len(), 1);
    let partial = err.partial.unwrap();
    assert_eq!(partial.name(), &FourCC::new(b"elst"));
    assert_eq!(partial.edit_list().map(|e| e.len()), Some(1));
}

#[test]
fn unread_span_is_discarded() {
    let mut smhd = full(0, 0);
    smhd.extend_from_slice(&[0, 0, 0, 0]);
    smhd.extend_from_slice(&[9; 7]); // beyond schema
    let data = [atom(b"smhd", &smhd), atom(b"free", &[])].concat();

    let atoms = parse(&data[..]).unwrap();
    assert_eq!(atoms.len(), 2);
    assert_eq!(atoms[0].consumed(), 8 + 15);
    assert_eq!(atoms[1].offset(), 8 + 15);
    assert_eq!(atoms[1].name(), &FourCC::new(b"free"));
}

#[test]
fn open_ended_last_atom() {
    let data = [atom(b"ftyp", &[0; 8]), b"\x00\x00\x00\x00mdat".to_vec(), vec![7; 100]].concat();
    let atoms = parse(&data[..]).unwrap();
    assert_eq!(atoms.len(), 2);
    assert_eq!(atoms[1].size(), 0);
    assert!(atoms[1].header().is_open_ended());
    assert_eq!(atoms[1].consumed(), 108);
}

#[test]
fn open_ended_nested_child() {
    // `skip` has size 0 and runs to the end of `moov`
    let mut skip = b"\x00\x00\x00\x00skip".to_vec();
    skip.extend_from_slice(&[1, 2, 3, 4]);
    let data = [
        container(b"moov", &[atom(b"free", &[]), skip]),
        atom(b"wide", &[]),
    ].concat();

    let atoms = parse(&data[..]).unwrap();
    assert_eq!(atoms.len(), 2);
    let moov = &atoms[0];
    assert_eq!(moov.consumed(), 28);
    assert_eq!(moov.children().len(), 2);
    let skip = &moov.children()[1];
    assert_eq!(skip.size(), 0);
    assert_eq!(skip.offset(), 16);
    assert_eq!(skip.consumed(), 12);
    assert_eq!(atoms[1].name(), &FourCC::new(b"wide"));
    assert_eq!(atoms[1].offset(), 28);
}

#[test]
fn open_ended_top_level_container() {
    let data = [
        atom(b"ftyp", &[0; 8]),
        b"\x00\x00\x00\x00moov".to_vec(),
        atom(b"mvhd", &mvhd_body(0, 0, 600, 600)),
        container(b"trak", &[atom(b"free", &[])]),
    ].concat();

    let atoms = parse(&data[..]).unwrap();
    assert_eq!(atoms.len(), 2);
    let moov = &atoms[1];
    assert!(moov.header().is_open_ended());
    assert_eq!(moov.consumed(), data.len() as u64 - 16);
    let names: Vec<String> = moov.children().iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names, ["mvhd", "trak"]);
    assert!(moov.find_path("trak/free").is_some());
}

#[test]
fn extended_size() {
    let data = [atom64(b"free", &[1, 2, 3, 4]), atom(b"skip", &[])].concat();
    let atoms = parse(&data[..]).unwrap();
    assert_eq!(atoms[0].header_size(), 16);
    assert_eq!(atoms[0].size(), 20);
    assert_eq!(atoms[0].consumed(), 20);
    assert_eq!(atoms[1].offset(), 20);
}

#[test]
fn version_1_header() {
    let data = atom(b"mvhd", &mvhd_body(1, 1 << 33, 1000, 1 << 34));
    let mvhd = parse_one(&data[..]).unwrap().unwrap().get::<Mvhd>().unwrap();
    assert_eq!(mvhd.version, 1);
    assert_eq!(mvhd.creation_time, 1 << 33);
    assert_eq!(mvhd.duration, 1 << 34);
    assert_eq!(mvhd.next_track_id, 3);
}

#[test]
fn truncated_mid_header() {
    let data = [atom(b"ftyp", &[0; 8]), vec![0, 0, 0, 8, b'f']].concat();
    let err = parse(&data[..]).unwrap_err();
    assert!(matches!(err.error, QtError::Truncated { offset: 16, needed: 8, available: 5 }));
    assert_eq!(err.atoms.len(), 1);
    assert!(err.partial.is_none());
}

#[test]
fn truncated_mid_schema() {
    let data = atom(b"mdhd", &[0; 10]);
    let err = parse(&data[..]).unwrap_err();
    assert!(err.is_truncated());
    let partial = err.partial.unwrap();
    assert_eq!(partial.kind(), AtomKind::Mdhd);
    assert!(partial.get::<Mdhd>().is_none());
    assert_eq!(partial.fields().len(), 3);
}

#[test]
fn child_beyond_parent() {
    // `free` declares 32 bytes, but `moov` only has room for 16
    let mut free = atom(b"free", &[0; 8]);
    free[3] = 32;
    let data = [container(b"moov", &[free]), atom(b"skip", &[])].concat();

    let err = parse(&data[..]).unwrap_err();
    assert!(matches!(err.error, QtError::Truncated { offset: 24, needed: 16, available: 0 }));
    assert!(err.atoms.is_empty());
    let moov = err.partial.unwrap();
    assert_eq!(moov.name(), &FourCC::new(b"moov"));
    assert_eq!(moov.children().len(), 1);
    assert_eq!(moov.children()[0].consumed(), 16);
}

#[test]
fn truncated_stream_in_nested_child() {
    let data = movie();
    // cuts into the opaque part of `stsd`
    let cut = &data[..data.len() - 64 - 8 - 10];
    let err = parse(cut).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.atoms.len(), 1);

    let recovered = err.into_recovered();
    assert_eq!(recovered.len(), 2);
    let moov = &recovered[1];
    assert!(moov.find(&FourCC::new(b"mvhd")).is_some());
    assert!(moov.find(&FourCC::new(b"stsd")).is_some());
}

#[test]
fn invalid_size() {
    let data = b"\x00\x00\x00\x04free".to_vec();
    let err = parse(&data[..]).unwrap_err();
    assert!(matches!(err.error, QtError::InvalidSize { offset: 0, size: 4, header_size: 8 }));
}

#[test]
fn extended_size_past_u64_max() {
    let mut mdat = b"\x00\x00\x00\x01mdat".to_vec();
    mdat.extend_from_slice(&u64::MAX.to_be_bytes());
    let data = [atom(b"free", &[]), mdat].concat();

    let err = parse(&data[..]).unwrap_err();
    assert!(matches!(
        err.error,
        QtError::InvalidSize { offset: 8, size: u64::MAX, header_size: 16 }
    ));
    assert_eq!(err.atoms.len(), 1);
    assert_eq!(err.partial.map(|a| a.consumed()), Some(16));
}

#[test]
fn depth_exceeded() {
    let data = container(b"moov", &[container(b"trak", &[atom(b"free", &[])])]);
    let options = ParseOptions::new().with_max_depth(1);
    let err = Parser::with_options(&data[..], options).parse_sequence().unwrap_err();
    assert!(matches!(err.error, QtError::DepthExceeded { depth: 2, max: 1 }));
    let moov = err.partial.unwrap();
    assert_eq!(moov.children()[0].name(), &FourCC::new(b"trak"));
    assert_eq!(moov.children()[0].children()[0].name(), &FourCC::new(b"free"));
}

#[test]
fn iterate_until_failure() {
    let data = [atom(b"free", &[]), atom(b"skip", &[]), vec![0, 0]].concat();
    let mut parser = Parser::new(&data[..]);
    assert!(matches!(parser.next(), Some(Ok(_))));
    assert!(matches!(parser.next(), Some(Ok(_))));
    assert!(matches!(parser.next(), Some(Err(_))));
    assert!(parser.next().is_none());
    assert_eq!(parser.position(), data.len() as u64);
}

#[test]
fn empty_stream() {
    let empty: &[u8] = &[];
    assert!(parse_one(empty).unwrap().is_none());
    assert!(parse(empty).unwrap().is_empty());
    assert_eq!(Parser::new(empty).count(), 0);
}

proptest! {
    #[test]
    fn consumed_bytes_cover_stream(
        items in prop::collection::vec((0_usize..3, prop::collection::vec(any::<u8>(), 0..32)), 0..8)
    ) {
        let encoded: Vec<Vec<u8>> = items.iter()
            .map(|(kind, body)| match kind {
                0 => atom(b"free", body),
                1 => atom(b"mdat", body),
                _ => container(b"moov", &[atom(b"skip", body), atom(b"free", &[])]),
            })
            .collect();
        let data = encoded.concat();

        let atoms = parse(&data[..]).unwrap();
        prop_assert_eq!(atoms.len(), items.len());

        let mut offset = 0;
        for (decoded, bytes) in atoms.iter().zip(encoded.iter()) {
            prop_assert_eq!(decoded.offset(), offset);
            prop_assert_eq!(decoded.consumed(), bytes.len() as u64);
            prop_assert_eq!(decoded.size(), bytes.len() as u64);
            offset += decoded.consumed();
        }
        prop_assert_eq!(offset, data.len() as u64);
    }
}
