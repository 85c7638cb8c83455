//! End-to-end decoding tests against synthesized XNO containers.

use glam::Vec3;
use pretty_assertions::assert_eq;
use segann::prelude::*;

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_f32(buf: &mut Vec<u8>, v: f32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_section(buf: &mut Vec<u8>, tag: &[u8; 4], stored_size: u32) {
    buf.extend_from_slice(tag);
    push_u32(buf, stored_size);
}

fn push_trailers(buf: &mut Vec<u8>) {
    push_section(buf, b"NOF0", 0);
    push_section(buf, b"NFN0", 0);
    push_section(buf, b"NEND", 0);
}

/// `NXIF` with no content sections, root address 16, then the trailers.
fn minimal_container() -> Vec<u8> {
    let mut buf = Vec::new();
    push_section(&mut buf, b"NXIF", 8);
    push_u32(&mut buf, 0); // section count
    push_u32(&mut buf, 16); // root address
    push_trailers(&mut buf);
    assert_eq!(buf.len(), 40);
    buf
}

/// One `NXTL` section with two entries, eight bytes of undecoded slack before
/// the section end, root address 16.
fn texture_container() -> Vec<u8> {
    let mut buf = Vec::new();
    push_section(&mut buf, b"NXIF", 8);
    push_u32(&mut buf, 1);
    push_u32(&mut buf, 16);

    // NXTL spans 16..96; the decoder stops at 88 and the dispatcher must
    // carry the cursor over the slack to the frame end.
    push_section(&mut buf, b"NXTL", 72);
    push_u32(&mut buf, 12); // entry-list locator -> 28
    push_u32(&mut buf, 2); // 28: entry count
    push_u32(&mut buf, 20); // 32: list address -> 36

    // Slot 0 at 36: 4 uninterpreted bytes, name address, size, 8 slack bytes.
    push_u32(&mut buf, 0xdeadbeef);
    push_u32(&mut buf, 60); // name -> 76
    push_u32(&mut buf, 1111);
    buf.extend_from_slice(&[0u8; 8]);

    // Slot 1 at 56.
    push_u32(&mut buf, 0xdeadbeef);
    push_u32(&mut buf, 66); // name -> 82
    push_u32(&mut buf, 2222);
    buf.extend_from_slice(&[0u8; 8]);

    assert_eq!(buf.len(), 76);
    buf.extend_from_slice(b"tex_a\0");
    buf.extend_from_slice(b"tex_b\0");
    buf.extend_from_slice(&[0u8; 8]); // section slack, 88..96

    assert_eq!(buf.len(), 96);
    push_trailers(&mut buf);
    buf
}

/// One `NXOB` section: bounding sphere, two index entries with strip sizes
/// [3, 4] and [4], root address 16.
fn object_container() -> Vec<u8> {
    let mut buf = Vec::new();
    push_section(&mut buf, b"NXIF", 8);
    push_u32(&mut buf, 1);
    push_u32(&mut buf, 16);

    push_section(&mut buf, b"NXOB", 144); // spans 16..168
    push_u32(&mut buf, 16); // body -> 32
    push_u32(&mut buf, 5); // object flags

    // Body at 32.
    push_f32(&mut buf, 1.0);
    push_f32(&mut buf, 2.0);
    push_f32(&mut buf, 3.0);
    push_f32(&mut buf, 4.5); // radius

    push_u32(&mut buf, 0); // 48: material parts
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0); // 56: vertex parts
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 2); // 64: index parts
    push_u32(&mut buf, 76); // -> 92
    push_u32(&mut buf, 0); // 72: bone parts
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 0); // 80: mesh
    push_u32(&mut buf, 0);
    push_u32(&mut buf, 3); // 88: texture count

    // Index-part entries at 92.
    push_u32(&mut buf, 7); // entry 0 flags
    push_u32(&mut buf, 92); // -> 108
    push_u32(&mut buf, 9); // entry 1 flags
    push_u32(&mut buf, 126); // -> 142

    // Entry 0 at 108: 7 indices in strips of 3 and 4.
    assert_eq!(buf.len(), 108);
    push_u32(&mut buf, 7);
    push_u32(&mut buf, 2);
    push_u32(&mut buf, 108); // strip sizes -> 124
    push_u32(&mut buf, 112); // indices -> 128
    push_u16(&mut buf, 3);
    push_u16(&mut buf, 4);
    for i in 0..7u16 {
        push_u16(&mut buf, i);
    }

    // Entry 1 at 142: 4 indices in one strip.
    assert_eq!(buf.len(), 142);
    push_u32(&mut buf, 4);
    push_u32(&mut buf, 1);
    push_u32(&mut buf, 142); // strip sizes -> 158
    push_u32(&mut buf, 144); // indices -> 160
    push_u16(&mut buf, 4);
    for i in [10u16, 11, 12, 13] {
        push_u16(&mut buf, i);
    }

    assert_eq!(buf.len(), 168);
    push_trailers(&mut buf);
    buf
}

#[test]
fn minimal_file_decodes_to_empty_model() {
    let file = XnoFile::parse(&minimal_container()).unwrap();

    assert_eq!(file.info().root_address, 16);
    assert_eq!(file.info().section_count, 0);
    assert_eq!(file.textures().count(), 0);
    assert!(file.objects().is_empty());
    assert!(file.skipped().is_empty());

    // Info plus the three trailers, in file order.
    let tags: Vec<String> = file.frames().iter().map(|f| f.tag.to_string()).collect();
    assert_eq!(tags, vec!["NXIF", "NOF0", "NFN0", "NEND"]);
    assert_eq!(file.end().frame.end_position(), 40);
}

#[test]
fn texture_entries_decode_in_table_order() {
    let file = XnoFile::parse(&texture_container()).unwrap();

    let entries: Vec<_> = file.textures().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "tex_a");
    assert_eq!(entries[0].size_in_bytes, 1111);
    assert_eq!(entries[1].name, "tex_b");
    assert_eq!(entries[1].size_in_bytes, 2222);
}

#[test]
fn undecoded_slack_does_not_desync_the_section_loop() {
    // The texture decoder stops 8 bytes short of the stored section size; the
    // trailers only decode correctly if the dispatcher sought the frame end.
    let file = XnoFile::parse(&texture_container()).unwrap();

    assert_eq!(file.offset_table().frame.start, 96);
    assert_eq!(file.footer().frame.start, 104);
    assert_eq!(file.end().frame.start, 112);
}

#[test]
fn unrecognized_tags_are_skipped_by_frame_size() {
    let mut buf = Vec::new();
    push_section(&mut buf, b"NXIF", 8);
    push_u32(&mut buf, 1);
    push_u32(&mut buf, 16);
    push_section(&mut buf, b"NXZZ", 12);
    buf.extend_from_slice(&[0xab; 12]);
    push_trailers(&mut buf);

    let file = XnoFile::parse(&buf).unwrap();
    assert_eq!(file.skipped().len(), 1);
    assert_eq!(file.skipped()[0].frame.tag.to_string(), "NXZZ");
    assert_eq!(file.skipped()[0].frame.start, 16);
    assert_eq!(file.offset_table().frame.start, 36);
}

#[test]
fn corrupt_first_tag_fails_with_position_zero() {
    let mut buf = minimal_container();
    buf[0..4].copy_from_slice(b"JUNK");

    let err = XnoFile::parse(&buf).unwrap_err();
    match err {
        Error::UnexpectedTag {
            expected,
            found,
            position,
        } => {
            assert_eq!(expected, SectionTag::INFO);
            assert_eq!(found.as_bytes(), b"JUNK");
            assert_eq!(position, 0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn wrong_trailer_tag_is_fatal() {
    let mut buf = minimal_container();
    // Overwrite the NOF0 tag at 16 with the footer tag.
    buf[16..20].copy_from_slice(b"NFN0");

    let err = XnoFile::parse(&buf).unwrap_err();
    assert!(matches!(
        err,
        Error::UnexpectedTag {
            expected: SectionTag::OFFSET,
            position: 16,
            ..
        }
    ));
}

#[test]
fn truncation_mid_section_is_reported_not_overrun() {
    // Cut inside the texture entry table: the counted bulk read must fail
    // with a truncation error before touching out-of-range memory.
    let buf = texture_container();
    let err = XnoFile::parse(&buf[..50]).unwrap_err();
    assert!(matches!(err, Error::TruncatedStream { .. }));

    // Cut right after a trailer tag, before its size field.
    let buf = minimal_container();
    let err = XnoFile::parse(&buf[..20]).unwrap_err();
    assert!(matches!(
        err,
        Error::TruncatedStream {
            needed: 4,
            available: 0
        }
    ));

    let err = XnoFile::parse(&[]).unwrap_err();
    assert!(matches!(
        err,
        Error::TruncatedStream {
            needed: 4,
            available: 0
        }
    ));
}

#[test]
fn object_geometry_decodes_strips_and_sphere() {
    let file = XnoFile::parse(&object_container()).unwrap();

    assert_eq!(file.objects().len(), 1);
    let object = &file.objects()[0];

    assert_eq!(object.flags, 5);
    assert_eq!(object.center, Vec3::new(1.0, 2.0, 3.0));
    assert!((object.radius - 4.5).abs() < f32::EPSILON);
    assert_eq!(object.index_parts.count, 2);
    assert_eq!(object.index_parts.address, 92);
    assert_eq!(object.texture_count, 3);

    let [first, second] = &object.index_data[..] else {
        panic!("expected two index entries");
    };

    assert_eq!(first.flags, 7);
    assert_eq!(first.strip_sizes, vec![3, 4]);
    assert_eq!(first.indices, vec![0, 1, 2, 3, 4, 5, 6]);
    let strips: Vec<_> = first.strips().collect();
    assert_eq!(strips, vec![&[0, 1, 2][..], &[3, 4, 5, 6][..]]);

    assert_eq!(second.flags, 9);
    assert_eq!(second.strip_sizes, vec![4]);
    assert_eq!(second.indices, vec![10, 11, 12, 13]);

    assert_eq!(object.triangle_count(), 5);
}

#[test]
fn strip_size_sum_must_match_declared_index_count() {
    let mut buf = object_container();
    // Entry 0 declares 7 indices in strips [3, 4]; corrupt the second strip
    // size (at 126) down to 3 so the sizes only account for 6.
    buf[126..128].copy_from_slice(&3u16.to_le_bytes());

    let err = XnoFile::parse(&buf).unwrap_err();
    match err {
        Error::StripSizeMismatch {
            declared_index_count,
            summed_strip_sizes,
        } => {
            assert_eq!(declared_index_count, 7);
            assert_eq!(summed_strip_sizes, 6);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn relative_address_overflow_is_checked() {
    let mut buf = Vec::new();
    push_section(&mut buf, b"NXIF", 8);
    push_u32(&mut buf, 1);
    push_u32(&mut buf, 0xffff_fff0); // root address near the top of u32
    push_section(&mut buf, b"NXTL", 4);
    push_u32(&mut buf, 0x100); // locator; resolving must overflow

    let err = XnoFile::parse(&buf).unwrap_err();
    assert!(matches!(
        err,
        Error::AddressOverflow {
            base: 0xffff_fff0,
            offset: 0x100
        }
    ));
}

#[test]
fn resolved_address_outside_source_is_rejected() {
    let mut buf = Vec::new();
    push_section(&mut buf, b"NXIF", 8);
    push_u32(&mut buf, 1);
    push_u32(&mut buf, 16);
    push_section(&mut buf, b"NXTL", 4);
    push_u32(&mut buf, 0x1000); // locator resolves far past the end
    push_trailers(&mut buf);

    let err = XnoFile::parse(&buf).unwrap_err();
    assert!(matches!(err, Error::InvalidOffset { offset: 0x1010, .. }));
}

#[test]
fn batch_decode_skips_bad_files_and_continues() {
    let dir = tempfile::tempdir().unwrap();

    std::fs::write(dir.path().join("good.xno"), minimal_container()).unwrap();
    std::fs::write(dir.path().join("bad.xno"), b"JUNKJUNKJUNK").unwrap();
    std::fs::write(dir.path().join("ignored.txt"), b"not a model").unwrap();

    let files = find_xno_files(dir.path(), false);
    assert_eq!(files.len(), 2);

    let result = batch_decode(&files, |_, _, _| {});
    assert_eq!(result.success_count, 1);
    assert_eq!(result.fail_count, 1);
    assert_eq!(result.results.len(), 2);
}
