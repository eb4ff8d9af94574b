use std::fs;

use rbencode::{encode, DecodeOptions, Value};
use sha1::{Digest, Sha1};

use super::canon::canonicalize;
use super::hash::hash;
use super::show::{render, show, PrintOptions};
use super::{hex_encode, read_input};

const TORRENT: &[u8] =
    b"d8:announce15:http://test.com4:infod6:lengthi1024e4:name8:file.txtee";
const TORRENT_UNORDERED: &[u8] =
    b"d4:infod4:name8:file.txt6:lengthi1024ee8:announce15:http://test.come";

#[test]
fn hash_of_info_entry() {
    let digest = hash(TORRENT, Some("info"), &DecodeOptions::default()).unwrap();
    assert_eq!(
        hex_encode(&digest),
        "2c277531e3fbf5a7945f5f006ddde9a70ca15ff8"
    );
}

#[test]
fn hash_ignores_input_key_order() {
    let options = DecodeOptions::default();
    assert_eq!(
        hash(TORRENT, Some("info"), &options).unwrap(),
        hash(TORRENT_UNORDERED, Some("info"), &options).unwrap()
    );
    assert_eq!(
        hash(TORRENT, None, &options).unwrap(),
        hash(TORRENT_UNORDERED, None, &options).unwrap()
    );
}

#[test]
fn hash_of_whole_value() {
    let digest = hash(b"i42e", None, &DecodeOptions::default()).unwrap();
    let expected: [u8; 20] = Sha1::digest(b"i42e").into();
    assert_eq!(digest, expected);
    assert_eq!(
        hex_encode(&digest),
        "3ce69356df4222111c27b41cccf2164e6cced799"
    );
}

#[test]
fn hash_reports_missing_key_and_wrong_type() {
    let options = DecodeOptions::default();

    let err = hash(TORRENT, Some("nodes"), &options).unwrap_err();
    assert!(err.to_string().contains("\"nodes\" not found"));

    let err = hash(b"li1ee", Some("info"), &options).unwrap_err();
    assert!(err.to_string().contains("list, not a dictionary"));

    assert!(hash(b"l4:spam", None, &options).is_err());
}

#[test]
fn canonicalize_reorders_keys() {
    let options = DecodeOptions::default();

    let (value, was_canonical) = canonicalize(TORRENT_UNORDERED, &options).unwrap();
    assert!(!was_canonical);
    assert_eq!(encode(&value), TORRENT);

    let (_, was_canonical) = canonicalize(TORRENT, &options).unwrap();
    assert!(was_canonical);
}

#[test]
fn canonicalize_rejects_trailing_data() {
    let err = canonicalize(b"i1ei2e", &DecodeOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("trailing data"));
}

#[test]
fn render_nested_tree() {
    let value = Value::dict()
        .insert(
            "files",
            Value::list().push(
                Value::dict()
                    .insert("length", 12i64)
                    .insert("path", Value::list().push("a").push("b")),
            ),
        )
        .insert("name", "x")
        .insert("pieces", Value::bytes(&b"\xff\x00"[..]));

    let expected = "\
{
  \"files\": [
    {
      \"length\": 12
      \"path\": [
        \"a\"
        \"b\"
      ]
    }
  ]
  \"name\": \"x\"
  \"pieces\": 0xff00 (2 bytes)
}";
    assert_eq!(render(&value, &PrintOptions::default()), expected);
}

#[test]
fn render_truncates() {
    let print = PrintOptions {
        max_string_len: 3,
        max_items: 2,
    };

    let list: Value = (1..=5).map(Value::Integer).collect();
    assert_eq!(render(&list, &print), "[\n  1\n  2\n  ... 3 more\n]");
    assert_eq!(render(&Value::string("abcdef"), &print), "\"abc\"...");
    assert_eq!(
        render(&Value::bytes(&b"\xff\xfe\xfd\xfc"[..]), &print),
        "0xfffefd... (4 bytes)"
    );
    assert_eq!(render(&Value::dict(), &print), "{}");
}

#[test]
fn render_control_bytes_as_text() {
    let print = PrintOptions {
        max_string_len: 3,
        max_items: 2,
    };

    // Control bytes are valid UTF-8, so they stay quoted rather than hex.
    assert_eq!(
        render(&Value::bytes(&b"\x00\x01\x02\x03"[..]), &print),
        "\"\\0\\u{1}\\u{2}\"..."
    );
}

#[test]
fn show_walks_concatenated_values() {
    let mut out = Vec::new();
    let count = show(
        b"xxi1e4:spam",
        2,
        &DecodeOptions::default(),
        &PrintOptions::default(),
        &mut out,
    )
    .unwrap();

    assert_eq!(count, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "# value 0 @ 2..5\n1\n# value 1 @ 5..11\n\"spam\"\n"
    );
}

#[test]
fn show_reports_failing_value() {
    let mut out = Vec::new();
    let err = show(
        b"i1ei01e",
        0,
        &DecodeOptions::default(),
        &PrintOptions::default(),
        &mut out,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("value #1 starting at offset 3"));
}

#[test]
fn read_input_enforces_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("value.torrent");
    fs::write(&path, TORRENT).unwrap();

    assert_eq!(read_input(&path, None).unwrap(), TORRENT);
    assert_eq!(read_input(&path, Some(TORRENT.len())).unwrap(), TORRENT);

    let err = read_input(&path, Some(16)).unwrap_err();
    assert!(err.to_string().contains("over the 16 byte limit"));

    assert!(read_input(&dir.path().join("missing"), None).is_err());
}
