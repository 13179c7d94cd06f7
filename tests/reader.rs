use proptest::prelude::*;
use revlines::{
    for_each_line_backward, for_each_line_backward_with, for_each_line_backward_with_encoding,
    try_for_each_line_backward_with, BackwardReader, Encoding, ErrorKind, ReadOptions,
    Terminator, DEFAULT_CHUNK_SIZE,
};
use std::io::{Cursor, Write};
use std::iter;
use tempfile::NamedTempFile;

fn write_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn lf(chunk_size: usize) -> ReadOptions {
    ReadOptions::new()
        .with_chunk_size(chunk_size)
        .with_terminator(Terminator::Lf)
}

fn read_file(bytes: &[u8], opts: &ReadOptions) -> Vec<String> {
    let file = write_file(bytes);
    let mut lines = Vec::new();
    for_each_line_backward_with(file.path(), opts, |line| lines.push(line.to_owned())).unwrap();
    lines
}

fn read_cursor(text: &str, opts: ReadOptions) -> Vec<String> {
    let mut cursor = Cursor::new(text);
    let mut reader = BackwardReader::with_options(&mut cursor, opts).unwrap();
    let mut lines = Vec::new();
    reader.for_each_line(|line| lines.push(line.to_owned())).unwrap();
    lines
}

fn forward_reversed(text: &str) -> Vec<String> {
    text.lines().rev().map(str::to_owned).collect()
}

#[test]
fn test_empty_file() {
    let file = write_file(b"");
    let mut calls = 0;
    for_each_line_backward(file.path(), |_| calls += 1).unwrap();
    assert_eq!(calls, 0);
}

#[test]
fn test_no_trailing_terminator() {
    assert_eq!(read_file(b"a\nb", &lf(DEFAULT_CHUNK_SIZE)), vec!["b", "a"]);
}

#[test]
fn test_trailing_terminator() {
    assert_eq!(read_file(b"a\nb\n", &lf(DEFAULT_CHUNK_SIZE)), vec!["b", "a"]);
}

#[test]
fn test_single_line() {
    assert_eq!(read_file(b"onlyline", &lf(DEFAULT_CHUNK_SIZE)), vec!["onlyline"]);
}

#[test]
fn test_default_options() {
    let file = write_file(b"one\ntwo\nthree\n");
    let mut lines = Vec::new();
    for_each_line_backward(file.path(), |line| lines.push(line.to_owned())).unwrap();
    assert_eq!(lines, vec!["three", "two", "one"]);
}

#[test]
fn test_two_chunks_and_remainder() {
    // 2 * 8 + 3 bytes, with lines crossing both chunk boundaries
    let content = b"aaaaa\nbbbbbbbbbb\ncc";
    assert_eq!(content.len(), 8 * 2 + 3);
    assert_eq!(read_file(content, &lf(8)), vec!["cc", "bbbbbbbbbb", "aaaaa"]);

    // boundaries falling right after and right before a terminator
    let content = b"1234567\n89abcde\nxyz";
    assert_eq!(read_file(content, &lf(8)), vec!["xyz", "89abcde", "1234567"]);
    let content = b"12345678\n9abcdef\nxy";
    assert_eq!(read_file(content, &lf(8)), vec!["xy", "9abcdef", "12345678"]);
}

#[test]
fn test_multi_chunk_file() {
    let lines: Vec<String> = (0..500)
        .map(|i| format!("line-{:05}-{}", i, "x".repeat(i % 37)))
        .collect();
    let content = lines.join("\n") + "\n";
    assert!(content.len() > 64 * 3);

    let expected: Vec<String> = lines.iter().rev().cloned().collect();
    for &cs in &[1, 7, 64, 100, 4096, DEFAULT_CHUNK_SIZE] {
        assert_eq!(read_file(content.as_bytes(), &lf(cs)), expected);
    }
}

#[test]
fn test_line_longer_than_chunks() {
    let long: String = iter::repeat('z').take(1000).collect();
    let content = format!("head\n{}\ntail", long);
    assert_eq!(read_file(content.as_bytes(), &lf(16)), vec!["tail", long.as_str(), "head"]);
}

#[test]
fn test_lines_spanning_thousands_of_chunks() {
    let long: String = iter::repeat('q').take(2 * 1024 * 1024).collect();
    let wide: String = iter::repeat('\u{20ac}').take(100_000).collect();

    // one long line in the middle, one at the very start of the stream
    let content = format!("{}\nhead\n{}\n{}\ntail\n", wide, long, wide);
    let lines = read_cursor(&content, lf(64));
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "tail");
    assert_eq!(lines[1], wide);
    assert_eq!(lines[2], long);
    assert_eq!(lines[3], "head");
    assert_eq!(lines[4], wide);

    let content = format!("{}\r\n{}", long, wide);
    let opts = lf(7).with_terminator(Terminator::CrLf);
    assert_eq!(read_cursor(&content, opts), vec![wide.as_str(), long.as_str()]);
}

#[test]
fn test_multibyte_across_chunks() {
    let content = "\u{e9}t\u{e9}\n\u{20ac}\u{20ac}\u{20ac}\n\u{1f980}";
    for cs in 1..content.len() + 1 {
        assert_eq!(read_cursor(content, lf(cs)), forward_reversed(content));
    }
}

#[test]
fn test_crlf_file() {
    let opts = lf(3).with_terminator(Terminator::CrLf);
    assert_eq!(read_file(b"one\r\ntwo\r\nthree\r\n", &opts), vec!["three", "two", "one"]);
}

#[test]
fn test_with_encoding() {
    let file = write_file(b"caf\xe9\nend");
    let mut lines = Vec::new();
    for_each_line_backward_with_encoding(file.path(), "latin1", |line| {
        lines.push(line.to_owned())
    })
    .unwrap();
    assert_eq!(lines, vec!["end", "caf\u{e9}"]);
}

#[test]
fn test_unsupported_encoding() {
    let file = write_file(b"a\nb");
    let mut calls = 0;
    match for_each_line_backward_with_encoding(file.path(), "utf-16le", |_| calls += 1) {
        Ok(_) => assert!(false),
        Err(e) => match *e.kind() {
            ErrorKind::UnsupportedEncoding(ref name) => assert_eq!(name, "utf-16le"),
            _ => assert!(false),
        },
    }
    assert_eq!(calls, 0);
}

#[test]
fn test_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.log");
    match for_each_line_backward(&path, |_| ()) {
        Ok(_) => assert!(false),
        Err(e) => match *e.kind() {
            ErrorKind::NotFound(ref p) => assert_eq!(p, &path),
            _ => assert!(false),
        },
    }
}

#[test]
fn test_directory() {
    let dir = tempfile::tempdir().unwrap();
    match for_each_line_backward(dir.path(), |_| ()) {
        Ok(_) => assert!(false),
        Err(e) => match *e.kind() {
            ErrorKind::NotAFile(_) => assert!(true),
            _ => assert!(false),
        },
    }
}

#[test]
fn test_decode_failure_keeps_emitted_lines() {
    let file = write_file(b"first\n\xc3\x28\nthird\nfourth\n");
    let mut lines = Vec::new();
    let res = for_each_line_backward_with(file.path(), &lf(4), |line| {
        lines.push(line.to_owned())
    });

    assert_eq!(lines, vec!["fourth", "third"]);
    match res {
        Ok(_) => assert!(false),
        Err(e) => match *e.kind() {
            ErrorKind::Decode { encoding, offset } => {
                assert_eq!(encoding, Encoding::Utf8);
                assert_eq!(offset, 6);
            }
            _ => assert!(false),
        },
    }
}

#[test]
fn test_callback_failure() {
    let file = write_file(b"1\n2\n3\n4\n5\n");
    let mut lines = Vec::new();
    let res = try_for_each_line_backward_with(file.path(), &lf(2), |line| {
        if line == "3" {
            return Err("refused");
        }
        lines.push(line.to_owned());
        Ok(())
    });

    assert_eq!(lines, vec!["5", "4"]);
    match res {
        Ok(_) => assert!(false),
        Err(e) => match e.into_kind() {
            ErrorKind::Callback(err) => assert_eq!(err.to_string(), "refused"),
            _ => assert!(false),
        },
    }

    // the handle was released; the file can be read again
    let mut again = Vec::new();
    for_each_line_backward_with(file.path(), &lf(2), |line| again.push(line.to_owned())).unwrap();
    assert_eq!(again, vec!["5", "4", "3", "2", "1"]);
}

proptest! {
    #[test]
    fn prop_matches_forward_lines(text in "[a-c\u{e9}\u{20ac}\n]{0,200}", cs in 1usize..64) {
        prop_assert_eq!(read_cursor(&text, lf(cs)), forward_reversed(&text));
    }

    #[test]
    fn prop_chunk_size_independent(text in "[xy\n]{0,120}", a in 1usize..40, b in 40usize..200) {
        let small = read_cursor(&text, lf(a));
        let large = read_cursor(&text, lf(b));
        let default = read_cursor(&text, lf(DEFAULT_CHUNK_SIZE));
        prop_assert_eq!(&small, &large);
        prop_assert_eq!(&small, &default);
    }

    #[test]
    fn prop_crlf_matches_forward_lines(
        lines in prop::collection::vec("[a-z]{0,6}", 0..20),
        trailing in any::<bool>(),
        cs in 1usize..16,
    ) {
        let mut text = lines.join("\r\n");
        if trailing {
            text.push_str("\r\n");
        }
        let opts = lf(cs).with_terminator(Terminator::CrLf);
        prop_assert_eq!(read_cursor(&text, opts), forward_reversed(&text));
    }
}
