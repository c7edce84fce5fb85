use super::*;

#[test]
fn sentinel_follows_content() {
    let buf = SourceBuffer::new("x := 1");
    assert_eq!(buf.len(), 6);
    assert_eq!(buf.as_bytes(), b"x := 1");
    assert_eq!(buf.as_sentinel_bytes()[6], 0);
}

#[test]
fn padded_to_cache_line() {
    assert_eq!(SourceBuffer::new("").as_sentinel_bytes().len(), 64);
    assert_eq!(SourceBuffer::new(&"a".repeat(63)).as_sentinel_bytes().len(), 64);
    assert_eq!(SourceBuffer::new(&"a".repeat(64)).as_sentinel_bytes().len(), 128);
}

#[test]
fn padding_is_zeroed() {
    let buf = SourceBuffer::new("abc");
    assert!(buf.as_sentinel_bytes()[3..].iter().all(|&b| b == 0));
}

#[test]
fn empty_source() {
    let buf = SourceBuffer::new("");
    assert!(buf.is_empty());
    assert!(buf.cursor().is_eof());
}
