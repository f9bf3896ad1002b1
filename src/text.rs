//! Whitespace utilities for strings pulled out of the parser's slots.
//! These operate on independent byte slices and never touch a live parser.

/// HTML whitespace: space, tab, line feed, carriage return.
#[inline]
pub fn is_html_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

pub fn trim_start(src: &[u8]) -> &[u8] {
    let mut src = src;
    while let [first, rest @ ..] = src {
        if !is_html_space(*first) {
            break;
        }
        src = rest;
    }
    src
}

pub fn trim_end(src: &[u8]) -> &[u8] {
    let mut src = src;
    while let [rest @ .., last] = src {
        if !is_html_space(*last) {
            break;
        }
        src = rest;
    }
    src
}

pub fn trim(src: &[u8]) -> &[u8] {
    trim_end(trim_start(src))
}

/// Collapses each run of HTML whitespace into a single space, in place,
/// returning the compacted prefix. The first run of a string collapses to
/// one leading `' '` rather than disappearing.
pub fn collapse_spaces(buf: &mut [u8]) -> &[u8] {
    let mut len = 0;
    let mut keep_space = true;
    for i in 0..buf.len() {
        let byte = buf[i];
        if !is_html_space(byte) {
            buf[len] = byte;
            len += 1;
            keep_space = true;
        } else if keep_space {
            buf[len] = b' ';
            len += 1;
            keep_space = false;
        }
    }
    &buf[..len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_classification() {
        for byte in [b' ', b'\t', b'\n', b'\r'] {
            assert!(is_html_space(byte));
        }
        assert!(!is_html_space(b'a'));
        assert!(!is_html_space(b'\x0C'));
    }

    #[test]
    fn trims() {
        assert_eq!(trim_start(b"  \tx y "), b"x y ");
        assert_eq!(trim_end(b" x y\r\n"), b" x y");
        assert_eq!(trim(b"\t x y \n"), b"x y");
        assert_eq!(trim(b" \t\r\n"), b"");
        assert_eq!(trim(b""), b"");
    }

    #[test]
    fn collapse_runs() {
        let mut buf = *b"a  b\t\nc";
        assert_eq!(collapse_spaces(&mut buf), b"a b c");
    }

    #[test]
    fn collapse_keeps_single_leading_space() {
        let mut buf = *b"  \ta";
        assert_eq!(collapse_spaces(&mut buf), b" a");
    }

    #[test]
    fn collapse_trailing_run() {
        let mut buf = *b"a  ";
        assert_eq!(collapse_spaces(&mut buf), b"a ");
    }

    #[test]
    fn collapse_untouched_without_whitespace() {
        let mut buf = *b"abc";
        assert_eq!(collapse_spaces(&mut buf), b"abc");
    }
}
