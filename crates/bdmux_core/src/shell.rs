//! POSIX shell quoting.
//!
//! Every value is wrapped in single quotes. An embedded single quote closes
//! the quoted run, is emitted as `\'`, and the quoted run is reopened, so the
//! token `it's` becomes `'it'\''s'`. Inside single quotes a POSIX shell
//! interprets no byte specially, which makes this safe for arbitrary bytes.

use std::borrow::Cow;
use std::ffi::OsStr;

use crate::buffer::{BufferResult, GrowableBuffer};

const ESCAPED_QUOTE: &[u8] = b"'\\''";

/// Quote `value` into a single shell word.
///
/// The empty input yields `''`.
pub fn escape(value: impl AsRef<[u8]>) -> Vec<u8> {
    let value = value.as_ref();
    let mut out = Vec::with_capacity(value.len() + 2);
    out.push(b'\'');
    for (i, part) in value.split(|&b| b == b'\'').enumerate() {
        if i > 0 {
            out.extend_from_slice(ESCAPED_QUOTE);
        }
        out.extend_from_slice(part);
    }
    out.push(b'\'');
    out
}

/// Quote a UTF-8 string. Quoting never introduces invalid UTF-8.
pub fn escape_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    out.push_str(&value.replace('\'', "'\\''"));
    out.push('\'');
    out
}

/// Append the quoted form of `value` to `buf`.
pub fn append_escaped(buf: &mut GrowableBuffer, value: &[u8]) -> BufferResult<()> {
    buf.append_bytes(b"'")?;
    for (i, part) in value.split(|&b| b == b'\'').enumerate() {
        if i > 0 {
            buf.append_bytes(ESCAPED_QUOTE)?;
        }
        buf.append_bytes(part)?;
    }
    buf.append_bytes(b"'")
}

/// Raw bytes of an OS string.
#[cfg(unix)]
pub fn os_bytes(value: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(value.as_bytes())
}

/// Raw bytes of an OS string.
#[cfg(not(unix))]
pub fn os_bytes(value: &OsStr) -> Cow<'_, [u8]> {
    match value.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

/// Whether `value` can be emitted bare (no quoting) as part of a word.
pub fn is_bare_word(value: &[u8]) -> bool {
    !value.is_empty() && value.iter().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Decode one word the way a POSIX shell does, for the subset of syntax
    /// the escaper emits: single-quoted runs and backslash escapes.
    fn shell_decode(word: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < word.len() {
            match word[i] {
                b'\'' => {
                    i += 1;
                    while word[i] != b'\'' {
                        out.push(word[i]);
                        i += 1;
                    }
                    i += 1;
                }
                b'\\' => {
                    out.push(word[i + 1]);
                    i += 2;
                }
                other => panic!("unquoted byte {other:#x} in escaped word"),
            }
        }
        out
    }

    #[test]
    fn empty_string_is_empty_quotes() {
        assert_eq!(escape(""), b"''");
        assert_eq!(escape_str(""), "''");
    }

    #[test]
    fn plain_value_is_wrapped() {
        assert_eq!(escape("out.mkv"), b"'out.mkv'");
    }

    #[test]
    fn single_quotes_are_closed_and_reopened() {
        assert_eq!(escape("it's"), b"'it'\\''s'");
        assert_eq!(escape("'"), b"''\\'''");
        assert_eq!(escape("''"), b"''\\'''\\'''");
    }

    #[test]
    fn buffer_and_vec_forms_agree() {
        let input = "a 'b' \\c $(d) `e`";
        let mut buf = GrowableBuffer::new();
        append_escaped(&mut buf, input.as_bytes()).unwrap();
        assert_eq!(buf.contents(), escape(input).as_slice());
        assert_eq!(escape_str(input).as_bytes(), escape(input).as_slice());
    }

    #[test]
    fn bare_words() {
        assert!(is_bare_word(b"eng"));
        assert!(!is_bare_word(b""));
        assert!(!is_bare_word(b"e;g"));
        assert!(!is_bare_word(b"e'g"));
    }

    #[cfg(unix)]
    #[test]
    fn real_shell_decodes_to_input() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        use std::process::Command;

        let inputs: [&[u8]; 6] = [
            b"",
            b"it's",
            b"''''",
            b"spaces and\ttabs",
            b"back\\slash $HOME `id` \"dq\"",
            b"non-ascii \xc3\xa9 \xff\xfe",
        ];

        for input in inputs {
            let mut script = b"printf %s ".to_vec();
            script.extend_from_slice(&escape(input));
            let output = Command::new("sh")
                .arg("-c")
                .arg(OsStr::from_bytes(&script))
                .output()
                .unwrap();
            assert!(output.status.success());
            assert_eq!(output.stdout, input);
        }
    }

    proptest! {
        #[test]
        fn decoding_recovers_arbitrary_bytes(input in proptest::collection::vec(any::<u8>(), 0..64)) {
            let escaped = escape(&input);
            prop_assert_eq!(shell_decode(&escaped), input);
        }

        #[test]
        fn quote_heavy_strings_round_trip(input in "[a' \\\\]{0,32}") {
            let escaped = escape(input.as_bytes());
            prop_assert_eq!(shell_decode(&escaped), input.as_bytes().to_vec());
        }
    }
}
