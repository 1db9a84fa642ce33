// src/keys.rs

//! Keystrokes understood by the pattern editor, decoded from raw stdin bytes.

use std::io::{self, ErrorKind, Read};

use log::trace;

use crate::grid::Cell;

const ESC: u8 = 0x1b;
const CSI_INTRODUCER: u8 = b'[';
/// Ctrl-C, delivered as a byte while signals are off.
const END_OF_TEXT: u8 = 0x03;

/// A decoded editor keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKey {
    /// `0` or `1`: set the highlighted cell.
    Set(Cell),
    Up,
    Down,
    Left,
    Right,
    /// `q`: finish and save.
    Quit,
    /// Ctrl-C: stop without saving.
    Abort,
    /// Anything else; ignored by the editor.
    Unknown,
}

impl EditorKey {
    fn from_byte(byte: u8) -> Self {
        match byte {
            b'q' => EditorKey::Quit,
            END_OF_TEXT => EditorKey::Abort,
            other => Cell::from_digit(other).map_or(EditorKey::Unknown, EditorKey::Set),
        }
    }

    /// Final byte of `ESC [ <final>` arrow sequences.
    fn from_csi_final(byte: u8) -> Self {
        match byte {
            b'A' => EditorKey::Up,
            b'B' => EditorKey::Down,
            b'C' => EditorKey::Right,
            b'D' => EditorKey::Left,
            _ => EditorKey::Unknown,
        }
    }

    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            EditorKey::Up | EditorKey::Down | EditorKey::Left | EditorKey::Right
        )
    }
}

/// Pulls [`EditorKey`]s out of a byte stream one read at a time.
pub struct KeyDecoder<R> {
    input: R,
}

impl<R: Read> KeyDecoder<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// The next key, or `None` once the input is exhausted.
    ///
    /// An escape byte always consumes the two bytes after it.
    pub fn next_key(&mut self) -> io::Result<Option<EditorKey>> {
        let Some(byte) = self.read_byte()? else {
            return Ok(None);
        };
        if byte != ESC {
            let key = EditorKey::from_byte(byte);
            trace!("Byte {:#04x} decoded as {:?}.", byte, key);
            return Ok(Some(key));
        }
        let Some(introducer) = self.read_byte()? else {
            return Ok(None);
        };
        let Some(final_byte) = self.read_byte()? else {
            return Ok(None);
        };
        let key = if introducer == CSI_INTRODUCER {
            EditorKey::from_csi_final(final_byte)
        } else {
            EditorKey::Unknown
        };
        trace!(
            "Escape sequence {:#04x} {:#04x} decoded as {:?}.",
            introducer,
            final_byte,
            key
        );
        Ok(Some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<EditorKey> {
        let mut decoder = KeyDecoder::new(bytes);
        let mut keys = Vec::new();
        while let Some(key) = decoder.next_key().expect("slice reads cannot fail") {
            keys.push(key);
        }
        keys
    }

    #[test_log::test]
    fn plain_keys() {
        assert_eq!(
            decode_all(b"01qx"),
            vec![
                EditorKey::Set(Cell::Dead),
                EditorKey::Set(Cell::Alive),
                EditorKey::Quit,
                EditorKey::Unknown
            ]
        );
    }

    #[test_log::test]
    fn ctrl_c_is_abort() {
        assert_eq!(
            decode_all(b"1\x03"),
            vec![EditorKey::Set(Cell::Alive), EditorKey::Abort]
        );
    }

    #[test_log::test]
    fn arrow_sequences() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                EditorKey::Up,
                EditorKey::Down,
                EditorKey::Right,
                EditorKey::Left
            ]
        );
    }

    #[test_log::test]
    fn unknown_escape_consumes_two_bytes() {
        assert_eq!(
            decode_all(b"\x1bOP1"),
            vec![EditorKey::Unknown, EditorKey::Set(Cell::Alive)]
        );
        assert_eq!(decode_all(b"\x1b[Z"), vec![EditorKey::Unknown]);
    }

    #[test_log::test]
    fn truncated_escape_ends_input() {
        assert_eq!(decode_all(b"1\x1b["), vec![EditorKey::Set(Cell::Alive)]);
    }
}
