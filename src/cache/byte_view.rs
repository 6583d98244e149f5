//! Byte View Module
//!
//! Immutable byte payload used as the value type of [`CacheStore`](crate::cache::CacheStore).

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::cache::Value;
use crate::error::{CacheError, Result};

// == Byte View ==
/// A read-only view over cached bytes.
///
/// Clones share the same buffer. Nothing can mutate it after construction,
/// and [`ByteView::byte_slice`] hands out an independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteView {
    b: Bytes,
}

impl ByteView {
    // == Constructor ==
    /// Creates a view by copying `data`.
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self {
            b: Bytes::copy_from_slice(data),
        }
    }

    // == Length ==
    /// Returns the payload size in bytes.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    // == Byte Slice ==
    /// Returns a freshly allocated copy of the payload.
    ///
    /// Callers may mutate the returned buffer; the cached bytes are unaffected.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    // == Text Views ==
    /// Returns the payload as text, replacing invalid UTF-8 sequences.
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.b)
    }

    /// Returns the payload as `&str` if it is valid UTF-8.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.b).map_err(|e| CacheError::InvalidUtf8(e.to_string()))
    }
}

impl Value for ByteView {
    fn size(&self) -> usize {
        self.len()
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        &self.b
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// == Conversions ==
impl From<Bytes> for ByteView {
    fn from(b: Bytes) -> Self {
        Self { b }
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(v: Vec<u8>) -> Self {
        Self { b: Bytes::from(v) }
    }
}

impl From<&[u8]> for ByteView {
    fn from(s: &[u8]) -> Self {
        Self::copy_from_slice(s)
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self { b: Bytes::from(s) }
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::copy_from_slice(s.as_bytes())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_view_len() {
        let view = ByteView::from("hello");
        assert_eq!(view.len(), 5);
        assert_eq!(view.size(), 5);
        assert!(!view.is_empty());

        let empty = ByteView::default();
        assert_eq!(empty.size(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_byte_slice_is_independent_copy() {
        let view = ByteView::from("payload");

        let mut first = view.byte_slice();
        let second = view.byte_slice();
        assert_eq!(first, second);

        first[0] = b'X';
        assert_eq!(first, b"Xayload");
        assert_eq!(second, b"payload");
        assert_eq!(view.byte_slice(), b"payload");
    }

    #[test]
    fn test_source_buffer_mutation_does_not_leak() {
        let mut source = b"abc".to_vec();
        let view = ByteView::from(source.as_slice());

        source[0] = b'z';
        assert_eq!(view.byte_slice(), b"abc");
    }

    #[test]
    fn test_text_views() {
        let view = ByteView::from("héllo");
        assert_eq!(view.to_text(), "héllo");
        assert_eq!(view.as_str().unwrap(), "héllo");
        assert_eq!(view.to_string(), "héllo");
    }

    #[test]
    fn test_invalid_utf8() {
        let view = ByteView::from(vec![0xff, b'a']);
        assert!(matches!(view.as_str(), Err(CacheError::InvalidUtf8(_))));
        assert_eq!(view.to_text(), "\u{FFFD}a");
    }

    #[test]
    fn test_clones_share_content() {
        let view = ByteView::from(String::from("shared"));
        let alias = view.clone();
        assert_eq!(view, alias);
        assert_eq!(alias.byte_slice(), b"shared");
    }
}
