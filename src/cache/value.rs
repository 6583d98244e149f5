//! Value Capability Module
//!
//! Anything stored in an [`LruStore`](crate::cache::LruStore) must report its size.

use bytes::Bytes;

// == Value Trait ==
/// A cached value that knows how many bytes it accounts for.
///
/// The store charges `key.len() + value.size()` against its byte budget.
pub trait Value {
    /// Number of bytes this value occupies.
    fn size(&self) -> usize;
}

impl Value for String {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Value for Bytes {
    fn size(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_sizes() {
        assert_eq!("hello".to_string().size(), 5);
        assert_eq!(vec![0u8; 12].size(), 12);
        assert_eq!(Bytes::from_static(b"abc").size(), 3);
        assert_eq!(String::new().size(), 0);
    }
}
