//! Cache Module
//!
//! Byte-bounded LRU caching: the [`Value`] capability, the immutable
//! [`ByteView`] payload, the single-threaded [`LruStore`], and the
//! lock-guarded [`CacheStore`].

mod byte_view;
mod lru;
mod stats;
mod store;
mod value;


// Re-export public types
pub use byte_view::ByteView;
pub use lru::{entry_size, Iter, LruStore, OnEvicted};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use value::Value;
