//! Mini Cache - A byte-bounded LRU cache core
//!
//! Holds as many key/value pairs as fit in a configured byte budget,
//! evicting the least recently used entries first, and is safe to share
//! between threads.
//!
//! ```
//! use mini_cache::{ByteView, CacheStore};
//!
//! let cache = CacheStore::new(10);
//! cache.put("A", ByteView::from("aaaa"));
//! cache.put("B", ByteView::from("bbbb"));
//! cache.put("C", ByteView::from("cccc"));
//!
//! assert!(cache.get("A").is_none());
//! assert_eq!(cache.get("C").unwrap().to_string(), "cccc");
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{ByteView, CacheStats, CacheStore, LruStore, Value};
pub use config::Config;
pub use error::{CacheError, Result};
