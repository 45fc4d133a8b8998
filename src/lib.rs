//! Lazy, cached, path-addressed access to values inside large JSON documents.
//!
//! A [`JsonCache`] answers slash-delimited address queries (`a/b/c`) against a
//! JSON document without parsing the whole document into memory. On a cache
//! miss it scans the document, skipping over values syntactically while
//! recording the offset of every key it passes; the sought value is the only
//! one fully parsed (into a [`serde_json::Value`]). Repeated and overlapping
//! queries are answered from the cached offsets and never rescan sibling
//! subtrees they have no interest in.
//!
//! The accepted dialect is slightly lenient, in the tradition of
//! `org.json`-style tokenizers: single-quoted strings and unquoted keys and
//! tokens are allowed. Strict JSON parses identically to `serde_json`.
//!
//! ```
//! use jsonlens::JsonCache;
//!
//! let mut cache = JsonCache::from_str(r#"{"a": {"b": 1, "c": "hi"}, "d": [1, 2, 3]}"#);
//!
//! assert_eq!(cache.get("a/b").unwrap(), serde_json::json!(1));
//! // "c" was cached as a side effect of the first query; this one
//! // does not rescan the key set of "a".
//! assert_eq!(cache.get("a/c").unwrap(), serde_json::json!("hi"));
//! ```
//!
//! The backing document is abstracted as a [`Source`]: something that can be
//! opened fresh and read forward, with no seeking. Files ([`FileSource`]) and
//! in-memory buffers ([`MemorySource`]) are provided.
//!
//! Queries are synchronous and the cache has no internal locking; wrap it in a
//! mutex if it has to be shared. The cache only grows; there is no eviction.

mod cache;
mod error;
mod options;
mod scan;
mod source;

pub use crate::cache::JsonCache;
pub use crate::error::{Error, Result};
pub use crate::options::CacheOptions;
pub use crate::scan::Scanner;
pub use crate::source::{FileSource, MemorySource, Source};
