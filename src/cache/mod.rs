pub mod clock;
pub mod result_cache;

pub use result_cache::{CacheError, CachedPage, ResultCache, DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
