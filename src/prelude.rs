pub use crate::builder::CacheBuilder;
pub use crate::cache::{Cache, CacheCore, EntryInfo};
pub use crate::config::CacheConfig;
pub use crate::error::CacheError;
pub use crate::policy::EvictionKind;
pub use crate::stats::StatsSnapshot;
