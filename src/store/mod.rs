//! Entry storage: owns every cached value and its metadata.

pub mod entry;
pub mod slab;

pub use entry::Entry;
pub use slab::EntryStore;
