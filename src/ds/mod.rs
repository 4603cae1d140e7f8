pub mod deadline_queue;
pub mod frequency_buckets;
pub mod intrusive_list;
pub mod slot_arena;

pub use deadline_queue::DeadlineQueue;
pub use frequency_buckets::{FrequencyBuckets, FrequencyNode};
pub use intrusive_list::{IntrusiveList, Linked, Links};
pub use slot_arena::{SlotArena, SlotId};
