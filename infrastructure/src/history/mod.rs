//! Message history adapters.

mod in_memory;

pub use in_memory::InMemoryMessageHistory;
