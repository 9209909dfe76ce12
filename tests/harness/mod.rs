pub mod memory_store;
pub mod recording_publisher;
