//! Persisted login state.

pub mod storage;

pub use storage::StoredSession;
