//! Durable storage for the persisted subset of the state.
//!
//! - [`StateStorage`]: key/value device storage (file-backed or in-memory)
//! - [`codec`]: the persisted record, as a JSON envelope or a framed
//!   MessagePack blob
//! - [`Persister`]: background subscriber that writes every change

pub mod codec;
mod persister;
mod storage;

pub use codec::{decode, encode, StorageEncoding};
pub use persister::Persister;
pub use storage::{FileStorage, MemoryStorage, StateStorage};

/// Storage key the persisted record lives under.
pub const DEFAULT_NAMESPACE: &str = "vocabulary-app-storage";
