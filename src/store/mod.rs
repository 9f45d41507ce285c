//! Item store: the in-memory collection of items and the operations over it.
//!
//! This module handles:
//! - Item records and request payloads
//! - Id assignment and lookup
//! - Create, update and delete under a single write lock

pub mod item_store;
pub mod types;

pub use item_store::ItemStore;
pub use types::{parse_id, Item, ItemId, ItemPatch, NewItem};
