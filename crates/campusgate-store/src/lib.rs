pub mod collection;
pub mod document;
pub mod dynamo;
pub mod error;
pub mod expr;
pub mod memory;
pub mod query;
pub mod store;

pub use collection::{Collection, KeyKind, KeySchema};
pub use document::{
    composite, composite_prefix, decode, encode, text_attr, Document, Key, KeyValue,
};
pub use dynamo::{DynamoStore, DynamoStoreOptions};
pub use error::{StoreError, StoreResult};
pub use expr::{Condition, Direction, Filter, SortCondition, UpdatableField, UpdateSet};
pub use memory::MemoryStore;
pub use query::QueryEngine;
pub use store::{BatchPutOutcome, DocumentStore};
