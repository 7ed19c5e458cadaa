pub mod fake_config;
pub mod fake_store;
pub mod fixtures;

pub use fake_config::{FakeConfigPersistence, FakeConfigStats};
pub use fake_store::{FakeOutcome, FakeRecordStore, FakeStoreStats};
