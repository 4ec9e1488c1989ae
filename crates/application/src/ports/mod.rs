mod address_provider;
mod key_value_store;
mod record_repository;

pub use address_provider::AddressProvider;
pub use key_value_store::KeyValueStore;
pub use record_repository::RecordRepository;
