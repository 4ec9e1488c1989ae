#![allow(dead_code)]
#![allow(unused_imports)]

use addd_application::ports::{AddressProvider, KeyValueStore, RecordRepository};
use addd_application::services::{AuthoritySynthesizer, RecordCatalog};
use addd_application::use_cases::HandleZoneRequestUseCase;
use addd_domain::{DomainError, Record, RecordClass, RecordType, Zone};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockKeyValueStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
    fail_reads: Arc<RwLock<bool>>,
    fail_writes: Arc<RwLock<bool>>,
    fail_deletes: Arc<RwLock<bool>>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write().await = fail;
    }

    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    pub async fn set_fail_deletes(&self, fail: bool) {
        *self.fail_deletes.write().await = fail;
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if *self.fail_reads.read().await {
            return Err(DomainError::StoreReadFailed("mock read failure".to_string()));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        if *self.fail_writes.read().await {
            return Err(DomainError::StoreWriteFailed("mock write failure".to_string()));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        if *self.fail_deletes.read().await {
            return Err(DomainError::StoreWriteFailed("mock delete failure".to_string()));
        }
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, DomainError> {
        if *self.fail_reads.read().await {
            return Err(DomainError::StoreReadFailed("mock read failure".to_string()));
        }
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn close(&self) {}

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

#[derive(Clone)]
pub struct MockAddressProvider {
    addresses: Arc<RwLock<Result<Vec<IpAddr>, DomainError>>>,
    calls: Arc<RwLock<usize>>,
}

impl MockAddressProvider {
    pub fn with_addresses(addresses: &[&str]) -> Self {
        let parsed = addresses.iter().map(|a| a.parse().unwrap()).collect();
        Self {
            addresses: Arc::new(RwLock::new(Ok(parsed))),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            addresses: Arc::new(RwLock::new(Err(DomainError::NoAdvertisableAddress))),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    pub async fn set_addresses(&self, addresses: &[&str]) {
        *self.addresses.write().await =
            Ok(addresses.iter().map(|a| a.parse().unwrap()).collect());
    }

    pub async fn calls(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl AddressProvider for MockAddressProvider {
    async fn addresses(&self) -> Result<Vec<IpAddr>, DomainError> {
        *self.calls.write().await += 1;
        self.addresses.read().await.clone()
    }
}

/// Engine wired to in-memory mocks for the zone `example.com.`.
pub struct ZoneFixture {
    pub store: MockKeyValueStore,
    pub addresses: MockAddressProvider,
    pub catalog: Arc<RecordCatalog>,
    pub engine: HandleZoneRequestUseCase,
}

impl ZoneFixture {
    pub fn new() -> Self {
        Self::with_provider(MockAddressProvider::with_addresses(&["192.0.2.53"]))
    }

    pub fn with_provider(addresses: MockAddressProvider) -> Self {
        let store = MockKeyValueStore::new();
        let zone = Arc::new(Zone::with_serial("example.com.", 2024).unwrap());
        let catalog = Arc::new(RecordCatalog::new(Arc::new(store.clone())));
        let authority = Arc::new(AuthoritySynthesizer::new(
            zone,
            Arc::new(addresses.clone()),
        ));
        let engine = HandleZoneRequestUseCase::new(authority, catalog.clone());

        Self {
            store,
            addresses,
            catalog,
            engine,
        }
    }

    pub async fn seed(&self, name: &str, address: &str, record_type: RecordType, ttl: u32) {
        let record = Record::new(name, address, record_type, RecordClass::IN, ttl).unwrap();
        self.catalog.store_record(&record).await.unwrap();
    }
}
