use addd_api::{AppState, RecordUseCases};
use addd_application::ports::{AddressProvider, KeyValueStore, RecordRepository};
use addd_application::services::{AuthoritySynthesizer, RecordCatalog};
use addd_application::use_cases::{
    CreateRecordUseCase, DeleteRecordUseCase, GetRecordsUseCase, HandleZoneRequestUseCase,
    UpdateRecordUseCase,
};
use addd_domain::config::StoreBackend;
use addd_domain::{Config, Zone};
use addd_infrastructure::dns::TsigKey;
use addd_infrastructure::system::{ClusterMembershipProvider, SelfAddressProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Everything the DNS and API servers share.
pub struct Services {
    pub records: Arc<dyn RecordRepository>,
    pub zone_engine: Arc<HandleZoneRequestUseCase>,
    pub tsig_key: Option<Arc<TsigKey>>,
}

impl Services {
    pub fn new(config: &Config, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let zone = Arc::new(Zone::new(&config.zone.domain)?);
        info!(apex = %zone.apex(), serial = zone.serial(), "Zone configured");

        let records: Arc<dyn RecordRepository> = Arc::new(RecordCatalog::new(store));
        let addresses = Self::address_provider(config)?;
        let authority = Arc::new(AuthoritySynthesizer::new(zone, addresses));
        let zone_engine = Arc::new(HandleZoneRequestUseCase::new(authority, records.clone()));

        let tsig_key = match config.zone.tsig_key()? {
            Some(key_config) => {
                let key = TsigKey::from_config(&key_config)?;
                info!(key = %key.name(), "TSIG key loaded");
                Some(Arc::new(key))
            }
            None => None,
        };

        Ok(Self {
            records,
            zone_engine,
            tsig_key,
        })
    }

    fn address_provider(config: &Config) -> anyhow::Result<Arc<dyn AddressProvider>> {
        let local: Arc<dyn AddressProvider> =
            Arc::new(SelfAddressProvider::new(config.zone.external_ips()?));

        match (config.store.backend, config.store.rqlite_url.as_deref()) {
            (StoreBackend::Rqlite, Some(url)) => Ok(Arc::new(ClusterMembershipProvider::new(
                url,
                Duration::from_millis(config.store.rqlite_timeout_ms),
                local,
            )?)),
            _ => Ok(local),
        }
    }

    pub fn app_state(&self, config: &Config) -> AppState {
        AppState {
            records: RecordUseCases {
                get_records: Arc::new(GetRecordsUseCase::new(self.records.clone())),
                create_record: Arc::new(CreateRecordUseCase::new(self.records.clone())),
                update_record: Arc::new(UpdateRecordUseCase::new(self.records.clone())),
                delete_record: Arc::new(DeleteRecordUseCase::new(self.records.clone())),
            },
            api_token: config.api.token().map(Arc::from),
        }
    }
}
