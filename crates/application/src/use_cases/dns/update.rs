use addd_domain::{Rcode, Record, RecordType, UpdateOperation, UpdateRecord, ZoneRequest};
use tracing::{debug, error, info, warn};

use super::handle_zone_request::HandleZoneRequestUseCase;

impl HandleZoneRequestUseCase {
    /// Applies every update-section record in order; the most severe outcome
    /// becomes the reply code.
    pub(super) async fn apply_updates(&self, request: &ZoneRequest) -> Rcode {
        let mut rcode = Rcode::Success;
        for rr in &request.updates {
            let outcome = self.apply_update(rr).await;
            debug!(name = %rr.name, rtype = rr.rtype, rcode = %outcome, "Update applied");
            rcode = rcode.aggregate(outcome);
        }
        rcode
    }

    async fn apply_update(&self, rr: &UpdateRecord) -> Rcode {
        if self.authority.zone().is_nameserver(&rr.name) {
            warn!(name = %rr.name, "Refusing update of the zone nameserver");
            return Rcode::Refused;
        }

        let operation = match UpdateOperation::parse(rr) {
            Ok(operation) => operation,
            Err(e) => {
                warn!(error = %e, name = %rr.name, "Unusable update record");
                return Rcode::ServerFailure;
            }
        };

        match operation {
            UpdateOperation::Delete { name, record_type } => {
                self.delete_existing(&name, record_type).await
            }
            UpdateOperation::Upsert(record) => self.replace(record).await,
        }
    }

    async fn delete_existing(&self, name: &str, record_type: RecordType) -> Rcode {
        let existing = match self.records.get_record(name, record_type).await {
            Ok(Some(record)) => record,
            Ok(None) => return Rcode::NameError,
            Err(e) => {
                error!(error = %e, name = %name, "Record lookup failed");
                return Rcode::ServerFailure;
            }
        };

        if let Err(e) = self.records.delete_record(&existing).await {
            error!(error = %e, name = %name, "Record delete failed");
            return Rcode::ServerFailure;
        }

        info!(name = %name, record_type = %record_type, "Record deleted by update");
        Rcode::Success
    }

    /// Delete-then-store. The two steps are not atomic: a concurrent reader may
    /// see the name absent in between.
    async fn replace(&self, record: Record) -> Rcode {
        match self
            .records
            .get_record(record.name(), record.record_type())
            .await
        {
            Ok(Some(existing)) => {
                if let Err(e) = self.records.delete_record(&existing).await {
                    error!(error = %e, name = %record.name(), "Record delete failed");
                    return Rcode::ServerFailure;
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, name = %record.name(), "Record lookup failed");
                return Rcode::ServerFailure;
            }
        }

        if let Err(e) = self.records.store_record(&record).await {
            error!(error = %e, name = %record.name(), "Record store failed");
            return Rcode::ServerFailure;
        }

        info!(
            name = %record.name(),
            record_type = %record.record_type(),
            address = %record.address(),
            ttl = record.ttl(),
            "Record stored by update"
        );
        Rcode::Success
    }
}
