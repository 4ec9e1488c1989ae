use addd_domain::{Opcode, Rcode, TsigAlgorithm, TsigSigning, TsigStatus, ZoneRequest, ZoneResponse};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::RecordRepository;
use crate::services::AuthoritySynthesizer;

pub const TSIG_FUDGE_SECS: u16 = 300;

/// Authoritative handling of one DNS message for the configured zone.
///
/// Holds only shared read-only handles and can be invoked concurrently.
pub struct HandleZoneRequestUseCase {
    pub(super) authority: Arc<AuthoritySynthesizer>,
    pub(super) records: Arc<dyn RecordRepository>,
}

impl HandleZoneRequestUseCase {
    pub fn new(authority: Arc<AuthoritySynthesizer>, records: Arc<dyn RecordRepository>) -> Self {
        Self { authority, records }
    }

    pub async fn execute(&self, request: &ZoneRequest) -> ZoneResponse {
        let mut response = ZoneResponse::new(request.id, request.opcode);
        response.authority.push(self.authority.soa());

        response.rcode = match request.opcode {
            Opcode::Query => self.answer_questions(request, &mut response).await,
            Opcode::Update => self.apply_updates(request).await,
            Opcode::Other(code) => {
                debug!(id = request.id, opcode = code, "Unsupported opcode");
                Rcode::NotImplemented
            }
        };

        response.tsig = signing_decision(request);

        debug!(
            id = request.id,
            rcode = %response.rcode,
            answers = response.answers.len(),
            "Zone request handled"
        );
        response
    }
}

fn signing_decision(request: &ZoneRequest) -> Option<TsigSigning> {
    match &request.tsig {
        TsigStatus::Absent => None,
        TsigStatus::Verified { key_name } => Some(TsigSigning {
            key_name: key_name.clone(),
            algorithm: TsigAlgorithm::HmacMd5,
            fudge: TSIG_FUDGE_SECS,
            time_signed: u64::try_from(Utc::now().timestamp()).unwrap_or(0),
        }),
        TsigStatus::Failed { key_name, reason } => {
            warn!(
                id = request.id,
                key = %key_name,
                reason = %reason,
                "TSIG verification failed, replying unsigned"
            );
            None
        }
    }
}
