use super::tsig::{split_tsig, SignedMessage, TsigKey};
use super::wire::{decode_request, encode_response, error_reply, RawHeader};
use addd_application::use_cases::HandleZoneRequestUseCase;
use addd_domain::{Opcode, TsigStatus, ZoneRequest, ZoneResponse};
use chrono::Utc;
use hickory_proto::op::{Message, Query, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Turns one received datagram into at most one reply datagram.
pub struct DnsServerHandler {
    use_case: Arc<HandleZoneRequestUseCase>,
    tsig_key: Option<Arc<TsigKey>>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleZoneRequestUseCase>, tsig_key: Option<Arc<TsigKey>>) -> Self {
        Self { use_case, tsig_key }
    }

    pub async fn handle_datagram(&self, bytes: &[u8], src: SocketAddr) -> Option<Vec<u8>> {
        let Some(header) = RawHeader::parse(bytes) else {
            debug!(client = %src, len = bytes.len(), "Dropping runt datagram");
            return None;
        };
        if header.is_response {
            debug!(client = %src, id = header.id, "Ignoring DNS response");
            return None;
        }

        if let Opcode::Other(code) = header.opcode {
            info!(client = %src, id = header.id, opcode = code, "Unsupported opcode");
            let request = ZoneRequest {
                id: header.id,
                opcode: header.opcode,
                questions: Vec::new(),
                updates: Vec::new(),
                tsig: TsigStatus::Absent,
            };
            let response = self.use_case.execute(&request).await;
            return Some(self.encode(&response, &[], false, None));
        }

        let signed = match split_tsig(bytes) {
            Ok(signed) => signed,
            Err(e) => {
                warn!(client = %src, error = %e, "Failed to parse TSIG record");
                return send_error_response(header.id, ResponseCode::FormErr);
            }
        };
        let payload = signed.as_ref().map_or(bytes, |s| s.message.as_slice());

        let message = match Message::from_vec(payload) {
            Ok(message) => message,
            Err(e) => {
                error!(client = %src, error = %e, "Failed to parse request");
                return send_error_response(header.id, ResponseCode::FormErr);
            }
        };

        let tsig_status = self.verify(signed.as_ref());
        let request = decode_request(&message, tsig_status);

        info!(
            client = %src,
            id = request.id,
            opcode = ?request.opcode,
            questions = request.questions.len(),
            updates = request.updates.len(),
            "DNS request received"
        );

        let response = self.use_case.execute(&request).await;
        let edns = message.extensions().is_some();
        Some(self.encode(&response, message.queries(), edns, signed.as_ref()))
    }

    fn verify(&self, signed: Option<&SignedMessage>) -> TsigStatus {
        let Some(signed) = signed else {
            return TsigStatus::Absent;
        };
        let key_name = signed.tsig.key_name();

        let Some(key) = &self.tsig_key else {
            return TsigStatus::Failed {
                key_name,
                reason: "no TSIG key configured".to_string(),
            };
        };

        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        match key.verify(signed, now) {
            Ok(()) => TsigStatus::Verified { key_name },
            Err(e) => TsigStatus::Failed {
                key_name,
                reason: e.to_string(),
            },
        }
    }

    fn encode(
        &self,
        response: &ZoneResponse,
        queries: &[Query],
        edns: bool,
        signed: Option<&SignedMessage>,
    ) -> Vec<u8> {
        let mut bytes = match encode_response(response, queries, edns) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(id = response.id, error = %e, "Failed to encode response");
                return error_reply(response.id, ResponseCode::ServFail).unwrap_or_default();
            }
        };

        if let (Some(signing), Some(key), Some(signed)) = (&response.tsig, &self.tsig_key, signed) {
            if let Err(e) =
                key.sign_response(&mut bytes, &signed.tsig, signing.time_signed, signing.fudge)
            {
                error!(id = response.id, error = %e, "Failed to sign response");
            }
        }

        debug!(id = response.id, rcode = %response.rcode, len = bytes.len(), "Sending response");
        bytes
    }
}

fn send_error_response(id: u16, code: ResponseCode) -> Option<Vec<u8>> {
    debug!(code = ?code, "Sending error response");
    match error_reply(id, code) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!(error = %e, "Failed to encode error response");
            None
        }
    }
}
