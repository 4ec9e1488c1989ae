use addd_domain::dns_name::names_equal;
use addd_domain::{DomainError, QueryType, Question, Rcode, RecordType, ZoneRequest, ZoneResponse};
use tracing::{debug, error};

use super::handle_zone_request::HandleZoneRequestUseCase;

impl HandleZoneRequestUseCase {
    /// Resolves every question and folds the outcomes into one code: the most
    /// severe code wins, and a successful query without any answer becomes
    /// NXDOMAIN.
    pub(super) async fn answer_questions(
        &self,
        request: &ZoneRequest,
        response: &mut ZoneResponse,
    ) -> Rcode {
        let mut rcode = Rcode::Success;
        for question in &request.questions {
            let outcome = self.answer_question(question, response).await;
            debug!(
                name = %question.name,
                qtype = ?question.qtype,
                rcode = %outcome,
                "Question resolved"
            );
            rcode = rcode.aggregate(outcome);
        }

        if rcode == Rcode::Success && response.answers.is_empty() {
            return Rcode::NameError;
        }
        rcode
    }

    async fn answer_question(&self, question: &Question, response: &mut ZoneResponse) -> Rcode {
        let zone = self.authority.zone();

        match question.qtype {
            QueryType::SOA => {
                if !zone.is_apex(&question.name) {
                    return Rcode::NameError;
                }
                response.answers.push(self.authority.soa());
                match self.authority.nameserver_records().await {
                    Ok(records) => {
                        response.additional.extend(records);
                        Rcode::Success
                    }
                    Err(e) => {
                        error!(error = %e, "Cannot build nameserver addresses for SOA");
                        Rcode::ServerFailure
                    }
                }
            }
            QueryType::NS => {
                if !zone.is_apex(&question.name) {
                    return Rcode::NameError;
                }
                response.answers.push(self.authority.ns());
                Rcode::Success
            }
            QueryType::A | QueryType::ANY if zone.is_nameserver(&question.name) => {
                response
                    .answers
                    .extend(self.authority.nameserver_ipv4_records().await);
                Rcode::Success
            }
            QueryType::A | QueryType::ANY => {
                self.answer_from_store(question, RecordType::A, response)
                    .await
            }
            QueryType::AAAA => {
                self.answer_from_store(question, RecordType::AAAA, response)
                    .await
            }
            QueryType::Other(_) => Rcode::NotImplemented,
        }
    }

    async fn answer_from_store(
        &self,
        question: &Question,
        record_type: RecordType,
        response: &mut ZoneResponse,
    ) -> Rcode {
        let record = match self.records.get_record(&question.name, record_type).await {
            Ok(Some(record)) => record,
            Ok(None) | Err(DomainError::InvalidDomainName(_)) => return Rcode::NameError,
            Err(e) => {
                error!(error = %e, name = %question.name, "Record lookup failed");
                return Rcode::ServerFailure;
            }
        };

        let rr = match record.to_wire_rr() {
            Ok(rr) => rr,
            Err(e) => {
                error!(error = %e, name = %question.name, "Stored record cannot be encoded");
                return Rcode::ServerFailure;
            }
        };

        if !names_equal(&rr.name, &question.name) {
            return Rcode::BadName;
        }

        response.answers.push(rr);
        Rcode::Success
    }
}
