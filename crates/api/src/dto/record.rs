use addd_application::use_cases::RecordChanges;
use addd_domain::{Record, RecordClass, RecordType};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct RecordListResponse {
    pub records: Vec<Record>,
}

#[derive(Serialize)]
pub struct RecordChangeResponse {
    pub status: &'static str,
    pub record: Record,
}

impl RecordChangeResponse {
    pub fn created(record: Record) -> Self {
        Self {
            status: "created",
            record,
        }
    }

    pub fn deleted(record: Record) -> Self {
        Self {
            status: "deleted",
            record,
        }
    }
}

#[derive(Serialize)]
pub struct RecordUpdatedResponse {
    pub status: &'static str,
    #[serde(rename = "old-record")]
    pub old_record: Record,
    #[serde(rename = "new-record")]
    pub new_record: Record,
}

/// Body of `PUT /records/{name}/{type}`. Omitted fields keep the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecordRequest {
    pub fqdn: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<RecordType>,
    pub class: Option<RecordClass>,
    pub ttl: Option<u32>,
}

impl From<UpdateRecordRequest> for RecordChanges {
    fn from(req: UpdateRecordRequest) -> Self {
        Self {
            name: req.fqdn,
            address: req.address,
            record_type: req.record_type,
            class: req.class,
            ttl: req.ttl,
        }
    }
}
