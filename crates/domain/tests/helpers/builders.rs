#![allow(dead_code)]
use addd_domain::{DnsClass, Record, RecordClass, RecordType, UpdateData, UpdateRecord};
use std::net::IpAddr;

pub struct RecordBuilder {
    name: String,
    address: String,
    record_type: RecordType,
    ttl: u32,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "host.example.com".to_string(),
            address: "203.0.113.5".to_string(),
            record_type: RecordType::A,
            ttl: 300,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = address.to_string();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn build(self) -> Record {
        Record::new(
            &self.name,
            &self.address,
            self.record_type,
            RecordClass::IN,
            self.ttl,
        )
        .unwrap()
    }
}

pub struct UpdateRecordBuilder {
    name: String,
    rtype: u16,
    class: DnsClass,
    ttl: u32,
    data: UpdateData,
}

impl UpdateRecordBuilder {
    pub fn add(name: &str, address: &str) -> Self {
        let ip: IpAddr = address.parse().unwrap();
        Self {
            name: name.to_string(),
            rtype: if ip.is_ipv4() { 1 } else { 28 },
            class: DnsClass::IN,
            ttl: 300,
            data: UpdateData::Address(ip),
        }
    }

    pub fn delete(name: &str, rtype: u16) -> Self {
        Self {
            name: name.to_string(),
            rtype,
            class: DnsClass::NONE,
            ttl: 0,
            data: UpdateData::Empty,
        }
    }

    pub fn class(mut self, class: DnsClass) -> Self {
        self.class = class;
        self
    }

    pub fn rtype(mut self, rtype: u16) -> Self {
        self.rtype = rtype;
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn data(mut self, data: UpdateData) -> Self {
        self.data = data;
        self
    }

    pub fn build(self) -> UpdateRecord {
        UpdateRecord {
            name: self.name,
            rtype: self.rtype,
            class: self.class,
            ttl: self.ttl,
            data: self.data,
        }
    }
}
