use crate::dns_message::{DnsClass, TYPE_A, TYPE_AAAA, TYPE_NS, TYPE_SOA};
use crate::dns_name::{to_fqdn, validate_domain_name};
use crate::errors::DomainError;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    NS(String),
    SOA(SoaData),
}

impl RData {
    pub fn type_code(&self) -> u16 {
        match self {
            RData::A(_) => TYPE_A,
            RData::AAAA(_) => TYPE_AAAA,
            RData::NS(_) => TYPE_NS,
            RData::SOA(_) => TYPE_SOA,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RData::A(_) => "A",
            RData::AAAA(_) => "AAAA",
            RData::NS(_) => "NS",
            RData::SOA(_) => "SOA",
        }
    }
}

/// A resource record ready to be placed in a response section.
///
/// `name` and any names inside the data are fully qualified and lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub ttl: u32,
    pub class: DnsClass,
    pub data: RData,
}

impl ResourceRecord {
    pub fn new(name: &str, ttl: u32, data: RData) -> Self {
        Self {
            name: to_fqdn(name),
            ttl,
            class: DnsClass::IN,
            data,
        }
    }

    /// Parses a presentation line: `<name> <ttl> <class> <type> <rdata...>`.
    pub fn parse(line: &str) -> Result<Self, DomainError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            return Err(serialization_error(line, "expected at least five fields"));
        }

        let name = parse_name(fields[0]).map_err(|e| serialization_error(line, &e))?;
        let ttl = fields[1]
            .parse::<u32>()
            .map_err(|_| serialization_error(line, "invalid TTL"))?;
        if !fields[2].eq_ignore_ascii_case("IN") {
            return Err(serialization_error(line, "only class IN is supported"));
        }

        let rdata = &fields[4..];
        let data = match fields[3].to_ascii_uppercase().as_str() {
            "A" => RData::A(parse_single(rdata, line)?),
            "AAAA" => RData::AAAA(parse_single(rdata, line)?),
            "NS" => {
                let target = single_field(rdata, line)?;
                RData::NS(parse_name(target).map_err(|e| serialization_error(line, &e))?)
            }
            "SOA" => RData::SOA(parse_soa(rdata, line)?),
            other => {
                return Err(serialization_error(
                    line,
                    &format!("unsupported type {}", other),
                ))
            }
        };

        Ok(Self {
            name,
            ttl,
            class: DnsClass::IN,
            data,
        })
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} IN {} ", self.name, self.ttl, self.data.type_name())?;
        match &self.data {
            RData::A(ip) => write!(f, "{}", ip),
            RData::AAAA(ip) => write!(f, "{}", ip),
            RData::NS(target) => write!(f, "{}", target),
            RData::SOA(soa) => write!(
                f,
                "{} {} {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            ),
        }
    }
}

fn serialization_error(line: &str, reason: &str) -> DomainError {
    DomainError::SerializationError(format!("'{}': {}", line, reason))
}

fn parse_name(name: &str) -> Result<String, String> {
    if !name.ends_with('.') {
        return Err(format!("name '{}' is not fully qualified", name));
    }
    validate_domain_name(name).map_err(|e| e.to_string())?;
    Ok(to_fqdn(name))
}

fn single_field<'a>(rdata: &[&'a str], line: &str) -> Result<&'a str, DomainError> {
    match rdata {
        [value] => Ok(*value),
        _ => Err(serialization_error(line, "expected exactly one rdata field")),
    }
}

fn parse_single<T: std::str::FromStr>(rdata: &[&str], line: &str) -> Result<T, DomainError> {
    single_field(rdata, line)?
        .parse::<T>()
        .map_err(|_| serialization_error(line, "invalid address"))
}

fn parse_soa(rdata: &[&str], line: &str) -> Result<SoaData, DomainError> {
    if rdata.len() != 7 {
        return Err(serialization_error(line, "SOA needs seven rdata fields"));
    }
    let number = |index: usize| {
        rdata[index]
            .parse::<u32>()
            .map_err(|_| serialization_error(line, "invalid SOA counter"))
    };
    Ok(SoaData {
        mname: parse_name(rdata[0]).map_err(|e| serialization_error(line, &e))?,
        rname: parse_name(rdata[1]).map_err(|e| serialization_error(line, &e))?,
        serial: number(2)?,
        refresh: number(3)?,
        retry: number(4)?,
        expire: number(5)?,
        minimum: number(6)?,
    })
}
