//! Transaction signatures (RFC 8945) with HMAC-MD5.
//!
//! The TSIG record is located and removed from the raw datagram before the
//! message is decoded, since the MAC covers the exact bytes received.

use addd_domain::config::TsigKeyConfig;
use addd_domain::TsigAlgorithm;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder};
use hmac::{Hmac, Mac};
use md5::Md5;
use thiserror::Error;

type HmacMd5 = Hmac<Md5>;

pub const TYPE_TSIG: u16 = 250;
const CLASS_ANY: u16 = 255;
const HEADER_LEN: usize = 12;
const ARCOUNT_OFFSET: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TsigError {
    #[error("Malformed TSIG message: {0}")]
    Malformed(String),

    #[error("Invalid TSIG secret: {0}")]
    InvalidSecret(String),

    #[error("Unknown TSIG key: {0}")]
    UnknownKey(String),

    #[error("Unsupported TSIG algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("TSIG signature mismatch")]
    BadSignature,

    #[error("TSIG time {time_signed} outside fudge window (now {now})")]
    BadTime { time_signed: u64, now: u64 },
}

/// Shared secret used to verify requests and sign replies.
#[derive(Clone)]
pub struct TsigKey {
    name: Name,
    secret: Vec<u8>,
}

impl TsigKey {
    pub fn new(name: &str, secret: Vec<u8>) -> Result<Self, TsigError> {
        let name = Name::from_ascii(name).map_err(|e| TsigError::Malformed(e.to_string()))?;
        Ok(Self {
            name: fqdn(name),
            secret,
        })
    }

    pub fn from_config(config: &TsigKeyConfig) -> Result<Self, TsigError> {
        let secret = STANDARD
            .decode(config.secret.as_bytes())
            .map_err(|e| TsigError::InvalidSecret(e.to_string()))?;
        Self::new(&config.name, secret)
    }

    pub fn name(&self) -> String {
        name_to_string(&self.name)
    }

    fn mac(&self) -> Result<HmacMd5, TsigError> {
        HmacMd5::new_from_slice(&self.secret).map_err(|e| TsigError::InvalidSecret(e.to_string()))
    }

    /// Checks the MAC and time of a request split by [`split_tsig`].
    pub fn verify(&self, signed: &SignedMessage, now: u64) -> Result<(), TsigError> {
        let tsig = &signed.tsig;

        if !names_match(&tsig.key_name, &self.name) {
            return Err(TsigError::UnknownKey(name_to_string(&tsig.key_name)));
        }
        let algorithm = algorithm_name();
        if !names_match(&tsig.algorithm, &algorithm) {
            return Err(TsigError::UnsupportedAlgorithm(name_to_string(&tsig.algorithm)));
        }

        let mut mac = self.mac()?;
        mac.update(&signed.digest_message());
        mac.update(&tsig.variables());
        mac.verify_slice(&tsig.mac)
            .map_err(|_| TsigError::BadSignature)?;

        if now.abs_diff(tsig.time_signed) > u64::from(tsig.fudge) {
            return Err(TsigError::BadTime {
                time_signed: tsig.time_signed,
                now,
            });
        }
        Ok(())
    }

    /// Appends a TSIG record answering `request` to an encoded response.
    pub fn sign_response(
        &self,
        response: &mut Vec<u8>,
        request: &TsigRecord,
        time_signed: u64,
        fudge: u16,
    ) -> Result<(), TsigError> {
        if response.len() < HEADER_LEN {
            return Err(TsigError::Malformed("response shorter than header".to_string()));
        }

        let tsig = TsigRecord {
            key_name: self.name.clone(),
            algorithm: algorithm_name(),
            time_signed,
            fudge,
            mac: Vec::new(),
            original_id: u16::from_be_bytes([response[0], response[1]]),
            error: 0,
            other: Vec::new(),
        };

        let mut mac = self.mac()?;
        mac.update(&(request.mac.len() as u16).to_be_bytes());
        mac.update(&request.mac);
        mac.update(response);
        mac.update(&tsig.variables());
        let digest = mac.finalize().into_bytes().to_vec();

        let tsig = TsigRecord { mac: digest, ..tsig };
        response.extend_from_slice(&tsig.to_wire());
        adjust_arcount(response, 1)
    }
}

impl std::fmt::Debug for TsigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsigKey")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Fields of a TSIG resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsigRecord {
    pub key_name: Name,
    pub algorithm: Name,
    pub time_signed: u64,
    pub fudge: u16,
    pub mac: Vec<u8>,
    pub original_id: u16,
    pub error: u16,
    pub other: Vec<u8>,
}

impl TsigRecord {
    pub fn key_name(&self) -> String {
        name_to_string(&self.key_name)
    }

    /// TSIG variables covered by the MAC, names in canonical form.
    fn variables(&self) -> Vec<u8> {
        let mut out = canonical_wire(&self.key_name);
        out.extend_from_slice(&CLASS_ANY.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&canonical_wire(&self.algorithm));
        out.extend_from_slice(&time_u48(self.time_signed));
        out.extend_from_slice(&self.fudge.to_be_bytes());
        out.extend_from_slice(&self.error.to_be_bytes());
        out.extend_from_slice(&(self.other.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.other);
        out
    }

    fn rdata(&self) -> Vec<u8> {
        let mut out = canonical_wire(&self.algorithm);
        out.extend_from_slice(&time_u48(self.time_signed));
        out.extend_from_slice(&self.fudge.to_be_bytes());
        out.extend_from_slice(&(self.mac.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.mac);
        out.extend_from_slice(&self.original_id.to_be_bytes());
        out.extend_from_slice(&self.error.to_be_bytes());
        out.extend_from_slice(&(self.other.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.other);
        out
    }

    pub fn to_wire(&self) -> Vec<u8> {
        let rdata = self.rdata();
        let mut out = canonical_wire(&self.key_name);
        out.extend_from_slice(&TYPE_TSIG.to_be_bytes());
        out.extend_from_slice(&CLASS_ANY.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        out.extend_from_slice(&rdata);
        out
    }
}

/// A request with its TSIG record removed.
#[derive(Debug, Clone)]
pub struct SignedMessage {
    /// The datagram without the TSIG record and with ARCOUNT decremented.
    pub message: Vec<u8>,
    pub tsig: TsigRecord,
}

impl SignedMessage {
    /// The message as it was before signing, carrying the original id.
    fn digest_message(&self) -> Vec<u8> {
        let mut bytes = self.message.clone();
        bytes[..2].copy_from_slice(&self.tsig.original_id.to_be_bytes());
        bytes
    }
}

/// Separates a trailing TSIG record from a datagram.
///
/// `Ok(None)` when the last additional record is not a TSIG.
pub fn split_tsig(bytes: &[u8]) -> Result<Option<SignedMessage>, TsigError> {
    if bytes.len() < HEADER_LEN {
        return Err(malformed("message shorter than header"));
    }

    let count = |offset: usize| u16::from_be_bytes([bytes[offset], bytes[offset + 1]]) as usize;
    let (qdcount, ancount, nscount, arcount) = (count(4), count(6), count(8), count(10));
    if arcount == 0 {
        return Ok(None);
    }

    let mut decoder = BinDecoder::new(bytes);
    decoder.read_slice(HEADER_LEN).map_err(malformed)?;

    for _ in 0..qdcount {
        Name::read(&mut decoder).map_err(malformed)?;
        decoder.read_slice(4).map_err(malformed)?;
    }
    for _ in 0..(ancount + nscount + arcount - 1) {
        skip_record(&mut decoder)?;
    }

    let tsig_start = decoder.index();
    let key_name = Name::read(&mut decoder).map_err(malformed)?;
    let rtype = read_u16(&mut decoder)?;
    if rtype != TYPE_TSIG {
        return Ok(None);
    }
    read_u16(&mut decoder)?;
    decoder.read_u32().map_err(malformed)?;
    let rdlength = read_u16(&mut decoder)? as usize;
    let rdata_start = decoder.index();

    let algorithm = Name::read(&mut decoder).map_err(malformed)?;
    let time_high = u64::from(read_u16(&mut decoder)?);
    let time_low = u64::from(decoder.read_u32().map_err(malformed)?.unverified());
    let fudge = read_u16(&mut decoder)?;
    let mac_len = read_u16(&mut decoder)? as usize;
    let mac = read_bytes(&mut decoder, mac_len)?;
    let original_id = read_u16(&mut decoder)?;
    let error = read_u16(&mut decoder)?;
    let other_len = read_u16(&mut decoder)? as usize;
    let other = read_bytes(&mut decoder, other_len)?;

    if decoder.index() != rdata_start + rdlength {
        return Err(malformed("TSIG RDATA length mismatch"));
    }
    if decoder.index() != bytes.len() {
        return Err(malformed("data after TSIG record"));
    }

    let mut message = bytes[..tsig_start].to_vec();
    adjust_arcount(&mut message, -1)?;

    Ok(Some(SignedMessage {
        message,
        tsig: TsigRecord {
            key_name: fqdn(key_name),
            algorithm: fqdn(algorithm),
            time_signed: (time_high << 32) | time_low,
            fudge,
            mac,
            original_id,
            error,
            other,
        },
    }))
}

pub fn algorithm_name() -> Name {
    Name::from_ascii(TsigAlgorithm::HmacMd5.name()).unwrap_or_else(|_| Name::root())
}

fn skip_record(decoder: &mut BinDecoder<'_>) -> Result<(), TsigError> {
    Name::read(decoder).map_err(malformed)?;
    decoder.read_slice(8).map_err(malformed)?;
    let rdlength = read_u16(decoder)? as usize;
    decoder.read_slice(rdlength).map_err(malformed)?;
    Ok(())
}

fn read_u16(decoder: &mut BinDecoder<'_>) -> Result<u16, TsigError> {
    Ok(decoder.read_u16().map_err(malformed)?.unverified())
}

fn read_bytes(decoder: &mut BinDecoder<'_>, len: usize) -> Result<Vec<u8>, TsigError> {
    Ok(decoder.read_slice(len).map_err(malformed)?.unverified().to_vec())
}

fn adjust_arcount(message: &mut [u8], delta: i32) -> Result<(), TsigError> {
    let current = u16::from_be_bytes([message[ARCOUNT_OFFSET], message[ARCOUNT_OFFSET + 1]]);
    let updated = u16::try_from(i32::from(current) + delta)
        .map_err(|_| malformed("additional count out of range"))?;
    message[ARCOUNT_OFFSET..ARCOUNT_OFFSET + 2].copy_from_slice(&updated.to_be_bytes());
    Ok(())
}

/// Uncompressed, lower-cased wire form of `name`.
fn canonical_wire(name: &Name) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.iter() {
        out.push(label.len() as u8);
        out.extend(label.iter().map(u8::to_ascii_lowercase));
    }
    out.push(0);
    out
}

fn time_u48(time: u64) -> [u8; 6] {
    let bytes = time.to_be_bytes();
    [bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7]]
}

fn names_match(a: &Name, b: &Name) -> bool {
    canonical_wire(a) == canonical_wire(b)
}

fn name_to_string(name: &Name) -> String {
    name.to_ascii().to_ascii_lowercase()
}

fn fqdn(mut name: Name) -> Name {
    name.set_fqdn(true);
    name
}

fn malformed(error: impl std::fmt::Display) -> TsigError {
    TsigError::Malformed(error.to_string())
}
