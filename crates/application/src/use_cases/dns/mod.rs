mod handle_zone_request;
mod query;
mod update;

pub use handle_zone_request::{HandleZoneRequestUseCase, TSIG_FUDGE_SECS};
