pub mod authority;
pub mod record_catalog;

pub use authority::AuthoritySynthesizer;
pub use record_catalog::RecordCatalog;
