pub mod database;
pub mod dns;
pub mod store;
pub mod system;
