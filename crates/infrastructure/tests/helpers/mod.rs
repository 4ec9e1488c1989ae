#![allow(dead_code)]

pub mod fake_rqlite;
pub mod messages;

pub use fake_rqlite::FakeRqlite;
pub use messages::*;
