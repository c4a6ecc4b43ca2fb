//! Quran API Adapter - 远端 REST 与音频目录

mod fake_quran_client;
mod http_quran_client;

pub use fake_quran_client::{fake_pagination, FakeQuranClient};
pub use http_quran_client::*;
