//! Memory Layer - In-Memory Adapters
//!
//! 参考数据与设置存储的内存实现，用于测试和无持久化运行

mod reference_data;
mod settings_storage;

pub use reference_data::InMemoryReferenceData;
pub use settings_storage::InMemorySettingsStorage;
