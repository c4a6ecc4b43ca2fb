//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod quran;
pub mod reference;

pub use quran::*;
pub use reference::*;
