//! Events - 应用内事件广播

mod publisher;

pub use publisher::{EventPublisher, QuranEvent};
