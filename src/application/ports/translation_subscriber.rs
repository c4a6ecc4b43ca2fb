//! Translation Subscriber Port - 译本选择变更的观察者

use async_trait::async_trait;

use crate::application::error::ApplicationError;

/// 译本选择变更订阅者
///
/// 由后台 watcher 在收到 `TranslationsChanged` 事件后逐个调用
#[async_trait]
pub trait TranslationSubscriber: Send + Sync {
    /// 订阅者名称（日志用）
    fn name(&self) -> &'static str;

    async fn on_translations_changed(&self, ids: &str) -> Result<(), ApplicationError>;
}
