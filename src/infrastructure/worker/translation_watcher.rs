//! Translation Watcher - 译本选择变更驱动的缓存失效
//!
//! 订阅 EventPublisher，收到 TranslationsChanged 后依次通知每个容器存储。
//! 广播通道与经文、音频事件共享，落后时按 TranslationStore 的当前选择补发一次

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;

use crate::application::ports::TranslationSubscriber;
use crate::application::stores::TranslationStore;
use crate::infrastructure::events::{EventPublisher, QuranEvent};

pub struct TranslationWatcher {
    receiver: Receiver<QuranEvent>,
    translations: Arc<TranslationStore>,
    subscribers: Vec<Arc<dyn TranslationSubscriber>>,
}

impl TranslationWatcher {
    /// 构造时即订阅，之后发布的事件不会丢失
    pub fn new(events: &EventPublisher, translations: Arc<TranslationStore>) -> Self {
        Self {
            receiver: events.subscribe(),
            translations,
            subscribers: Vec::new(),
        }
    }

    pub fn register(mut self, subscriber: Arc<dyn TranslationSubscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// 启动 Watcher，发布端关闭后退出
    pub async fn run(mut self) {
        tracing::info!(subscribers = self.subscribers.len(), "TranslationWatcher started");

        loop {
            match self.receiver.recv().await {
                Ok(QuranEvent::TranslationsChanged { ids }) => self.dispatch(&ids).await,
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    // 被挤掉的可能正是 TranslationsChanged
                    let ids = self.translations.ids_string();
                    tracing::warn!(
                        skipped,
                        translations = %ids,
                        "TranslationWatcher lagged behind event stream, re-dispatching selection"
                    );
                    self.dispatch(&ids).await;
                }
                Err(RecvError::Closed) => break,
            }
        }

        tracing::info!("TranslationWatcher stopped");
    }

    async fn dispatch(&self, ids: &str) {
        tracing::info!(translations = %ids, "Translation selection changed");

        let results = join_all(
            self.subscribers
                .iter()
                .map(|subscriber| subscriber.on_translations_changed(ids)),
        )
        .await;

        for (subscriber, result) in self.subscribers.iter().zip(results) {
            if let Err(e) = result {
                tracing::error!(
                    store = subscriber.name(),
                    error = %e,
                    "Failed to refresh store after translation change"
                );
            }
        }
    }
}
