//! Event Publisher Implementation
//!
//! 应用内事件广播：译本选择变更驱动缓存失效，其余事件推送给 WebSocket 客户端

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::container::ContainerKind;

/// 广播通道容量
const CHANNEL_CAPACITY: usize = 100;

/// 应用事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum QuranEvent {
    /// 译本选择变更
    TranslationsChanged { ids: String },
    /// 一页经文合并完成
    VersesMerged {
        kind: ContainerKind,
        container_id: u32,
        page: u32,
        added: usize,
        total: usize,
    },
    /// 容器经文被清空
    VersesCleared {
        kind: ContainerKind,
        container_id: u32,
    },
    /// 开始拉取音频
    AudioLoading { reciter_id: u32, chapter_id: u32 },
    /// 音频就绪
    AudioReady {
        reciter_id: u32,
        chapter_id: u32,
        cached: bool,
    },
    /// 音频拉取失败
    AudioFailed {
        reciter_id: u32,
        chapter_id: u32,
        error: String,
    },
    /// 诵读者切换
    ReciterChanged { reciter_id: u32 },
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<QuranEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅全部事件
    pub fn subscribe(&self) -> broadcast::Receiver<QuranEvent> {
        self.channel.subscribe()
    }

    /// 发布译本选择变更事件
    pub fn publish_translations_changed(&self, ids: &str) {
        self.publish(QuranEvent::TranslationsChanged {
            ids: ids.to_string(),
        });
    }

    /// 发布经文合并事件
    pub fn publish_verses_merged(
        &self,
        kind: ContainerKind,
        container_id: u32,
        page: u32,
        added: usize,
        total: usize,
    ) {
        self.publish(QuranEvent::VersesMerged {
            kind,
            container_id,
            page,
            added,
            total,
        });
    }

    /// 发布经文清空事件
    pub fn publish_verses_cleared(&self, kind: ContainerKind, container_id: u32) {
        self.publish(QuranEvent::VersesCleared { kind, container_id });
    }

    pub fn publish_audio_loading(&self, reciter_id: u32, chapter_id: u32) {
        self.publish(QuranEvent::AudioLoading {
            reciter_id,
            chapter_id,
        });
    }

    pub fn publish_audio_ready(&self, reciter_id: u32, chapter_id: u32, cached: bool) {
        self.publish(QuranEvent::AudioReady {
            reciter_id,
            chapter_id,
            cached,
        });
    }

    pub fn publish_audio_failed(&self, reciter_id: u32, chapter_id: u32, error: &str) {
        self.publish(QuranEvent::AudioFailed {
            reciter_id,
            chapter_id,
            error: error.to_string(),
        });
    }

    pub fn publish_reciter_changed(&self, reciter_id: u32) {
        self.publish(QuranEvent::ReciterChanged { reciter_id });
    }

    fn publish(&self, event: QuranEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(
                event = ?e.0,
                "Failed to publish event (no receivers)"
            );
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_events_in_order() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe();

        publisher.publish_translations_changed("131,20");
        publisher.publish_verses_cleared(ContainerKind::Juz, 3);

        assert_eq!(
            rx.recv().await.unwrap(),
            QuranEvent::TranslationsChanged {
                ids: "131,20".to_string()
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            QuranEvent::VersesCleared {
                kind: ContainerKind::Juz,
                container_id: 3
            }
        );
    }

    #[test]
    fn test_publish_without_receivers_is_silent() {
        let publisher = EventPublisher::new();
        publisher.publish_reciter_changed(7);
    }

    #[test]
    fn test_event_json_shape() {
        let event = QuranEvent::AudioReady {
            reciter_id: 7,
            chapter_id: 114,
            cached: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "AudioReady");
        assert_eq!(json["data"]["chapter_id"], 114);
        assert_eq!(json["data"]["cached"], true);
    }
}
