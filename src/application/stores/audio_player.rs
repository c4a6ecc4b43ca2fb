//! Audio Player - 诵读音频播放序列器
//!
//! 状态机（单个"正在播放"槽位）：
//! - Idle: 未设置章号，或上一次拉取失败
//! - Loading: (诵读者, 章) 的音频描述正在拉取
//! - Ready: 持有当前 (诵读者, 章) 的音频描述
//!
//! 音频描述按 (reciter_id, chapter_id) 缓存，切换诵读者后自然不命中

use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::{read, write, ChapterStore, LoadingOverlay};
use crate::application::error::ApplicationError;
use crate::application::ports::{QuranApiPort, ReferenceDataPort};
use crate::domain::audio::{group_by_style, AudioDescriptor, Reciter, PLAYBACK_SPEEDS};
use crate::domain::container::TOTAL_CHAPTERS;
use crate::infrastructure::events::EventPublisher;

/// 播放阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    Idle,
    Loading,
    Ready,
}

/// 音频请求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioRequest {
    pub chapter_id: u32,
    pub verse_key: Option<String>,
    pub audio_src: Option<String>,
}

impl AudioRequest {
    pub fn chapter(chapter_id: u32) -> Self {
        Self {
            chapter_id,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
struct PlayerState {
    chapter_id: u32,
    verse_key: Option<String>,
    audio_src: Option<String>,
    descriptor: Option<AudioDescriptor>,
    phase: PlaybackPhase,
    last_error: Option<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            chapter_id: 0,
            verse_key: None,
            audio_src: None,
            descriptor: None,
            phase: PlaybackPhase::Idle,
            last_error: None,
        }
    }
}

/// 播放器状态快照
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub chapter_id: u32,
    pub verse_key: Option<String>,
    pub audio_src: Option<String>,
    pub phase: PlaybackPhase,
    pub reciter: Reciter,
    pub audio_file: Option<AudioDescriptor>,
    pub last_error: Option<String>,
    pub app_loading: bool,
    pub overlay_progress: u32,
}

pub struct AudioPlayer {
    api: Arc<dyn QuranApiPort>,
    reference: Arc<dyn ReferenceDataPort>,
    events: Arc<EventPublisher>,
    overlay: Arc<LoadingOverlay>,
    /// 若挂载，音频描述同时写到对应的章记录上
    chapters: Option<Arc<ChapterStore>>,
    cache: DashMap<(u32, u32), AudioDescriptor>,
    reciter: RwLock<Reciter>,
    reciters: RwLock<Vec<Reciter>>,
    state: RwLock<PlayerState>,
}

impl AudioPlayer {
    pub fn new(
        api: Arc<dyn QuranApiPort>,
        reference: Arc<dyn ReferenceDataPort>,
        events: Arc<EventPublisher>,
        overlay: Arc<LoadingOverlay>,
    ) -> Self {
        Self {
            api,
            reference,
            events,
            overlay,
            chapters: None,
            cache: DashMap::new(),
            reciter: RwLock::new(Reciter::default()),
            reciters: RwLock::new(Vec::new()),
            state: RwLock::new(PlayerState::default()),
        }
    }

    pub fn with_chapters(mut self, chapters: Arc<ChapterStore>) -> Self {
        self.chapters = Some(chapters);
        self
    }

    /// 指定初始诵读者 id；目录中找不到时仅替换 id
    pub fn with_reciter_id(self, reciter_id: u32) -> Self {
        write(&self.reciter).id = reciter_id;
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    // ========================================================================
    // State
    // ========================================================================

    pub fn chapter_id(&self) -> u32 {
        read(&self.state).chapter_id
    }

    pub fn phase(&self) -> PlaybackPhase {
        read(&self.state).phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == PlaybackPhase::Loading
    }

    pub fn current(&self) -> Option<AudioDescriptor> {
        read(&self.state).descriptor.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        read(&self.state).last_error.clone()
    }

    pub fn reciter(&self) -> Reciter {
        read(&self.reciter).clone()
    }

    pub fn reciter_id(&self) -> u32 {
        read(&self.reciter).id
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let state = read(&self.state).clone();
        PlayerSnapshot {
            chapter_id: state.chapter_id,
            verse_key: state.verse_key,
            audio_src: state.audio_src,
            phase: state.phase,
            reciter: self.reciter(),
            audio_file: state.descriptor,
            last_error: state.last_error,
            app_loading: self.overlay.is_app_loading(),
            overlay_progress: self.overlay.progress(),
        }
    }

    /// 命中缓存的音频描述
    pub fn cached(&self, reciter_id: u32, chapter_id: u32) -> Option<AudioDescriptor> {
        self.cache
            .get(&(reciter_id, chapter_id))
            .filter(|entry| entry.is_for(reciter_id, chapter_id))
            .map(|entry| entry.value().clone())
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// 设置当前章并取得音频描述
    ///
    /// 章号与经文键立即更新；缓存命中时直接进入 Ready，否则拉取。
    /// 接口返回空列表时结果为 `None`，失败时回到 Idle 并返回错误
    pub async fn get_audio(&self, request: AudioRequest) -> Result<Option<AudioDescriptor>, ApplicationError> {
        let chapter_id = request.chapter_id;
        let reciter_id = self.reciter_id();

        {
            let mut state = write(&self.state);
            state.chapter_id = chapter_id;
            state.verse_key = request.verse_key;
            state.audio_src = request.audio_src;
        }

        if let Some(hit) = self.cached(reciter_id, chapter_id) {
            tracing::debug!(reciter_id, chapter_id, "Audio cache hit");
            self.settle(reciter_id, chapter_id, |state| {
                state.descriptor = Some(hit.clone());
                state.phase = PlaybackPhase::Ready;
                state.last_error = None;
            });
            self.events.publish_audio_ready(reciter_id, chapter_id, true);
            return Ok(Some(hit));
        }

        write(&self.state).phase = PlaybackPhase::Loading;
        self.events.publish_audio_loading(reciter_id, chapter_id);
        tracing::debug!(reciter_id, chapter_id, "Fetching audio files");

        let files = match self.api.audio_files(reciter_id, chapter_id).await {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(reciter_id, chapter_id, error = %e, "Failed to fetch audio files");
                let message = e.to_string();
                self.settle(reciter_id, chapter_id, |state| {
                    state.descriptor = None;
                    state.phase = PlaybackPhase::Idle;
                    state.last_error = Some(message.clone());
                });
                self.events.publish_audio_failed(reciter_id, chapter_id, &message);
                return Err(e.into());
            }
        };

        let Some(file) = files.into_iter().next() else {
            tracing::warn!(reciter_id, chapter_id, "No audio file returned");
            self.settle(reciter_id, chapter_id, |state| {
                state.descriptor = None;
                state.phase = PlaybackPhase::Idle;
            });
            return Ok(None);
        };

        let descriptor = AudioDescriptor::from_file(reciter_id, file);
        self.cache
            .insert((reciter_id, chapter_id), descriptor.clone());
        if let Some(chapters) = &self.chapters {
            chapters.attach_audio(chapter_id, descriptor.clone());
        }

        self.settle(reciter_id, chapter_id, |state| {
            state.descriptor = Some(descriptor.clone());
            state.phase = PlaybackPhase::Ready;
            state.last_error = None;
        });
        tracing::info!(reciter_id, chapter_id, url = %descriptor.audio_url, "Audio ready");
        self.events.publish_audio_ready(reciter_id, chapter_id, false);
        Ok(Some(descriptor))
    }

    /// 仅当槽位仍指向本次请求的 (诵读者, 章) 时更新状态，
    /// 被后续请求取代的响应只写缓存
    fn settle(&self, reciter_id: u32, chapter_id: u32, update: impl FnOnce(&mut PlayerState)) {
        if self.reciter_id() != reciter_id {
            return;
        }
        let mut state = write(&self.state);
        if state.chapter_id == chapter_id {
            update(&mut state);
        }
    }

    /// 切换诵读者并为当前章重新取音频
    pub async fn change_reciter(&self, reciter: Reciter) -> Result<Option<AudioDescriptor>, ApplicationError> {
        let reciter_id = reciter.id;
        *write(&self.reciter) = reciter;
        tracing::info!(reciter_id, "Reciter changed");
        self.events.publish_reciter_changed(reciter_id);

        let chapter_id = self.chapter_id();
        if chapter_id == 0 {
            return Ok(None);
        }
        self.get_audio(AudioRequest::chapter(chapter_id)).await
    }

    /// 按 id 从诵读者目录中切换
    pub async fn change_reciter_by_id(&self, reciter_id: u32) -> Result<Option<AudioDescriptor>, ApplicationError> {
        let reciter = read(&self.reciters)
            .iter()
            .find(|r| r.id == reciter_id)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("reciter", reciter_id))?;
        self.change_reciter(reciter).await
    }

    /// 下一章，114 之后回到 1
    ///
    /// 期间打开全局加载遮罩；只有取得音频描述后才关闭，
    /// 拉取失败或无音频时遮罩保持运行，由调用方处理
    pub async fn play_next(&self, audio_src: Option<String>) -> Result<Option<AudioDescriptor>, ApplicationError> {
        let current = self.chapter_id();
        if current == 0 {
            return Ok(None);
        }

        self.overlay.set_app_loading(true);
        self.overlay.start();

        let next = if current >= TOTAL_CHAPTERS { 1 } else { current + 1 };
        let result = self
            .get_audio(AudioRequest {
                chapter_id: next,
                verse_key: None,
                audio_src,
            })
            .await;

        if self.current().is_some() {
            self.overlay.set_app_loading(false);
            self.overlay.stop();
        }
        result
    }

    /// 上一章；下界不做回绕，从 1 后退会得到 0
    pub async fn play_previous(&self) -> Result<Option<AudioDescriptor>, ApplicationError> {
        let current = self.chapter_id();
        if current == 0 {
            return Ok(None);
        }

        let previous = current - 1;
        if previous == 0 {
            tracing::warn!(chapter_id = previous, "Stepped back past the first chapter");
        }
        self.get_audio(AudioRequest::chapter(previous)).await
    }

    // ========================================================================
    // Reciters
    // ========================================================================

    pub async fn load_reciters(&self) -> Result<(), ApplicationError> {
        let reciters = self.reference.reciters().await?;
        tracing::info!(count = reciters.len(), "Reciters loaded");
        *write(&self.reciters) = reciters;
        Ok(())
    }

    pub fn reciters(&self) -> Vec<Reciter> {
        read(&self.reciters).clone()
    }

    pub fn reciters_by_style(&self) -> BTreeMap<String, Vec<Reciter>> {
        group_by_style(&read(&self.reciters))
    }

    pub fn reciter_initials(&self) -> String {
        read(&self.reciter).initials()
    }

    pub fn avatar_placeholder(&self) -> String {
        read(&self.reciter).avatar_placeholder()
    }

    pub fn playback_speeds(&self) -> &'static [&'static str] {
        &PLAYBACK_SPEEDS
    }
}
