//! Loading Overlay - 全局加载遮罩与装饰性进度计时器
//!
//! 进度值每个 tick 增加 `step`，等于 `tick_ms` 时回绕到 0。
//! 与实际请求进度无关，必须由调用方显式 `stop`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

pub struct LoadingOverlay {
    tick_ms: u32,
    step: u32,
    app_loading: AtomicBool,
    progress: Arc<watch::Sender<u32>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LoadingOverlay {
    pub fn new(tick_ms: u32, step: u32) -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            tick_ms,
            step,
            app_loading: AtomicBool::new(false),
            progress: Arc::new(tx),
            task: Mutex::new(None),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 启动计时器；已在运行时先停止旧计时器
    pub fn start(&self) {
        let period = Duration::from_millis(u64::from(self.tick_ms));
        let wrap_at = self.tick_ms;
        let step = self.step;
        let progress = self.progress.clone();
        let first_tick = Instant::now() + period;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            loop {
                ticker.tick().await;
                progress.send_modify(|value| {
                    *value = if *value == wrap_at { 0 } else { *value + step };
                });
            }
        });

        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
        tracing::debug!(tick_ms = self.tick_ms, step = self.step, "Loading overlay timer started");
    }

    pub fn stop(&self) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            handle.abort();
            tracing::debug!("Loading overlay timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn progress(&self) -> u32 {
        *self.progress.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.progress.subscribe()
    }

    pub fn set_app_loading(&self, loading: bool) {
        self.app_loading.store(loading, Ordering::SeqCst);
    }

    pub fn is_app_loading(&self) -> bool {
        self.app_loading.load(Ordering::SeqCst)
    }
}

impl Drop for LoadingOverlay {
    fn drop(&mut self) {
        self.stop();
    }
}
