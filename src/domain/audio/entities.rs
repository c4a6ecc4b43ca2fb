//! Audio Context - 音频文件与缓存描述

use serde::{Deserialize, Serialize};

/// 逐节时间轴（毫秒）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseTiming {
    pub verse_key: String,
    #[serde(default)]
    pub timestamp_from: u64,
    #[serde(default)]
    pub timestamp_to: u64,
    #[serde(default)]
    pub duration: Option<f64>,
    /// 逐词分段 `[word, from, to]`，原样保留
    #[serde(default)]
    pub segments: Vec<serde_json::Value>,
}

/// 音频接口返回的单章音频文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFile {
    #[serde(default)]
    pub id: u64,
    pub chapter_id: u32,
    #[serde(default)]
    pub file_size: Option<f64>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub total_files: Option<u32>,
    pub audio_url: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub verse_timings: Vec<VerseTiming>,
}

/// 已缓存的音频描述，缓存键为 (reciter_id, chapter_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioDescriptor {
    pub reciter_id: u32,
    pub chapter_id: u32,
    pub audio_url: String,
    pub duration: f64,
    pub format: Option<String>,
    pub file_size: Option<f64>,
    pub verse_timings: Vec<VerseTiming>,
}

impl AudioDescriptor {
    pub fn from_file(reciter_id: u32, file: AudioFile) -> Self {
        Self {
            reciter_id,
            chapter_id: file.chapter_id,
            audio_url: file.audio_url,
            duration: file.duration,
            format: file.format,
            file_size: file.file_size,
            verse_timings: file.verse_timings,
        }
    }

    /// 是否可作为 (reciter, chapter) 的缓存命中
    pub fn is_for(&self, reciter_id: u32, chapter_id: u32) -> bool {
        self.reciter_id == reciter_id && self.chapter_id == chapter_id
    }

    pub fn timing(&self, verse_key: &str) -> Option<&VerseTiming> {
        self.verse_timings.iter().find(|t| t.verse_key == verse_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_from_qdc_file() {
        let json = r#"{
            "id": 1, "chapter_id": 1, "file_size": 710784.0, "format": "mp3",
            "audio_url": "https://download.quranicaudio.com/qdc/mishari_al_afasy/murattal/1.mp3",
            "duration": 43000,
            "verse_timings": [
                {"verse_key": "1:1", "timestamp_from": 0, "timestamp_to": 6493, "duration": 6493,
                 "segments": [[1, 0, 630], [2, 630, 1570]]}
            ]
        }"#;
        let file: AudioFile = serde_json::from_str(json).unwrap();
        let descriptor = AudioDescriptor::from_file(7, file);

        assert!(descriptor.is_for(7, 1));
        assert!(!descriptor.is_for(9, 1));
        assert!(!descriptor.is_for(7, 2));
        assert_eq!(descriptor.timing("1:1").unwrap().timestamp_to, 6493);
        assert_eq!(descriptor.timing("1:1").unwrap().segments.len(), 2);
        assert!(descriptor.timing("1:2").is_none());
    }
}
