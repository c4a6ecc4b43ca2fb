//! Settings Context - 用户显示设置

use serde::{Deserialize, Serialize};

/// 音频播放器设置的存储键
pub const USER_SETTING_KEY: &str = "user-setting";

/// 样式设置的存储键
pub const STYLE_SETTING_KEY: &str = "style-setting";

/// 每页经文数选项
pub const VERSES_PER_PAGE_OPTIONS: [u32; 5] = [10, 20, 30, 40, 50];

pub const FONT_FAMILIES: [&str; 4] = ["Amiri", "Noto-Kufi", "Hafs-Nastaleeq", "Uthman-Taha-Naskh"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerSetting {
    pub fullwidth: bool,
    pub auto_play: bool,
    pub dismiss_on_end: bool,
    pub auto_scroll: bool,
    pub tooltip: bool,
}

impl Default for AudioPlayerSetting {
    fn default() -> Self {
        Self {
            fullwidth: false,
            auto_play: true,
            dismiss_on_end: true,
            auto_scroll: true,
            tooltip: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSetting {
    pub quran_front_size: u32,
    pub quran_font_family: String,
    pub translations_font_size: u32,
    pub translations_font_family: String,
}

impl Default for StyleSetting {
    fn default() -> Self {
        Self {
            quran_front_size: 3,
            quran_font_family: "Noto-Kufi".to_string(),
            translations_font_size: 3,
            translations_font_family: "1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_json_shape() {
        let json = serde_json::to_value(AudioPlayerSetting::default()).unwrap();
        assert_eq!(json["autoPlay"], true);
        assert_eq!(json["dismissOnEnd"], true);

        let json = serde_json::to_value(StyleSetting::default()).unwrap();
        assert_eq!(json["quranFontFamily"], "Noto-Kufi");
    }
}
