//! Audio Context - 诵读者

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::container::TranslatedName;

/// 头像占位服务
pub const AVATAR_PLACEHOLDER_API: &str = "https://ui-avatars.com/api/";

/// 默认诵读者 id
pub const DEFAULT_RECITER_ID: u32 = 7;

/// 播放速度选项
pub const PLAYBACK_SPEEDS: [&str; 8] = ["0.25", "0.5", "0.75", "Normal", "1.25", "1.5", "1.75", "2"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecitationStyle {
    pub name: String,
    #[serde(default)]
    pub language_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Qirat {
    pub name: String,
    #[serde(default)]
    pub language_name: String,
}

/// 诵读者（音频接口中的 recitation）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reciter {
    pub id: u32,
    #[serde(default)]
    pub reciter_id: u32,
    pub name: String,
    #[serde(default)]
    pub translated_name: TranslatedName,
    #[serde(default)]
    pub style: RecitationStyle,
    #[serde(default)]
    pub qirat: Qirat,
}

impl Default for Reciter {
    fn default() -> Self {
        let name = "Mishari Rashid al-`Afasy".to_string();
        Self {
            id: DEFAULT_RECITER_ID,
            reciter_id: 6,
            translated_name: TranslatedName {
                name: name.clone(),
                language_name: "english".to_string(),
            },
            name,
            style: RecitationStyle {
                name: "Murattal".to_string(),
                language_name: "english".to_string(),
                description: "Murattal is Quranic recitation at a slower pace, used for study and practice."
                    .to_string(),
            },
            qirat: Qirat {
                name: "Hafs".to_string(),
                language_name: "english".to_string(),
            },
        }
    }
}

impl Reciter {
    pub fn initials(&self) -> String {
        name_initials(&self.name)
    }

    pub fn avatar_placeholder(&self) -> String {
        avatar_placeholder(&self.name)
    }
}

/// 取前两个单词的首字母
pub fn name_initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect()
}

/// 头像占位地址，`name="` 中不成对的引号为既有格式
pub fn avatar_placeholder(name: &str) -> String {
    format!("{}?name=\"{}", AVATAR_PLACEHOLDER_API, name)
}

/// 按诵读风格分组
pub fn group_by_style(reciters: &[Reciter]) -> BTreeMap<String, Vec<Reciter>> {
    let mut groups: BTreeMap<String, Vec<Reciter>> = BTreeMap::new();
    for reciter in reciters {
        groups
            .entry(reciter.style.name.clone())
            .or_default()
            .push(reciter.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reciter() {
        let reciter = Reciter::default();
        assert_eq!(reciter.id, 7);
        assert_eq!(reciter.style.name, "Murattal");
        assert_eq!(reciter.initials(), "MR");
    }

    #[test]
    fn test_initials_of_single_word_name() {
        assert_eq!(name_initials("Husary"), "H");
        assert_eq!(name_initials(""), "");
    }

    #[test]
    fn test_avatar_keeps_unmatched_quote() {
        assert_eq!(
            avatar_placeholder("Abdul Basit"),
            "https://ui-avatars.com/api/?name=\"Abdul Basit"
        );
    }

    #[test]
    fn test_group_by_style() {
        let mut mujawwad = Reciter::default();
        mujawwad.id = 1;
        mujawwad.style.name = "Mujawwad".to_string();

        let groups = group_by_style(&[Reciter::default(), mujawwad]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["Murattal"][0].id, 7);
        assert_eq!(groups["Mujawwad"][0].id, 1);
    }
}
