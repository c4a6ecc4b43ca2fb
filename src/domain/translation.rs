//! Translation Context - 译本资源

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::container::TranslatedName;

/// 默认译本（Dr. Mustafa Khattab, The Clear Quran）
pub const DEFAULT_TRANSLATION_ID: u32 = 131;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub language_name: String,
    #[serde(default)]
    pub translated_name: TranslatedName,
}

/// 按语言分组
pub fn group_by_language(translations: &[Translation]) -> BTreeMap<String, Vec<Translation>> {
    let mut groups: BTreeMap<String, Vec<Translation>> = BTreeMap::new();
    for translation in translations {
        groups
            .entry(translation.language_name.clone())
            .or_default()
            .push(translation.clone());
    }
    groups
}

/// 译者署名：一位时原样返回，多位时为 `"A and N others"`
pub fn authors_label(authors: &[String]) -> Option<String> {
    match authors {
        [] => None,
        [only] => Some(only.clone()),
        [first, rest @ ..] => Some(format!("{} and {} others", first, rest.len())),
    }
}

#[cfg(test)]
pub(crate) fn sample_translation(id: u32, author: &str, language: &str) -> Translation {
    Translation {
        id,
        name: format!("translation-{}", id),
        author_name: author.to_string(),
        slug: None,
        language_name: language.to_string(),
        translated_name: TranslatedName::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authors_label() {
        assert_eq!(authors_label(&[]), None);
        assert_eq!(
            authors_label(&["Dr. Mustafa Khattab".to_string()]).as_deref(),
            Some("Dr. Mustafa Khattab")
        );
        let authors = vec![
            "Dr. Mustafa Khattab".to_string(),
            "Saheeh International".to_string(),
            "Pickthall".to_string(),
        ];
        assert_eq!(
            authors_label(&authors).as_deref(),
            Some("Dr. Mustafa Khattab and 2 others")
        );
    }

    #[test]
    fn test_group_by_language() {
        let groups = group_by_language(&[
            sample_translation(131, "Khattab", "english"),
            sample_translation(20, "Saheeh International", "english"),
            sample_translation(79, "Abu Adel", "russian"),
        ]);
        assert_eq!(groups["english"].len(), 2);
        assert_eq!(groups["russian"][0].id, 79);
    }
}
