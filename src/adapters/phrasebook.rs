//! Static travel phrasebook with AI-translation escalation marker.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a translation request.
///
/// When the phrase is not in the static book, `translated` is `None` and
/// `needs_ai_translation` is set; the calling agent decides whether to
/// escalate to a completion call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Translation {
    pub original: String,
    pub translated: Option<String>,
    pub source_language: String,
    pub target_language: String,
    pub source_language_name: String,
    pub target_language_name: String,
    #[serde(default)]
    pub needs_ai_translation: bool,
}

/// Offline phrasebook of common travel expressions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Phrasebook;

impl Phrasebook {
    pub fn new() -> Self {
        Self
    }

    /// Translate `text`, preferring the static phrasebook.
    pub fn translate(&self, text: &str, source_language: &str, target_language: &str) -> Translation {
        let source = source_language.to_lowercase();
        let target = target_language.to_lowercase();
        let normalized = text.trim();

        if let Some(translated) = lookup_phrase(&target, normalized) {
            debug!(text, target = %target, "phrasebook hit");
            return Translation {
                original: text.to_string(),
                translated: Some(translated.to_string()),
                source_language_name: language_name(&source),
                target_language_name: language_name(&target),
                source_language: source,
                target_language: target,
                needs_ai_translation: false,
            };
        }

        Translation {
            original: text.to_string(),
            translated: None,
            source_language_name: language_name(&source),
            target_language_name: language_name(&target),
            source_language: source,
            target_language: target,
            needs_ai_translation: true,
        }
    }

    /// All phrasebook entries for a language.
    pub fn common_phrases(&self, target_language: &str) -> &'static [(&'static str, &'static str)] {
        phrases_for(&target_language.to_lowercase())
    }

    /// Supported language codes with display names.
    pub fn supported_languages(&self) -> &'static [(&'static str, &'static str)] {
        LANGUAGE_NAMES
    }
}

const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ko", "한국어"),
    ("en", "영어"),
    ("ja", "일본어"),
    ("zh", "중국어"),
    ("th", "태국어"),
    ("vi", "베트남어"),
    ("fr", "프랑스어"),
    ("de", "독일어"),
    ("es", "스페인어"),
    ("it", "이탈리아어"),
];

fn language_name(code: &str) -> String {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, n)| (*n).to_string())
        .unwrap_or_else(|| code.to_string())
}

const JA_PHRASES: &[(&str, &str)] = &[
    ("안녕하세요", "こんにちは (Konnichiwa)"),
    ("감사합니다", "ありがとうございます (Arigatou gozaimasu)"),
    ("죄송합니다", "すみません (Sumimasen)"),
    ("이거 얼마예요?", "これはいくらですか？ (Kore wa ikura desu ka?)"),
    ("화장실이 어디예요?", "トイレはどこですか？ (Toire wa doko desu ka?)"),
    ("계산해주세요", "お会計お願いします (Okaikei onegaishimasu)"),
    ("영어 할 수 있어요?", "英語できますか？ (Eigo dekimasu ka?)"),
    ("메뉴판 주세요", "メニューをください (Menu wo kudasai)"),
    ("추천해주세요", "おすすめは何ですか？ (Osusume wa nan desu ka?)"),
    ("맛있어요", "おいしいです (Oishii desu)"),
];

const EN_PHRASES: &[(&str, &str)] = &[
    ("안녕하세요", "Hello"),
    ("감사합니다", "Thank you"),
    ("죄송합니다", "I'm sorry / Excuse me"),
    ("이거 얼마예요?", "How much is this?"),
    ("화장실이 어디예요?", "Where is the restroom?"),
    ("계산해주세요", "Check, please"),
    ("메뉴판 주세요", "Can I see the menu?"),
    ("추천해주세요", "What do you recommend?"),
];

const ZH_PHRASES: &[(&str, &str)] = &[
    ("안녕하세요", "你好 (Nǐ hǎo)"),
    ("감사합니다", "谢谢 (Xièxiè)"),
    ("이거 얼마예요?", "这个多少钱？ (Zhège duōshǎo qián?)"),
    ("화장실이 어디예요?", "洗手间在哪里？ (Xǐshǒujiān zài nǎlǐ?)"),
];

const TH_PHRASES: &[(&str, &str)] = &[
    ("안녕하세요", "สวัสดี (Sawatdee)"),
    ("감사합니다", "ขอบคุณ (Khop khun)"),
    ("이거 얼마예요?", "อันนี้เท่าไหร่ (An nee tao rai?)"),
];

fn phrases_for(language: &str) -> &'static [(&'static str, &'static str)] {
    match language {
        "ja" => JA_PHRASES,
        "en" => EN_PHRASES,
        "zh" => ZH_PHRASES,
        "th" => TH_PHRASES,
        _ => &[],
    }
}

fn lookup_phrase(language: &str, text: &str) -> Option<&'static str> {
    phrases_for(language)
        .iter()
        .find(|(k, _)| *k == text)
        .map(|(_, v)| *v)
}
