//! Kana script normalization.

use wana_kana::ConvertJapanese;

/// Converts a reading to hiragana so that readings written in either kana script compare equal.
///
/// # Examples
///
/// ```
/// use yomi_bench::kana::normalize_reading;
///
/// assert_eq!(normalize_reading("タベタ"), normalize_reading("たべた"));
/// assert_eq!("", normalize_reading(""));
/// ```
pub fn normalize_reading(yomi: &str) -> String {
    if yomi.is_empty() {
        return String::new();
    }
    yomi.to_hiragana()
}
