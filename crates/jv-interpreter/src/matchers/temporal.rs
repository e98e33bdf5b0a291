//! Temporal matcher.

use jv_protocol::filters::DatePreset;

/// Checked in order; the first phrase found wins.
const PRESET_PHRASES: [(&str, DatePreset); 4] = [
    ("last month", DatePreset::LastMonth),
    ("this month", DatePreset::ThisMonth),
    ("last week", DatePreset::LastWeek),
    ("this week", DatePreset::ThisWeek),
];

/// Date preset named in normalized `text`, if any.
pub fn detect_preset(text: &str) -> Option<DatePreset> {
    PRESET_PHRASES
        .iter()
        .find(|(phrase, _)| text.contains(phrase))
        .map(|(_, preset)| *preset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_phrase() {
        assert_eq!(detect_preset("show costs last month"), Some(DatePreset::LastMonth));
        assert_eq!(detect_preset("this month so far"), Some(DatePreset::ThisMonth));
        assert_eq!(detect_preset("spend last week"), Some(DatePreset::LastWeek));
        assert_eq!(detect_preset("this week"), Some(DatePreset::ThisWeek));
    }

    #[test]
    fn first_phrase_in_table_wins() {
        assert_eq!(
            detect_preset("this week versus last month"),
            Some(DatePreset::LastMonth)
        );
        assert_eq!(
            detect_preset("last week or this month"),
            Some(DatePreset::ThisMonth)
        );
    }

    #[test]
    fn loose_words_do_not_match() {
        assert_eq!(detect_preset("monthly report"), None);
        assert_eq!(detect_preset("past 30 days"), None);
    }
}
