//! Removal of historical trend data before segmentation.
//!
//! Report dumps repeat older values under "Resultado dos N últimos exames:"
//! and as bare `dd/mm/yyyy - value unit` lines. Left in place these would be
//! read as current results.

use std::sync::LazyLock;

use regex::Regex;

static TREND_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Resultado dos \d+ últimos exames:").expect("Invalid trend header regex")
});

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("Invalid date regex"));

static TREND_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\d{2}/\d{2}/\d{4}[ \t]*-[ \t]*[\d,.]+[ \t]*[^\s\d]*/?[^\s\d]*[ \t]*$")
        .expect("Invalid trend line regex")
});

/// Strips trend sections and bare trend lines, normalizing line endings.
pub fn strip_trend_sections(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");
    let without_sections = remove_trend_sections(&text);
    TREND_LINE_REGEX
        .replace_all(&without_sections, "")
        .into_owned()
}

/// Each section runs from its header up to the next date, the next blank
/// line or the end of the text, whichever comes first.
fn remove_trend_sections(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(header) = TREND_HEADER_REGEX.find_at(text, cursor) {
        out.push_str(&text[cursor..header.start()]);
        let rest = &text[header.end()..];
        let next_date = DATE_REGEX.find(rest).map(|found| found.start());
        let blank_line = rest.find("\n\n");
        let end = match (next_date, blank_line) {
            (Some(date), Some(blank)) => date.min(blank),
            (Some(offset), None) | (None, Some(offset)) => offset,
            (None, None) => rest.len(),
        };
        cursor = header.end() + end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_ends_at_next_date() {
        let text = "SÓDIO 140\nResultado dos 3 últimos exames: 138 141\n10/03/2025 - 139 mEq/L\nfim";
        let cleaned = strip_trend_sections(text);
        assert!(cleaned.contains("SÓDIO 140"));
        assert!(!cleaned.contains("138 141"));
        assert!(!cleaned.contains("139"));
        assert!(cleaned.contains("fim"));
    }

    #[test]
    fn section_ends_at_blank_line() {
        let text = "Resultado dos 2 últimos exames:\nvalor antigo\n\nPOTÁSSIO 4,1";
        let cleaned = strip_trend_sections(text);
        assert!(!cleaned.contains("valor antigo"));
        assert!(cleaned.contains("POTÁSSIO 4,1"));
    }

    #[test]
    fn section_runs_to_end_of_text() {
        let cleaned = strip_trend_sections("CREATININA 1,2\nresultado dos 3 ÚLTIMOS exames: 1,0 0,9");
        assert_eq!(cleaned, "CREATININA 1,2\n");
    }

    #[test]
    fn bare_trend_lines_removed() {
        let text = "12/03/2025 08:00:00 UREIA\n11/03/2025 - 40 mg/dL\n10/03/2025 - 38,5\nUREIA 42";
        let cleaned = strip_trend_sections(text);
        assert!(cleaned.contains("12/03/2025 08:00:00 UREIA"));
        assert!(!cleaned.contains("40 mg/dL"));
        assert!(!cleaned.contains("38,5"));
        assert!(cleaned.contains("UREIA 42"));
    }

    #[test]
    fn crlf_is_normalized() {
        assert_eq!(strip_trend_sections("a\r\nb"), "a\nb");
    }
}
