//! Dictionary-driven extraction for chemistry, serology and everything else
//! without a dedicated extractor.

use std::sync::LazyLock;

use labsum_model::{Category, ExamDefinition, ExamFamily, ResultRecord};
use labsum_standards::{ExamDictionary, default_dictionary};
use regex::Regex;
use tracing::trace;

use super::qualitative::serology;
use super::{Extraction, Extractor, find_value};
use crate::segment::ExamBlock;

/// Left boundary of a synonym: start of text or a non-letter.
const LEFT: &str = r"(?:^|[^\p{L}])";
const VALUE: &str = r"(?<lt><\s*)?(?<value>\d[\d,.]*)";

static PROTHROMBIN_INR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bINR\s*=\s*(?<value>\d[\d,.]*)").expect("Invalid INR regex"));

static APTT_RATIO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bR\s*=\s*(?<value>\d[\d,.]*)").expect("Invalid R regex"));

static HIV_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bHIV\b").expect("Invalid HIV regex"));

const PROTHROMBIN_TIME: &str = "TEMPO DE PROTROMBINA";
const APTT: &str = "TEMPO DE TROMBOPLASTINA PARCIAL ATIVADA";
const HIV_ABBREVIATION: &str = "Anti-HIV";

/// One dictionary entry with its compiled patterns.
#[derive(Debug)]
pub struct SynonymMatcher {
    pub definition: &'static ExamDefinition,
    presence: Regex,
    /// Label then spaces/tabs, label then colon, label then any whitespace.
    values: [Regex; 3],
}

impl SynonymMatcher {
    pub fn new(definition: &'static ExamDefinition) -> Self {
        let name = regex::escape(definition.synonym);
        let compile = |pattern: String| {
            Regex::new(&format!("(?i){pattern}")).expect("Invalid synonym regex")
        };
        Self {
            definition,
            presence: compile(format!(r"{LEFT}{name}(?:[^\p{{L}}]|$)")),
            values: [
                compile(format!(r"{LEFT}{name}[ \t]+{VALUE}")),
                compile(format!(r"{LEFT}{name}\s*:\s*{VALUE}")),
                compile(format!(r"{LEFT}{name}\s+{VALUE}")),
            ],
        }
    }

    /// True when the synonym appears as a whole word.
    pub fn is_match(&self, text: &str) -> bool {
        self.presence.is_match(text)
    }

    /// Numeric value after the synonym, trying each layout in order.
    pub fn numeric_value(&self, text: &str) -> Option<String> {
        self.values
            .iter()
            .find_map(|regex| find_value(regex, text))
    }
}

/// Matches the block against the dictionary, longest synonym first, and
/// stops at the first synonym found.
#[derive(Debug)]
pub struct GenericExtractor {
    matchers: Vec<SynonymMatcher>,
}

static SHARED: LazyLock<GenericExtractor> =
    LazyLock::new(|| GenericExtractor::new(default_dictionary()));

impl GenericExtractor {
    pub fn new(dictionary: &'static ExamDictionary) -> Self {
        Self {
            matchers: dictionary.iter().map(SynonymMatcher::new).collect(),
        }
    }

    /// Extractor over the built-in dictionary, compiled once.
    pub fn shared() -> &'static GenericExtractor {
        &SHARED
    }

    pub fn matchers(&self) -> &[SynonymMatcher] {
        &self.matchers
    }

    /// The first dictionary entry present in `text`.
    pub fn find_entry(&self, text: &str) -> Option<&SynonymMatcher> {
        self.matchers.iter().find(|matcher| matcher.is_match(text))
    }

    fn dictionary_record(&self, block: &ExamBlock<'_>) -> Option<ResultRecord> {
        let matcher = self.find_entry(block.text)?;
        let definition = matcher.definition;
        let abbreviation = definition.abbreviation()?;

        let value = if definition.category.is_qualitative() {
            serology(block.text).map(|value| value.token().to_string())
        } else {
            matcher.numeric_value(block.text)
        };
        match value {
            Some(value) => Some(ResultRecord::new(
                definition.category,
                abbreviation,
                value,
                block.collected_at,
            )),
            None => {
                trace!(
                    synonym = definition.synonym,
                    abbreviation,
                    "exam name found without a value"
                );
                None
            }
        }
    }
}

impl Extractor for GenericExtractor {
    fn family(&self) -> ExamFamily {
        ExamFamily::Generic
    }

    fn extract(&self, block: &ExamBlock<'_>) -> Extraction {
        let mut extraction = Extraction::new();
        if let Some(record) = self.dictionary_record(block) {
            extraction.push(record);
        }

        let upper = block.text.to_uppercase();
        let mut push_once = |category: Category, abbreviation: &str, value: String| {
            let seen = extraction
                .records
                .iter()
                .any(|record| record.category == category && record.abbreviation == abbreviation);
            if !seen {
                extraction.push(ResultRecord::new(
                    category,
                    abbreviation,
                    value,
                    block.collected_at,
                ));
            }
        };

        if upper.contains(PROTHROMBIN_TIME)
            && let Some(value) = find_value(&PROTHROMBIN_INR_REGEX, block.text)
        {
            push_once(Category::General, "INR", value);
        }
        if upper.contains(APTT)
            && let Some(value) = find_value(&APTT_RATIO_REGEX, block.text)
        {
            push_once(Category::General, "R", value);
        }
        if HIV_REGEX.is_match(block.text)
            && let Some(result) = serology(block.text)
        {
            push_once(Category::Serology, HIV_ABBREVIATION, result.token().to_string());
        }
        extraction
    }
}
