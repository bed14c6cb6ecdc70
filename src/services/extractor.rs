//! Recovers a question stem, four options and an answer letter from free-form
//! model output.
//!
//! Each field is located by its own anchor and bounded by its own stop
//! pattern, so a malformed field degrades to `Field::Unparsed` without
//! taking its neighbours down with it. `extract` never fails.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{AnswerLetter, Field, ParsedItem};

static QUESTION_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)question[^\S\n]*\d*[^\S\n]*:[^\S\n]*")
        .expect("QUESTION_LABEL is a valid regex pattern")
});

/// Ends the stem: an options label anywhere, or an `A.` / `A)` marker opening a line.
static STEM_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)\boptions[^\S\n]*:|^[^\S\n]*\(?a[^\S\n]*[.)]")
        .expect("STEM_BOUNDARY is a valid regex pattern")
});

static OPTIONS_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)options[^\S\n]*:").expect("OPTIONS_LABEL is a valid regex pattern")
});

/// An answer label, wherever it sits on its line.
const ANSWER_LABEL_PATTERN: &str =
    r"\b(?:bonne[^\S\n]+)?(?:réponse|reponse|answer)(?:[^\S\n]+correcte?)?[^\S\n]*:";

/// Closes the options block and the last option.
static ANSWER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(?i){}", ANSWER_LABEL_PATTERN))
        .expect("ANSWER_LABEL is a valid regex pattern")
});

static ANSWER_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:réponse|reponse|answer)(?:[^\S\n]+correcte?)?[^\S\n]*:\s*\(?([a-d])\b")
        .expect("ANSWER_VALUE is a valid regex pattern")
});

static LEADING_A_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\(?a[^\S\n]*[.)]").expect("LEADING_A_MARKER is a valid regex pattern")
});

fn marker_pattern(letters: &str) -> String {
    format!(r"^[^\S\n]*\(?[{}][^\S\n]*[.)]", letters)
}

/// Start anchor for each option letter.
static OPTION_MARKERS: Lazy<[Regex; 4]> = Lazy::new(|| {
    ["aA", "bB", "cC", "dD"].map(|letters| {
        Regex::new(&format!(r"(?m){}[^\S\n]*", marker_pattern(letters)))
            .expect("option marker is a valid regex pattern")
    })
});

/// Stop pattern for each option: a marker of any later letter, or an answer label.
static OPTION_BOUNDARIES: Lazy<[Regex; 4]> = Lazy::new(|| {
    ["bcdBCD", "cdCD", "dD", ""].map(|later| {
        let pattern = if later.is_empty() {
            format!(r"(?im){}", ANSWER_LABEL_PATTERN)
        } else {
            format!(r"(?im){}|{}", marker_pattern(later), ANSWER_LABEL_PATTERN)
        };
        Regex::new(&pattern).expect("option boundary is a valid regex pattern")
    })
});

fn non_empty(text: &str) -> Field<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Field::Unparsed
    } else {
        Field::Parsed(trimmed.to_string())
    }
}

/// Byte range of the stem inside `raw`, when a question label exists.
fn locate_stem(raw: &str) -> Option<Range<usize>> {
    let label = QUESTION_LABEL.find(raw)?;
    let rest = &raw[label.end()..];

    let len = [STEM_BOUNDARY.find(rest), ANSWER_LABEL.find(rest)]
        .into_iter()
        .flatten()
        .map(|m| m.start())
        .min()
        .unwrap_or(rest.len());

    Some(label.end()..label.end() + len)
}

fn cut_at_answer(block: &str) -> &str {
    match ANSWER_LABEL.find(block) {
        Some(m) => &block[..m.start()],
        None => block,
    }
}

/// The text holding the four options, if one can be established.
fn locate_options_block<'a>(raw: &'a str, stem: Option<&Range<usize>>) -> Option<&'a str> {
    if let Some(label) = OPTIONS_LABEL.find(raw) {
        return Some(cut_at_answer(&raw[label.end()..]));
    }

    let stem = stem?;
    let candidate = cut_at_answer(&raw[stem.end..]);
    if LEADING_A_MARKER.is_match(candidate.trim_start()) {
        Some(candidate)
    } else {
        None
    }
}

fn extract_option(block: &str, letter: AnswerLetter) -> Field<String> {
    let index = letter.index();
    let Some(marker) = OPTION_MARKERS[index].find(block) else {
        return Field::Unparsed;
    };

    let rest = &block[marker.end()..];
    let len = OPTION_BOUNDARIES[index]
        .find(rest)
        .map_or(rest.len(), |m| m.start());

    non_empty(&rest[..len])
}

fn extract_answer(raw: &str) -> Field<AnswerLetter> {
    ANSWER_VALUE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(AnswerLetter::from_char)
        .into()
}

pub fn extract(raw: &str) -> ParsedItem {
    let stem_range = locate_stem(raw);
    let stem = stem_range
        .as_ref()
        .map_or(Field::Unparsed, |range| non_empty(&raw[range.clone()]));

    let options = match locate_options_block(raw, stem_range.as_ref()) {
        Some(block) => AnswerLetter::ALL.map(|letter| extract_option(block, letter)),
        None => [
            Field::Unparsed,
            Field::Unparsed,
            Field::Unparsed,
            Field::Unparsed,
        ],
    };

    let item = ParsedItem {
        stem,
        options,
        answer: extract_answer(raw),
        raw: raw.to_string(),
    };

    if !item.is_complete() {
        log::warn!(
            "Extraction degraded, unparsed fields: {:?}",
            item.unparsed_fields()
        );
    }

    item
}
