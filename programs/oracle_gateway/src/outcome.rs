//! Classification of raw inference responses
//!
//! The provider answers in free text. Only an unambiguous `true` or `false`
//! settles a pool one way; everything else is treated as inconclusive rather
//! than as an error, so a malformed answer still ends the request.

use crate::state::Outcome;

/// Maps a raw response to an [`Outcome`]. Never returns [`Outcome::Unknown`].
pub fn classify_response(raw: &str) -> Outcome {
    let normalized = normalize(raw);

    if normalized.eq_ignore_ascii_case("true") {
        Outcome::True
    } else if normalized.eq_ignore_ascii_case("false") {
        Outcome::False
    } else {
        Outcome::Inconclusive
    }
}

/// Strips surrounding whitespace, quotes and trailing periods in any order
fn normalize(raw: &str) -> &str {
    let mut text = raw.trim();
    loop {
        let next = text
            .trim_end_matches('.')
            .trim_matches(|c| c == '"' || c == '\'')
            .trim();
        if next == text {
            return text;
        }
        text = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_literals() {
        for raw in [
            "true",
            "TRUE",
            "True",
            "tRuE",
            " true\n",
            "\"true\"",
            "'True'",
            "true.",
            "\"true.\"",
            "\"True\".",
            "'true.'.",
        ] {
            assert_eq!(classify_response(raw), Outcome::True, "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_false_literals() {
        for raw in ["false", "FALSE", "False", "\tfalse ", "\"False\"", "false.", "'false.'"] {
            assert_eq!(classify_response(raw), Outcome::False, "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_everything_else_is_inconclusive() {
        for raw in [
            "",
            "   ",
            "maybe",
            "yes",
            "no",
            "1",
            "0",
            "true false",
            "truely",
            "not true",
            "false!",
            "t r u e",
            "ｔｒｕｅ",
            "{\"answer\": true}",
        ] {
            assert_eq!(classify_response(raw), Outcome::Inconclusive, "raw = {:?}", raw);
        }
    }
}
