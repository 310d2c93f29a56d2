use crate::domain::ticket::TICKET_KEY_PATTERN;

pub const DEFAULT_MIN_DESCRIPTION_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCheck {
    pub ok: bool,
    pub length: usize,
}

/// Strips every key-shaped substring (not only the extracted keys) along with
/// brackets and parentheses, then trims. One pass only: a key that appears once
/// brackets are gone (`A[BC-1]-2` becomes `A-2`) stays in the text.
pub fn description_text(title: &str) -> String {
    TICKET_KEY_PATTERN
        .replace_all(title, "")
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')'))
        .collect::<String>()
        .trim()
        .to_string()
}

pub fn check_title_length(title: &str, minimum: usize) -> TitleCheck {
    let length = description_text(title).chars().count();
    TitleCheck {
        ok: length >= minimum,
        length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_keys_and_brackets() {
        assert_eq!(description_text("[PROJ-2] fix thing"), "fix thing");
        assert_eq!(description_text("(ABC-1)(DEF-22) Add caching"), "Add caching");
    }

    #[test]
    fn accepts_long_enough_description() {
        let check = check_title_length("PROJ-42 add caching", DEFAULT_MIN_DESCRIPTION_LENGTH);
        assert_eq!(check, TitleCheck { ok: true, length: 11 });
    }

    #[test]
    fn rejects_short_description() {
        let check = check_title_length("[PROJ-2] fix thing", DEFAULT_MIN_DESCRIPTION_LENGTH);
        assert_eq!(check, TitleCheck { ok: false, length: 9 });
    }

    #[test]
    fn key_shaped_text_is_stripped_even_if_not_a_ticket() {
        let check = check_title_length("PROJ-1 bump UTF-8 parser", DEFAULT_MIN_DESCRIPTION_LENGTH);
        assert_eq!(description_text("PROJ-1 bump UTF-8 parser"), "bump  parser");
        assert_eq!(check.length, 12);
    }

    #[test]
    fn exact_minimum_passes() {
        assert!(check_title_length("ABC-1 0123456789", 10).ok);
        assert!(!check_title_length("ABC-1 012345678", 10).ok);
    }

    #[test]
    fn key_formed_by_bracket_removal_is_kept() {
        assert_eq!(description_text("A[BC-1]-2 fix abc"), "A-2 fix abc");
        let check = check_title_length("A[BC-1]-2 fix abc", DEFAULT_MIN_DESCRIPTION_LENGTH);
        assert_eq!(check, TitleCheck { ok: true, length: 11 });
    }

    #[test]
    fn stripping_is_idempotent() {
        let samples = [
            "[PROJ-2] fix thing",
            "  (A-1) [B-2] trailing  ",
            "ABC-1ABC-2 nested [X-9]] ",
            "",
        ];
        for sample in samples {
            let once = description_text(sample);
            assert_eq!(description_text(&once), once, "sample: {sample:?}");
        }
    }
}
