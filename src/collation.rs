//! German dictionary ordering for personal names.
//!
//! Keys follow DIN 5007-1 as implemented by the `de_DE` locale: letters
//! first compare by their base form, so `Ä` sorts with `A` and `Ł` with `L`.
//! Diacritics only break ties between equal base forms, then case does
//! (lowercase first), then punctuation and spacing, which are otherwise
//! ignored.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Secondary weight of letters which are variants of a base letter without
/// a canonical decomposition (`ł`, `ø`, `ß`…). Sorts after every mark.
const VARIANT: u32 = 0x11_0000;

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct CollationKey {
    primary: Vec<char>,
    secondary: Vec<Vec<u32>>,
    tertiary: Vec<bool>,
    quaternary: String,
}

/// Base letters for characters NFD leaves alone.
fn fold(c: char) -> Option<&'static str> {
    Some(match c {
        'ß' | 'ẞ' => "ss",
        'æ' | 'Æ' => "ae",
        'œ' | 'Œ' => "oe",
        'þ' | 'Þ' => "th",
        'ĳ' | 'Ĳ' => "ij",
        'ł' | 'Ł' => "l",
        'ø' | 'Ø' => "o",
        'đ' | 'Đ' => "d",
        'ħ' | 'Ħ' => "h",
        'ŧ' | 'Ŧ' => "t",
        'ı' => "i",
        _ => return None,
    })
}

pub fn collation_key(s: &str) -> CollationKey {
    let mut key = CollationKey {
        primary: Vec::with_capacity(s.len()),
        secondary: Vec::with_capacity(s.len()),
        tertiary: Vec::with_capacity(s.len()),
        quaternary: s.to_owned(),
    };
    // Marks attach to the last base letter only if no ignorable came between.
    let mut attached = false;
    for c in s.nfd() {
        if is_combining_mark(c) {
            if attached {
                if let Some(marks) = key.secondary.last_mut() {
                    marks.push(c as u32);
                }
            }
            continue;
        }
        if !c.is_alphanumeric() {
            attached = false;
            continue;
        }
        let upper = c.is_uppercase();
        if let Some(base) = fold(c) {
            for b in base.chars() {
                key.primary.push(b);
                key.secondary.push(vec![VARIANT]);
                key.tertiary.push(upper);
            }
        } else {
            for b in c.to_lowercase() {
                key.primary.push(b);
                key.secondary.push(Vec::new());
                key.tertiary.push(upper);
            }
        }
        attached = true;
    }
    key
}

pub fn compare(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names = names.iter().map(|&s| s.to_owned()).collect::<Vec<_>>();
        names.sort_by_cached_key(|s| collation_key(s));
        names
    }

    #[test]
    fn test_umlauts_sort_with_base_letter() {
        assert_eq!(
            sorted(&["Azur", "Ärger", "Aalen", "Ástek"]),
            vec!["Aalen", "Ärger", "Ástek", "Azur"]
        );
        assert_eq!(sorted(&["achm", "ächl", "ache"]), vec!["ache", "ächl", "achm"]);
    }

    #[test]
    fn test_stroke_letters_sort_with_base_letter() {
        assert_eq!(
            sorted(&["Lysow", "Łukasz", "Labertasche"]),
            vec!["Labertasche", "Łukasz", "Lysow"]
        );
        assert_eq!(sorted(&["M", "Ł", "L"]), vec!["L", "Ł", "M"]);
    }

    #[test]
    fn test_diacritics_break_ties() {
        assert_eq!(sorted(&["Ä", "B", "Á", "A"]), vec!["A", "Á", "Ä", "B"]);
        assert_eq!(sorted(&["Überall", "Uberall"]), vec!["Uberall", "Überall"]);
    }

    #[test]
    fn test_sharp_s() {
        assert_eq!(sorted(&["Strauß", "Strauss", "Straut"]), vec!["Strauss", "Strauß", "Straut"]);
    }

    #[test]
    fn test_case_is_secondary_to_letters() {
        assert_eq!(sorted(&["b", "B", "a"]), vec!["a", "b", "B"]);
        assert_eq!(compare("de Vries", "Devries"), Ordering::Less);
        assert_eq!(sorted(&["Meyer-Lüdenscheid", "Meyerl"]), vec!["Meyerl", "Meyer-Lüdenscheid"]);
    }

    #[test]
    fn test_equal_strings() {
        assert_eq!(compare("Łukasz", "Łukasz"), Ordering::Equal);
    }
}
