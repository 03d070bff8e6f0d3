//! Arabic grammatical number for counted units.
//!
//! Arabic distinguishes singular, dual, a plural for three to ten, and a
//! separate form for counts above ten. The phrase for a count is looked up
//! from [`GrammaticalNumber`] instead of being branched on at each call site.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammaticalNumber {
    Zero,
    One,
    Two,
    /// 3 to 10
    Few,
    /// 11 and above
    Many,
}

impl GrammaticalNumber {
    pub fn for_count(count: u64) -> Self {
        match count {
            0 => Self::Zero,
            1 => Self::One,
            2 => Self::Two,
            3..=10 => Self::Few,
            _ => Self::Many,
        }
    }

    /// Suffix appended to the unit stem, or `None` when the phrase is empty.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Zero => None,
            Self::One => Some(""),
            Self::Two => Some("ان"),
            Self::Few => Some("ات"),
            Self::Many => Some(""),
        }
    }
}

/// Renders `count` units of `stem`, e.g. `"2 يومان"` or `"5 يومات"`.
pub fn counted_phrase(count: u64, stem: &str) -> String {
    match GrammaticalNumber::for_count(count).suffix() {
        Some(suffix) => format!("{count} {stem}{suffix}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_count_boundaries() {
        assert_eq!(GrammaticalNumber::for_count(0), GrammaticalNumber::Zero);
        assert_eq!(GrammaticalNumber::for_count(1), GrammaticalNumber::One);
        assert_eq!(GrammaticalNumber::for_count(2), GrammaticalNumber::Two);
        assert_eq!(GrammaticalNumber::for_count(3), GrammaticalNumber::Few);
        assert_eq!(GrammaticalNumber::for_count(10), GrammaticalNumber::Few);
        assert_eq!(GrammaticalNumber::for_count(11), GrammaticalNumber::Many);
    }

    #[test]
    fn test_counted_phrase_forms() {
        assert_eq!(counted_phrase(0, "يوم"), "");
        assert_eq!(counted_phrase(1, "يوم"), "1 يوم");
        assert_eq!(counted_phrase(2, "يوم"), "2 يومان");
        assert_eq!(counted_phrase(7, "يوم"), "7 يومات");
        assert_eq!(counted_phrase(29, "يوم"), "29 يوم");
    }
}
