//! Academic ranks and their capability entitlements.
//!
//! Ranks are totally ordered by seniority (the `Ord` derive). Every rank maps to exactly one
//! shared group and one capability set; the sets are strictly nested, so a
//! higher rank always holds everything a lower rank holds.
//!
//! | rank | group | capabilities |
//! |---|---|---|
//! | lecturer | محاضرون | view all students, edit student grades |
//! | assistant professor | أساتذة مساعدون | + generate reports |
//! | associate professor | أساتذة مشاركون | + manage department |
//! | professor | أساتذة | + view teacher salaries |

use faculty_core::capabilities;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Capability codes ordered by the rank that first receives them. Each rank
/// holds a prefix of this list.
const CAPABILITY_LADDER: [&str; 5] = [
    capabilities::VIEW_ALL_STUDENTS,
    capabilities::EDIT_STUDENT_GRADES,
    capabilities::GENERATE_REPORTS,
    capabilities::MANAGE_DEPARTMENT,
    capabilities::VIEW_TEACHER_SALARIES,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid rank: {0}")]
pub struct RankParseError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Lecturer,
    AssistantProfessor,
    AssociateProfessor,
    Professor,
}

impl Rank {
    /// All ranks from junior to senior.
    pub const ALL: [Rank; 4] = [
        Rank::Lecturer,
        Rank::AssistantProfessor,
        Rank::AssociateProfessor,
        Rank::Professor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Lecturer => "lecturer",
            Rank::AssistantProfessor => "assistant_professor",
            Rank::AssociateProfessor => "associate_professor",
            Rank::Professor => "professor",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Rank::Lecturer => "محاضر",
            Rank::AssistantProfessor => "أستاذ مساعد",
            Rank::AssociateProfessor => "أستاذ مشارك",
            Rank::Professor => "أستاذ",
        }
    }

    /// Name of the shared group every holder of this rank belongs to.
    pub fn group_name(&self) -> &'static str {
        match self {
            Rank::Lecturer => "محاضرون",
            Rank::AssistantProfessor => "أساتذة مساعدون",
            Rank::AssociateProfessor => "أساتذة مشاركون",
            Rank::Professor => "أساتذة",
        }
    }

    /// Capability codes this rank is entitled to, junior entitlements first.
    pub fn capabilities(&self) -> &'static [&'static str] {
        let held = match self {
            Rank::Lecturer => 2,
            Rank::AssistantProfessor => 3,
            Rank::AssociateProfessor => 4,
            Rank::Professor => 5,
        };
        &CAPABILITY_LADDER[..held]
    }

    pub fn has_capability(&self, code: &str) -> bool {
        self.capabilities().contains(&code)
    }

    /// Reverse lookup from a group name to the rank it was created for.
    pub fn from_group_name(name: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|rank| rank.group_name() == name)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "lecturer" => Ok(Rank::Lecturer),
            "assistant_professor" => Ok(Rank::AssistantProfessor),
            "associate_professor" => Ok(Rank::AssociateProfessor),
            "professor" => Ok(Rank::Professor),
            _ => Err(RankParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lecturer_capabilities() {
        assert_eq!(
            Rank::Lecturer.capabilities(),
            &[
                capabilities::VIEW_ALL_STUDENTS,
                capabilities::EDIT_STUDENT_GRADES
            ]
        );
    }

    #[test]
    fn test_professor_holds_every_capability() {
        for (code, _) in capabilities::ALL {
            assert!(Rank::Professor.has_capability(code), "missing {code}");
        }
    }

    #[test]
    fn test_capabilities_strictly_nested() {
        for pair in Rank::ALL.windows(2) {
            let junior: HashSet<_> = pair[0].capabilities().iter().collect();
            let senior: HashSet<_> = pair[1].capabilities().iter().collect();
            assert!(junior.is_subset(&senior));
            assert!(senior.len() > junior.len());
        }
    }

    #[test]
    fn test_rank_specific_capabilities() {
        assert!(!Rank::Lecturer.has_capability(capabilities::GENERATE_REPORTS));
        assert!(Rank::AssistantProfessor.has_capability(capabilities::GENERATE_REPORTS));
        assert!(!Rank::AssistantProfessor.has_capability(capabilities::MANAGE_DEPARTMENT));
        assert!(Rank::AssociateProfessor.has_capability(capabilities::MANAGE_DEPARTMENT));
        assert!(!Rank::AssociateProfessor.has_capability(capabilities::VIEW_TEACHER_SALARIES));
    }

    #[test]
    fn test_ordering_matches_seniority() {
        assert!(Rank::Lecturer < Rank::AssistantProfessor);
        assert!(Rank::AssociateProfessor < Rank::Professor);
        assert!(Rank::ALL.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_group_names_are_distinct_and_reversible() {
        let names: HashSet<_> = Rank::ALL.iter().map(|r| r.group_name()).collect();
        assert_eq!(names.len(), 4);

        for rank in Rank::ALL {
            assert_eq!(Rank::from_group_name(rank.group_name()), Some(rank));
        }
        assert_eq!(Rank::from_group_name("Editors"), None);
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!("professor".parse::<Rank>(), Ok(Rank::Professor));
        assert_eq!(
            "Assistant-Professor".parse::<Rank>(),
            Ok(Rank::AssistantProfessor)
        );
        assert!("dean".parse::<Rank>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Rank::AssociateProfessor).unwrap();
        assert_eq!(json, r#""associate_professor""#);
        let rank: Rank = serde_json::from_str(r#""lecturer""#).unwrap();
        assert_eq!(rank, Rank::Lecturer);
    }
}
