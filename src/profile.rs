//! User profile model and onboarding form parsing.

use serde::{Deserialize, Serialize};

/// Self-reported fitness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Parse a form value. Case-insensitive; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        write!(f, "{s}")
    }
}

/// User profile collected at onboarding and sent with every chat turn.
///
/// All fields are optional; the all-absent profile is valid and is the
/// session's initial value ("not yet specified"). The profile is only ever
/// replaced wholesale by a new form submission — there is no partial-field
/// update.
///
/// Wire format matches the coach backend: camelCase keys, absent fields
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<FitnessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_goals: Option<String>,
    /// The onboarding form only ever supplies zero or one value, but the
    /// model supports several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
}

impl UserProfile {
    /// Whether every field is absent.
    pub fn is_empty(&self) -> bool {
        self.age.is_none()
            && self.fitness_level.is_none()
            && self.health_goals.is_none()
            && self.equipment.is_none()
    }
}

/// Raw onboarding form input, exactly as typed.
///
/// `parse` applies the form's coercion rules: blank strings become absent
/// fields (never empty strings), age is numeric-coerced, and a single
/// equipment value becomes a one-element list.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub age: String,
    pub fitness_level: String,
    pub health_goals: String,
    pub equipment: String,
}

impl ProfileDraft {
    pub fn parse(&self) -> UserProfile {
        UserProfile {
            age: self.age.trim().parse().ok(),
            fitness_level: FitnessLevel::parse(&self.fitness_level),
            health_goals: non_blank(&self.health_goals),
            equipment: non_blank(&self.equipment).map(|item| vec![item]),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_parses_to_empty_profile() {
        let profile = ProfileDraft::default().parse();
        assert!(profile.is_empty());
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn blank_fields_become_absent_not_empty() {
        let draft = ProfileDraft {
            age: "   ".to_string(),
            fitness_level: "".to_string(),
            health_goals: "  \t ".to_string(),
            equipment: " ".to_string(),
        };
        let profile = draft.parse();
        assert!(profile.is_empty());
        assert_ne!(profile.health_goals, Some(String::new()));
    }

    #[test]
    fn full_draft_parses() {
        let draft = ProfileDraft {
            age: " 29 ".to_string(),
            fitness_level: "Beginner".to_string(),
            health_goals: "weight loss".to_string(),
            equipment: "home".to_string(),
        };
        let profile = draft.parse();
        assert_eq!(profile.age, Some(29));
        assert_eq!(profile.fitness_level, Some(FitnessLevel::Beginner));
        assert_eq!(profile.health_goals, Some("weight loss".to_string()));
        assert_eq!(profile.equipment, Some(vec!["home".to_string()]));
    }

    #[test]
    fn non_numeric_age_is_absent() {
        let draft = ProfileDraft {
            age: "twenty-nine".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.parse().age, None);
    }

    #[test]
    fn negative_age_is_absent() {
        let draft = ProfileDraft {
            age: "-3".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.parse().age, None);
    }

    #[test]
    fn unknown_fitness_level_is_absent() {
        let draft = ProfileDraft {
            fitness_level: "olympian".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.parse().fitness_level, None);
    }

    #[test]
    fn fitness_level_display_matches_serde() {
        for level in [
            FitnessLevel::Beginner,
            FitnessLevel::Intermediate,
            FitnessLevel::Advanced,
        ] {
            let display = format!("{level}");
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn wire_format_is_camel_case_with_absent_fields_omitted() {
        let profile = UserProfile {
            age: Some(29),
            fitness_level: Some(FitnessLevel::Beginner),
            health_goals: None,
            equipment: Some(vec!["gym".to_string()]),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "age": 29,
                "fitnessLevel": "beginner",
                "equipment": ["gym"],
            })
        );
    }

    #[test]
    fn empty_profile_serializes_to_empty_object() {
        let value = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn profile_serde_roundtrip() {
        let profile = UserProfile {
            age: Some(41),
            fitness_level: Some(FitnessLevel::Advanced),
            health_goals: Some("marathon".to_string()),
            equipment: Some(vec!["gym".to_string(), "bike".to_string()]),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn deserializes_empty_object() {
        let parsed: UserProfile = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }
}
