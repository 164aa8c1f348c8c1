//! Industry models, the scoring rubric, and the negotiation glossaries
//! embedded in prompts. All static; unknown industry tags resolve to `General`.

use serde::{Deserialize, Serialize};

/// Selects which phrasing of the negotiation domain a prompt embeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndustryModel {
    #[default]
    General,
    Legal,
    Sales,
    Procurement,
    Recruitment,
    Business,
    RealEstate,
}

impl IndustryModel {
    #[cfg(test)]
    pub const ALL: [IndustryModel; 7] = [
        IndustryModel::General,
        IndustryModel::Legal,
        IndustryModel::Sales,
        IndustryModel::Procurement,
        IndustryModel::Recruitment,
        IndustryModel::Business,
        IndustryModel::RealEstate,
    ];

    /// Resolves a client-supplied tag. Matching is case-insensitive; anything
    /// unrecognised (including an empty tag) is `General`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "legal" => IndustryModel::Legal,
            "sales" => IndustryModel::Sales,
            "procurement" => IndustryModel::Procurement,
            "recruitment" => IndustryModel::Recruitment,
            "business" => IndustryModel::Business,
            "real-estate" | "real_estate" | "realestate" => IndustryModel::RealEstate,
            _ => IndustryModel::General,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            IndustryModel::General => "general",
            IndustryModel::Legal => "legal",
            IndustryModel::Sales => "sales",
            IndustryModel::Procurement => "procurement",
            IndustryModel::Recruitment => "recruitment",
            IndustryModel::Business => "business",
            IndustryModel::RealEstate => "real-estate",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            IndustryModel::General => "General Negotiations",
            IndustryModel::Legal => "Legal Negotiations",
            IndustryModel::Sales => "Sales Negotiations",
            IndustryModel::Procurement => "Procurement Negotiations",
            IndustryModel::Recruitment => "Recruitment Negotiations",
            IndustryModel::Business => "Business Partnerships",
            IndustryModel::RealEstate => "Real Estate Negotiations",
        }
    }

    /// Phrase embedded in prompts ("decades of experience in {context}").
    pub fn context(self) -> &'static str {
        match self {
            IndustryModel::General => "general business negotiations",
            IndustryModel::Legal => "legal contract negotiations",
            IndustryModel::Sales => "sales and pricing negotiations",
            IndustryModel::Procurement => "procurement and vendor negotiations",
            IndustryModel::Recruitment => "job offer and salary negotiations",
            IndustryModel::Business => "business partnership and joint venture negotiations",
            IndustryModel::RealEstate => "real estate purchase and lease negotiations",
        }
    }
}

/// One weighted criterion of the composite score.
#[derive(Debug, Clone, Copy)]
pub struct RubricCriterion {
    pub label: &'static str,
    pub points: u8,
}

/// The composite score rubric. Weights sum to 100. The model assigns the
/// composite directly; nothing recomputes it from these parts.
pub const RUBRIC: [RubricCriterion; 7] = [
    RubricCriterion {
        label: "Clarity and conciseness",
        points: 15,
    },
    RubricCriterion {
        label: "Persuasive language and rhetoric",
        points: 15,
    },
    RubricCriterion {
        label: "Professional tone and relationship building",
        points: 15,
    },
    RubricCriterion {
        label: "Strategic positioning and framing",
        points: 15,
    },
    RubricCriterion {
        label: "Addressing counterparty concerns and objections",
        points: 15,
    },
    RubricCriterion {
        label: "Effective use of negotiation techniques",
        points: 15,
    },
    RubricCriterion {
        label: "Clear call to action and next steps",
        points: 10,
    },
];

/// (label, meaning) pairs the model may report under `frameworksUsed`.
pub const NEGOTIATION_FRAMEWORKS: [(&str, &str); 6] = [
    ("BATNA", "Best Alternative To a Negotiated Agreement"),
    ("ZOPA", "Zone Of Possible Agreement"),
    ("Anchoring", "Strategic first offer to set expectations"),
    (
        "Interest-based",
        "Focus on underlying interests rather than positions",
    ),
    ("Win-win", "Mutually beneficial outcomes"),
    ("Harvard", "Harvard Principled Negotiation Method"),
];

/// Techniques the model may report under `techniquesIdentified`.
pub const EXPERT_TECHNIQUES: [&str; 8] = [
    "Mirroring - Repeat the last few words to encourage elaboration",
    "Labeling - Name emotions to defuse or reinforce them",
    "Open-ended questions - Use \"what\" and \"how\" to gather information",
    "Strategic silence - Pause to encourage the other party to fill the void",
    "Calculated empathy - Show understanding of the other side's position",
    "Calibrated questions - Questions that begin with \"How\" or \"What\" to solve problems",
    "Non-cash value creation - Find items of different value to each party",
    "Tactical empathy - Understanding the other side's perspective to influence them",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubric_weights_sum_to_100() {
        let total: u32 = RUBRIC.iter().map(|c| c.points as u32).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_unknown_tag_maps_to_general() {
        assert_eq!(IndustryModel::from_tag("aerospace"), IndustryModel::General);
        assert_eq!(IndustryModel::from_tag(""), IndustryModel::General);
    }

    #[test]
    fn test_known_tags_round_trip_through_tag() {
        for model in IndustryModel::ALL {
            assert_eq!(IndustryModel::from_tag(model.tag()), model);
        }
    }

    #[test]
    fn test_tag_matching_is_case_insensitive() {
        assert_eq!(IndustryModel::from_tag("  SALES "), IndustryModel::Sales);
        assert_eq!(IndustryModel::from_tag("Real-Estate"), IndustryModel::RealEstate);
    }

    #[test]
    fn test_serde_uses_kebab_case_tags() {
        let json = serde_json::to_string(&IndustryModel::RealEstate).unwrap();
        assert_eq!(json, r#""real-estate""#);
    }

    #[test]
    fn test_every_model_has_a_context_phrase() {
        for model in IndustryModel::ALL {
            assert!(model.context().contains("negotiations"));
            assert!(!model.display_name().is_empty());
        }
    }
}
