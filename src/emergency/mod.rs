//! First-aid guidance for common emergencies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Emergency kinds advertised to clients
pub const SUPPORTED_TYPES: [&str; 8] = [
    "snakebite",
    "drowning",
    "burns",
    "electric_shock",
    "choking",
    "bleeding",
    "fracture",
    "heart_attack",
];

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmergencyError {
    #[error("Emergency type '{0}' not supported")]
    UnsupportedType(String),
}

#[derive(Debug, Clone)]
struct GuideContent {
    steps: Vec<&'static str>,
    do_not: Vec<&'static str>,
    urgent: bool,
    call_emergency: bool,
}

/// A first-aid guide rendered for one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyGuide {
    pub emergency_type: String,
    pub language: String,
    pub steps: Vec<String>,
    pub do_not: Vec<String>,
    pub urgent: bool,
    pub call_emergency: bool,
}

/// Built-in first-aid guides keyed by emergency type, then language
#[derive(Debug, Clone)]
pub struct EmergencyGuides {
    guides: HashMap<&'static str, HashMap<&'static str, GuideContent>>,
}

impl EmergencyGuides {
    pub fn builtin() -> Self {
        let mut guides = HashMap::new();

        guides.insert(
            "snakebite",
            HashMap::from([(
                "en",
                GuideContent {
                    steps: vec![
                        "Stay calm and immobilize the affected limb",
                        "Remove tight clothing or jewelry",
                        "Keep the bite area below heart level",
                        "Seek immediate medical attention",
                    ],
                    do_not: vec![
                        "Do not cut the wound",
                        "Do not suck out the venom",
                        "Do not apply ice or tourniquet",
                    ],
                    urgent: true,
                    call_emergency: true,
                },
            )]),
        );

        guides.insert(
            "burns",
            HashMap::from([(
                "en",
                GuideContent {
                    steps: vec![
                        "Cool the burn with cool (not cold) water",
                        "Remove jewelry and tight items",
                        "Cover with sterile gauze",
                        "Seek medical attention for severe burns",
                    ],
                    do_not: vec![
                        "Do not apply ice directly",
                        "Do not pop blisters",
                        "Do not apply butter or oil",
                    ],
                    urgent: false,
                    call_emergency: false,
                },
            )]),
        );

        Self { guides }
    }

    pub fn supported_types() -> &'static [&'static str] {
        &SUPPORTED_TYPES
    }

    /// Guide for an emergency type, in English when the language has no translation
    pub fn guide(
        &self,
        emergency_type: &str,
        language: &str,
    ) -> Result<EmergencyGuide, EmergencyError> {
        let by_language = self
            .guides
            .get(emergency_type)
            .ok_or_else(|| EmergencyError::UnsupportedType(emergency_type.to_string()))?;

        let content = by_language
            .get(language)
            .or_else(|| by_language.get(DEFAULT_LANGUAGE))
            .ok_or_else(|| EmergencyError::UnsupportedType(emergency_type.to_string()))?;

        Ok(EmergencyGuide {
            emergency_type: emergency_type.to_string(),
            language: language.to_string(),
            steps: content.steps.iter().map(|s| s.to_string()).collect(),
            do_not: content.do_not.iter().map(|s| s.to_string()).collect(),
            urgent: content.urgent,
            call_emergency: content.call_emergency,
        })
    }
}

impl Default for EmergencyGuides {
    fn default() -> Self {
        Self::builtin()
    }
}
