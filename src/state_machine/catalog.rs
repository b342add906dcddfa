//! Fixed symptom and diagnosis catalogs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symptoms a user can pick at the selection step, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symptom {
    Fever,
    Cough,
    Headache,
    Fatigue,
    Nausea,
    Other,
}

impl Symptom {
    pub const ALL: [Symptom; 6] = [
        Symptom::Fever,
        Symptom::Cough,
        Symptom::Headache,
        Symptom::Fatigue,
        Symptom::Nausea,
        Symptom::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Symptom::Fever => "Fever",
            Symptom::Cough => "Cough",
            Symptom::Headache => "Headache",
            Symptom::Fatigue => "Fatigue",
            Symptom::Nausea => "Nausea",
            Symptom::Other => "Other",
        }
    }

    /// All labels in catalog order
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.label()).collect()
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label that is not part of the symptom catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSymptom(pub String);

impl FromStr for Symptom {
    type Err = UnknownSymptom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|symptom| symptom.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSymptom(trimmed.to_string()))
    }
}

/// Placeholder diagnoses. Sampling never looks at the selected symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Diagnosis {
    #[serde(rename = "Common Cold")]
    CommonCold,
    Flu,
    Pneumonia,
    Allergies,
    Migraine,
}

impl Diagnosis {
    pub const ALL: [Diagnosis; 5] = [
        Diagnosis::CommonCold,
        Diagnosis::Flu,
        Diagnosis::Pneumonia,
        Diagnosis::Allergies,
        Diagnosis::Migraine,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Diagnosis::CommonCold => "Common Cold",
            Diagnosis::Flu => "Flu",
            Diagnosis::Pneumonia => "Pneumonia",
            Diagnosis::Allergies => "Allergies",
            Diagnosis::Migraine => "Migraine",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
