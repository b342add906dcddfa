//! Fixed wording of the conversation

use super::catalog::{Diagnosis, Symptom};
use crate::places::{LookupError, Provider};

pub const GREETING: &str = "Hello, I am Aceso, an AI-powered symptom checker chatbot. \
I can help find possible diagnoses for your symptoms and suggest nearby doctors. \
Please note that I am not a replacement for professional medical advice, and you \
should always consult a doctor for accurate diagnosis and treatment.";

pub const SYMPTOM_QUESTION: &str =
    "Great! What are your symptoms today? You can select multiple options.";

pub const SYMPTOM_SELECTOR_LABEL: &str = "Select your symptoms:";

pub const PROVIDER_PROMPT: &str =
    "Would you like me to search for doctors or hospitals in your area?";

pub const LOCATION_FIELD_LABEL: &str =
    "Please enter your location (city, state, or full address):";

pub const CLOSING: &str = "Thank you for using Aceso. Remember to consult with a \
healthcare professional for accurate diagnosis and treatment.";

pub const WARN_NO_SYMPTOMS: &str = "Please select at least one symptom.";

pub const WARN_NO_LOCATION: &str = "Please enter a location.";

pub fn unknown_symptom_warning(label: &str) -> String {
    format!(
        "\"{label}\" is not a listed symptom. Choose from: {}.",
        Symptom::labels().join(", ")
    )
}

pub fn symptom_echo(symptoms: &[Symptom]) -> String {
    format!("My symptoms: {}", join_labels(symptoms.iter().map(|s| s.label())))
}

pub fn diagnosis_list(diagnoses: &[Diagnosis]) -> String {
    format!(
        "Based on your symptoms, here are some possible diagnoses: {}",
        join_labels(diagnoses.iter().map(|d| d.label()))
    )
}

pub fn lookup_outcome(location: &str, outcome: &Result<Vec<Provider>, LookupError>) -> String {
    match outcome {
        Ok(providers) if providers.is_empty() => format!(
            "I couldn't find any healthcare providers near {location}. \
             Please try a different location or broaden your search area."
        ),
        Ok(providers) => {
            let lines: Vec<String> = providers.iter().map(ToString::to_string).collect();
            format!(
                "Here are some healthcare providers near {location}:\n\n{}",
                lines.join("\n")
            )
        }
        Err(e) => format!("I'm sorry, there was an error searching for healthcare providers: {e}"),
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}
