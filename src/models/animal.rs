use std::fmt;

use serde::{Deserialize, Serialize};

/// IUCN conservation status of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConservationStatus {
    #[serde(rename = "Critically Endangered")]
    CriticallyEndangered,
    #[serde(rename = "Endangered")]
    Endangered,
    #[serde(rename = "Vulnerable")]
    Vulnerable,
    #[serde(rename = "Near Threatened")]
    NearThreatened,
    #[serde(rename = "Least Concern")]
    LeastConcern,
}

impl ConservationStatus {
    pub const ALL: [ConservationStatus; 5] = [
        ConservationStatus::CriticallyEndangered,
        ConservationStatus::Endangered,
        ConservationStatus::Vulnerable,
        ConservationStatus::NearThreatened,
        ConservationStatus::LeastConcern,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConservationStatus::CriticallyEndangered => "Critically Endangered",
            ConservationStatus::Endangered => "Endangered",
            ConservationStatus::Vulnerable => "Vulnerable",
            ConservationStatus::NearThreatened => "Near Threatened",
            ConservationStatus::LeastConcern => "Least Concern",
        }
    }
}

impl fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single mammal record. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    pub local_name: String,
    pub latin_name: String,
    pub illustration: String,
    pub habitat: String,
    pub food_type: String,
    pub population: String,
    pub conservation_status: ConservationStatus,
    pub characteristics: Vec<String>,
    pub fun_fact: String,
    pub description: String,
}

impl Animal {
    /// Text read aloud on the detail screen.
    pub fn narration(&self) -> String {
        format!("{}. {}. {}", self.local_name, self.latin_name, self.description)
    }
}
