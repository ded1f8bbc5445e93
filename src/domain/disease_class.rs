use serde::{Deserialize, Serialize};
use std::fmt;

/// Classes the remote model is trained on, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseClass {
    Aphids,
    ArmyWorm,
    BacterialBlight,
    Healthy,
    PowderyMildew,
    TargetSpot,
}

impl DiseaseClass {
    pub const ALL: [DiseaseClass; 6] = [
        DiseaseClass::Aphids,
        DiseaseClass::ArmyWorm,
        DiseaseClass::BacterialBlight,
        DiseaseClass::Healthy,
        DiseaseClass::PowderyMildew,
        DiseaseClass::TargetSpot,
    ];

    /// Class identifier as the model's class mapping spells it.
    pub fn model_name(self) -> &'static str {
        match self {
            DiseaseClass::Aphids => "Aphids",
            DiseaseClass::ArmyWorm => "Army_worm",
            DiseaseClass::BacterialBlight => "Bacterial_Blight",
            DiseaseClass::Healthy => "Healthy",
            DiseaseClass::PowderyMildew => "Powdery_Mildew",
            DiseaseClass::TargetSpot => "Target_spot",
        }
    }

    /// Human readable label, the form the prediction endpoints return.
    pub fn label(self) -> String {
        self.model_name().replace('_', " ")
    }

    /// Case-insensitive lookup treating `_` and spaces alike.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = canonical(label);
        Self::ALL
            .into_iter()
            .find(|class| canonical(class.model_name()) == wanted)
    }
}

impl fmt::Display for DiseaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn canonical(label: &str) -> String {
    label
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_tolerant_of_separator_and_case() {
        assert_eq!(
            DiseaseClass::from_label("Bacterial Blight"),
            Some(DiseaseClass::BacterialBlight)
        );
        assert_eq!(
            DiseaseClass::from_label("bacterial_blight"),
            Some(DiseaseClass::BacterialBlight)
        );
        assert_eq!(
            DiseaseClass::from_label("  ARMY   worm "),
            Some(DiseaseClass::ArmyWorm)
        );
    }

    #[test]
    fn unknown_labels_do_not_match() {
        assert_eq!(DiseaseClass::from_label("Unknown"), None);
        assert_eq!(DiseaseClass::from_label(""), None);
    }

    #[test]
    fn labels_replace_underscores() {
        assert_eq!(DiseaseClass::TargetSpot.label(), "Target spot");
        assert_eq!(DiseaseClass::PowderyMildew.to_string(), "Powdery Mildew");
    }
}
