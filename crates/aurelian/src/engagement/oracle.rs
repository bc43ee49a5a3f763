use serde::Serialize;

/// Property archetypes offered by the consultation dialog.
pub const PROPERTY_TYPES: [&str; 5] =
    ["Sanctuary", "Fortress", "Estate", "Penthouse", "Private Island"];

/// Markets offered by the consultation dialog.
pub const CONSULT_LOCATIONS: [&str; 6] =
    ["Monaco", "Aspen", "Mykonos", "Dubai", "London", "Anywhere"];

/// Lifestyle intents offered by the consultation dialog.
pub const LIFESTYLES: [&str; 5] = [
    "Host Private Art Events",
    "Disappear from the Grid",
    "Dock my Superyacht",
    "Raise a Dynasty",
    "Work in Absolute Silence",
];

/// Lifecycle of a consultation: `Input → Thinking → Results`, with reset
/// returning to `Input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStep {
    Input,
    Thinking,
    Results,
}

/// A curated listing surfaced by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub name: &'static str,
    pub location: &'static str,
    pub price: &'static str,
}

/// The visitor's selections, handed to the recommender.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationQuery {
    pub property_type: &'static str,
    pub location: &'static str,
    pub lifestyle: &'static str,
}

/// Recommendation capability behind the consultation. The shipped
/// implementation replays a fixed script; a real recommendation engine
/// slots in here without touching the state machine.
pub trait Recommender: Send + Sync {
    fn recommend(&self, query: &ConsultationQuery) -> Vec<Recommendation>;
}

/// Scripted recommender; there is no model behind the oracle in this build.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRecommender;

impl Recommender for ScriptedRecommender {
    fn recommend(&self, _query: &ConsultationQuery) -> Vec<Recommendation> {
        vec![
            Recommendation {
                name: "Villa Paradox",
                location: "Monaco",
                price: "€45M",
            },
            Recommendation {
                name: "The Cloud Deck",
                location: "Aspen",
                price: "$62M",
            },
        ]
    }
}

/// Per-dialog consultation state. Selections are constrained to the fixed
/// sets above; closing the dialog resets everything to the defaults.
#[derive(Debug, Clone)]
pub struct OracleConsultation {
    step: ConsultationStep,
    property_type: &'static str,
    location: &'static str,
    lifestyle: &'static str,
    results: Vec<Recommendation>,
}

impl Default for OracleConsultation {
    fn default() -> Self {
        Self::new()
    }
}

impl OracleConsultation {
    pub fn new() -> Self {
        Self {
            step: ConsultationStep::Input,
            property_type: PROPERTY_TYPES[0],
            location: CONSULT_LOCATIONS[0],
            lifestyle: LIFESTYLES[0],
            results: Vec::new(),
        }
    }

    pub fn step(&self) -> ConsultationStep {
        self.step
    }

    pub fn property_type(&self) -> &'static str {
        self.property_type
    }

    pub fn location(&self) -> &'static str {
        self.location
    }

    pub fn lifestyle(&self) -> &'static str {
        self.lifestyle
    }

    pub fn results(&self) -> &[Recommendation] {
        &self.results
    }

    pub fn query(&self) -> ConsultationQuery {
        ConsultationQuery {
            property_type: self.property_type,
            location: self.location,
            lifestyle: self.lifestyle,
        }
    }

    /// Returns `false` for values outside the fixed set, leaving the
    /// current selection unchanged.
    pub fn select_property_type(&mut self, value: &str) -> bool {
        match PROPERTY_TYPES.iter().find(|option| **option == value) {
            Some(option) => {
                self.property_type = option;
                true
            }
            None => false,
        }
    }

    pub fn select_location(&mut self, value: &str) -> bool {
        match CONSULT_LOCATIONS.iter().find(|option| **option == value) {
            Some(option) => {
                self.location = option;
                true
            }
            None => false,
        }
    }

    pub fn select_lifestyle(&mut self, value: &str) -> bool {
        match LIFESTYLES.iter().find(|option| **option == value) {
            Some(option) => {
                self.lifestyle = option;
                true
            }
            None => false,
        }
    }

    /// Enter the thinking stage. Only the input step may start a
    /// consultation; anything else is a no-op.
    pub fn begin_consultation(&mut self) -> bool {
        if self.step != ConsultationStep::Input {
            return false;
        }
        self.step = ConsultationStep::Thinking;
        true
    }

    /// Apply the recommender's results after the thinking stage. Results
    /// arriving when the consultation is not thinking are discarded.
    pub fn complete_consultation(&mut self, recommendations: Vec<Recommendation>) -> bool {
        if self.step != ConsultationStep::Thinking {
            return false;
        }
        self.results = recommendations;
        self.step = ConsultationStep::Results;
        true
    }

    /// Run the full consultation synchronously. Callers that want
    /// simulated thinking latency use `begin_consultation` /
    /// `complete_consultation` directly.
    pub fn consult(&mut self, recommender: &dyn Recommender) -> bool {
        if !self.begin_consultation() {
            return false;
        }
        let results = recommender.recommend(&self.query());
        self.complete_consultation(results)
    }

    /// "Search Again" or dialog close: back to the input step with the
    /// default selections and no results.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The line framing the results, echoing the visitor's selections.
    pub fn tagline(&self) -> String {
        format!(
            "Based on your desire to {} in {}...",
            self.lifestyle, self.location
        )
    }
}
