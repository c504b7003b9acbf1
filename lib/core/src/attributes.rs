use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

/// Source of synthetic domain values for asset vertices.
pub trait AttributeProvider {
    fn random_manufacturer(&mut self) -> String;
    /// Unix timestamp in seconds.
    fn random_timestamp(&mut self) -> i64;
    fn random_identifier(&mut self) -> String;
    fn random_sentence(&mut self, word_count: usize) -> String;
}

const MANUFACTURERS: &[&str] = &["siemens", "abb", "vortex", "mulvo", "ropert"];

const WORDS: &[&str] = &[
    "valve", "pump", "sensor", "pressure", "flow", "inspect", "replaced", "north", "south",
    "housing", "seal", "motor", "bearing", "noise", "vibration", "calibrated", "line", "tank",
    "level", "gauge", "filter", "clean", "leak", "minor", "major", "shift", "check", "report",
    "panel", "cable", "relay", "switch", "unit", "cooling", "heat", "fan", "belt", "drive",
    "spare", "order", "fitted", "tested", "ok", "fault", "alarm", "reset", "manual", "auto",
];

/// Random attributes drawn from a caller-supplied RNG, so a seeded run is reproducible.
pub struct FakeAttributes<R> {
    rng: R,
    max_timestamp: i64,
}

impl<R: Rng> FakeAttributes<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl<R: Rng> AttributeProvider for FakeAttributes<R> {
    fn random_manufacturer(&mut self) -> String {
        MANUFACTURERS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(MANUFACTURERS[0])
            .to_string()
    }

    fn random_timestamp(&mut self) -> i64 {
        self.rng.random_range(0..=self.max_timestamp)
    }

    fn random_identifier(&mut self) -> String {
        Uuid::from_u128(self.rng.random()).to_string()
    }

    fn random_sentence(&mut self, word_count: usize) -> String {
        let mut sentence = String::new();
        for i in 0..word_count {
            let word = WORDS.choose(&mut self.rng).copied().unwrap_or("unit");
            if i == 0 {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    sentence.extend(first.to_uppercase());
                    sentence.push_str(chars.as_str());
                }
            } else {
                sentence.push(' ');
                sentence.push_str(word);
            }
        }
        if !sentence.is_empty() {
            sentence.push('.');
        }
        sentence
    }
}
