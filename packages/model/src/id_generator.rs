use uuid::Uuid;

use crate::element::ElementId;

/// Source of fresh element ids.
///
/// Pages use random ids so elements from different sessions never collide.
/// The sequential form produces readable, reproducible ids for tests and
/// fixtures.
#[derive(Debug, Clone, Default)]
pub enum IdGenerator {
    #[default]
    Random,
    Sequential { seed: String, count: u32 },
}

impl IdGenerator {
    pub fn random() -> Self {
        IdGenerator::Random
    }

    pub fn sequential(seed: impl Into<String>) -> Self {
        IdGenerator::Sequential {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next id
    pub fn new_id(&mut self) -> ElementId {
        match self {
            IdGenerator::Random => Uuid::new_v4().to_string(),
            IdGenerator::Sequential { seed, count } => {
                *count += 1;
                format!("{}-{}", seed, count)
            }
        }
    }
}
