//! Names for computer seats.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

const COMPUTER_NAMES: &[&str] = &[
    "HAL", "Data", "GLaDOS", "WALL-E", "EVE", "R2D2", "C3PO", "T-800", "Skynet", "Optimus",
    "Megatron", "Bender", "WOPR", "Cortana", "Marvin", "Siri", "Alexa", "Jeeves",
];

/// Computer names drawn without replacement. One pool per table setup, so
/// names never repeat at a table but every new setup starts full.
#[derive(Debug)]
pub struct NamePool {
    names: Vec<&'static str>,
    issued: usize,
}

impl NamePool {
    pub fn new(seed: u64) -> Self {
        let mut names = COMPUTER_NAMES.to_vec();
        names.shuffle(&mut ChaCha20Rng::seed_from_u64(seed));
        Self { names, issued: 0 }
    }

    /// Next unused name; falls back to numbered names once the pool is empty.
    pub fn next_name(&mut self) -> String {
        self.issued += 1;
        match self.names.pop() {
            Some(name) => name.to_string(),
            None => format!("Bot {}", self.issued),
        }
    }

    /// Seat label for a computer: base name plus the policy label.
    pub fn computer(&mut self, policy_label: &str) -> String {
        format!("{} ({})", self.next_name(), policy_label)
    }
}
