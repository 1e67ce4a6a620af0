use serde::{Deserialize, Serialize};

use crate::cards::{ActionKind, Card};

/// One thing that happened during a round, in the order it happened.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    /// A seat drew a card
    Draw { seat: usize, card: Card },
    /// A seat chose to stay
    Stay { seat: usize, score: u32 },
    /// Duplicate number without protection
    Bust { seat: usize, value: u8 },
    /// Duplicate number absorbed by a Second Chance
    SecondChanceUsed { seat: usize, value: u8 },
    /// Action card aimed at a target
    Action {
        seat: usize,
        action: ActionKind,
        target: usize,
    },
    /// Second Chance passed on to another seat
    SecondChanceGiven { from: usize, to: usize },
    /// Second Chance nobody could take
    SecondChanceDiscarded { seat: usize },
    /// Seven distinct numbers
    Flip7 { seat: usize },
    /// Discard pile shuffled back into the draw pile
    Reshuffle,
}

/// Complete record of a round including every event and the banked scores.
/// Serialized to JSONL for round history storage.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Identifier of the game this round belongs to
    pub game_id: String,
    /// Round number, starting at 1
    pub round: u32,
    /// Dealer seat for this round
    pub dealer: usize,
    /// RNG seed of the game, if it was seeded
    pub seed: Option<u64>,
    /// Chronological list of everything that happened
    pub events: Vec<RoundEvent>,
    /// Banked score per seat
    pub scores: Vec<u32>,
    /// Cumulative total per seat after banking
    pub totals: Vec<u32>,
    /// Seats that busted
    pub busts: Vec<usize>,
    /// Seat that achieved Flip 7, if any
    #[serde(default)]
    pub flip7: Option<usize>,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Opens `path` for appending, creating it and its parent directories
    /// when missing. Existing rounds are kept.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that numbers games but writes nothing.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_game_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
