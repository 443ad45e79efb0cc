//! Event journal - one JSON object per line
//!
//! Enabled by `BLOCKFALL_LOG_PATH`. Every record carries a `type` tag and a
//! `ts` in milliseconds of game time, so a journal plus the seed in its `start`
//! record is enough to replay a session.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, EngineEvent};
use crate::types::{CellDelta, GameAction};

pub const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalConfig {
    pub log_path: Option<PathBuf>,
}

impl JournalConfig {
    /// Create from environment variables; a blank path disables the journal.
    pub fn from_env() -> Self {
        let log_path = std::env::var(LOG_PATH_VAR)
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        Self { log_path }
    }
}

/// One changed cell; `id` is the catalog index of the occupant, `-1` if cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaEntry {
    pub x: i8,
    pub y: i8,
    pub id: i8,
}

impl From<&CellDelta> for DeltaEntry {
    fn from(d: &CellDelta) -> Self {
        Self {
            x: d.pos.x,
            y: d.pos.y,
            id: d.occupant_id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JournalRecord {
    #[serde(rename = "start")]
    Start {
        ts: u64,
        seed: u32,
        tick_ms: u64,
        lock_grace_ms: u64,
    },
    #[serde(rename = "action")]
    Action {
        ts: u64,
        action: String,
        applied: bool,
    },
    #[serde(rename = "delta")]
    Delta {
        ts: u64,
        frame: u64,
        cells: Vec<DeltaEntry>,
    },
    #[serde(rename = "landed")]
    Landed { ts: u64, kind: String, landed: u32 },
    #[serde(rename = "game_over")]
    GameOver { ts: u64, landed: u32 },
}

impl JournalRecord {
    pub fn start(ts: u64, config: &EngineConfig) -> Self {
        Self::Start {
            ts,
            seed: config.seed,
            tick_ms: config.tick_interval.as_millis() as u64,
            lock_grace_ms: config.lock_grace.as_millis() as u64,
        }
    }

    pub fn action(ts: u64, action: GameAction, applied: bool) -> Self {
        Self::Action {
            ts,
            action: action.as_str().to_string(),
            applied,
        }
    }

    pub fn delta(ts: u64, frame: u64, deltas: &[CellDelta]) -> Self {
        Self::Delta {
            ts,
            frame,
            cells: deltas.iter().map(DeltaEntry::from).collect(),
        }
    }

    pub fn event(ts: u64, event: EngineEvent) -> Self {
        match event {
            EngineEvent::Landed { kind, landed } => Self::Landed {
                ts,
                kind: kind.as_str().to_string(),
                landed,
            },
            EngineEvent::GameOver { landed } => Self::GameOver { ts, landed },
        }
    }
}

/// Line-delimited JSON writer
pub struct Journal<W: Write> {
    out: W,
    buf: Vec<u8>,
    records: u64,
}

impl Journal<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening journal {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(4096),
            records: 0,
        }
    }

    pub fn record(&mut self, rec: &JournalRecord) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, rec)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.records += 1;
        Ok(())
    }

    /// Records written so far
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, PieceKind};

    #[test]
    fn test_records_are_tagged_lines() {
        let mut j = Journal::new(Vec::new());
        j.record(&JournalRecord::start(0, &EngineConfig::with_seed(9)))
            .unwrap();
        j.record(&JournalRecord::action(120, GameAction::RotateCcw, false))
            .unwrap();
        assert_eq!(j.records(), 2);

        let text = String::from_utf8(j.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"type":"start","ts":0,"seed":9,"tick_ms":500,"lock_grace_ms":1000}"#
        );
        assert_eq!(
            lines[1],
            r#"{"type":"action","ts":120,"action":"rotateCcw","applied":false}"#
        );
    }

    #[test]
    fn test_delta_encodes_cleared_as_minus_one() {
        let rec = JournalRecord::delta(
            16,
            1,
            &[
                CellDelta::cleared(Coord::new(4, 21)),
                CellDelta::filled(Coord::new(4, 20), PieceKind::T),
            ],
        );
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(
            json,
            r#"{"type":"delta","ts":16,"frame":1,"cells":[{"x":4,"y":21,"id":-1},{"x":4,"y":20,"id":2}]}"#
        );
    }

    #[test]
    fn test_event_records() {
        let landed = JournalRecord::event(
            5,
            EngineEvent::Landed {
                kind: PieceKind::S,
                landed: 3,
            },
        );
        assert_eq!(
            serde_json::to_string(&landed).unwrap(),
            r#"{"type":"landed","ts":5,"kind":"s","landed":3}"#
        );

        let over = JournalRecord::event(6, EngineEvent::GameOver { landed: 3 });
        let parsed: JournalRecord =
            serde_json::from_str(&serde_json::to_string(&over).unwrap()).unwrap();
        assert_eq!(parsed, over);
    }
}
