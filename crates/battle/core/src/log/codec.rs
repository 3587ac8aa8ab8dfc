//! Binary persistence of [`BattleLog`].
//!
//! Layout (bincode, fixed-width little-endian):
//!
//! ```text
//! outcome: u8, turns: u32
//! initial_hp: u64 count, then (actor: u16, hp: u32)*
//! entries:    u64 count, then per entry
//!             turn: u32, actor: Option<u16>,
//!             kind: u8, skill_index: Option<u16>, extra: u32,
//!             u64 count, then (kind: u8, target: Option<u16>, value: f64,
//!                              status: Option<u16>, extra: u32)*
//! players, enemies: u64 count, then per participant
//!             actor: u16, character_id: Option<u32>, name: u64 len + UTF-8,
//!             avatar_id: Option<u32>, level: Option<u16>, max_hp: u32
//! ```
//!
//! `Option` is a one-byte tag (0 or 1) followed by the value. Floats are
//! stored as raw IEEE-754 bits, so encode/decode is exact.

use std::io::{Cursor, ErrorKind};

use bincode::Options;
use sha2::{Digest, Sha256};

use super::BattleLog;
use crate::error::{CombatError, ErrorSeverity};

/// Failure to encode or decode a battle log.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogCodecError {
    /// The stream ended before the log was complete.
    #[error("battle log is truncated")]
    Truncated,

    /// The stream contains bytes that do not form a valid log.
    #[error("battle log is malformed: {0}")]
    Malformed(String),

    /// A complete log was decoded but bytes remain.
    #[error("battle log has {remaining} trailing bytes")]
    TrailingBytes { remaining: usize },

    #[error("battle log could not be encoded: {0}")]
    Encode(String),
}

impl CombatError for LogCodecError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encode(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Decode,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Truncated => "LOG_TRUNCATED",
            Self::Malformed(_) => "LOG_MALFORMED",
            Self::TrailingBytes { .. } => "LOG_TRAILING_BYTES",
            Self::Encode(_) => "LOG_ENCODE",
        }
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .allow_trailing_bytes()
}

fn classify(error: bincode::Error) -> LogCodecError {
    match *error {
        bincode::ErrorKind::Io(ref io) if io.kind() == ErrorKind::UnexpectedEof => {
            LogCodecError::Truncated
        }
        // Reads are limited to the input length; a length prefix that points
        // past the end is a cut-off stream.
        bincode::ErrorKind::SizeLimit => LogCodecError::Truncated,
        other => LogCodecError::Malformed(other.to_string()),
    }
}

impl BattleLog {
    /// Encodes the log into its persisted byte layout.
    pub fn encode(&self) -> Result<Vec<u8>, LogCodecError> {
        options()
            .serialize(self)
            .map_err(|error| LogCodecError::Encode(error.to_string()))
    }

    /// Decodes a log, rejecting truncated, malformed, or over-long input.
    pub fn decode(bytes: &[u8]) -> Result<Self, LogCodecError> {
        let mut cursor = Cursor::new(bytes);
        let log: BattleLog = options()
            .with_limit(bytes.len() as u64)
            .deserialize_from(&mut cursor)
            .map_err(classify)?;

        let consumed = cursor.position() as usize;
        if consumed != bytes.len() {
            return Err(LogCodecError::TrailingBytes {
                remaining: bytes.len() - consumed,
            });
        }
        Ok(log)
    }

    /// SHA-256 of the encoded log. Equal digests mean byte-identical replays.
    pub fn digest(&self) -> Result<[u8; 32], LogCodecError> {
        let bytes = self.encode()?;
        Ok(Sha256::digest(&bytes).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{
        ActionKind, BattleAction, BattleOutcome, EffectFlags, EffectKind, EffectRecord,
        InitialHp, ParticipantSnapshot,
    };
    use crate::state::{ActorIndex, StatusId};

    fn sample_log() -> BattleLog {
        let mut attack = BattleAction::by(1, ActorIndex(0), ActionKind::PhysicalAttack);
        attack.push(
            EffectRecord::new(EffectKind::Damage, ActorIndex(1))
                .with_value(1234.5)
                .with_flags(EffectFlags::CRITICAL),
        );
        attack.push(
            EffectRecord::new(EffectKind::StatusApplied, ActorIndex(1))
                .with_value(3u8)
                .with_status(StatusId(4)),
        );
        let mut magic = BattleAction::by(1, ActorIndex(1), ActionKind::MageMagic).with_skill(3);
        magic.push(EffectRecord::new(EffectKind::Heal, ActorIndex(1)).with_value(0.1 + 0.2));

        BattleLog {
            outcome: BattleOutcome::Victory,
            turns: 1,
            initial_hp: vec![
                InitialHp {
                    actor: ActorIndex(0),
                    hp: 50_000,
                },
                InitialHp {
                    actor: ActorIndex(1),
                    hp: 1_000,
                },
            ],
            entries: vec![
                attack,
                magic,
                BattleAction::new(1, None, ActionKind::Victory),
            ],
            players: vec![ParticipantSnapshot {
                actor: ActorIndex(0),
                character_id: Some(7),
                name: "Aria".into(),
                avatar_id: Some(2),
                level: Some(12),
                max_hp: 50_000,
            }],
            enemies: vec![ParticipantSnapshot {
                actor: ActorIndex(1),
                character_id: None,
                name: "Slime".into(),
                avatar_id: None,
                level: None,
                max_hp: 1_000,
            }],
        }
    }

    #[test]
    fn decode_inverts_encode() {
        let log = sample_log();
        let bytes = log.encode().unwrap();
        assert_eq!(BattleLog::decode(&bytes).unwrap(), log);
    }

    #[test]
    fn header_layout_is_fixed() {
        let bytes = sample_log().encode().unwrap();
        assert_eq!(bytes[0], 0, "outcome byte");
        assert_eq!(&bytes[1..5], &1u32.to_le_bytes(), "turn count");
        assert_eq!(&bytes[5..13], &2u64.to_le_bytes(), "initial hp count");
        assert_eq!(&bytes[13..15], &0u16.to_le_bytes());
        assert_eq!(&bytes[15..19], &50_000u32.to_le_bytes());
    }

    #[test]
    fn every_truncation_is_rejected() {
        let bytes = sample_log().encode().unwrap();
        for len in 0..bytes.len() {
            let err = BattleLog::decode(&bytes[..len]).unwrap_err();
            assert_eq!(err, LogCodecError::Truncated, "prefix of {len} bytes");
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = sample_log().encode().unwrap();
        bytes.extend_from_slice(&[0, 0]);
        assert_eq!(
            BattleLog::decode(&bytes).unwrap_err(),
            LogCodecError::TrailingBytes { remaining: 2 }
        );
    }

    #[test]
    fn unknown_kind_bytes_are_malformed() {
        let mut bytes = sample_log().encode().unwrap();
        bytes[0] = 9;
        let err = BattleLog::decode(&bytes).unwrap_err();
        assert!(matches!(err, LogCodecError::Malformed(_)), "{err:?}");
        assert_eq!(err.severity(), ErrorSeverity::Decode);
    }

    #[test]
    fn digest_tracks_content() {
        let log = sample_log();
        let mut other = log.clone();
        other.turns = 2;
        assert_eq!(log.digest().unwrap(), sample_log().digest().unwrap());
        assert_ne!(log.digest().unwrap(), other.digest().unwrap());
        assert_eq!(hex::encode(log.digest().unwrap()).len(), 64);
    }
}
