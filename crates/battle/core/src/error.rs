//! Common error infrastructure for battle-core.
//!
//! Domain errors (`SkillCompileError`, `OracleError`, `BattleError`,
//! `LogCodecError`) live next to the code that raises them; this module only
//! provides the shared classification used by callers to decide how to react.
//!
//! Resolution knows three failure classes:
//! - **Configuration**: authored data is wrong (unknown skill tag, missing
//!   catalog id, all-zero weights). The battle is aborted before any effect
//!   is applied.
//! - **Recoverable**: an action cannot run this turn (no charges, no target).
//!   Handled inside the turn loop by falling back to a basic attack, so it
//!   never reaches callers as an `Err`.
//! - **Decode**: a persisted log is corrupt or truncated.

/// How a caller should treat a failed resolution or decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Authored data is invalid; the affected battle cannot be resolved.
    Configuration,

    /// The requested operation cannot run now but an alternative exists.
    Recoverable,

    /// Persisted data could not be decoded.
    Decode,

    /// An engine invariant was violated. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    /// Lower-case label used in logs and CLI output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Recoverable => "recoverable",
            Self::Decode => "decode",
            Self::Internal => "internal",
        }
    }

    /// Whether the engine can route around the failure within a turn.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error points at authored content rather than code.
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::Configuration | Self::Decode)
    }
}

/// Common trait for all battle-core errors.
///
/// - All error enums implement this trait
/// - Display and Error come from `thiserror`
/// - `error_code` values are stable and safe to match on in tooling
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, defaulting to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
