use crate::error::{CombatError, ErrorSeverity};
use crate::state::{SkillId, StatusId};

/// A skill-effect record that could not be decoded into a typed modifier.
///
/// Always a content-authoring bug; the affected battle must not start.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SkillCompileError {
    #[error("{skill}: unknown effect kind '{kind}'")]
    UnknownKind { skill: SkillId, kind: String },

    #[error("{skill}: effect '{kind}' is missing required key '{key}'")]
    MissingKey {
        skill: SkillId,
        kind: &'static str,
        key: &'static str,
    },

    #[error("{skill}: value {value} for '{key}' is out of range")]
    InvalidValue {
        skill: SkillId,
        key: &'static str,
        value: f64,
    },

    #[error("{skill}: '{value}' is not a valid '{key}'")]
    UnknownParameter {
        skill: SkillId,
        key: &'static str,
        value: String,
    },

    #[error("{skill}: references unknown status id {status}")]
    UnknownStatus { skill: SkillId, status: i64 },
}

impl SkillCompileError {
    pub fn skill(&self) -> SkillId {
        match self {
            Self::UnknownKind { skill, .. }
            | Self::MissingKey { skill, .. }
            | Self::InvalidValue { skill, .. }
            | Self::UnknownParameter { skill, .. }
            | Self::UnknownStatus { skill, .. } => *skill,
        }
    }

    pub(crate) fn unknown_status(skill: SkillId, status: StatusId) -> Self {
        Self::UnknownStatus {
            skill,
            status: i64::from(status.0),
        }
    }
}

impl CombatError for SkillCompileError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownKind { .. } => "SKILL_UNKNOWN_KIND",
            Self::MissingKey { .. } => "SKILL_MISSING_KEY",
            Self::InvalidValue { .. } => "SKILL_INVALID_VALUE",
            Self::UnknownParameter { .. } => "SKILL_UNKNOWN_PARAMETER",
            Self::UnknownStatus { .. } => "SKILL_UNKNOWN_STATUS",
        }
    }
}
