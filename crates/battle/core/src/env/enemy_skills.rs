use crate::state::{EnemySkillId, StatusId};
use crate::stats::Element;
use crate::targeting::TargetingMode;

/// Effect family of an enemy special skill.
///
/// Content groups these by id range: physical 1-10, magical 11-20, breath
/// 21-40, status 41-50, heal 51-60, buff 61+.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemySkillKind {
    Physical { multiplier: f64, hits: u8 },
    Magical { multiplier: f64 },
    Breath { multiplier: f64 },
    Status { status: StatusId, chance_percent: f64 },
    Heal { percent: f64 },
    Buff { status: StatusId },
    Guard,
}

impl EnemySkillKind {
    pub fn referenced_status(&self) -> Option<StatusId> {
        match *self {
            Self::Status { status, .. } | Self::Buff { status } => Some(status),
            _ => None,
        }
    }

    /// Skills aimed at the user's own side.
    pub fn targets_allies(&self) -> bool {
        matches!(self, Self::Heal { .. } | Self::Buff { .. } | Self::Guard)
    }
}

/// Catalog entry of an enemy special skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySkillDefinition {
    pub id: EnemySkillId,
    pub name: String,
    pub kind: EnemySkillKind,
    pub targeting: TargetingMode,
    /// Chance in percent that the skill is used when offered on a turn.
    pub chance_percent: f64,
    /// Per-battle use cap; `0` means unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses_per_battle: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
}

impl EnemySkillDefinition {
    pub fn new(
        id: EnemySkillId,
        name: impl Into<String>,
        kind: EnemySkillKind,
        targeting: TargetingMode,
        chance_percent: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            targeting,
            chance_percent,
            uses_per_battle: 0,
            element: Element::Neutral,
        }
    }

    pub fn with_uses(mut self, uses_per_battle: u8) -> Self {
        self.uses_per_battle = uses_per_battle;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }
}
