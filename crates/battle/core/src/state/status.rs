//! Active status effects on one combatant.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::env::{StatusDefinition, StatusTags};
use crate::state::StatusId;
use crate::stats::{StatKind, StatModifiers};

/// One status attached to a combatant.
///
/// The parts of the definition the turn loop needs are copied in at
/// application time, so ticking and stat lookups never go back to the catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub id: StatusId,
    /// `None` for indefinite statuses.
    pub remaining: Option<u8>,
    pub tags: StatusTags,
    pub locks_action: bool,
    pub tick_damage_percent: f64,
    pub modifiers: StatModifiers,
}

impl StatusInstance {
    pub fn from_definition(definition: &StatusDefinition) -> Self {
        Self {
            id: definition.id,
            remaining: definition.duration,
            tags: definition.tags,
            locks_action: definition.locks_action,
            tick_damage_percent: definition.tick_damage_percent,
            modifiers: StatModifiers::from_map(&definition.stat_modifiers),
        }
    }

    pub fn is_debuff(&self) -> bool {
        self.tags.contains(StatusTags::DEBUFF)
    }
}

/// Result of attaching a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Already active; the remaining duration was reset.
    Refreshed,
    /// No free slot; nothing changed.
    Full,
}

/// Status list in application order, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusList(ArrayVec<StatusInstance, { BattleConfig::MAX_STATUS_EFFECTS }>);

impl StatusList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, instance: StatusInstance) -> ApplyOutcome {
        if let Some(existing) = self.0.iter_mut().find(|s| s.id == instance.id) {
            existing.remaining = instance.remaining;
            return ApplyOutcome::Refreshed;
        }
        match self.0.try_push(instance) {
            Ok(()) => ApplyOutcome::Applied,
            Err(_) => ApplyOutcome::Full,
        }
    }

    pub fn remove(&mut self, id: StatusId) -> Option<StatusInstance> {
        let position = self.0.iter().position(|s| s.id == id)?;
        Some(self.0.remove(position))
    }

    pub fn contains(&self, id: StatusId) -> bool {
        self.0.iter().any(|s| s.id == id)
    }

    pub fn oldest_debuff(&self) -> Option<StatusId> {
        self.0.iter().find(|s| s.is_debuff()).map(|s| s.id)
    }

    /// Removes every debuff, returning the removed ids in list order.
    pub fn remove_debuffs(&mut self) -> Vec<StatusId> {
        let removed = self
            .0
            .iter()
            .filter(|s| s.is_debuff())
            .map(|s| s.id)
            .collect();
        self.0.retain(|s| !s.is_debuff());
        removed
    }

    pub fn has_debuff(&self) -> bool {
        self.0.iter().any(StatusInstance::is_debuff)
    }

    pub fn locks_action(&self) -> bool {
        self.0.iter().any(|s| s.locks_action)
    }

    /// Product of every active modifier for `stat`.
    pub fn multiplier(&self, stat: StatKind) -> f64 {
        self.0.iter().map(|s| s.modifiers.multiplier(stat)).product()
    }

    pub fn ids(&self) -> Vec<StatusId> {
        self.0.iter().map(|s| s.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusInstance> {
        self.0.iter()
    }

    /// Counts down a timed status. Returns `true` when it has just expired and
    /// was removed.
    pub fn count_down(&mut self, id: StatusId) -> bool {
        let Some(position) = self.0.iter().position(|s| s.id == id) else {
            return false;
        };
        let Some(remaining) = self.0[position].remaining.as_mut() else {
            return false;
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.0.remove(position);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
