use super::{ActionKind, EffectFlags, EffectKind};
use crate::state::{ActorIndex, StatusId, Turn};

/// Head of an action entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDeclaration {
    pub kind: ActionKind,
    /// Spell or enemy-skill id, when the action used one.
    pub skill_index: Option<u16>,
    /// [`EffectFlags`] bits.
    pub extra: u32,
}

/// One effect of an action on one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRecord {
    pub kind: EffectKind,
    pub target: Option<ActorIndex>,
    /// Damage, heal amount, remaining charges or turns; meaning depends on `kind`.
    pub value: f64,
    pub status: Option<StatusId>,
    /// [`EffectFlags`] bits, or a referenced actor index for redirects.
    pub extra: u32,
}

impl EffectRecord {
    pub fn new(kind: EffectKind, target: ActorIndex) -> Self {
        Self {
            kind,
            target: Some(target),
            value: 0.0,
            status: None,
            extra: 0,
        }
    }

    pub fn with_value(mut self, value: impl Into<f64>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_status(mut self, status: StatusId) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_flags(mut self, flags: EffectFlags) -> Self {
        self.extra |= flags.bits();
        self
    }

    pub fn with_extra(mut self, extra: u32) -> Self {
        self.extra = extra;
        self
    }

    pub fn flags(&self) -> EffectFlags {
        EffectFlags::from_bits_retain(self.extra)
    }
}

/// One resolved action and everything it caused.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleAction {
    pub turn: Turn,
    /// `None` for system entries (status ticks, outcome declarations).
    pub actor: Option<ActorIndex>,
    pub declaration: ActionDeclaration,
    pub effects: Vec<EffectRecord>,
}

impl BattleAction {
    pub fn new(turn: Turn, actor: Option<ActorIndex>, kind: ActionKind) -> Self {
        Self {
            turn,
            actor,
            declaration: ActionDeclaration {
                kind,
                skill_index: None,
                extra: 0,
            },
            effects: Vec::new(),
        }
    }

    pub fn by(turn: Turn, actor: ActorIndex, kind: ActionKind) -> Self {
        Self::new(turn, Some(actor), kind)
    }

    pub fn with_skill(mut self, skill_index: u16) -> Self {
        self.declaration.skill_index = Some(skill_index);
        self
    }

    pub fn with_flags(mut self, flags: EffectFlags) -> Self {
        self.declaration.extra |= flags.bits();
        self
    }

    pub fn push(&mut self, effect: EffectRecord) {
        self.effects.push(effect);
    }

    pub fn kind(&self) -> ActionKind {
        self.declaration.kind
    }

    pub fn flags(&self) -> EffectFlags {
        EffectFlags::from_bits_retain(self.declaration.extra)
    }

    pub fn effects_of(&self, kind: EffectKind) -> impl Iterator<Item = &EffectRecord> {
        self.effects.iter().filter(move |effect| effect.kind == kind)
    }
}
