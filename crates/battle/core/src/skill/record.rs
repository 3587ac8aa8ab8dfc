use std::collections::BTreeMap;

use crate::state::SkillId;

/// Loosely-typed effect record as authored in skill master data.
///
/// `kind` is a camelCase semantic tag (`"counterAttack"`, `"statusImmunity"`);
/// its meaning decides which keys of the three maps are read. Records are only
/// ever consumed by [`compile_skill_effects`](super::compile_skill_effects).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffectRecord {
    pub skill_id: SkillId,
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub arrays: BTreeMap<String, Vec<i64>>,
}

impl SkillEffectRecord {
    pub fn new(skill_id: SkillId, kind: impl Into<String>) -> Self {
        Self {
            skill_id,
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn with_array(mut self, key: impl Into<String>, values: Vec<i64>) -> Self {
        self.arrays.insert(key.into(), values);
        self
    }
}
