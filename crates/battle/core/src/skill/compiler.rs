//! Validating decode of skill-effect records into a [`SkillEffectBundle`].
//!
//! Each record is parsed into a typed [`SkillEffectKind`], its keys are read
//! and range-checked, and the result is folded into the bundle:
//!
//! | Shape | Fold |
//! |---|---|
//! | flags | OR |
//! | chances | maximum |
//! | multipliers | product |
//! | counts | saturating sum |
//! | intervals | minimum |
//! | resurrection variants | last chance/percent wins, caps add |
//!
//! Anything unexpected is a [`SkillCompileError`]; nothing is silently skipped.

use std::str::FromStr;

use super::{
    NecromancerEffect, ResurrectionEffect, SkillCompileError, SkillEffectBundle,
    SkillEffectRecord, SpecialAttack, SpecialAttackVariant,
};
use crate::env::{CatalogOracle, StatusTags};
use crate::state::StatusId;

/// Semantic tag of a skill-effect record.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "camelCase")]
pub enum SkillEffectKind {
    SpecialAttack,
    AntiHealing,
    BreathExtraCharge,
    SacrificeRitual,
    AutoDegradationRepair,
    Parry,
    ShieldBlock,
    SpellChargeModifier,
    ResurrectionForced,
    ResurrectionVitalize,
    ResurrectionNecromancer,
    ResurrectionActive,
    CounterAttack,
    MagicCounter,
    Pursuit,
    Cover,
    TargetingWeight,
    DamageDealtMultiplier,
    DamageTakenMultiplier,
    CriticalDamageMultiplier,
    StatusImmunity,
    StatusResistance,
}

/// Compiles every record of one combatant into its bundle.
///
/// `catalog` is consulted for status ids referenced by immunity and
/// resistance records.
pub fn compile_skill_effects<C>(
    records: &[SkillEffectRecord],
    catalog: &C,
) -> Result<SkillEffectBundle, SkillCompileError>
where
    C: CatalogOracle + ?Sized,
{
    let mut bundle = SkillEffectBundle::default();
    for record in records {
        apply_record(&mut bundle, record, catalog)?;
    }
    Ok(bundle)
}

fn apply_record<C>(
    bundle: &mut SkillEffectBundle,
    record: &SkillEffectRecord,
    catalog: &C,
) -> Result<(), SkillCompileError>
where
    C: CatalogOracle + ?Sized,
{
    let kind = SkillEffectKind::from_str(&record.kind).map_err(|_| {
        SkillCompileError::UnknownKind {
            skill: record.skill_id,
            kind: record.kind.clone(),
        }
    })?;
    let reader = RecordReader { record, kind };

    use SkillEffectKind as K;
    match kind {
        K::SpecialAttack => {
            let raw = reader.parameter("variant")?;
            let variant = SpecialAttackVariant::from_str(raw.trim())
                .map_err(|_| reader.unknown_parameter("variant", raw))?;
            bundle.special_attack |= SpecialAttack::from(variant);
        }
        K::AntiHealing => bundle.anti_healing = true,
        K::BreathExtraCharge => {
            let count = reader.count("count")?;
            bundle.breath_extra_charges = bundle.breath_extra_charges.saturating_add(count);
        }
        K::SacrificeRitual => {
            let interval = reader.interval("interval")?;
            bundle.sacrifice_interval = Some(
                bundle
                    .sacrifice_interval
                    .map_or(interval, |current| current.min(interval)),
            );
        }
        K::AutoDegradationRepair => bundle.auto_repair = true,
        K::Parry => bundle.parry = true,
        K::ShieldBlock => bundle.shield_block = true,
        K::SpellChargeModifier => {
            let initial = reader.count("initial")?;
            let extra = match reader.optional_value("extra")? {
                Some(_) => reader.count("extra")?,
                None => 0,
            };
            bundle.spell_charges.initial = bundle.spell_charges.initial.saturating_add(initial);
            bundle.spell_charges.extra = bundle.spell_charges.extra.saturating_add(extra);
        }
        K::ResurrectionForced => {
            let effect = reader.resurrection()?;
            bundle.forced_resurrection =
                Some(merge_resurrection(bundle.forced_resurrection, effect));
        }
        K::ResurrectionVitalize => {
            let effect = reader.resurrection()?;
            bundle.vitalize = Some(merge_resurrection(bundle.vitalize, effect));
        }
        K::ResurrectionActive => {
            let effect = reader.resurrection()?;
            bundle.active_resurrection =
                Some(merge_resurrection(bundle.active_resurrection, effect));
        }
        K::ResurrectionNecromancer => {
            let effect = NecromancerEffect {
                interval: reader.interval("interval")?,
                hp_percent: reader.percent("hpPercent")?,
                cap: reader.cap()?,
            };
            bundle.necromancer = Some(match bundle.necromancer {
                Some(previous) => NecromancerEffect {
                    interval: previous.interval.min(effect.interval),
                    hp_percent: effect.hp_percent,
                    cap: previous.cap.saturating_add(effect.cap),
                },
                None => effect,
            });
        }
        K::CounterAttack => {
            bundle.counter_attack = max_chance(bundle.counter_attack, reader.chance("chance")?);
        }
        K::MagicCounter => {
            bundle.magic_counter = max_chance(bundle.magic_counter, reader.chance("chance")?);
        }
        K::Pursuit => {
            bundle.pursuit = max_chance(bundle.pursuit, reader.chance("chance")?);
        }
        K::Cover => bundle.cover = true,
        K::TargetingWeight => bundle.targeting_weight *= reader.strictly_positive("multiplier")?,
        K::DamageDealtMultiplier => bundle.damage_dealt *= reader.multiplier("multiplier")?,
        K::DamageTakenMultiplier => bundle.damage_taken *= reader.multiplier("multiplier")?,
        K::CriticalDamageMultiplier => {
            bundle.critical_damage *= reader.multiplier("multiplier")?;
        }
        K::StatusImmunity => {
            let tags = reader.optional_tags("tags")?;
            let statuses = reader.status_ids("statuses", catalog)?;
            if tags.is_none() && statuses.is_none() {
                return Err(reader.missing("tags"));
            }
            bundle.immune_tags |= tags.unwrap_or_default();
            bundle.immune_statuses.extend(statuses.unwrap_or_default());
        }
        K::StatusResistance => {
            let resistance = reader.chance("percent")? / 100.0;
            match reader.status_ids("statuses", catalog)? {
                Some(statuses) => {
                    for status in statuses {
                        let entry = bundle.status_resistances.entry(status).or_insert(0.0);
                        *entry = entry.max(resistance);
                    }
                }
                None => bundle.status_resistance = bundle.status_resistance.max(resistance),
            }
        }
    }
    Ok(())
}

fn max_chance(current: Option<f64>, chance: f64) -> Option<f64> {
    Some(current.map_or(chance, |previous| previous.max(chance)))
}

fn merge_resurrection(
    previous: Option<ResurrectionEffect>,
    effect: ResurrectionEffect,
) -> ResurrectionEffect {
    match previous {
        Some(previous) => ResurrectionEffect {
            cap: previous.cap.saturating_add(effect.cap),
            ..effect
        },
        None => effect,
    }
}

/// Typed accessors over one record with uniform error reporting.
struct RecordReader<'a> {
    record: &'a SkillEffectRecord,
    kind: SkillEffectKind,
}

impl RecordReader<'_> {
    fn missing(&self, key: &'static str) -> SkillCompileError {
        SkillCompileError::MissingKey {
            skill: self.record.skill_id,
            kind: self.kind.into(),
            key,
        }
    }

    fn invalid(&self, key: &'static str, value: f64) -> SkillCompileError {
        SkillCompileError::InvalidValue {
            skill: self.record.skill_id,
            key,
            value,
        }
    }

    fn unknown_parameter(&self, key: &'static str, value: &str) -> SkillCompileError {
        SkillCompileError::UnknownParameter {
            skill: self.record.skill_id,
            key,
            value: value.to_string(),
        }
    }

    fn parameter(&self, key: &'static str) -> Result<&str, SkillCompileError> {
        self.record
            .parameters
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| self.missing(key))
    }

    fn optional_value(&self, key: &'static str) -> Result<Option<f64>, SkillCompileError> {
        match self.record.values.get(key) {
            Some(&value) if value.is_finite() => Ok(Some(value)),
            Some(&value) => Err(self.invalid(key, value)),
            None => Ok(None),
        }
    }

    fn value(&self, key: &'static str) -> Result<f64, SkillCompileError> {
        self.optional_value(key)?.ok_or_else(|| self.missing(key))
    }

    /// Percentage in `[0, 100]`.
    fn chance(&self, key: &'static str) -> Result<f64, SkillCompileError> {
        let value = self.value(key)?;
        if (0.0..=100.0).contains(&value) {
            Ok(value)
        } else {
            Err(self.invalid(key, value))
        }
    }

    /// Percentage in `(0, 100]`.
    fn percent(&self, key: &'static str) -> Result<f64, SkillCompileError> {
        let value = self.chance(key)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(key, value))
        }
    }

    fn multiplier(&self, key: &'static str) -> Result<f64, SkillCompileError> {
        let value = self.value(key)?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(key, value))
        }
    }

    /// Finite and above zero.
    fn strictly_positive(&self, key: &'static str) -> Result<f64, SkillCompileError> {
        let value = self.value(key)?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(key, value))
        }
    }

    fn whole(&self, key: &'static str, min: f64, max: f64) -> Result<f64, SkillCompileError> {
        let value = self.value(key)?;
        if value.fract() == 0.0 && (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(self.invalid(key, value))
        }
    }

    fn count(&self, key: &'static str) -> Result<u8, SkillCompileError> {
        Ok(self.whole(key, 0.0, f64::from(u8::MAX))? as u8)
    }

    fn interval(&self, key: &'static str) -> Result<u32, SkillCompileError> {
        Ok(self.whole(key, 1.0, f64::from(u32::MAX))? as u32)
    }

    /// Per-battle trigger cap; defaults to one.
    fn cap(&self) -> Result<u8, SkillCompileError> {
        match self.optional_value("cap")? {
            Some(_) => Ok(self.whole("cap", 1.0, f64::from(u8::MAX))? as u8),
            None => Ok(1),
        }
    }

    fn resurrection(&self) -> Result<ResurrectionEffect, SkillCompileError> {
        Ok(ResurrectionEffect {
            chance_percent: self.chance("chance")?,
            hp_percent: self.percent("hpPercent")?,
            cap: self.cap()?,
        })
    }

    /// Comma-separated tag names, e.g. `"sleep, petrify"`.
    fn optional_tags(&self, key: &'static str) -> Result<Option<StatusTags>, SkillCompileError> {
        let Some(raw) = self.record.parameters.get(key) else {
            return Ok(None);
        };
        let mut tags = StatusTags::empty();
        for name in raw.split(',').filter(|name| !name.trim().is_empty()) {
            tags |= StatusTags::parse_name(name).ok_or_else(|| self.unknown_parameter(key, name))?;
        }
        if tags.is_empty() {
            return Err(self.unknown_parameter(key, raw));
        }
        Ok(Some(tags))
    }

    fn status_ids<C>(
        &self,
        key: &'static str,
        catalog: &C,
    ) -> Result<Option<Vec<StatusId>>, SkillCompileError>
    where
        C: CatalogOracle + ?Sized,
    {
        let Some(raw_ids) = self.record.arrays.get(key) else {
            return Ok(None);
        };
        let skill = self.record.skill_id;
        raw_ids
            .iter()
            .map(|&raw| {
                let id = u16::try_from(raw)
                    .map(StatusId)
                    .map_err(|_| SkillCompileError::UnknownStatus { skill, status: raw })?;
                catalog
                    .status(id)
                    .map(|_| id)
                    .ok_or_else(|| SkillCompileError::unknown_status(skill, id))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CatalogSnapshot, StatusDefinition};
    use crate::state::SkillId;

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::from_definitions(
            [
                StatusDefinition::new(StatusId(1), "Sleep", Some(2)).with_tags(StatusTags::SLEEP),
                StatusDefinition::new(StatusId(2), "Poison", Some(4)).with_tags(StatusTags::POISON),
            ],
            [],
            [],
        )
        .unwrap()
    }

    fn record(kind: &str) -> SkillEffectRecord {
        SkillEffectRecord::new(SkillId(10), kind)
    }

    #[test]
    fn empty_input_compiles_to_default_bundle() {
        let bundle = compile_skill_effects(&[], &catalog()).unwrap();
        assert_eq!(bundle, SkillEffectBundle::default());
    }

    #[test]
    fn flags_and_special_attacks_accumulate() {
        let records = [
            record("specialAttack").with_parameter("variant", "piercing"),
            record("specialAttack").with_parameter("variant", "drain"),
            record("parry"),
            record("antiHealing"),
            record("cover"),
        ];
        let bundle = compile_skill_effects(&records, &catalog()).unwrap();
        assert_eq!(
            bundle.special_attack,
            SpecialAttack::PIERCING | SpecialAttack::DRAIN
        );
        assert!(bundle.parry && bundle.anti_healing && bundle.cover);
        assert!(!bundle.shield_block);
    }

    #[test]
    fn folding_rules() {
        let records = [
            record("counterAttack").with_value("chance", 20.0),
            record("counterAttack").with_value("chance", 35.0),
            record("damageDealtMultiplier").with_value("multiplier", 1.5),
            record("damageDealtMultiplier").with_value("multiplier", 2.0),
            record("breathExtraCharge").with_value("count", 1.0),
            record("breathExtraCharge").with_value("count", 2.0),
            record("sacrificeRitual").with_value("interval", 4.0),
            record("sacrificeRitual").with_value("interval", 3.0),
            record("resurrectionForced")
                .with_value("chance", 50.0)
                .with_value("hpPercent", 10.0),
            record("resurrectionForced")
                .with_value("chance", 80.0)
                .with_value("hpPercent", 30.0)
                .with_value("cap", 2.0),
        ];
        let bundle = compile_skill_effects(&records, &catalog()).unwrap();
        assert_eq!(bundle.counter_attack, Some(35.0));
        assert_eq!(bundle.damage_dealt, 3.0);
        assert_eq!(bundle.breath_extra_charges, 3);
        assert_eq!(bundle.sacrifice_interval, Some(3));
        assert_eq!(
            bundle.forced_resurrection,
            Some(ResurrectionEffect {
                chance_percent: 80.0,
                hp_percent: 30.0,
                cap: 3,
            })
        );
    }

    #[test]
    fn immunity_and_resistance_reference_catalog_statuses() {
        let records = [
            record("statusImmunity").with_parameter("tags", "sleep, petrify"),
            record("statusImmunity").with_array("statuses", vec![2]),
            record("statusResistance")
                .with_value("percent", 40.0)
                .with_array("statuses", vec![1]),
            record("statusResistance").with_value("percent", 10.0),
        ];
        let bundle = compile_skill_effects(&records, &catalog()).unwrap();
        assert_eq!(bundle.immune_tags, StatusTags::SLEEP | StatusTags::PETRIFY);
        assert!(bundle.immune_statuses.contains(&StatusId(2)));
        assert_eq!(bundle.resistance_to(StatusId(1)), 0.4);
        assert_eq!(bundle.resistance_to(StatusId(2)), 0.1);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = compile_skill_effects(&[record("teleport")], &catalog()).unwrap_err();
        assert_eq!(
            err,
            SkillCompileError::UnknownKind {
                skill: SkillId(10),
                kind: "teleport".into(),
            }
        );
    }

    #[test]
    fn missing_and_invalid_values_are_rejected() {
        let err = compile_skill_effects(&[record("pursuit")], &catalog()).unwrap_err();
        assert!(matches!(
            err,
            SkillCompileError::MissingKey {
                kind: "pursuit",
                key: "chance",
                ..
            }
        ));

        let err = compile_skill_effects(
            &[record("pursuit").with_value("chance", 120.0)],
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, SkillCompileError::InvalidValue { key: "chance", .. }));

        let err = compile_skill_effects(
            &[record("sacrificeRitual").with_value("interval", 0.0)],
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, SkillCompileError::InvalidValue { key: "interval", .. }));

        let err = compile_skill_effects(
            &[record("targetingWeight").with_value("multiplier", f64::NAN)],
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, SkillCompileError::InvalidValue { .. }));
    }

    #[test]
    fn targeting_weight_must_stay_positive() {
        for bad in [0.0, -1.0, f64::INFINITY] {
            let err = compile_skill_effects(
                &[record("targetingWeight").with_value("multiplier", bad)],
                &catalog(),
            )
            .unwrap_err();
            assert!(matches!(err, SkillCompileError::InvalidValue { key: "multiplier", .. }));
        }

        let bundle = compile_skill_effects(
            &[record("targetingWeight").with_value("multiplier", 0.25)],
            &catalog(),
        )
        .unwrap();
        assert_eq!(bundle.targeting_weight, 0.25);
    }

    #[test]
    fn unknown_parameters_and_statuses_are_rejected() {
        let err = compile_skill_effects(
            &[record("specialAttack").with_parameter("variant", "backstab")],
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, SkillCompileError::UnknownParameter { key: "variant", .. }));

        let err = compile_skill_effects(
            &[record("statusImmunity").with_parameter("tags", "burning")],
            &catalog(),
        )
        .unwrap_err();
        assert!(matches!(err, SkillCompileError::UnknownParameter { key: "tags", .. }));

        let err = compile_skill_effects(
            &[record("statusImmunity").with_array("statuses", vec![99])],
            &catalog(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SkillCompileError::UnknownStatus {
                skill: SkillId(10),
                status: 99,
            }
        );

        let err = compile_skill_effects(&[record("statusImmunity")], &catalog()).unwrap_err();
        assert!(matches!(err, SkillCompileError::MissingKey { key: "tags", .. }));
    }

    #[test]
    fn kind_tags_round_trip_through_strum() {
        assert_eq!(
            SkillEffectKind::from_str("autoDegradationRepair").unwrap(),
            SkillEffectKind::AutoDegradationRepair
        );
        let tag: &'static str = SkillEffectKind::ResurrectionNecromancer.into();
        assert_eq!(tag, "resurrectionNecromancer");
    }
}
