//! Target resolution and formation rules.
//!
//! Every function here draws from the random source in a fixed order:
//!
//! 1. A forced (sacrifice) target, when set and alive, is used without a draw.
//! 2. Weighted selection draws once per pick via `next_index`. A pick whose
//!    candidates all weigh zero is a configuration error, never a default.
//! 3. Cover redirect draws once, only when an eligible cover exists.

use crate::engine::BattleError;
use crate::rng::BattleRandom;
use crate::state::{ActorIndex, BattleState, Side};

/// Who an action can affect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingMode {
    SingleEnemy,
    /// `count` weighted picks among living enemies; `distinct` forbids repeats.
    RandomEnemies { count: u8, distinct: bool },
    SingleAlly,
    AllAllies,
    SelfOnly,
    /// Every living opponent.
    All,
}

impl TargetingMode {
    pub fn is_offensive(self) -> bool {
        matches!(
            self,
            Self::SingleEnemy | Self::RandomEnemies { .. } | Self::All
        )
    }
}

/// How a single ally is picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllyPreference {
    /// Lowest HP ratio, ties by index. No draw.
    MostWounded,
    /// Weighted by targeting weight.
    Weighted,
}

/// Forced target pair chosen by a sacrifice ritual for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForcedTargets {
    pub ally: ActorIndex,
    pub enemy: ActorIndex,
}

/// An attack intercepted by a covering front-row ally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub original: ActorIndex,
    pub cover: ActorIndex,
}

/// Targets in resolution order plus any cover redirects that produced them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedTargets {
    pub targets: Vec<ActorIndex>,
    pub redirects: Vec<Redirect>,
}

impl ResolvedTargets {
    fn single(target: ActorIndex) -> Self {
        Self {
            targets: vec![target],
            redirects: Vec::new(),
        }
    }

    fn many(targets: Vec<ActorIndex>) -> Self {
        Self {
            targets,
            redirects: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Target resolution for one actor.
pub struct Targeting<'a> {
    pub state: &'a BattleState,
    pub actor: ActorIndex,
    pub forced: Option<ForcedTargets>,
    pub front_row_size: u8,
}

impl Targeting<'_> {
    fn side(&self) -> Side {
        self.state.actor(self.actor).side
    }

    pub fn resolve(
        &self,
        mode: TargetingMode,
        preference: AllyPreference,
        rng: &mut BattleRandom,
    ) -> Result<ResolvedTargets, BattleError> {
        let side = self.side();
        let resolved = match mode {
            TargetingMode::SingleEnemy => self.single_enemy(rng)?,
            TargetingMode::RandomEnemies { count, distinct } => {
                ResolvedTargets::many(self.random_enemies(count, distinct, rng)?)
            }
            TargetingMode::SingleAlly => self
                .single_ally(preference, rng)?
                .map(ResolvedTargets::single)
                .unwrap_or_default(),
            TargetingMode::AllAllies => ResolvedTargets::many(self.state.living(side)),
            TargetingMode::SelfOnly => {
                if self.state.is_alive(self.actor) {
                    ResolvedTargets::single(self.actor)
                } else {
                    ResolvedTargets::default()
                }
            }
            TargetingMode::All => ResolvedTargets::many(self.state.living(side.opponent())),
        };
        Ok(resolved)
    }

    /// Whether `mode` would find anyone, without drawing.
    pub fn has_candidates(&self, mode: TargetingMode) -> bool {
        let side = self.side();
        match mode {
            TargetingMode::SingleEnemy
            | TargetingMode::RandomEnemies { .. }
            | TargetingMode::All => !self.state.is_wiped(side.opponent()),
            TargetingMode::SingleAlly | TargetingMode::AllAllies => !self.state.is_wiped(side),
            TargetingMode::SelfOnly => self.state.is_alive(self.actor),
        }
    }

    /// Weighted single enemy with forced override and cover redirect.
    pub fn single_enemy(&self, rng: &mut BattleRandom) -> Result<ResolvedTargets, BattleError> {
        if let Some(forced) = self.forced.filter(|f| self.state.is_alive(f.enemy)) {
            return Ok(ResolvedTargets::single(forced.enemy));
        }
        let candidates = self.state.living(self.side().opponent());
        let Some(natural) = self.weighted_pick(&candidates, rng)? else {
            return Ok(ResolvedTargets::default());
        };
        let resolved = match self.cover_for(natural, rng)? {
            Some(cover) => ResolvedTargets {
                targets: vec![cover],
                redirects: vec![Redirect {
                    original: natural,
                    cover,
                }],
            },
            None => ResolvedTargets::single(natural),
        };
        Ok(resolved)
    }

    fn random_enemies(
        &self,
        count: u8,
        distinct: bool,
        rng: &mut BattleRandom,
    ) -> Result<Vec<ActorIndex>, BattleError> {
        let mut candidates = self.state.living(self.side().opponent());
        let mut picked = Vec::with_capacity(usize::from(count));
        for _ in 0..count.max(1) {
            let Some(target) = self.weighted_pick(&candidates, rng)? else {
                break;
            };
            picked.push(target);
            if distinct {
                candidates.retain(|&candidate| candidate != target);
            }
        }
        Ok(picked)
    }

    fn single_ally(
        &self,
        preference: AllyPreference,
        rng: &mut BattleRandom,
    ) -> Result<Option<ActorIndex>, BattleError> {
        if let Some(forced) = self.forced.filter(|f| self.state.is_alive(f.ally)) {
            return Ok(Some(forced.ally));
        }
        let allies = self.state.living(self.side());
        match preference {
            AllyPreference::MostWounded => Ok(most_wounded(self.state, &allies)),
            AllyPreference::Weighted => self.weighted_pick(&allies, rng),
        }
    }

    /// One draw per pick. `None` only when there is no candidate.
    fn weighted_pick(
        &self,
        candidates: &[ActorIndex],
        rng: &mut BattleRandom,
    ) -> Result<Option<ActorIndex>, BattleError> {
        if candidates.is_empty() {
            return Ok(None);
        }
        let weights: Vec<f64> = candidates
            .iter()
            .map(|&index| self.state.actor(index).bundle.weight())
            .collect();
        match rng.next_index(&weights) {
            Some(position) => Ok(candidates.get(position).copied()),
            None => Err(BattleError::ZeroTargetWeights { actor: self.actor }),
        }
    }

    /// Front-row allies of a back-row target may step in.
    fn cover_for(&self, target: ActorIndex, rng: &mut BattleRandom) -> Result<Option<ActorIndex>, BattleError> {
        let defender = self.state.actor(target);
        if defender.is_front_row(self.front_row_size) {
            return Ok(None);
        }
        let covers: Vec<ActorIndex> = self
            .state
            .living(defender.side)
            .into_iter()
            .filter(|&index| index != target)
            .filter(|&index| {
                let ally = self.state.actor(index);
                ally.bundle.cover && ally.is_front_row(self.front_row_size)
            })
            .collect();
        if covers.is_empty() {
            return Ok(None);
        }

        let mut weights = Vec::with_capacity(covers.len() + 1);
        weights.push(defender.bundle.weight());
        weights.extend(covers.iter().map(|&index| self.state.actor(index).bundle.weight()));
        match rng.next_index(&weights) {
            Some(0) => Ok(None),
            Some(position) => Ok(covers.get(position - 1).copied()),
            None => Err(BattleError::ZeroTargetWeights { actor: self.actor }),
        }
    }
}

/// Lowest HP ratio, ties by lowest index.
pub fn most_wounded(state: &BattleState, candidates: &[ActorIndex]) -> Option<ActorIndex> {
    candidates.iter().copied().min_by(|&a, &b| {
        state
            .actor(a)
            .hp_ratio()
            .total_cmp(&state.actor(b).hp_ratio())
            .then_with(|| a.cmp(&b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::SkillEffectBundle;
    use crate::state::{BattleActor, CombatantSpec, ResourcePool};
    use crate::stats::CombatSnapshot;

    fn unit(index: u16, side: Side, slot: u8, hp: u32, bundle: SkillEffectBundle) -> BattleActor {
        let spec = CombatantSpec::new(
            format!("u{index}"),
            CombatSnapshot {
                max_hp: 100,
                ..CombatSnapshot::default()
            },
        )
        .with_slot(slot)
        .with_hp(hp);
        BattleActor::new(ActorIndex(index), side, spec, bundle, ResourcePool::default())
    }

    fn targeting(state: &BattleState, actor: u16) -> Targeting<'_> {
        Targeting {
            state,
            actor: ActorIndex(actor),
            forced: None,
            front_row_size: 3,
        }
    }

    #[test]
    fn single_enemy_never_picks_the_dead() {
        let state = BattleState::new(vec![
            unit(0, Side::Player, 1, 100, SkillEffectBundle::default()),
            unit(1, Side::Enemy, 1, 0, SkillEffectBundle::default()),
            unit(2, Side::Enemy, 2, 50, SkillEffectBundle::default()),
        ]);
        let mut rng = BattleRandom::new(3);
        for _ in 0..50 {
            let resolved = targeting(&state, 0)
                .resolve(TargetingMode::SingleEnemy, AllyPreference::Weighted, &mut rng)
                .unwrap();
            assert_eq!(resolved.targets, vec![ActorIndex(2)]);
        }
    }

    #[test]
    fn forced_target_bypasses_selection_without_drawing() {
        let state = BattleState::new(vec![
            unit(0, Side::Player, 1, 100, SkillEffectBundle::default()),
            unit(1, Side::Enemy, 1, 100, SkillEffectBundle::default()),
            unit(2, Side::Enemy, 2, 100, SkillEffectBundle::default()),
        ]);
        let mut rng = BattleRandom::new(3);
        let before = rng.state();
        let forced = Targeting {
            forced: Some(ForcedTargets {
                ally: ActorIndex(0),
                enemy: ActorIndex(2),
            }),
            ..targeting(&state, 0)
        };
        let resolved = forced
            .resolve(TargetingMode::SingleEnemy, AllyPreference::Weighted, &mut rng)
            .unwrap();
        assert_eq!(resolved.targets, vec![ActorIndex(2)]);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn all_zero_weights_are_a_configuration_error() {
        let hidden = SkillEffectBundle {
            targeting_weight: 0.0,
            ..SkillEffectBundle::default()
        };
        let state = BattleState::new(vec![
            unit(0, Side::Player, 1, 100, SkillEffectBundle::default()),
            unit(1, Side::Enemy, 1, 100, hidden.clone()),
            unit(2, Side::Enemy, 2, 100, hidden),
        ]);
        let mut rng = BattleRandom::new(9);
        let before = rng.state();
        let err = targeting(&state, 0).single_enemy(&mut rng).unwrap_err();
        assert_eq!(err, BattleError::ZeroTargetWeights { actor: ActorIndex(0) });
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn cover_redirects_attacks_on_the_back_row() {
        let guardian = SkillEffectBundle {
            cover: true,
            ..SkillEffectBundle::default()
        };
        let state = BattleState::new(vec![
            unit(0, Side::Player, 1, 100, SkillEffectBundle::default()),
            unit(1, Side::Player, 4, 100, SkillEffectBundle::default()),
            unit(2, Side::Player, 2, 100, guardian),
            unit(3, Side::Enemy, 1, 100, SkillEffectBundle::default()),
        ]);
        let mut rng = BattleRandom::new(5);
        let mut redirected = 0;
        for _ in 0..200 {
            let resolved = targeting(&state, 3).single_enemy(&mut rng).unwrap();
            if let Some(redirect) = resolved.redirects.first() {
                assert_eq!(redirect.original, ActorIndex(1));
                assert_eq!(redirect.cover, ActorIndex(2));
                assert_eq!(resolved.targets, vec![ActorIndex(2)]);
                redirected += 1;
            }
        }
        assert!(redirected > 0);
    }

    #[test]
    fn distinct_random_enemies_do_not_repeat() {
        let state = BattleState::new(vec![
            unit(0, Side::Player, 1, 100, SkillEffectBundle::default()),
            unit(1, Side::Enemy, 1, 100, SkillEffectBundle::default()),
            unit(2, Side::Enemy, 2, 100, SkillEffectBundle::default()),
        ]);
        let mut rng = BattleRandom::new(1);
        let mode = TargetingMode::RandomEnemies {
            count: 5,
            distinct: true,
        };
        let resolved = targeting(&state, 0)
            .resolve(mode, AllyPreference::Weighted, &mut rng)
            .unwrap();
        assert_eq!(resolved.targets.len(), 2);
        assert_ne!(resolved.targets[0], resolved.targets[1]);
    }

    #[test]
    fn heals_prefer_the_most_wounded_ally() {
        let state = BattleState::new(vec![
            unit(0, Side::Player, 1, 90, SkillEffectBundle::default()),
            unit(1, Side::Player, 2, 30, SkillEffectBundle::default()),
            unit(2, Side::Player, 3, 30, SkillEffectBundle::default()),
            unit(3, Side::Enemy, 1, 100, SkillEffectBundle::default()),
        ]);
        let mut rng = BattleRandom::new(1);
        let resolved = targeting(&state, 0)
            .resolve(TargetingMode::SingleAlly, AllyPreference::MostWounded, &mut rng)
            .unwrap();
        assert_eq!(resolved.targets, vec![ActorIndex(1)]);
    }
}
