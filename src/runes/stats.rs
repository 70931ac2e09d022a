//! Stat totals from decoded effects, and applying them to a monster's base stats.

use serde::{Deserialize, Serialize};

use crate::data::profile::RuneEntry;
use crate::runes::effect::{decode, Effect, StatKind};

/// Per-kind sums of qualifying effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTotals {
    pub hp_flat: i64,
    pub hp_pct: i64,
    pub atk_flat: i64,
    pub atk_pct: i64,
    pub def_flat: i64,
    pub def_pct: i64,
    pub speed: i64,
    pub crit_rate: i64,
    pub crit_dmg: i64,
    pub resistance: i64,
    pub accuracy: i64,
}

impl StatTotals {
    pub fn add(&mut self, effect: Effect) {
        let slot = match effect.kind {
            StatKind::HpFlat => &mut self.hp_flat,
            StatKind::HpPct => &mut self.hp_pct,
            StatKind::AtkFlat => &mut self.atk_flat,
            StatKind::AtkPct => &mut self.atk_pct,
            StatKind::DefFlat => &mut self.def_flat,
            StatKind::DefPct => &mut self.def_pct,
            StatKind::Speed => &mut self.speed,
            StatKind::CritRate => &mut self.crit_rate,
            StatKind::CritDmg => &mut self.crit_dmg,
            StatKind::Resistance => &mut self.resistance,
            StatKind::Accuracy => &mut self.accuracy,
        };
        *slot = slot.saturating_add(effect.amount);
    }

    pub fn add_many<I>(&mut self, effects: I)
    where
        I: IntoIterator<Item = Effect>,
    {
        for effect in effects {
            self.add(effect);
        }
    }

    /// Innate + substat totals for one rune; the main stat is left out.
    pub fn without_main(rune: &RuneEntry) -> Self {
        let mut totals = Self::default();
        totals.add_many(bonus_effects(rune));
        totals
    }
}

fn bonus_effects(rune: &RuneEntry) -> impl Iterator<Item = Effect> + '_ {
    decode(rune.innate_effect.as_ref())
        .into_iter()
        .chain(rune.substats.iter().filter_map(|sub| decode(sub.as_ref())))
}

/// Sum every qualifying effect (main, innate, substats) across the given runes.
pub fn aggregate<'a, I>(runes: I) -> StatTotals
where
    I: IntoIterator<Item = &'a RuneEntry>,
{
    let mut totals = StatTotals::default();
    for rune in runes {
        totals.add_many(decode(rune.main_effect.as_ref()));
        totals.add_many(bonus_effects(rune));
    }
    totals
}

/// Monster stat block, used for both base and with-runes values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i64,
    pub atk: i64,
    pub def: i64,
    pub spd: i64,
    pub crit_rate: i64,
    pub crit_dmg: i64,
    pub resistance: i64,
    pub accuracy: i64,
}

/// Percent bonuses scale the unmodified base (truncated toward zero); flat
/// bonuses add on top. Stats without a percent variant add directly. Sums
/// saturate, so absurd amounts from a malformed export clamp instead of overflowing.
pub fn apply(base: &BaseStats, totals: &StatTotals) -> BaseStats {
    let scaled = |stat: i64, flat: i64, pct: i64| {
        stat.saturating_add(flat)
            .saturating_add(stat.saturating_mul(pct) / 100)
    };
    BaseStats {
        hp: scaled(base.hp, totals.hp_flat, totals.hp_pct),
        atk: scaled(base.atk, totals.atk_flat, totals.atk_pct),
        def: scaled(base.def, totals.def_flat, totals.def_pct),
        spd: base.spd.saturating_add(totals.speed),
        crit_rate: base.crit_rate.saturating_add(totals.crit_rate),
        crit_dmg: base.crit_dmg.saturating_add(totals.crit_dmg),
        resistance: base.resistance.saturating_add(totals.resistance),
        accuracy: base.accuracy.saturating_add(totals.accuracy),
    }
}
