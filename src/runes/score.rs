//! Rune quality score from innate + substat rolls.
//!
//! Each denominator is the plausible maximum roll sum for its category on a
//! top-grade rune, so a maximal rune lands near 100. They are fixed: changing
//! one changes what every stored score means.

use crate::data::profile::RuneEntry;
use crate::runes::stats::StatTotals;

pub const PCT_DENOMINATOR: f64 = 40.0;
pub const SPEED_DENOMINATOR: f64 = 30.0;
pub const CRIT_DMG_DENOMINATOR: f64 = 35.0;
pub const HP_FLAT_DENOMINATOR: f64 = 1875.0;
pub const ATK_DEF_FLAT_DENOMINATOR: f64 = 100.0;
pub const FLAT_WEIGHT: f64 = 0.35;

/// Score one rune. The main stat never contributes.
pub fn score(rune: &RuneEntry) -> f64 {
    score_totals(&StatTotals::without_main(rune))
}

/// Score from pre-summed innate + substat totals, rounded to one decimal.
pub fn score_totals(s: &StatTotals) -> f64 {
    let pct = (s.hp_pct + s.atk_pct + s.def_pct + s.accuracy + s.resistance) as f64 / PCT_DENOMINATOR;
    let speed = (s.speed + s.crit_rate) as f64 / SPEED_DENOMINATOR;
    let crit_dmg = s.crit_dmg as f64 / CRIT_DMG_DENOMINATOR;
    let flat = FLAT_WEIGHT
        * (s.hp_flat as f64 / HP_FLAT_DENOMINATOR
            + (s.atk_flat + s.def_flat) as f64 / ATK_DEF_FLAT_DENOMINATOR);
    round_one_decimal(100.0 * (pct + speed + crit_dmg + flat))
}

/// Rounds the exact binary value once (formatting is correctly rounded), so
/// 17.45, stored just below the tie, becomes 17.4.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use crate::data::profile::RawEffect;

    use super::*;

    fn sample_rune(main: RawEffect) -> RuneEntry {
        RuneEntry {
            rune_id: 7,
            main_effect: Some(main),
            innate_effect: Some(RawEffect::new(2, 4)),
            substats: vec![
                Some(RawEffect::new(4, 5)),
                Some(RawEffect::new(8, 6)),
                Some(RawEffect::new(10, 10)),
                Some(RawEffect::new(0, 0)),
                Some(RawEffect::new(0, 0)),
            ],
            ..RuneEntry::default()
        }
    }

    #[test]
    fn worked_example_scores_71_1() {
        assert_eq!(score(&sample_rune(RawEffect::new(8, 42))), 71.1);
    }

    #[test]
    fn main_stat_does_not_affect_score() {
        let a = score(&sample_rune(RawEffect::new(8, 42)));
        let b = score(&sample_rune(RawEffect::new(1, 2448)));
        let c = score(&sample_rune(RawEffect::new(0, 0)));
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn flat_rolls_are_weighted() {
        let totals = StatTotals {
            hp_flat: 375,
            atk_flat: 20,
            def_flat: 10,
            ..StatTotals::default()
        };
        // 0.35 * (0.2 + 0.3) = 0.175
        assert_eq!(score_totals(&totals), 17.5);
    }

    #[test]
    fn near_ties_round_on_the_stored_value() {
        let rune = RuneEntry {
            innate_effect: Some(RawEffect::new(2, 6)),
            substats: vec![Some(RawEffect::new(5, 7))],
            ..RuneEntry::default()
        };
        // 100 * (6 / 40 + 0.35 * 7 / 100) = 17.45
        assert_eq!(score(&rune), 17.4);
        assert_eq!(round_one_decimal(7.35), 7.3);
        assert_eq!(round_one_decimal(71.07), 71.1);
    }

    #[test]
    fn empty_rune_scores_zero() {
        assert_eq!(score(&RuneEntry::default()), 0.0);
    }
}
