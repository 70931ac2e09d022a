pub mod effect;
pub mod ownership;
pub mod records;
pub mod score;
pub mod sets;
pub mod stats;

pub use effect::{decode, format_effect, format_substats, Effect, StatKind};
pub use ownership::{resolve_ownership, OwnershipMap, OwnershipSource};
pub use records::{build_rune_records, RuneRecord};
pub use score::{score, score_totals};
pub use sets::{count_set_bonuses, SetBonus, SetSummary};
pub use stats::{aggregate, apply, BaseStats, StatTotals};
