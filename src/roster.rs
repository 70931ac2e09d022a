//! Monster roster: joins units with their owned runes and catalog records into
//! the read-only snapshot handed to the CLI and the HTTP API.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::catalog::{bestiary_url, CatalogRecord, CatalogResolver, CatalogSource, MonsterPair};
use crate::data::profile::{Profile, UnitEntry, WizardInfo};
use crate::runes::{aggregate, apply, build_rune_records, count_set_bonuses, BaseStats, RuneRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Also resolve the base/awakened pair for every monster (may hit the network twice per id).
    pub resolve_pairs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonsterRecord {
    pub unit_id: u64,
    pub catalog_id: u32,
    pub name: String,
    pub star_grade: u8,
    pub level: u8,
    pub base: BaseStats,
    pub with_runes: BaseStats,
    pub rune_count: usize,
    pub rune_ids: Vec<u64>,
    /// Set names of every owned rune, sorted, one entry per rune.
    pub sets: String,
    pub set_bonus_counts: BTreeMap<u32, u32>,
    pub set_label: String,
    pub set_icons: Vec<String>,
    pub image_url: Option<String>,
    pub bestiary_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<MonsterPair>,
}

impl MonsterRecord {
    fn build(unit: &UnitEntry, catalog: &CatalogRecord, owned: &[&RuneRecord]) -> Self {
        let totals = aggregate(owned.iter().map(|rune| &rune.raw));
        let summary = count_set_bonuses(owned.iter().map(|rune| rune.set_id));

        let mut set_names: Vec<&str> = owned.iter().map(|rune| rune.set_name.as_str()).collect();
        set_names.sort_unstable();

        Self {
            unit_id: unit.unit_id,
            catalog_id: unit.catalog_id,
            name: catalog.name.clone(),
            star_grade: unit.star_grade,
            level: unit.level,
            base: catalog.base_stats,
            with_runes: apply(&catalog.base_stats, &totals),
            rune_count: owned.len(),
            rune_ids: owned.iter().map(|rune| rune.rune_id).collect(),
            sets: set_names.join(", "),
            set_label: summary.label(),
            set_icons: summary
                .bonuses
                .iter()
                .filter_map(|bonus| bonus.icon.clone())
                .collect(),
            set_bonus_counts: summary.counts,
            image_url: catalog.image_url.clone(),
            bestiary_url: bestiary_url(unit.catalog_id, Some(&catalog.name)),
            pair: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileSnapshot {
    pub wizard: Option<WizardInfo>,
    pub runes: Vec<RuneRecord>,
    pub monsters: Vec<MonsterRecord>,
}

impl ProfileSnapshot {
    pub fn monster(&self, unit_id: u64) -> Option<&MonsterRecord> {
        self.monsters.iter().find(|monster| monster.unit_id == unit_id)
    }

    /// Runes worn by `unit_id`, by slot then best score first.
    pub fn runes_of(&self, unit_id: u64) -> Vec<&RuneRecord> {
        let mut runes: Vec<&RuneRecord> = self
            .runes
            .iter()
            .filter(|rune| unit_id != 0 && rune.owner_unit_id == unit_id)
            .collect();
        runes.sort_by(|a, b| {
            a.slot
                .unwrap_or(u8::MAX)
                .cmp(&b.slot.unwrap_or(u8::MAX))
                .then_with(|| b.score.total_cmp(&a.score))
        });
        runes
    }
}

/// Build rune and monster records for one profile. Catalog ids are resolved as
/// one batch; a failed lookup leaves that monster with placeholder catalog data.
pub fn build_snapshot<S: CatalogSource>(
    profile: &Profile,
    resolver: &mut CatalogResolver<S>,
    options: SnapshotOptions,
) -> ProfileSnapshot {
    let runes = build_rune_records(profile);

    let mut by_owner: HashMap<u64, Vec<&RuneRecord>> = HashMap::new();
    for rune in runes.iter().filter(|rune| rune.owner_unit_id != 0) {
        by_owner.entry(rune.owner_unit_id).or_default().push(rune);
    }

    let catalog = resolver.resolve_many(profile.units.iter().map(|unit| unit.catalog_id));

    let mut monsters: Vec<MonsterRecord> = profile
        .units
        .iter()
        .map(|unit| {
            let record = catalog
                .get(&unit.catalog_id)
                .cloned()
                .unwrap_or_else(|| CatalogRecord::placeholder(unit.catalog_id));
            let owned = by_owner.get(&unit.unit_id).map(Vec::as_slice).unwrap_or(&[]);
            MonsterRecord::build(unit, &record, owned)
        })
        .collect();

    if options.resolve_pairs {
        for monster in monsters.iter_mut().filter(|m| m.catalog_id != 0) {
            monster.pair = Some(resolver.resolve_pair(monster.catalog_id));
        }
    }

    monsters.sort_by_key(|m| (Reverse(m.star_grade), Reverse(m.level), Reverse(m.base.spd)));

    ProfileSnapshot {
        wizard: profile.wizard.clone(),
        runes,
        monsters,
    }
}
