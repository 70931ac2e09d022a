//! Canonical rune record set: one record per rune id, scored and owned.

use std::collections::HashSet;

use serde::Serialize;

use crate::data::profile::{EmbeddedRune, Profile, RuneEntry};
use crate::data::sets::set_name;
use crate::runes::effect::{format_effect, format_substats};
use crate::runes::ownership::{resolve_ownership, OwnershipMap};
use crate::runes::score::score;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuneRecord {
    pub rune_id: u64,
    pub slot: Option<u8>,
    pub set_id: u32,
    pub set_name: String,
    pub grade: u8,
    pub level: u8,
    pub main: String,
    pub innate: String,
    pub subs: String,
    /// 0 when unowned.
    pub owner_unit_id: u64,
    pub equipped: bool,
    pub score: f64,
    #[serde(skip)]
    pub raw: RuneEntry,
}

impl RuneRecord {
    fn from_entry(entry: &RuneEntry, owners: &OwnershipMap) -> Self {
        let owner_unit_id = owners
            .get(&entry.rune_id)
            .copied()
            .unwrap_or(entry.occupied_id);
        Self {
            rune_id: entry.rune_id,
            slot: entry.slot,
            set_id: entry.set_id,
            set_name: set_name(entry.set_id),
            grade: entry.grade,
            level: entry.level,
            main: format_effect(entry.main_effect.as_ref()),
            innate: format_effect(entry.innate_effect.as_ref()),
            subs: format_substats(&entry.substats),
            owner_unit_id,
            equipped: owner_unit_id != 0,
            score: score(entry),
            raw: entry.clone(),
        }
    }
}

/// Deduplicate runes by id (top-level list first, then unit-embedded records,
/// first occurrence wins) and attach owner and score.
pub fn build_rune_records(profile: &Profile) -> Vec<RuneRecord> {
    let owners = resolve_ownership(profile);
    canonical_runes(profile)
        .into_iter()
        .map(|entry| RuneRecord::from_entry(entry, &owners))
        .collect()
}

fn canonical_runes(profile: &Profile) -> Vec<&RuneEntry> {
    let embedded = profile.units.iter().flat_map(|unit| {
        unit.embedded_runes.iter().filter_map(|item| match item {
            EmbeddedRune::Record(rune) => Some(rune),
            EmbeddedRune::Id(_) => None,
        })
    });

    let mut seen = HashSet::new();
    profile
        .runes
        .iter()
        .chain(embedded)
        .filter(|rune| seen.insert(rune.rune_id))
        .collect()
}
