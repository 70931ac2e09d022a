//! Rune → owner reconciliation across the three views an export carries.
//!
//! Sources, highest precedence first:
//! 1. each unit's embedded rune list;
//! 2. `equip_info_list` triples with `occupied_type == 1`;
//! 3. the top-level rune's own `occupied_id` / `occupied_type`.
//!
//! An id, once mapped, is never overwritten by a later entry of the same or a
//! lower-precedence source.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::data::profile::{Profile, OCCUPIED_BY_UNIT};

pub type OwnershipMap = HashMap<u64, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipSource {
    UnitRuneList,
    EquipInfo,
    RuneOccupancy,
}

pub fn resolve_ownership(profile: &Profile) -> OwnershipMap {
    let mut owners = OwnershipMap::new();

    for unit in &profile.units {
        for embedded in &unit.embedded_runes {
            claim(&mut owners, embedded.rune_id(), unit.unit_id, OwnershipSource::UnitRuneList);
        }
    }

    for entry in &profile.equip {
        if entry.occupied_type == OCCUPIED_BY_UNIT {
            claim(&mut owners, entry.rune_id, entry.occupied_id, OwnershipSource::EquipInfo);
        }
    }

    for rune in &profile.runes {
        if rune.occupied_id != 0 && rune.occupied_type == OCCUPIED_BY_UNIT {
            claim(&mut owners, rune.rune_id, rune.occupied_id, OwnershipSource::RuneOccupancy);
        }
    }

    owners
}

fn claim(owners: &mut OwnershipMap, rune_id: u64, unit_id: u64, source: OwnershipSource) {
    if rune_id == 0 || unit_id == 0 {
        return;
    }
    match owners.entry(rune_id) {
        Entry::Vacant(slot) => {
            slot.insert(unit_id);
        }
        Entry::Occupied(existing) => {
            if *existing.get() != unit_id {
                debug!(
                    rune_id,
                    kept = *existing.get(),
                    ignored = unit_id,
                    ?source,
                    "conflicting rune owner ignored"
                );
            }
        }
    }
}
