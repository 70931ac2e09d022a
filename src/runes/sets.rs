//! Completed set bonuses carried by one monster's runes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::sets::{required_pieces_for, set_icon, set_name};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetBonus {
    pub set_id: u32,
    pub name: String,
    pub completed: u32,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetSummary {
    /// set_id → completed bonus count; sets with no completed bonus are absent.
    pub counts: BTreeMap<u32, u32>,
    /// Completed sets ordered by name (case-insensitive), for labels and icons.
    pub bonuses: Vec<SetBonus>,
}

impl SetSummary {
    /// `"Swift | Violent×2"`: one entry per completed set, count shown when above one.
    pub fn label(&self) -> String {
        self.bonuses
            .iter()
            .map(|bonus| {
                if bonus.completed > 1 {
                    format!("{}×{}", bonus.name, bonus.completed)
                } else {
                    bonus.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Group set ids and count `floor(pieces / required)` complete bonuses per set.
pub fn count_set_bonuses<I>(set_ids: I) -> SetSummary
where
    I: IntoIterator<Item = u32>,
{
    let mut pieces: BTreeMap<u32, u32> = BTreeMap::new();
    for set_id in set_ids {
        *pieces.entry(set_id).or_default() += 1;
    }

    let mut counts = BTreeMap::new();
    let mut bonuses = Vec::new();
    for (set_id, count) in pieces {
        let completed = count / required_pieces_for(set_id);
        if completed == 0 {
            continue;
        }
        counts.insert(set_id, completed);
        bonuses.push(SetBonus {
            set_id,
            name: set_name(set_id),
            completed,
            icon: set_icon(set_id),
        });
    }
    bonuses.sort_by_key(|bonus| bonus.name.to_lowercase());

    SetSummary { counts, bonuses }
}
