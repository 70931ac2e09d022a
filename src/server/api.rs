use std::sync::PoisonError;

use serde::Serialize;

use crate::catalog::{CatalogSource, MonsterPair};
use crate::roster::MonsterRecord;
use crate::runes::RuneRecord;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct MonsterDetail<'a> {
    pub monster: &'a MonsterRecord,
    pub runes: Vec<&'a RuneRecord>,
    pub pair: MonsterPair,
    pub image_url: Option<String>,
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "runeview-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn wizard_payload<S>(state: &AppState<S>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&state.snapshot.wizard)
}

pub fn runes_payload<S>(state: &AppState<S>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&state.snapshot.runes)
}

pub fn monsters_payload<S>(state: &AppState<S>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&state.snapshot.monsters)
}

/// None when the unit is not in the snapshot. The pair and portrait are
/// resolved on demand, so this may hit the catalog.
pub fn monster_detail_payload<S: CatalogSource>(
    state: &AppState<S>,
    unit_id: u64,
) -> Option<Result<String, serde_json::Error>> {
    let monster = state.snapshot.monster(unit_id)?;
    let (pair, image_url) = {
        let mut resolver = state.resolver.lock().unwrap_or_else(PoisonError::into_inner);
        let pair = match &monster.pair {
            Some(pair) => pair.clone(),
            None => resolver.resolve_pair(monster.catalog_id),
        };
        (pair, resolver.image_url(monster.catalog_id))
    };
    let detail = MonsterDetail {
        monster,
        runes: state.snapshot.runes_of(unit_id),
        pair,
        image_url,
    };
    Some(serde_json::to_string_pretty(&detail))
}
