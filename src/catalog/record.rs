//! Catalog data shapes: the persisted (partial, mergeable) entry, the resolved
//! record handed to callers, and the base/awakened pair.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::runes::stats::BaseStats;

pub const PORTRAIT_BASE_URL: &str = "https://swarfarm.com/static/herders/images/monsters/";
pub const BESTIARY_BASE_URL: &str = "https://swarfarm.com/bestiary/";

pub fn placeholder_name(catalog_id: u32) -> String {
    format!("ID:{catalog_id}")
}

/// Portrait URL for an image filename; None for an empty filename.
pub fn portrait_url(image_filename: &str) -> Option<String> {
    let filename = image_filename.trim();
    if filename.is_empty() {
        None
    } else {
        Some(format!("{PORTRAIT_BASE_URL}{filename}"))
    }
}

/// Bestiary pages live at `/bestiary/<id>-<slug>/`; without a name only the id form is possible.
pub fn bestiary_url(catalog_id: u32, name: Option<&str>) -> String {
    let slug = name.map(slugify).filter(|slug| !slug.is_empty());
    match slug {
        Some(slug) => format!("{BESTIARY_BASE_URL}{catalog_id}-{slug}/"),
        None => format!("{BESTIARY_BASE_URL}{catalog_id}/"),
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Evolution links as internal catalog ids (the remote's own primary keys).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awakens_from: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awakens_to: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterForm {
    pub name: String,
    /// 0 when the linked form could not be resolved.
    #[serde(default)]
    pub com2us_id: u32,
    #[serde(rename = "img", default)]
    pub image_url: String,
}

impl MonsterForm {
    pub fn unresolved() -> Self {
        Self {
            name: "ID:?".to_string(),
            com2us_id: 0,
            image_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterPair {
    pub base: MonsterForm,
    pub awakened: Option<MonsterForm>,
}

/// One cache entry. Every field is optional so partial lookups (just an image,
/// just a pair) can be merged without erasing what is already known. Keys not
/// modelled here are kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atk: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spd: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit_rate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit_dmg: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<i64>,
    /// Empty string records "looked up, no portrait".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// None means the links were never fetched (legacy entries).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution: Option<EvolutionLinks>,
    #[serde(default, rename = "pair_cached", skip_serializing_if = "Option::is_none")]
    pub pair: Option<MonsterPair>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    /// Record stored after a failed lookup: placeholder name, zero stats, no portrait, no links.
    pub fn placeholder(catalog_id: u32) -> Self {
        Self {
            name: Some(placeholder_name(catalog_id)),
            hp: Some(0),
            atk: Some(0),
            def: Some(0),
            spd: Some(0),
            crit_rate: Some(0),
            crit_dmg: Some(0),
            resistance: Some(0),
            accuracy: Some(0),
            image_url: Some(String::new()),
            evolution: Some(EvolutionLinks::default()),
            ..Self::default()
        }
    }

    /// Name and stats are known (possibly as a placeholder).
    pub fn is_resolved(&self) -> bool {
        self.name.is_some()
    }

    /// Copy every field `partial` knows into `self`; fields it leaves unset are kept.
    pub fn merge(&mut self, partial: CatalogEntry) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.name, partial.name);
        take(&mut self.hp, partial.hp);
        take(&mut self.atk, partial.atk);
        take(&mut self.def, partial.def);
        take(&mut self.spd, partial.spd);
        take(&mut self.crit_rate, partial.crit_rate);
        take(&mut self.crit_dmg, partial.crit_dmg);
        take(&mut self.resistance, partial.resistance);
        take(&mut self.accuracy, partial.accuracy);
        take(&mut self.image_url, partial.image_url);
        take(&mut self.evolution, partial.evolution);
        take(&mut self.pair, partial.pair);
        self.extra.extend(partial.extra);
    }

    pub fn base_stats(&self) -> BaseStats {
        BaseStats {
            hp: self.hp.unwrap_or(0),
            atk: self.atk.unwrap_or(0),
            def: self.def.unwrap_or(0),
            spd: self.spd.unwrap_or(0),
            crit_rate: self.crit_rate.unwrap_or(0),
            crit_dmg: self.crit_dmg.unwrap_or(0),
            resistance: self.resistance.unwrap_or(0),
            accuracy: self.accuracy.unwrap_or(0),
        }
    }

    pub fn to_record(&self, catalog_id: u32) -> CatalogRecord {
        let links = self.evolution.unwrap_or_default();
        CatalogRecord {
            catalog_id,
            name: self
                .name
                .clone()
                .unwrap_or_else(|| placeholder_name(catalog_id)),
            base_stats: self.base_stats(),
            image_url: self.image_url.clone().filter(|url| !url.is_empty()),
            awakens_from: links.awakens_from,
            awakens_to: links.awakens_to,
        }
    }
}

/// Resolved catalog view of one monster identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRecord {
    pub catalog_id: u32,
    pub name: String,
    pub base_stats: BaseStats,
    pub image_url: Option<String>,
    pub awakens_from: Option<u32>,
    pub awakens_to: Option<u32>,
}

impl CatalogRecord {
    pub fn placeholder(catalog_id: u32) -> Self {
        CatalogEntry::placeholder(catalog_id).to_record(catalog_id)
    }

    pub fn form(&self) -> MonsterForm {
        MonsterForm {
            name: self.name.clone(),
            com2us_id: self.catalog_id,
            image_url: self.image_url.clone().unwrap_or_default(),
        }
    }
}
