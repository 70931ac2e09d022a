//! Remote monster catalog (SWARFARM API v2). Lookups are blocking with a
//! bounded timeout and are never retried; callers degrade on any error.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::record::{portrait_url, CatalogEntry, EvolutionLinks, MonsterForm};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog returned HTTP {0}")]
    Status(u16),
    #[error("catalog payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog has no monster with id {0}")]
    NotFound(u32),
}

/// Monster as returned by the catalog. Only the fields this crate reads are modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteMonster {
    #[serde(default)]
    pub com2us_id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "image_file_name")]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub max_lvl_hp: Option<i64>,
    #[serde(default)]
    pub max_lvl_attack: Option<i64>,
    #[serde(default)]
    pub max_lvl_defense: Option<i64>,
    #[serde(default)]
    pub speed: Option<i64>,
    #[serde(default)]
    pub crit_rate: Option<i64>,
    #[serde(default)]
    pub crit_damage: Option<i64>,
    #[serde(default)]
    pub resistance: Option<i64>,
    #[serde(default)]
    pub accuracy: Option<i64>,
    #[serde(default)]
    pub awakens_from: Option<u32>,
    #[serde(default)]
    pub awakens_to: Option<u32>,
}

impl RemoteMonster {
    pub fn image_url(&self) -> Option<String> {
        self.image_filename.as_deref().and_then(portrait_url)
    }

    /// Cache entry for a successful lookup; missing stats become 0, a missing
    /// name becomes the placeholder name for `catalog_id`. A missing portrait is
    /// left unset so a cached one survives the merge.
    pub fn to_entry(&self, catalog_id: u32) -> CatalogEntry {
        CatalogEntry {
            name: Some(
                self.name
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| crate::catalog::record::placeholder_name(catalog_id)),
            ),
            hp: Some(self.max_lvl_hp.unwrap_or(0)),
            atk: Some(self.max_lvl_attack.unwrap_or(0)),
            def: Some(self.max_lvl_defense.unwrap_or(0)),
            spd: Some(self.speed.unwrap_or(0)),
            crit_rate: Some(self.crit_rate.unwrap_or(0)),
            crit_dmg: Some(self.crit_damage.unwrap_or(0)),
            resistance: Some(self.resistance.unwrap_or(0)),
            accuracy: Some(self.accuracy.unwrap_or(0)),
            image_url: self.image_url(),
            evolution: Some(EvolutionLinks {
                awakens_from: self.awakens_from,
                awakens_to: self.awakens_to,
            }),
            ..CatalogEntry::default()
        }
    }

    pub fn to_form(&self) -> MonsterForm {
        MonsterForm {
            name: self
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "ID:?".to_string()),
            com2us_id: self.com2us_id.unwrap_or(0),
            image_url: self.image_url().unwrap_or_default(),
        }
    }
}

/// Read-only lookup seam over the catalog service.
pub trait CatalogSource {
    /// Lookup by the stable cross-account id (`unit_master_id` in exports).
    fn fetch_by_catalog_id(&self, catalog_id: u32) -> Result<RemoteMonster, CatalogError>;

    /// Lookup by the catalog's internal id, as used by evolution links.
    fn fetch_by_internal_id(&self, internal_id: u32) -> Result<RemoteMonster, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct MonsterPage {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    results: Vec<RemoteMonster>,
}

#[derive(Debug, Clone)]
pub struct SwarfarmClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl SwarfarmClient {
    /// `base_url` is the monsters list endpoint, e.g. `https://swarfarm.com/api/v2/monsters/`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("runeview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { base_url, client })
    }

    fn get_json(&self, url: &str) -> Result<String, CatalogError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

impl CatalogSource for SwarfarmClient {
    fn fetch_by_catalog_id(&self, catalog_id: u32) -> Result<RemoteMonster, CatalogError> {
        let body = self.get_json(&format!("{}?com2us_id={catalog_id}", self.base_url))?;
        first_result(&body, catalog_id)
    }

    fn fetch_by_internal_id(&self, internal_id: u32) -> Result<RemoteMonster, CatalogError> {
        let body = self.get_json(&format!("{}{internal_id}/", self.base_url))?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn first_result(body: &str, catalog_id: u32) -> Result<RemoteMonster, CatalogError> {
    let page: MonsterPage = serde_json::from_str(body)?;
    if page.count == 0 {
        return Err(CatalogError::NotFound(catalog_id));
    }
    page.results
        .into_iter()
        .next()
        .ok_or(CatalogError::NotFound(catalog_id))
}
