//! Cache-first catalog resolution with placeholder degradation and
//! base/awakened pair lookup.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::catalog::cache::CatalogCache;
use crate::catalog::record::{CatalogEntry, CatalogRecord, MonsterForm, MonsterPair};
use crate::catalog::remote::CatalogSource;

/// Owns the cache for a session. Call [CatalogResolver::flush] (or use the
/// batch methods, which flush themselves) before dropping it.
pub struct CatalogResolver<S> {
    cache: CatalogCache,
    source: S,
    remote_calls: usize,
}

impl<S: CatalogSource> CatalogResolver<S> {
    pub fn new(cache: CatalogCache, source: S) -> Self {
        Self {
            cache,
            source,
            remote_calls: 0,
        }
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Remote lookups issued by this resolver so far.
    pub fn remote_calls(&self) -> usize {
        self.remote_calls
    }

    /// Cache hit returns immediately. On a miss the remote is asked once; a
    /// failure caches a placeholder so the id is not looked up again.
    pub fn resolve(&mut self, catalog_id: u32) -> CatalogRecord {
        if catalog_id == 0 {
            return CatalogRecord::placeholder(0);
        }
        if let Some(entry) = self.cache.get(catalog_id).filter(|e| e.is_resolved()) {
            return entry.to_record(catalog_id);
        }

        self.remote_calls += 1;
        let partial = match self.source.fetch_by_catalog_id(catalog_id) {
            Ok(monster) => {
                debug!(catalog_id, name = ?monster.name, "catalog lookup succeeded");
                monster.to_entry(catalog_id)
            }
            Err(err) => {
                warn!(catalog_id, "catalog lookup failed, caching placeholder: {err}");
                // only fields the cache does not already know take placeholder values
                let mut placeholder = CatalogEntry::placeholder(catalog_id);
                if let Some(existing) = self.cache.get(catalog_id) {
                    placeholder.merge(existing.clone());
                }
                placeholder
            }
        };
        self.cache.put_merge(catalog_id, partial);
        self.cache
            .record(catalog_id)
            .unwrap_or_else(|| CatalogRecord::placeholder(catalog_id))
    }

    /// Resolve a batch of ids (duplicates and zeros collapsed), then flush once.
    pub fn resolve_many<I>(&mut self, catalog_ids: I) -> HashMap<u32, CatalogRecord>
    where
        I: IntoIterator<Item = u32>,
    {
        let ids: BTreeSet<u32> = catalog_ids.into_iter().filter(|&id| id != 0).collect();
        let records = ids
            .into_iter()
            .map(|id| (id, self.resolve(id)))
            .collect();
        self.flush();
        records
    }

    /// Base and awakened forms for `catalog_id`, following at most one evolution
    /// link. The pair is cached against `catalog_id`.
    pub fn resolve_pair(&mut self, catalog_id: u32) -> MonsterPair {
        if catalog_id == 0 {
            return MonsterPair {
                base: CatalogRecord::placeholder(0).form(),
                awakened: None,
            };
        }
        if let Some(pair) = self.cache.get(catalog_id).and_then(|e| e.pair.clone()) {
            return pair;
        }

        let mut current = self.resolve(catalog_id);
        let links_known = self
            .cache
            .get(catalog_id)
            .map_or(true, |entry| entry.evolution.is_some());
        if !links_known {
            // Entry predates link tracking; one lookup fills in the links.
            self.remote_calls += 1;
            match self.source.fetch_by_catalog_id(catalog_id) {
                Ok(monster) => {
                    self.cache.put_merge(catalog_id, monster.to_entry(catalog_id));
                    if let Some(record) = self.cache.record(catalog_id) {
                        current = record;
                    }
                }
                Err(err) => warn!(catalog_id, "evolution link lookup failed: {err}"),
            }
        }

        let current_form = current.form();
        let pair = if let Some(base_id) = current.awakens_from {
            MonsterPair {
                base: self.linked_form(base_id),
                awakened: Some(current_form),
            }
        } else if let Some(awakened_id) = current.awakens_to {
            MonsterPair {
                base: current_form,
                awakened: Some(self.linked_form(awakened_id)),
            }
        } else {
            MonsterPair {
                base: current_form,
                awakened: None,
            }
        };

        self.cache.put_merge(
            catalog_id,
            CatalogEntry {
                pair: Some(pair.clone()),
                ..CatalogEntry::default()
            },
        );
        self.flush();
        pair
    }

    /// Portrait URL for `catalog_id`. Entries cached without one get a single
    /// lookup whose result (possibly "no portrait") is merged in.
    pub fn image_url(&mut self, catalog_id: u32) -> Option<String> {
        let record = self.resolve(catalog_id);
        let known = self
            .cache
            .get(catalog_id)
            .map_or(true, |entry| entry.image_url.is_some());
        if known || catalog_id == 0 {
            self.flush();
            return record.image_url;
        }

        self.remote_calls += 1;
        let image_url = match self.source.fetch_by_catalog_id(catalog_id) {
            Ok(monster) => monster.image_url(),
            Err(err) => {
                warn!(catalog_id, "portrait lookup failed: {err}");
                None
            }
        };
        self.cache.put_merge(
            catalog_id,
            CatalogEntry {
                image_url: Some(image_url.clone().unwrap_or_default()),
                ..CatalogEntry::default()
            },
        );
        self.flush();
        image_url
    }

    /// Persist pending changes. A write failure is logged and the run continues.
    pub fn flush(&mut self) {
        if let Err(err) = self.cache.flush() {
            warn!("catalog cache not persisted: {err}");
        }
    }

    fn linked_form(&mut self, internal_id: u32) -> MonsterForm {
        self.remote_calls += 1;
        match self.source.fetch_by_internal_id(internal_id) {
            Ok(monster) => {
                if let Some(linked_id) = monster.com2us_id.filter(|&id| id != 0) {
                    self.cache.put_merge(linked_id, monster.to_entry(linked_id));
                }
                monster.to_form()
            }
            Err(err) => {
                warn!(internal_id, "linked form lookup failed: {err}");
                MonsterForm::unresolved()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::catalog::record::EvolutionLinks;
    use crate::catalog::remote::{CatalogError, RemoteMonster};

    use super::*;

    #[derive(Default)]
    struct StubSource {
        by_catalog: HashMap<u32, RemoteMonster>,
        by_internal: HashMap<u32, RemoteMonster>,
        calls: RefCell<Vec<String>>,
    }

    impl CatalogSource for StubSource {
        fn fetch_by_catalog_id(&self, catalog_id: u32) -> Result<RemoteMonster, CatalogError> {
            self.calls.borrow_mut().push(format!("c{catalog_id}"));
            self.by_catalog
                .get(&catalog_id)
                .cloned()
                .ok_or(CatalogError::Status(503))
        }

        fn fetch_by_internal_id(&self, internal_id: u32) -> Result<RemoteMonster, CatalogError> {
            self.calls.borrow_mut().push(format!("i{internal_id}"));
            self.by_internal
                .get(&internal_id)
                .cloned()
                .ok_or(CatalogError::NotFound(internal_id))
        }
    }

    fn monster(com2us_id: u32, name: &str) -> RemoteMonster {
        RemoteMonster {
            com2us_id: Some(com2us_id),
            name: Some(name.to_string()),
            max_lvl_hp: Some(10_000),
            speed: Some(100),
            ..RemoteMonster::default()
        }
    }

    #[test]
    fn cache_hit_skips_the_remote() {
        let mut cache = CatalogCache::in_memory();
        cache.put_merge(
            5,
            CatalogEntry {
                name: Some("Bernard".into()),
                spd: Some(111),
                ..CatalogEntry::default()
            },
        );
        let mut resolver = CatalogResolver::new(cache, StubSource::default());
        let record = resolver.resolve(5);
        assert_eq!(record.name, "Bernard");
        assert_eq!(record.base_stats.spd, 111);
        assert_eq!(resolver.remote_calls(), 0);
    }

    #[test]
    fn zero_id_never_hits_the_remote() {
        let mut resolver = CatalogResolver::new(CatalogCache::in_memory(), StubSource::default());
        assert_eq!(resolver.resolve(0).name, "ID:0");
        assert!(resolver.resolve_many([0, 0]).is_empty());
        assert_eq!(resolver.remote_calls(), 0);
    }

    #[test]
    fn resolve_many_dedupes_ids() {
        let mut source = StubSource::default();
        source.by_catalog.insert(1, monster(1, "A"));
        source.by_catalog.insert(2, monster(2, "B"));
        let mut resolver = CatalogResolver::new(CatalogCache::in_memory(), source);
        let records = resolver.resolve_many([2, 1, 2, 1, 0]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[&1].name, "A");
        assert_eq!(resolver.source().calls.borrow().as_slice(), ["c1", "c2"]);
    }

    #[test]
    fn pair_for_base_form_follows_awakens_to() {
        let mut source = StubSource::default();
        source.by_catalog.insert(
            13103,
            RemoteMonster {
                awakens_to: Some(600),
                ..monster(13103, "Ifrit")
            },
        );
        source.by_internal.insert(600, monster(13203, "Veromos"));
        let mut resolver = CatalogResolver::new(CatalogCache::in_memory(), source);

        let pair = resolver.resolve_pair(13103);
        assert_eq!(pair.base.name, "Ifrit");
        assert_eq!(pair.awakened.as_ref().map(|f| f.com2us_id), Some(13203));
        assert_eq!(resolver.cache().get(13203).and_then(|e| e.name.as_deref()), Some("Veromos"));

        let calls_before = resolver.remote_calls();
        assert_eq!(resolver.resolve_pair(13103), pair);
        assert_eq!(resolver.remote_calls(), calls_before);
    }

    #[test]
    fn failed_lookup_keeps_fields_already_cached() {
        let mut cache = CatalogCache::in_memory();
        cache.put_merge(
            14314,
            CatalogEntry {
                image_url: Some("https://img/lushen.png".into()),
                evolution: Some(EvolutionLinks { awakens_from: Some(1039), awakens_to: None }),
                ..CatalogEntry::default()
            },
        );
        let mut resolver = CatalogResolver::new(cache, StubSource::default());

        let record = resolver.resolve(14314);
        assert_eq!(record.name, "ID:14314");
        assert_eq!(record.base_stats.hp, 0);
        assert_eq!(record.image_url.as_deref(), Some("https://img/lushen.png"));
        assert_eq!(record.awakens_from, Some(1039));
        let cached = resolver.cache().get(14314).unwrap();
        assert_eq!(cached.image_url.as_deref(), Some("https://img/lushen.png"));
    }

    #[test]
    fn success_without_portrait_keeps_cached_portrait() {
        let mut cache = CatalogCache::in_memory();
        cache.put_merge(
            9,
            CatalogEntry {
                image_url: Some("https://img/nine.png".into()),
                ..CatalogEntry::default()
            },
        );
        let mut source = StubSource::default();
        source.by_catalog.insert(9, monster(9, "Nine"));
        let mut resolver = CatalogResolver::new(cache, source);

        let record = resolver.resolve(9);
        assert_eq!(record.name, "Nine");
        assert_eq!(record.image_url.as_deref(), Some("https://img/nine.png"));
    }

    #[test]
    fn pair_for_unknown_id_zero_is_not_cached() {
        let mut resolver = CatalogResolver::new(CatalogCache::in_memory(), StubSource::default());
        let pair = resolver.resolve_pair(0);
        assert_eq!(pair.base.name, "ID:0");
        assert!(pair.awakened.is_none());
        assert!(resolver.cache().is_empty());
        assert_eq!(resolver.remote_calls(), 0);
    }

    #[test]
    fn pair_without_links_is_its_own_base() {
        let mut source = StubSource::default();
        source.by_catalog.insert(777, monster(777, "Rainbowmon"));
        let mut resolver = CatalogResolver::new(CatalogCache::in_memory(), source);
        let pair = resolver.resolve_pair(777);
        assert_eq!(pair.base.name, "Rainbowmon");
        assert!(pair.awakened.is_none());
    }

    #[test]
    fn image_url_backfills_legacy_entries_once() {
        let mut cache = CatalogCache::in_memory();
        cache.put_merge(
            9,
            CatalogEntry {
                name: Some("Legacy".into()),
                ..CatalogEntry::default()
            },
        );
        let mut source = StubSource::default();
        source.by_catalog.insert(
            9,
            RemoteMonster {
                image_filename: Some("nine.png".into()),
                ..monster(9, "Renamed")
            },
        );
        let mut resolver = CatalogResolver::new(cache, source);

        let url = resolver.image_url(9);
        assert_eq!(
            url.as_deref(),
            Some("https://swarfarm.com/static/herders/images/monsters/nine.png")
        );
        assert_eq!(resolver.image_url(9), url);
        assert_eq!(resolver.remote_calls(), 1);
        // only the portrait was merged; the cached name is untouched
        assert_eq!(resolver.resolve(9).name, "Legacy");
    }
}
