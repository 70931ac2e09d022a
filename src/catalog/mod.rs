pub mod cache;
pub mod record;
pub mod remote;
pub mod resolver;

pub use cache::{CacheError, CatalogCache};
pub use record::{
    bestiary_url, portrait_url, CatalogEntry, CatalogRecord, EvolutionLinks, MonsterForm,
    MonsterPair,
};
pub use remote::{CatalogError, CatalogSource, RemoteMonster, SwarfarmClient};
pub use resolver::CatalogResolver;
