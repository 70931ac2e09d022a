//! CSV export of the rune and monster record sets.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::roster::MonsterRecord;
use crate::runes::RuneRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Serialize)]
struct RuneRow<'a> {
    rune_id: u64,
    slot: Option<u8>,
    set: &'a str,
    grade: u8,
    level: u8,
    main: &'a str,
    innate: &'a str,
    subs: &'a str,
    score: f64,
    owner_unit_id: u64,
    equipped: bool,
}

#[derive(Serialize)]
struct MonsterRow<'a> {
    unit_id: u64,
    catalog_id: u32,
    name: &'a str,
    stars: u8,
    level: u8,
    hp: i64,
    atk: i64,
    def: i64,
    spd: i64,
    crit_rate: i64,
    crit_dmg: i64,
    resistance: i64,
    accuracy: i64,
    hp_with_runes: i64,
    atk_with_runes: i64,
    def_with_runes: i64,
    spd_with_runes: i64,
    crit_rate_with_runes: i64,
    crit_dmg_with_runes: i64,
    resistance_with_runes: i64,
    accuracy_with_runes: i64,
    runes: usize,
    sets: &'a str,
    set_bonuses: &'a str,
}

pub fn write_runes_csv<W: Write>(writer: W, runes: &[RuneRecord]) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    for rune in runes {
        out.serialize(RuneRow {
            rune_id: rune.rune_id,
            slot: rune.slot,
            set: &rune.set_name,
            grade: rune.grade,
            level: rune.level,
            main: &rune.main,
            innate: &rune.innate,
            subs: &rune.subs,
            score: rune.score,
            owner_unit_id: rune.owner_unit_id,
            equipped: rune.equipped,
        })?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_monsters_csv<W: Write>(
    writer: W,
    monsters: &[MonsterRecord],
) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    for m in monsters {
        out.serialize(MonsterRow {
            unit_id: m.unit_id,
            catalog_id: m.catalog_id,
            name: &m.name,
            stars: m.star_grade,
            level: m.level,
            hp: m.base.hp,
            atk: m.base.atk,
            def: m.base.def,
            spd: m.base.spd,
            crit_rate: m.base.crit_rate,
            crit_dmg: m.base.crit_dmg,
            resistance: m.base.resistance,
            accuracy: m.base.accuracy,
            hp_with_runes: m.with_runes.hp,
            atk_with_runes: m.with_runes.atk,
            def_with_runes: m.with_runes.def,
            spd_with_runes: m.with_runes.spd,
            crit_rate_with_runes: m.with_runes.crit_rate,
            crit_dmg_with_runes: m.with_runes.crit_dmg,
            resistance_with_runes: m.with_runes.resistance,
            accuracy_with_runes: m.with_runes.accuracy,
            runes: m.rune_count,
            sets: &m.sets,
            set_bonuses: &m.set_label,
        })?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn export_runes_csv(path: &Path, runes: &[RuneRecord]) -> Result<(), ExportError> {
    write_runes_csv(create(path)?, runes)
}

pub fn export_monsters_csv(path: &Path, monsters: &[MonsterRecord]) -> Result<(), ExportError> {
    write_monsters_csv(create(path)?, monsters)
}

fn create(path: &Path) -> Result<File, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
