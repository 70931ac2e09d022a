//! Account export boundary: the raw profile JSON is normalized here, once, into
//! typed records. Legacy key aliases (`runes` / `runes_info`, the three equip
//! mapping names) are folded into one field each and malformed fragments are
//! dropped individually, so downstream code never touches untyped maps.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// `occupied_type` meaning "equipped on a unit" (as opposed to storage etc.).
pub const OCCUPIED_BY_UNIT: i64 = 1;

const RUNE_LIST_KEYS: [&str; 2] = ["runes", "runes_info"];
const EQUIP_LIST_KEYS: [&str; 3] = ["rune_equip_list", "runes_equip_list", "rune_equipped_list"];

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse profile JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("profile root must be a JSON object")]
    NotAnObject,
}

/// Raw `(type, amount, ...)` effect tuple with at least two numeric elements.
/// A `type_code` of 0 is the empty-slot sentinel; see [crate::runes::effect::decode].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEffect {
    pub type_code: i64,
    pub amount: i64,
}

impl RawEffect {
    pub fn new(type_code: i64, amount: i64) -> Self {
        Self { type_code, amount }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WizardInfo {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub level: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuneEntry {
    pub rune_id: u64,
    pub slot: Option<u8>,
    pub set_id: u32,
    pub grade: u8,
    pub level: u8,
    pub main_effect: Option<RawEffect>,
    pub innate_effect: Option<RawEffect>,
    pub substats: Vec<Option<RawEffect>>,
    /// Self-declared occupant, 0 when absent.
    pub occupied_id: u64,
    pub occupied_type: i64,
}

/// A unit's embedded rune list may carry full rune objects or bare ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedRune {
    Id(u64),
    Record(RuneEntry),
}

impl EmbeddedRune {
    pub fn rune_id(&self) -> u64 {
        match self {
            Self::Id(id) => *id,
            Self::Record(rune) => rune.rune_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitEntry {
    pub unit_id: u64,
    /// External catalog identity (`unit_master_id`), 0 when unknown.
    pub catalog_id: u32,
    pub star_grade: u8,
    pub level: u8,
    pub embedded_runes: Vec<EmbeddedRune>,
}

/// One `(rune_id, occupied_id, occupied_type)` triple from `equip_info_list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipEntry {
    pub rune_id: u64,
    pub occupied_id: u64,
    pub occupied_type: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub wizard: Option<WizardInfo>,
    pub units: Vec<UnitEntry>,
    /// Flat top-level rune list (`runes`, else `runes_info`).
    pub runes: Vec<RuneEntry>,
    pub equip: Vec<EquipEntry>,
}

impl Profile {
    pub fn from_value(root: &Value) -> Result<Self, ProfileError> {
        let root = root.as_object().ok_or(ProfileError::NotAnObject)?;

        let wizard = root
            .get("wizard_info")
            .and_then(Value::as_object)
            .filter(|wiz| !wiz.is_empty())
            .map(parse_wizard);

        let units = array_at(root, "unit_list")
            .iter()
            .filter_map(|raw| {
                let unit = parse_unit(raw);
                if unit.is_none() {
                    debug!("skipping unit without a usable unit_id");
                }
                unit
            })
            .collect();

        let runes = first_non_empty_array(root, &RUNE_LIST_KEYS)
            .iter()
            .filter_map(parse_rune)
            .collect();

        let mut equip = Vec::new();
        for block in array_at(root, "equip_info_list") {
            let Some(block) = block.as_object() else {
                continue;
            };
            for key in EQUIP_LIST_KEYS {
                equip.extend(array_at(block, key).iter().filter_map(parse_equip));
            }
        }

        Ok(Self {
            wizard,
            units,
            runes,
            equip,
        })
    }

    pub fn from_json_str(input: &str) -> Result<Self, ProfileError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(&value)
    }
}

/// Read and normalize a profile export from disk.
pub fn load_profile(path: impl AsRef<Path>) -> Result<Profile, ProfileError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Profile::from_json_str(&raw)
}

fn parse_wizard(wiz: &Map<String, Value>) -> WizardInfo {
    WizardInfo {
        id: wiz.get("wizard_id").and_then(value_as_i64),
        name: wiz
            .get("wizard_name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|name| !name.is_empty()),
        level: wiz.get("wizard_level").and_then(value_as_i64),
    }
}

fn parse_unit(raw: &Value) -> Option<UnitEntry> {
    let unit = raw.as_object()?;
    let unit_id = positive_id(unit.get("unit_id"))?;
    let mut embedded_runes = Vec::new();
    for key in RUNE_LIST_KEYS {
        for item in array_at(unit, key) {
            let embedded = if item.is_object() {
                parse_rune(item).map(EmbeddedRune::Record)
            } else {
                positive_id(Some(item)).map(EmbeddedRune::Id)
            };
            match embedded {
                Some(embedded) => embedded_runes.push(embedded),
                None => debug!(unit_id, "skipping malformed embedded rune"),
            }
        }
    }
    Some(UnitEntry {
        unit_id,
        catalog_id: int_field(unit, "unit_master_id")
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        star_grade: small_field(unit, "class"),
        level: small_field(unit, "unit_level"),
        embedded_runes,
    })
}

fn parse_rune(raw: &Value) -> Option<RuneEntry> {
    let rune = raw.as_object()?;
    let rune_id = positive_id(rune.get("rune_id"))?;
    let substats = rune
        .get("sec_eff")
        .and_then(Value::as_array)
        .map(|subs| subs.iter().map(parse_effect).collect())
        .unwrap_or_default();
    Some(RuneEntry {
        rune_id,
        slot: int_field(rune, "slot_no").and_then(|v| u8::try_from(v).ok()),
        set_id: int_field(rune, "set_id")
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        grade: small_field(rune, "class"),
        level: small_field(rune, "upgrade_curr"),
        main_effect: rune.get("pri_eff").and_then(parse_effect),
        innate_effect: rune.get("prefix_eff").and_then(parse_effect),
        substats,
        occupied_id: positive_id(rune.get("occupied_id")).unwrap_or(0),
        occupied_type: occupied_type(rune.get("occupied_type")),
    })
}

fn parse_equip(raw: &Value) -> Option<EquipEntry> {
    let entry = raw.as_object()?;
    Some(EquipEntry {
        rune_id: positive_id(entry.get("rune_id"))?,
        occupied_id: positive_id(entry.get("occupied_id"))?,
        occupied_type: occupied_type(entry.get("occupied_type")),
    })
}

fn parse_effect(raw: &Value) -> Option<RawEffect> {
    let items = raw.as_array()?;
    if items.len() < 2 {
        return None;
    }
    Some(RawEffect {
        type_code: value_as_i64(&items[0])?,
        amount: value_as_i64(&items[1])?,
    })
}

/// Absent, null and 0 all mean "equipped on a unit".
fn occupied_type(raw: Option<&Value>) -> i64 {
    match raw.and_then(value_as_i64) {
        Some(0) | None => OCCUPIED_BY_UNIT,
        Some(kind) => kind,
    }
}

fn array_at<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn first_non_empty_array<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .map(|key| array_at(obj, key))
        .find(|items| !items.is_empty())
        .unwrap_or(&[])
}

fn int_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    obj.get(key).and_then(value_as_i64)
}

fn small_field(obj: &Map<String, Value>, key: &str) -> u8 {
    int_field(obj, key)
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or(0)
}

fn positive_id(raw: Option<&Value>) -> Option<u64> {
    raw.and_then(value_as_i64)
        .and_then(|v| u64::try_from(v).ok())
        .filter(|&id| id != 0)
}

/// Integer from a JSON number (integral floats included) or a numeric string.
pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
