//! Effect decoding: raw `(type, amount)` tuples to named stat deltas.

use serde::{Deserialize, Serialize};

use crate::data::profile::RawEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    HpFlat,
    HpPct,
    AtkFlat,
    AtkPct,
    DefFlat,
    DefPct,
    Speed,
    CritRate,
    CritDmg,
    Resistance,
    Accuracy,
}

impl StatKind {
    /// Maps the export's effect type code. Code 7 is unused by the game; unknown codes map to None.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::HpFlat),
            2 => Some(Self::HpPct),
            3 => Some(Self::AtkFlat),
            4 => Some(Self::AtkPct),
            5 => Some(Self::DefFlat),
            6 => Some(Self::DefPct),
            8 => Some(Self::Speed),
            9 => Some(Self::CritRate),
            10 => Some(Self::CritDmg),
            11 => Some(Self::Resistance),
            12 => Some(Self::Accuracy),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HpFlat => "HP",
            Self::HpPct => "HP%",
            Self::AtkFlat => "ATK",
            Self::AtkPct => "ATK%",
            Self::DefFlat => "DEF",
            Self::DefPct => "DEF%",
            Self::Speed => "SPD",
            Self::CritRate => "CRI Rate",
            Self::CritDmg => "CRI Dmg",
            Self::Resistance => "RES",
            Self::Accuracy => "ACC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: StatKind,
    pub amount: i64,
}

/// Decode one effect slot. Empty slots (absent, type 0, amount 0) and unknown
/// type codes yield None and are never counted.
pub fn decode(raw: Option<&RawEffect>) -> Option<Effect> {
    let raw = raw?;
    if raw.type_code == 0 || raw.amount == 0 {
        return None;
    }
    let kind = StatKind::from_code(raw.type_code)?;
    Some(Effect {
        kind,
        amount: raw.amount,
    })
}

/// Display string for an effect slot: `"ATK% +7"`, `"Type42 +3"` for unknown
/// codes, empty for an empty slot.
pub fn format_effect(raw: Option<&RawEffect>) -> String {
    match raw {
        Some(raw) if raw.type_code != 0 => {
            let label = StatKind::from_code(raw.type_code)
                .map(|kind| kind.label().to_string())
                .unwrap_or_else(|| format!("Type{}", raw.type_code));
            format!("{label} +{}", raw.amount)
        }
        _ => String::new(),
    }
}

/// Non-empty substat display strings joined by `", "`.
pub fn format_substats(subs: &[Option<RawEffect>]) -> String {
    subs.iter()
        .map(|sub| format_effect(sub.as_ref()))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_codes() {
        let effect = decode(Some(&RawEffect::new(8, 6))).unwrap();
        assert_eq!(effect, Effect { kind: StatKind::Speed, amount: 6 });
        assert_eq!(decode(Some(&RawEffect::new(12, 3))).unwrap().kind, StatKind::Accuracy);
    }

    #[test]
    fn empty_slots_and_unknown_codes_are_ignored() {
        assert_eq!(decode(None), None);
        assert_eq!(decode(Some(&RawEffect::new(0, 0))), None);
        assert_eq!(decode(Some(&RawEffect::new(0, 15))), None);
        assert_eq!(decode(Some(&RawEffect::new(4, 0))), None);
        assert_eq!(decode(Some(&RawEffect::new(7, 5))), None);
        assert_eq!(decode(Some(&RawEffect::new(99, 5))), None);
    }

    #[test]
    fn formats_display_strings() {
        assert_eq!(format_effect(Some(&RawEffect::new(4, 7))), "ATK% +7");
        assert_eq!(format_effect(Some(&RawEffect::new(42, 3))), "Type42 +3");
        assert_eq!(format_effect(Some(&RawEffect::new(0, 0))), "");
        assert_eq!(format_effect(None), "");
        let subs = [
            Some(RawEffect::new(8, 6)),
            Some(RawEffect::new(0, 0)),
            None,
            Some(RawEffect::new(10, 10)),
        ];
        assert_eq!(format_substats(&subs), "SPD +6, CRI Dmg +10");
    }
}
