//! Rune set table: display names, pieces required for one bonus, and icon files.

/// Pieces required when a set id is not in the table.
pub const DEFAULT_REQUIRED_PIECES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuneSet {
    pub id: u32,
    pub name: &'static str,
    pub required_pieces: u32,
}

impl RuneSet {
    pub fn icon_file(&self) -> String {
        format!("{}.png", self.name)
    }
}

const fn set(id: u32, name: &'static str, required_pieces: u32) -> RuneSet {
    RuneSet {
        id,
        name,
        required_pieces,
    }
}

pub const RUNE_SETS: &[RuneSet] = &[
    set(1, "Energy", 2),
    set(2, "Guard", 2),
    set(3, "Swift", 4),
    set(4, "Blade", 2),
    set(5, "Rage", 4),
    set(6, "Focus", 2),
    set(7, "Endure", 2),
    set(8, "Fatal", 4),
    set(10, "Despair", 4),
    set(11, "Vampire", 4),
    set(13, "Violent", 4),
    set(14, "Nemesis", 2),
    set(15, "Will", 2),
    set(16, "Shield", 2),
    set(17, "Revenge", 2),
    set(18, "Destroy", 2),
    set(19, "Fight", 2),
    set(20, "Determination", 2),
    set(21, "Enhance", 2),
    set(22, "Accuracy", 2),
    set(23, "Tolerance", 2),
];

pub fn lookup_set(set_id: u32) -> Option<&'static RuneSet> {
    RUNE_SETS.iter().find(|s| s.id == set_id)
}

pub fn set_name(set_id: u32) -> String {
    lookup_set(set_id)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| format!("Set{set_id}"))
}

pub fn required_pieces_for(set_id: u32) -> u32 {
    lookup_set(set_id)
        .map(|s| s.required_pieces)
        .unwrap_or(DEFAULT_REQUIRED_PIECES)
}

/// Icon file for a known set; unknown sets have none.
pub fn set_icon(set_id: u32) -> Option<String> {
    lookup_set(set_id).map(RuneSet::icon_file)
}
