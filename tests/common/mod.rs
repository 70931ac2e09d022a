#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("runeview-{name}-{stamp}.{extension}"))
}

/// Two units: unit 1001 wears runes 1-4 through its embedded list, rune 5 is
/// mapped to it by the equip block only, and rune 6 sits in storage.
pub const PROFILE_JSON: &str = r#"{
    "wizard_info": {"wizard_id": 424242, "wizard_name": "Tester", "wizard_level": 50},
    "unit_list": [
        {
            "unit_id": 1001,
            "unit_master_id": 14314,
            "class": 6,
            "unit_level": 40,
            "runes": [
                {"rune_id": 1, "slot_no": 1, "set_id": 13, "class": 6, "upgrade_curr": 15,
                 "pri_eff": [3, 160], "prefix_eff": [2, 4],
                 "sec_eff": [[4, 5, 0, 0], [8, 6, 0, 0], [10, 10, 0, 0], [0, 0]],
                 "occupied_type": 1, "occupied_id": 1001},
                {"rune_id": 2, "slot_no": 2, "set_id": 13, "class": 6, "upgrade_curr": 15,
                 "pri_eff": [8, 42], "prefix_eff": [0, 0], "sec_eff": [],
                 "occupied_type": 1, "occupied_id": 1001},
                "3",
                4
            ]
        },
        {
            "unit_id": 1002,
            "unit_master_id": 10111,
            "class": 5,
            "unit_level": 35,
            "runes_info": []
        }
    ],
    "runes": [
        {"rune_id": 3, "slot_no": 3, "set_id": 13, "class": 6, "upgrade_curr": 12,
         "pri_eff": [5, 160], "prefix_eff": [0, 0], "sec_eff": [[9, 6]],
         "occupied_type": 1, "occupied_id": 1001},
        {"rune_id": 4, "slot_no": 4, "set_id": 13, "class": 6, "upgrade_curr": 12,
         "pri_eff": [10, 80], "prefix_eff": [0, 0], "sec_eff": [],
         "occupied_type": 1, "occupied_id": 1001},
        {"rune_id": 5, "slot_no": 5, "set_id": 1, "class": 5, "upgrade_curr": 9,
         "pri_eff": [1, 1800], "prefix_eff": [0, 0], "sec_eff": [],
         "occupied_type": 2, "occupied_id": 0},
        {"rune_id": 6, "slot_no": 6, "set_id": 1, "class": 5, "upgrade_curr": 0,
         "pri_eff": [6, 11], "prefix_eff": [0, 0], "sec_eff": [],
         "occupied_type": 2, "occupied_id": 0}
    ],
    "equip_info_list": [
        {"rune_equip_list": [
            {"rune_id": 5, "occupied_id": 1001, "occupied_type": 1},
            {"rune_id": 6, "occupied_id": 1002, "occupied_type": 2}
        ]}
    ]
}"#;
