use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use tracing::info;

use crate::catalog::{CatalogCache, CatalogResolver, SwarfarmClient};
use crate::config::Config;
use crate::data::profile::{load_profile, Profile};
use crate::data::{export_monsters_csv, export_runes_csv, find_profiles};
use crate::roster::{build_snapshot, SnapshotOptions};
use crate::runes::build_rune_records;
use crate::server::{self, AppState};

const USAGE: &str = "usage: runeview <runes|monsters|profiles|export|serve>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Runes,
    Monsters,
    Profiles,
    Export,
    Serve,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("runes") => Some(Command::Runes),
        Some("monsters") => Some(Command::Monsters),
        Some("profiles") => Some(Command::Profiles),
        Some("export") => Some(Command::Export),
        Some("serve") => Some(Command::Serve),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    run_with_config(args, &Config::from_env())
}

pub fn run_with_config(args: &[String], config: &Config) -> i32 {
    match parse_command(args) {
        Some(Command::Runes) => handle_runes(args),
        Some(Command::Monsters) => handle_monsters(args, config),
        Some(Command::Profiles) => handle_profiles(args, config),
        Some(Command::Export) => handle_export(args, config),
        Some(Command::Serve) => handle_serve(args, config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_runes(args: &[String]) -> i32 {
    let Some(profile) = positional(args, 2).and_then(|path| read_profile(&path)) else {
        return usage_or_failure(args, "usage: runeview runes <profile.json> [--table]");
    };
    let runes = build_rune_records(&profile);

    if has_flag(args, "--table") {
        println!("rune_id\tslot\tset\tlevel\tmain\tsubs\tscore\towner");
        for rune in &runes {
            println!(
                "{}\t{}\t{}\t+{}\t{}\t{}\t{:.1}\t{}",
                rune.rune_id,
                rune.slot.map(|s| s.to_string()).unwrap_or_default(),
                rune.set_name,
                rune.level,
                rune.main,
                rune.subs,
                rune.score,
                rune.owner_unit_id
            );
        }
        return 0;
    }
    print_json(&runes, "rune records")
}

fn handle_monsters(args: &[String], config: &Config) -> i32 {
    let Some(profile) = positional(args, 2).and_then(|path| read_profile(&path)) else {
        return usage_or_failure(
            args,
            "usage: runeview monsters <profile.json> [--pairs] [--table]",
        );
    };
    let Some(mut resolver) = open_resolver(config) else {
        return 1;
    };
    let options = SnapshotOptions {
        resolve_pairs: has_flag(args, "--pairs"),
    };
    let snapshot = build_snapshot(&profile, &mut resolver, options);

    if has_flag(args, "--table") {
        println!("unit_id\tname\tstars\tlevel\thp\tatk\tdef\tspd\tsets");
        for m in &snapshot.monsters {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                m.unit_id,
                m.name,
                m.star_grade,
                m.level,
                m.with_runes.hp,
                m.with_runes.atk,
                m.with_runes.def,
                m.with_runes.spd,
                m.set_label
            );
        }
        return 0;
    }
    print_json(&snapshot.monsters, "monster records")
}

fn handle_profiles(args: &[String], config: &Config) -> i32 {
    let dir = positional(args, 2).unwrap_or_else(|| config.export_dir.clone());
    let listings = find_profiles(&dir);
    info!(dir = %dir.display(), found = listings.len(), "profile scan complete");
    print_json(&listings, "profile listing")
}

fn handle_export(args: &[String], config: &Config) -> i32 {
    let (Some(profile_path), Some(out_dir)) = (positional(args, 2), positional(args, 3)) else {
        eprintln!("usage: runeview export <profile.json> <out_dir>");
        return 2;
    };
    let Some(profile) = read_profile(&profile_path) else {
        return 1;
    };
    let Some(mut resolver) = open_resolver(config) else {
        return 1;
    };
    let snapshot = build_snapshot(&profile, &mut resolver, SnapshotOptions::default());

    let runes_path = out_dir.join("runes.csv");
    let monsters_path = out_dir.join("monsters.csv");
    let result = export_runes_csv(&runes_path, &snapshot.runes)
        .and_then(|()| export_monsters_csv(&monsters_path, &snapshot.monsters));
    match result {
        Ok(()) => {
            println!(
                "export complete: runes={}, monsters={}, dir='{}'",
                snapshot.runes.len(),
                snapshot.monsters.len(),
                out_dir.display()
            );
            0
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            1
        }
    }
}

fn handle_serve(args: &[String], config: &Config) -> i32 {
    let Some(profile) = positional(args, 2).and_then(|path| read_profile(&path)) else {
        return usage_or_failure(args, "usage: runeview serve <profile.json>");
    };
    let Some(mut resolver) = open_resolver(config) else {
        return 1;
    };
    let snapshot = build_snapshot(&profile, &mut resolver, SnapshotOptions::default());
    let state = AppState {
        snapshot,
        resolver: Mutex::new(resolver),
    };
    match server::run_server(&config.bind_addr, &state) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn open_resolver(config: &Config) -> Option<CatalogResolver<SwarfarmClient>> {
    let cache = CatalogCache::load(&config.catalog_cache_path);
    match SwarfarmClient::new(&config.catalog_url, config.catalog_timeout) {
        Ok(client) => Some(CatalogResolver::new(cache, client)),
        Err(err) => {
            eprintln!("failed to create catalog client: {err}");
            None
        }
    }
}

fn read_profile(path: &Path) -> Option<Profile> {
    match load_profile(path) {
        Ok(profile) => Some(profile),
        Err(err) => {
            eprintln!("{err}");
            None
        }
    }
}

/// Missing positional argument is a usage error (2); anything else already reported is a failure (1).
fn usage_or_failure(args: &[String], usage: &str) -> i32 {
    if positional(args, 2).is_none() {
        eprintln!("{usage}");
        2
    } else {
        1
    }
}

fn positional(args: &[String], index: usize) -> Option<PathBuf> {
    args.iter()
        .filter(|arg| !arg.starts_with("--"))
        .nth(index)
        .map(PathBuf::from)
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn print_json<T: Serialize + ?Sized>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}
