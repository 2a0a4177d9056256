//! CSV spawner table loader.
//!
//! # CSV format
//!
//! One row per spawner.  The perception columns are optional; an empty cell
//! or a missing column falls back to the `defaults` passed to the loader.
//!
//! ```csv
//! origin_x,origin_y,origin_z,spawn_radius,population,obstacle_mask,view_radius,avoid_radius,bounds_radius,collision_avoid_dst
//! 0,0,0,10,500,0x1,,,,
//! 40,5,0,4,120,all,3.5,1.2,0.3,6
//! ```
//!
//! **`obstacle_mask`** field:
//!
//! | Value        | Meaning                      |
//! |--------------|------------------------------|
//! | `all`        | `LayerMask::ALL`             |
//! | `none`       | `LayerMask::NONE`            |
//! | `0x…`        | hexadecimal bitmask          |
//! | *u32*        | decimal bitmask              |

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use flock_core::{FlockSettings, LayerMask, Vec3};

use crate::{SpawnError, SpawnResult, SpawnerInfo};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SpawnerRow {
    origin_x:      f32,
    origin_y:      f32,
    origin_z:      f32,
    spawn_radius:  f32,
    population:    u32,
    obstacle_mask: String,
    #[serde(default)]
    view_radius:   Option<f32>,
    #[serde(default)]
    avoid_radius:  Option<f32>,
    #[serde(default)]
    bounds_radius: Option<f32>,
    #[serde(default)]
    collision_avoid_dst: Option<f32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load spawners from a CSV file.  Rows are validated before returning.
pub fn load_spawners_csv(path: &Path, defaults: &FlockSettings) -> SpawnResult<Vec<SpawnerInfo>> {
    let file = std::fs::File::open(path)?;
    load_spawners_reader(file, defaults)
}

/// Like [`load_spawners_csv`] but accepts any `Read` source.
pub fn load_spawners_reader<R: Read>(reader: R, defaults: &FlockSettings) -> SpawnResult<Vec<SpawnerInfo>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut spawners = Vec::new();

    for (line, result) in csv_reader.deserialize::<SpawnerRow>().enumerate() {
        let row = result.map_err(|e| SpawnError::Parse(e.to_string()))?;

        let mut settings = defaults.clone();
        if let Some(v) = row.view_radius {
            settings.view_radius = v;
        }
        if let Some(v) = row.avoid_radius {
            settings.avoid_radius = v;
        }
        if let Some(v) = row.bounds_radius {
            settings.bounds_radius = v;
        }
        if let Some(v) = row.collision_avoid_dst {
            settings.collision_avoid_dst = v;
        }

        let spawner = SpawnerInfo {
            origin:        Vec3::new(row.origin_x, row.origin_y, row.origin_z),
            spawn_radius:  row.spawn_radius,
            population:    row.population,
            settings,
            obstacle_mask: parse_mask(&row.obstacle_mask)
                .map_err(|e| SpawnError::Parse(format!("row {}: {e}", line + 1)))?,
        };
        spawner.validate()?;
        spawners.push(spawner);
    }

    Ok(spawners)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_mask(s: &str) -> Result<LayerMask, String> {
    let s = s.trim();
    let parsed = match s.to_ascii_lowercase().as_str() {
        "all"  => return Ok(LayerMask::ALL),
        "none" => return Ok(LayerMask::NONE),
        lower => match lower.strip_prefix("0x") {
            Some(hex) => u32::from_str_radix(hex, 16),
            None      => lower.parse::<u32>(),
        },
    };
    parsed
        .map(LayerMask)
        .map_err(|_| format!("invalid obstacle_mask {s:?}: expected \"all\", \"none\", hex, or u32"))
}
