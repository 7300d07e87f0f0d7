/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub input: InputConfig,
    pub world: WorldConfig,
}

#[derive(Clone, Debug)]
pub struct InputConfig {
    /// Cooldown after an accepted action for a fresh key press.
    pub fresh_cooldown_ms: u64,
    /// Cooldown after an accepted action for held auto-repeat.
    pub repeat_cooldown_ms: u64,
}

#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Probability that a non-spawn cell is ore.
    pub ore_chance: f64,
    pub max_level: u32,
    /// Fixed RNG seed for reproducible worlds. Absent = per-run entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            input: InputConfig {
                fresh_cooldown_ms: default_fresh_cooldown(),
                repeat_cooldown_ms: default_repeat_cooldown(),
            },
            world: WorldConfig {
                ore_chance: default_ore_chance(),
                max_level: default_max_level(),
                seed: None,
            },
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    input: TomlInput,
    #[serde(default)]
    world: TomlWorld,
}

#[derive(Deserialize, Debug)]
struct TomlInput {
    #[serde(default = "default_fresh_cooldown")]
    fresh_cooldown_ms: u64,
    #[serde(default = "default_repeat_cooldown")]
    repeat_cooldown_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlWorld {
    #[serde(default = "default_ore_chance")]
    ore_chance: f64,
    #[serde(default = "default_max_level")]
    max_level: u32,
    #[serde(default)]
    seed: Option<u64>,
}

// ── Defaults ──

fn default_fresh_cooldown() -> u64 { 200 }
fn default_repeat_cooldown() -> u64 { 500 }
fn default_ore_chance() -> f64 { 0.2 }
fn default_max_level() -> u32 { 10 }

impl Default for TomlInput {
    fn default() -> Self {
        TomlInput {
            fresh_cooldown_ms: default_fresh_cooldown(),
            repeat_cooldown_ms: default_repeat_cooldown(),
        }
    }
}

impl Default for TomlWorld {
    fn default() -> Self {
        TomlWorld {
            ore_chance: default_ore_chance(),
            max_level: default_max_level(),
            seed: None,
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig {
            input: InputConfig {
                fresh_cooldown_ms: toml_cfg.input.fresh_cooldown_ms,
                repeat_cooldown_ms: toml_cfg.input.repeat_cooldown_ms,
            },
            world: WorldConfig {
                // A probability outside [0,1] would panic in the
                // generator's Bernoulli draw; clamp instead.
                ore_chance: toml_cfg.world.ore_chance.clamp(0.0, 1.0),
                max_level: toml_cfg.world.max_level.max(1),
                seed: toml_cfg.world.seed,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
