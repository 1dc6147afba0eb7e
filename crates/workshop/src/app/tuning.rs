//! Gameplay tuning loaded from `assets/workshop.json`.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Unknown keys are rejected so typos surface at startup.

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::gameplay::Difficulty;

pub(crate) const TUNING_FILE_NAME: &str = "workshop.json";
pub(crate) const TUNING_ENV_VAR: &str = "WORKSHOP_TUNING";
const MAX_START_ORDERS: u32 = 4;

#[derive(Debug, Error)]
pub(crate) enum TuningError {
    #[error("read tuning file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse tuning json{}: {message}", at_path(.path))]
    Parse { path: String, message: String },
    #[error("tuning validation failed at {path}: {message}")]
    Invalid { path: String, message: String },
}

fn at_path(path: &str) -> String {
    if path.is_empty() || path == "." {
        String::new()
    } else {
        format!(" at {path}")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WorkshopTuning {
    pub(crate) interaction_distance: f32,
    /// Fraction of `interaction_distance` inside which a carried resource
    /// drops onto the bench without a key press.
    pub(crate) auto_deposit_factor: f32,
    pub(crate) elf: ElfTuning,
    pub(crate) streak: StreakTuning,
    pub(crate) difficulties: DifficultyTable,
    pub(crate) seed: Option<u64>,
}

impl Default for WorkshopTuning {
    fn default() -> Self {
        Self {
            interaction_distance: 110.0,
            auto_deposit_factor: 0.9,
            elf: ElfTuning::default(),
            streak: StreakTuning::default(),
            difficulties: DifficultyTable::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ElfTuning {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) speed: f32,
    pub(crate) margin: f32,
}

impl Default for ElfTuning {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 80.0,
            speed: 280.0,
            margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct StreakTuning {
    pub(crate) window_seconds: f32,
    pub(crate) max_count: u32,
    pub(crate) speed_bonus: f32,
}

impl Default for StreakTuning {
    fn default() -> Self {
        Self {
            window_seconds: 4.5,
            max_count: 3,
            speed_bonus: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DifficultySettings {
    pub(crate) start_orders: u32,
    pub(crate) increase_every_levels: u32,
    /// Read and validated, but order generation does not use it.
    pub(crate) single_quantity_chance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DifficultyTable {
    pub(crate) easy: DifficultySettings,
    pub(crate) medium: DifficultySettings,
    pub(crate) hard: DifficultySettings,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultySettings {
                start_orders: 1,
                increase_every_levels: 2,
                single_quantity_chance: 0.7,
            },
            medium: DifficultySettings {
                start_orders: 1,
                increase_every_levels: 1,
                single_quantity_chance: 0.5,
            },
            hard: DifficultySettings {
                start_orders: 2,
                increase_every_levels: 1,
                single_quantity_chance: 0.4,
            },
        }
    }
}

impl DifficultyTable {
    pub(crate) fn settings(&self, difficulty: Difficulty) -> DifficultySettings {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Reads `path` if it exists, otherwise falls back to the built-in values.
pub(crate) fn load_or_default(path: &Path) -> Result<WorkshopTuning, TuningError> {
    if !path.exists() {
        info!(path = %path.display(), "tuning_file_absent_using_defaults");
        return Ok(WorkshopTuning::default());
    }
    let tuning = load_tuning(path)?;
    info!(path = %path.display(), "tuning_loaded");
    Ok(tuning)
}

pub(crate) fn load_tuning(path: &Path) -> Result<WorkshopTuning, TuningError> {
    let raw = fs::read_to_string(path).map_err(|source| TuningError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tuning = parse_tuning_json(&raw)?;
    validate_tuning(&tuning)?;
    Ok(tuning)
}

pub(crate) fn parse_tuning_json(raw: &str) -> Result<WorkshopTuning, TuningError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, WorkshopTuning>(&mut deserializer).map_err(|error| {
        let path = error.path().to_string();
        TuningError::Parse {
            path,
            message: error.into_inner().to_string(),
        }
    })
}

fn invalid(path: &str, message: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        path: path.to_string(),
        message: message.into(),
    }
}

fn expected_actual(path: &str, expected: impl Display, actual: impl Display) -> TuningError {
    invalid(path, format!("expected {expected}, got {actual}"))
}

fn require_positive(path: &str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(expected_actual(path, "a positive number", value))
    }
}

pub(crate) fn validate_tuning(tuning: &WorkshopTuning) -> Result<(), TuningError> {
    require_positive("interaction_distance", tuning.interaction_distance)?;
    let factor = tuning.auto_deposit_factor;
    if !(factor.is_finite() && factor > 0.0 && factor <= 1.0) {
        return Err(expected_actual("auto_deposit_factor", "a value in (0, 1]", factor));
    }

    require_positive("elf.width", tuning.elf.width)?;
    require_positive("elf.height", tuning.elf.height)?;
    require_positive("elf.speed", tuning.elf.speed)?;
    if !(tuning.elf.margin.is_finite() && tuning.elf.margin >= 0.0) {
        return Err(expected_actual("elf.margin", "a non-negative number", tuning.elf.margin));
    }

    require_positive("streak.window_seconds", tuning.streak.window_seconds)?;
    if tuning.streak.max_count == 0 {
        return Err(expected_actual("streak.max_count", "at least 1", 0));
    }
    let bonus = tuning.streak.speed_bonus;
    if !(bonus.is_finite() && bonus >= 0.0) {
        return Err(expected_actual("streak.speed_bonus", "a non-negative number", bonus));
    }

    for (name, settings) in [
        ("easy", tuning.difficulties.easy),
        ("medium", tuning.difficulties.medium),
        ("hard", tuning.difficulties.hard),
    ] {
        validate_difficulty(name, &settings)?;
    }
    Ok(())
}

fn validate_difficulty(name: &str, settings: &DifficultySettings) -> Result<(), TuningError> {
    if !(1..=MAX_START_ORDERS).contains(&settings.start_orders) {
        return Err(expected_actual(
            &format!("difficulties.{name}.start_orders"),
            format!("1..={MAX_START_ORDERS}"),
            settings.start_orders,
        ));
    }
    if settings.increase_every_levels == 0 {
        return Err(expected_actual(
            &format!("difficulties.{name}.increase_every_levels"),
            "at least 1",
            0,
        ));
    }
    let chance = settings.single_quantity_chance;
    if !(0.0..=1.0).contains(&chance) {
        return Err(expected_actual(
            &format!("difficulties.{name}.single_quantity_chance"),
            "a value in [0, 1]",
            chance,
        ));
    }
    Ok(())
}

/// `WORKSHOP_TUNING` wins over `<assets>/workshop.json`.
pub(crate) fn tuning_path(assets_dir: Option<&Path>, env_override: Option<String>) -> Option<PathBuf> {
    env_override
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| assets_dir.map(|dir| dir.join(TUNING_FILE_NAME)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_pass_validation() {
        validate_tuning(&WorkshopTuning::default()).expect("defaults valid");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tuning = parse_tuning_json(r#"{ "interaction_distance": 90, "streak": { "max_count": 5 } }"#)
            .expect("parse");
        assert_eq!(tuning.interaction_distance, 90.0);
        assert_eq!(tuning.streak.max_count, 5);
        assert_eq!(tuning.streak.window_seconds, 4.5);
        assert_eq!(tuning.elf, ElfTuning::default());
        assert_eq!(tuning.difficulties, DifficultyTable::default());
    }

    #[test]
    fn unknown_field_reports_its_path() {
        let error = parse_tuning_json(r#"{ "elf": { "sped": 3 } }"#).expect_err("unknown field");
        let message = error.to_string();
        assert!(message.starts_with("parse tuning json at elf"), "{message}");
        assert!(message.contains("sped"), "{message}");
    }

    #[test]
    fn wrong_type_reports_nested_path() {
        let error = parse_tuning_json(
            r#"{ "difficulties": { "hard": { "start_orders": "two", "increase_every_levels": 1, "single_quantity_chance": 0.4 } } }"#,
        )
        .expect_err("bad type");
        assert!(
            error.to_string().contains("difficulties.hard.start_orders"),
            "{error}"
        );
    }

    #[test]
    fn validation_rejects_out_of_range_start_orders() {
        let mut tuning = WorkshopTuning::default();
        tuning.difficulties.hard.start_orders = 5;
        let error = validate_tuning(&tuning).expect_err("too many start orders");
        assert_eq!(
            error.to_string(),
            "tuning validation failed at difficulties.hard.start_orders: expected 1..=4, got 5"
        );
    }

    #[test]
    fn validation_rejects_bad_auto_deposit_factor() {
        let mut tuning = WorkshopTuning::default();
        tuning.auto_deposit_factor = 1.5;
        let error = validate_tuning(&tuning).expect_err("factor above one");
        assert!(error.to_string().contains("auto_deposit_factor"), "{error}");
    }

    #[test]
    fn validation_rejects_zero_streak_window() {
        let mut tuning = WorkshopTuning::default();
        tuning.streak.window_seconds = 0.0;
        assert!(validate_tuning(&tuning).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tuning = load_or_default(&dir.path().join(TUNING_FILE_NAME)).expect("defaults");
        assert_eq!(tuning, WorkshopTuning::default());
    }

    #[test]
    fn file_on_disk_is_parsed_and_validated() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "seed": 42, "elf": {{ "speed": 300 }} }}"#).expect("write");
        let tuning = load_tuning(file.path()).expect("load");
        assert_eq!(tuning.seed, Some(42));
        assert_eq!(tuning.elf.speed, 300.0);

        let mut bad = tempfile::NamedTempFile::new().expect("temp file");
        write!(bad, r#"{{ "elf": {{ "speed": -1 }} }}"#).expect("write");
        let error = load_tuning(bad.path()).expect_err("negative speed");
        assert!(matches!(error, TuningError::Invalid { ref path, .. } if path == "elf.speed"));
    }

    #[test]
    fn env_override_wins_over_assets_dir() {
        let assets = PathBuf::from("/srv/workshop/assets");
        assert_eq!(
            tuning_path(Some(&assets), Some("/tmp/custom.json".to_string())),
            Some(PathBuf::from("/tmp/custom.json"))
        );
        assert_eq!(
            tuning_path(Some(&assets), Some("  ".to_string())),
            Some(assets.join(TUNING_FILE_NAME))
        );
        assert_eq!(tuning_path(None, None), None);
    }
}
