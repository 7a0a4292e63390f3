use crate::error::{CrewError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".crewload.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewConfig {
    #[serde(default)]
    pub crewload: WorkspaceSettings,

    #[serde(default)]
    pub scoring: ScoringWeights,

    #[serde(default)]
    pub rebalance: RebalancePolicy,

    #[serde(default)]
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_id_length")]
    pub id_length: usize,
}

fn default_path() -> String {
    ".crewload".to_string()
}

fn default_id_length() -> usize {
    5
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            path: default_path(),
            id_length: default_id_length(),
        }
    }
}

/// Points each workload source contributes to a member's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_low")]
    pub low: u32,

    #[serde(default = "default_medium")]
    pub medium: u32,

    #[serde(default = "default_high")]
    pub high: u32,

    #[serde(default = "default_critical")]
    pub critical: u32,

    /// Per distinct member of a non-archived project.
    #[serde(default = "default_project")]
    pub project: u32,

    /// Per active or on-hold goal.
    #[serde(default = "default_goal")]
    pub goal: u32,
}

fn default_low() -> u32 {
    1
}

fn default_medium() -> u32 {
    1
}

fn default_high() -> u32 {
    2
}

fn default_critical() -> u32 {
    3
}

fn default_project() -> u32 {
    2
}

fn default_goal() -> u32 {
    1
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
            critical: default_critical(),
            project: default_project(),
            goal: default_goal(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalancePolicy {
    /// Score gap at or below which the team counts as balanced.
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Equalization moves allowed per active goal.
    #[serde(default = "default_move_factor")]
    pub move_factor: usize,
}

fn default_threshold() -> u32 {
    2
}

fn default_move_factor() -> usize {
    2
}

impl Default for RebalancePolicy {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            move_factor: default_move_factor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    7
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            days: default_days(),
        }
    }
}

impl CrewConfig {
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        Self::load_from(&config_path)
    }

    /// Load an explicit config file; the workspace root is its parent directory.
    pub fn load_from(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: CrewConfig = toml::from_str(&content)?;
        config.validate()?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| CrewError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(CrewError::NotInitialized);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.crewload.id_length < 3 {
            return Err(CrewError::Config(
                "id_length must be at least 3".to_string(),
            ));
        }
        if self.rebalance.move_factor == 0 {
            return Err(CrewError::Config(
                "rebalance.move_factor must be at least 1".to_string(),
            ));
        }
        if self.report.days == 0 {
            return Err(CrewError::Config(
                "report.days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.crewload.path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: CrewConfig = toml::from_str("").unwrap();
        assert_eq!(config.crewload.path, ".crewload");
        assert_eq!(config.scoring, ScoringWeights::default());
        assert_eq!(config.scoring.high, 2);
        assert_eq!(config.rebalance.threshold, 2);
        assert_eq!(config.report.days, 7);
    }

    #[test]
    fn test_partial_override() {
        let config: CrewConfig = toml::from_str("[scoring]\ncritical = 5\n").unwrap();
        assert_eq!(config.scoring.critical, 5);
        assert_eq!(config.scoring.low, 1);
        assert_eq!(config.scoring.project, 2);
    }

    #[test]
    fn test_find_config_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        CrewConfig::default()
            .save(&temp_dir.path().join(CONFIG_FILE_NAME))
            .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, root) = CrewConfig::load(&nested).unwrap();
        assert_eq!(root, temp_dir.path());
        assert_eq!(config.crewload.id_length, 5);
    }

    #[test]
    fn test_missing_config_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        let result = CrewConfig::find_config_file(temp_dir.path());
        assert!(matches!(result, Err(CrewError::NotInitialized)));
    }

    #[test]
    fn test_rejects_zero_report_days() {
        let config: CrewConfig = toml::from_str("[report]\ndays = 0\n").unwrap();
        assert!(config.validate().is_err());
    }
}
