//! Limits and letter-grade thresholds.
//!
//! Every tunable constant lives in [`GradeConfig`]. Values come from the
//! built-in defaults, an optional JSON file, and `GRADE_*` environment
//! variables, applied in that order.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Largest supported grade precision. Averages are computed on integers
/// scaled by `10^max_decimal_places`.
pub const MAX_DECIMAL_PLACES_LIMIT: usize = 6;

/// Inclusive lower bounds for each passing letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeThresholds {
    pub a_min: f64,
    pub b_min: f64,
    pub c_min: f64,
    pub d_min: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            a_min: 90.0,
            b_min: 80.0,
            c_min: 70.0,
            d_min: 60.0,
        }
    }
}

/// Validation limits and display thresholds.
///
/// Stored as a JSON object on disk; any field may be omitted:
/// ```json
/// {
///   "max_students": 30,
///   "thresholds": { "a_min": 93, "b_min": 85, "c_min": 75, "d_min": 65 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeConfig {
    pub min_grade: f64,
    pub max_grade: f64,
    pub max_students: usize,
    pub min_name_length: usize,
    pub max_name_length: usize,
    pub max_decimal_places: usize,
    pub thresholds: GradeThresholds,
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            min_grade: 0.0,
            max_grade: 100.0,
            max_students: 50,
            min_name_length: 2,
            max_name_length: 50,
            max_decimal_places: 2,
            thresholds: GradeThresholds::default(),
        }
    }
}

impl GradeConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        let config: GradeConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {path}"))?;
        Ok(config)
    }

    /// Applies `GRADE_*` environment variables on top of the current values.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup. Split out of
    /// [`with_env_overrides`](Self::with_env_overrides) so tests need not
    /// touch the process environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        macro_rules! override_field {
            ($key:expr, $field:expr) => {
                if let Some(raw) = lookup($key) {
                    $field = raw
                        .trim()
                        .parse()
                        .with_context(|| format!("invalid value for {}: {raw:?}", $key))?;
                }
            };
        }

        override_field!("GRADE_MIN_GRADE", self.min_grade);
        override_field!("GRADE_MAX_GRADE", self.max_grade);
        override_field!("GRADE_MAX_STUDENTS", self.max_students);
        override_field!("GRADE_MIN_NAME_LENGTH", self.min_name_length);
        override_field!("GRADE_MAX_NAME_LENGTH", self.max_name_length);
        override_field!("GRADE_MAX_DECIMAL_PLACES", self.max_decimal_places);
        override_field!("GRADE_A_MIN", self.thresholds.a_min);
        override_field!("GRADE_B_MIN", self.thresholds.b_min);
        override_field!("GRADE_C_MIN", self.thresholds.c_min);
        override_field!("GRADE_D_MIN", self.thresholds.d_min);

        Ok(self)
    }

    /// Rejects settings that would make validation or grading meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.min_grade >= self.max_grade {
            bail!(
                "min_grade ({}) must be below max_grade ({})",
                self.min_grade,
                self.max_grade
            );
        }
        if self.max_students == 0 {
            bail!("max_students must be at least 1");
        }
        if self.max_decimal_places > MAX_DECIMAL_PLACES_LIMIT {
            bail!(
                "max_decimal_places ({}) cannot exceed {}",
                self.max_decimal_places,
                MAX_DECIMAL_PLACES_LIMIT
            );
        }
        if self.min_name_length == 0 || self.min_name_length > self.max_name_length {
            bail!(
                "name length bounds are inconsistent: {}..={}",
                self.min_name_length,
                self.max_name_length
            );
        }

        let t = &self.thresholds;
        if !(t.a_min > t.b_min && t.b_min > t.c_min && t.c_min > t.d_min) {
            bail!(
                "thresholds must be strictly descending (A {} > B {} > C {} > D {})",
                t.a_min,
                t.b_min,
                t.c_min,
                t.d_min
            );
        }
        if t.d_min < self.min_grade || t.a_min > self.max_grade {
            bail!(
                "thresholds must lie within the grade range {}..={}",
                self.min_grade,
                self.max_grade
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = GradeConfig::default();
        assert_eq!(config.max_students, 50);
        assert_eq!(config.thresholds.d_min, 60.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GradeConfig =
            serde_json::from_str(r#"{"max_students": 10, "thresholds": {"a_min": 95}}"#).unwrap();

        assert_eq!(config.max_students, 10);
        assert_eq!(config.thresholds.a_min, 95.0);
        assert_eq!(config.thresholds.b_min, 80.0);
        assert_eq!(config.max_name_length, 50);
    }

    #[test]
    fn test_load_from_file() {
        let path = format!("{}/grade_roster_test_config.json", std::env::temp_dir().display());
        std::fs::write(&path, r#"{"max_decimal_places": 1}"#).unwrap();

        let config = GradeConfig::load(&path).unwrap();
        assert_eq!(config.max_decimal_places, 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_overrides_apply() {
        let vars: HashMap<&str, &str> = [("GRADE_MAX_STUDENTS", "5"), ("GRADE_D_MIN", " 55.5 ")]
            .into_iter()
            .collect();

        let config = GradeConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.max_students, 5);
        assert_eq!(config.thresholds.d_min, 55.5);
    }

    #[test]
    fn test_override_rejects_garbage() {
        let err = GradeConfig::default()
            .with_overrides(|key| (key == "GRADE_MAX_STUDENTS").then(|| "many".to_string()))
            .unwrap_err();

        assert!(err.to_string().contains("GRADE_MAX_STUDENTS"));
    }

    #[test]
    fn test_validate_rejects_unordered_thresholds() {
        let mut config = GradeConfig::default();
        config.thresholds.b_min = 95.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_decimal_places() {
        let mut config = GradeConfig::default();
        config.max_decimal_places = MAX_DECIMAL_PLACES_LIMIT;
        assert!(config.validate().is_ok());

        config.max_decimal_places = 400;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_decimal_places"));
    }

    #[test]
    fn test_validate_rejects_empty_range() {
        let mut config = GradeConfig::default();
        config.max_grade = 0.0;
        assert!(config.validate().is_err());
    }
}
