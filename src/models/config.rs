//! Editor configuration
//!
//! Every field has a default so a partial (or empty) JSON/YAML object is a
//! valid configuration. Call `validate()` before use; `EditorSession::new`
//! does this for you.

use serde::{Deserialize, Serialize};

use super::duration::{beats_from_f64, Beats, Duration};
use super::measure::TimeSignature;
use super::pitch::Pitch;
use crate::errors::EditorError;
use crate::splitter::is_representable;

/// Staff positions from the top line down, one per line or space
pub const DEFAULT_PITCH_POSITIONS: [&str; 9] =
    ["f/5", "e/5", "d/5", "c/5", "b/4", "a/4", "g/4", "f/4", "e/4"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Meter numerator, in quarter-note beats
    pub beats_per_measure: u32,

    /// Meter denominator (display only)
    pub beat_value: u32,

    /// Horizontal snap grid, in beats
    pub snap_granularity: f64,

    /// Pitch for each vertical snap position, top to bottom
    pub pitch_positions: Vec<String>,

    /// Duration used until the user picks another one
    pub default_duration: Duration,

    /// Pixels trimmed from the right of the note area when mapping pointer x to beats
    pub right_margin: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            beats_per_measure: 4,
            beat_value: 4,
            snap_granularity: 0.25,
            pitch_positions: DEFAULT_PITCH_POSITIONS.iter().map(|p| p.to_string()).collect(),
            default_duration: Duration::Quarter,
            right_margin: 20.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        serde_json::from_str(source)
            .map_err(|e| EditorError::InvalidConfig(format!("JSON: {}", e)))
    }

    pub fn from_yaml(source: &str) -> Result<Self, EditorError> {
        serde_yaml::from_str(source)
            .map_err(|e| EditorError::InvalidConfig(format!("YAML: {}", e)))
    }

    /// Load a `.json`, `.yaml` or `.yml` file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            EditorError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&source),
            Some("yaml") | Some("yml") => Self::from_yaml(&source),
            _ => Err(EditorError::InvalidConfig(format!(
                "unsupported config file type: {}",
                path.display()
            ))),
        }
    }

    pub fn time_signature(&self) -> TimeSignature {
        TimeSignature::new(self.beats_per_measure, self.beat_value)
    }

    pub fn snap_beats(&self) -> Beats {
        beats_from_f64(self.snap_granularity)
    }

    /// Parsed pitch positions, top to bottom
    pub fn pitch_ladder(&self) -> Result<Vec<Pitch>, EditorError> {
        self.pitch_positions.iter().map(|token| Pitch::parse(token)).collect()
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if self.beats_per_measure == 0 || self.beats_per_measure > i32::MAX as u32 / 16 {
            return Err(EditorError::InvalidConfig(format!(
                "beatsPerMeasure must be positive, got {}",
                self.beats_per_measure
            )));
        }

        if !self.beat_value.is_power_of_two() {
            return Err(EditorError::InvalidConfig(format!(
                "beatValue must be a power of two, got {}",
                self.beat_value
            )));
        }

        if !self.snap_granularity.is_finite() || self.snap_granularity <= 0.0 {
            return Err(EditorError::InvalidConfig(format!(
                "snapGranularity must be positive, got {}",
                self.snap_granularity
            )));
        }

        // Every snapped beat must be splittable into table durations
        let snap = self.snap_beats();
        if !is_representable(snap) || snap == Beats::from_integer(0) {
            return Err(EditorError::InvalidConfig(format!(
                "snapGranularity {} is not a multiple of a {} note ({} beats)",
                self.snap_granularity,
                Duration::shortest(),
                Duration::shortest().beats()
            )));
        }
        if snap > self.time_signature().measure_beats() {
            return Err(EditorError::InvalidConfig(format!(
                "snapGranularity {} is longer than the measure",
                self.snap_granularity
            )));
        }

        if self.pitch_positions.is_empty() {
            return Err(EditorError::InvalidConfig(
                "pitchPositions must not be empty".to_string(),
            ));
        }
        self.pitch_ladder()
            .map_err(|e| EditorError::InvalidConfig(format!("pitchPositions: {}", e)))?;

        if !self.right_margin.is_finite() || self.right_margin < 0.0 {
            return Err(EditorError::InvalidConfig(format!(
                "rightMargin must be a non-negative number, got {}",
                self.right_margin
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.time_signature(), TimeSignature::new(4, 4));
        assert_eq!(config.snap_beats(), Beats::new(1, 4));
        assert_eq!(config.pitch_positions.len(), 9);
        assert_eq!(config.default_duration, Duration::Quarter);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "beatsPerMeasure": 3, "defaultDuration": "8" }"#)
            .unwrap();
        assert_eq!(config.beats_per_measure, 3);
        assert_eq!(config.beat_value, 4);
        assert_eq!(config.default_duration, Duration::Eighth);
        assert_eq!(config.right_margin, 20.0);

        let empty = EditorConfig::from_json("{}").unwrap();
        assert_eq!(empty, EditorConfig::default());
    }

    #[test]
    fn test_yaml_source() {
        let yaml = "beatsPerMeasure: 2\nsnapGranularity: 0.5\npitchPositions: [\"c/5\", \"a/4\"]\n";
        let config = EditorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.beats_per_measure, 2);
        assert_eq!(config.snap_beats(), Beats::new(1, 2));
        assert_eq!(config.pitch_ladder().unwrap().len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_json_is_invalid_config() {
        assert!(matches!(
            EditorConfig::from_json("{ beatsPerMeasure: }"),
            Err(EditorError::InvalidConfig(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{ "defaultDuration": "32" }"#),
            Err(EditorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validation_failures() {
        let cases: Vec<Box<dyn Fn(&mut EditorConfig)>> = vec![
            Box::new(|c: &mut EditorConfig| c.beats_per_measure = 0),
            Box::new(|c: &mut EditorConfig| c.beat_value = 3),
            Box::new(|c: &mut EditorConfig| c.snap_granularity = 0.0),
            Box::new(|c: &mut EditorConfig| c.snap_granularity = 0.125),
            Box::new(|c: &mut EditorConfig| c.snap_granularity = f64::NAN),
            Box::new(|c: &mut EditorConfig| c.snap_granularity = 8.0),
            Box::new(|c: &mut EditorConfig| c.pitch_positions.clear()),
            Box::new(|c: &mut EditorConfig| c.pitch_positions[0] = "x/9".to_string()),
            Box::new(|c: &mut EditorConfig| c.right_margin = -1.0),
        ];

        for (i, mutate) in cases.iter().enumerate() {
            let mut config = EditorConfig::default();
            mutate(&mut config);
            assert!(
                matches!(config.validate(), Err(EditorError::InvalidConfig(_))),
                "case {} should fail validation",
                i
            );
        }
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("editor.json");
        std::fs::write(&json_path, r#"{ "beatsPerMeasure": 6, "beatValue": 8 }"#).unwrap();
        let config = EditorConfig::load(&json_path).unwrap();
        assert_eq!(config.time_signature(), TimeSignature::new(6, 8));

        let yaml_path = dir.path().join("editor.yml");
        std::fs::write(&yaml_path, "rightMargin: 0\n").unwrap();
        assert_eq!(EditorConfig::load(&yaml_path).unwrap().right_margin, 0.0);

        let txt_path = dir.path().join("editor.txt");
        std::fs::write(&txt_path, "{}").unwrap();
        assert!(EditorConfig::load(&txt_path).is_err());

        assert!(EditorConfig::load(dir.path().join("missing.json")).is_err());
    }
}
