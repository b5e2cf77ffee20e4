//! Settings module.

use super::parameters::Parameters;
use super::schedule::Schedule;

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub parameters: Parameters,
    #[serde(default)]
    pub schedule: Schedule,
}

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
}

impl std::error::Error for SettingsError {}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(error) => write!(formatter, "IO error: {}", error),
            SettingsError::YamlError(error) => write!(formatter, "YAML error: {}", error),
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = serde_yaml::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", output)
    }
}

impl Settings {
    pub fn write(&self, writer: &mut dyn std::io::Write) -> Result<(), SettingsError> {
        serde_yaml::to_writer(writer, self).map_err(SettingsError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> Result<Settings, SettingsError> {
        serde_yaml::from_reader(reader).map_err(SettingsError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> Result<(), SettingsError> {
        let file = fs::File::create(filename).map_err(SettingsError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> Result<Settings, SettingsError> {
        let file = fs::File::open(filename).map_err(SettingsError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::schedule::{CatalogScope, LoggingRegime};
    use crate::core::effects::{EffectDistribution, GaussianParameters};

    #[test]
    fn read_write() {
        let settings = Settings {
            parameters: Parameters {
                population_size: 100,
                genome_size: 10_000,
                effect_distribution: EffectDistribution::Gaussian(GaussianParameters {
                    mean: 0.,
                    sd: 0.05,
                }),
                burn_in: 500,
                generations: 1000,
                seed: Some(7),
                ..Default::default()
            },
            schedule: Schedule {
                logging: vec![LoggingRegime::new("1", 10), LoggingRegime::new("onset", 1)],
                snapshots: vec!["onset".to_string(), "end".to_string()],
                catalog: CatalogScope::Present,
            },
        };
        let mut output = vec![];
        settings.write(&mut output).unwrap();
        let settings2 = Settings::read(&mut &output[..]).unwrap();
        assert_eq!(settings, settings2);
    }

    #[test]
    fn schedule_defaults_when_missing() {
        let yaml = serde_yaml::to_string(&Parameters::default()).unwrap();
        let indented: String = yaml.lines().map(|line| format!("  {line}\n")).collect();
        let content = format!("parameters:\n{indented}");
        let settings = Settings::read(&mut content.as_bytes()).unwrap();
        assert_eq!(settings.schedule, Schedule::default());
        assert_eq!(settings.parameters, Parameters::default());
    }

    #[test]
    fn read_missing_file() {
        let result = Settings::read_from_file("/nonexistent/settings.yaml");
        assert!(matches!(result, Err(SettingsError::IoError(_))));
    }
}
