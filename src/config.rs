use crate::loaders::HEADER_LINES;
use eyre::{Error, WrapErr, ensure};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub roster: RosterConfig,
    pub mapping: MappingConfig,
    pub registers: RegistersConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    pub delimiter: char,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { delimiter: ';' }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingConfig {
    pub header_lines: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            header_lines: HEADER_LINES,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistersConfig {
    pub group_title_prefix: String,
    pub group_lead_days: u64,
    pub parliament_title: String,
    pub parliament_lead_days: u64,
}

impl Default for RegistersConfig {
    fn default() -> Self {
        Self {
            group_title_prefix: "Fachschaft ".to_owned(),
            group_lead_days: 30,
            parliament_title: "Wahl zum Studierendenparlament".to_owned(),
            parliament_lead_days: 45,
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(text).wrap_err("cannot parse configuration")?;
        ensure!(
            config.roster.delimiter.is_ascii(),
            "roster delimiter {:?} is not an ASCII character",
            config.roster.delimiter
        );
        Ok(config)
    }

    pub fn load(file_name: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))?;
        Self::parse(&text)
    }

    /// Delimiter byte for the roster reader.
    pub fn delimiter(&self) -> u8 {
        // Checked to be ASCII when parsed.
        self.roster.delimiter as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.delimiter(), b';');
        assert_eq!(config.mapping.header_lines, 3);
        assert_eq!(config.registers.group_lead_days, 30);
        assert_eq!(config.registers.parliament_lead_days, 45);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            "[roster]\ndelimiter = ','\n\n[registers]\nparliament_title = 'Urabstimmung'\n",
        )
        .unwrap();
        assert_eq!(config.delimiter(), b',');
        assert_eq!(config.registers.parliament_title, "Urabstimmung");
        assert_eq!(config.registers.group_title_prefix, "Fachschaft ");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::parse("[roster]\ndelimiter = '§'\n").is_err());
        assert!(Config::parse("[solver]\nalgorithm = 'hungarian'\n").is_err());
    }
}
