//! Configuration for the records directory

use crate::identity::DEFAULT_ID_SEED;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Directory configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Institution shown in the menu banner
    pub institution_name: String,

    /// Domain used for generated student emails (no leading `@`)
    pub student_email_domain: String,

    /// Identity sequence seed; the first registration gets `id_seed + 1`
    pub id_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            institution_name: "Arcadia University".to_string(),
            student_email_domain: "student.univ.edu".to_string(),
            id_seed: DEFAULT_ID_SEED,
        }
    }
}

impl Config {
    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(name) = std::env::var("CAMPUS_INSTITUTION") {
            config.institution_name = name;
        }

        if let Ok(domain) = std::env::var("CAMPUS_EMAIL_DOMAIN") {
            config.student_email_domain = domain;
        }

        if let Ok(seed) = std::env::var("CAMPUS_ID_SEED") {
            config.id_seed = seed
                .trim()
                .parse()
                .with_context(|| format!("CAMPUS_ID_SEED is not a valid id: {}", seed))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make registration fail later
    pub fn validate(&self) -> Result<()> {
        if self.id_seed == u64::MAX {
            bail!("id_seed {} leaves no room for new ids", self.id_seed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.institution_name, "Arcadia University");
        assert_eq!(config.student_email_domain, "student.univ.edu");
        assert_eq!(config.id_seed, 1000);
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "institution_name = \"Test College\"").unwrap();
        writeln!(file, "id_seed = 5000").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.institution_name, "Test College");
        assert_eq!(config.id_seed, 5000);
        // Not in the file, so default
        assert_eq!(config.student_email_domain, "student.univ.edu");
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id_seed = \"not a number\"").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_validate_rejects_exhausted_seed() {
        let config = Config {
            id_seed: u64::MAX,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_from_file_large_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id_seed = 4294967295").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.id_seed, 4_294_967_295);
    }

    // Only test in the crate that touches CAMPUS_* variables
    #[test]
    fn test_from_env_seed() {
        std::env::set_var("CAMPUS_ID_SEED", "4294967295");
        let config = Config::from_env().unwrap();
        assert_eq!(config.id_seed, 4_294_967_295);

        // Registration right at the old 32-bit limit still gets an id
        let mut dir = crate::Directory::new(config);
        let student = dir.register_student(crate::NewStudent::new("Jane Doe"));
        assert_eq!(student.id(), crate::StudentId(4_294_967_296));

        std::env::set_var("CAMPUS_ID_SEED", u64::MAX.to_string());
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("leaves no room"));

        std::env::set_var("CAMPUS_ID_SEED", "not a number");
        assert!(Config::from_env().is_err());

        std::env::remove_var("CAMPUS_ID_SEED");
        assert_eq!(Config::from_env().unwrap().id_seed, 1000);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/nonexistent/campus-records.toml");
        assert!(result.is_err());
    }
}
