use crate::{Error, Result};
use log::*;
use serde::de::DeserializeOwned;
use std::{fs::File, io::BufReader, path::Path};

/// Read settings of type `T` from a JSON file.
///
/// Settings types give every field a serde default, so a file only needs to name the values
/// it changes.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    info!("Loading settings from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|source| Error::Config {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Settings {
        #[serde(default = "default_threshold")]
        threshold: f64,
        #[serde(default)]
        count: usize,
    }

    fn default_threshold() -> f64 {
        0.5
    }

    #[test]
    fn missing_fields_take_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "count": 7 }}"#).unwrap();
        let settings: Settings = load_json(file.path()).unwrap();
        assert_eq!(
            settings,
            Settings {
                threshold: 0.5,
                count: 7
            }
        );
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "threshold = 1").unwrap();
        let result: Result<Settings> = load_json(file.path());
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
