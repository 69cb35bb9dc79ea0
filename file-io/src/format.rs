use crate::{Error, Result};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use log::*;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

/// How a file is encoded, decided by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFormat {
    pub format: Format,
    pub compressed: bool,
}

impl FileFormat {
    /// `.json` selects JSON and every other extension selects YAML. A trailing `.gz` gzips the
    /// inner format, so `data.gz` is the same as `data.yaml.gz`. `.xml` is rejected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let (inner, compressed) = match name.strip_suffix(".gz") {
            Some(inner) => (inner, true),
            None => (name.as_str(), false),
        };
        let format = match Path::new(inner).extension().and_then(|ext| ext.to_str()) {
            Some("json") => Format::Json,
            Some("xml") => return Err(Error::UnsupportedFormat(path.to_owned())),
            _ => Format::Yaml,
        };
        Ok(Self { format, compressed })
    }

    /// Serialize `value` into `path`.
    pub fn write<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> Result<()> {
        let path = path.as_ref();
        let text = match self.format {
            Format::Yaml => serde_yaml::to_string(value)?.into_bytes(),
            Format::Json => serde_json::to_vec_pretty(value)?,
        };
        let file = File::create(path).map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        if self.compressed {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            encoder.write_all(&text)?;
            encoder.finish()?.flush()?;
        } else {
            writer.write_all(&text)?;
            writer.flush()?;
        }
        debug!("Wrote {} bytes as {:?} to {}", text.len(), self, path.display());
        Ok(())
    }

    /// Deserialize a `T` from `path`.
    pub fn read<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        let mut text = vec![];
        if self.compressed {
            GzDecoder::new(reader).read_to_end(&mut text)?;
        } else {
            reader.read_to_end(&mut text)?;
        }
        debug!("Read {} bytes as {:?} from {}", text.len(), self, path.display());
        Ok(match self.format {
            Format::Yaml => serde_yaml::from_slice(&text)?,
            Format::Json => serde_json::from_slice(&text)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_of(name: &str) -> FileFormat {
        FileFormat::from_path(name).unwrap()
    }

    #[test]
    fn extension_picks_format() {
        assert_eq!(
            format_of("a.json"),
            FileFormat {
                format: Format::Json,
                compressed: false
            }
        );
        assert_eq!(format_of("dir/a.yaml").format, Format::Yaml);
        assert_eq!(format_of("a.YML").format, Format::Yaml);
        assert_eq!(format_of("a.txt").format, Format::Yaml);
        assert_eq!(format_of("noextension").format, Format::Yaml);
    }

    #[test]
    fn gz_suffix_compresses() {
        assert_eq!(
            format_of("a.json.gz"),
            FileFormat {
                format: Format::Json,
                compressed: true
            }
        );
        assert_eq!(
            format_of("a.gz"),
            FileFormat {
                format: Format::Yaml,
                compressed: true
            }
        );
    }

    #[test]
    fn xml_is_rejected() {
        assert!(matches!(
            FileFormat::from_path("somedata.xml.gz"),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
