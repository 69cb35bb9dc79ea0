use crate::{Error, FileFormat, Mat, Result, SomeData};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fmt, path::Path};

/// A parsed file as an untyped node tree.
///
/// YAML and JSON both land in the same [`Value`] tree, so the node checks below do not care
/// which format the file was written in.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_value(FileFormat::from_path(&path)?.read(path)?))
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn node(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn read_integer(&self, key: &str) -> Result<i64> {
        self.node(key)
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::NotAnInteger(key.to_owned()))
    }

    pub fn read_string_sequence(&self, key: &str) -> Result<Vec<String>> {
        let sequence = self
            .node(key)
            .and_then(Value::as_array)
            .ok_or_else(|| Error::NotASequence(key.to_owned()))?;
        sequence
            .iter()
            .map(|element| {
                element
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| Error::NotAString(key.to_owned()))
            })
            .collect()
    }

    /// The entries of a map of named integers, in file order.
    pub fn read_string_to_int_map(&self, key: &str) -> Result<Vec<(String, i64)>> {
        let map = self
            .node(key)
            .and_then(Value::as_object)
            .ok_or_else(|| Error::NotAMap(key.to_owned()))?;
        map.iter()
            .map(|(name, value)| {
                value
                    .as_i64()
                    .map(|value| (name.clone(), value))
                    .ok_or_else(|| Error::NotAnInteger(format!("{}.{}", key, name)))
            })
            .collect()
    }

    /// Read a typed node, falling back to `T::default()` when the key is absent.
    pub fn read<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.node(key) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(node) => Ok(serde_json::from_value(node.clone())?),
        }
    }

    /// Check and read every node, in the order they were written.
    pub fn read_back(&self) -> Result<ReadBack> {
        Ok(ReadBack {
            some_integer: self.read_integer("someInteger")?,
            string_sequence: self.read_string_sequence("stringSequence")?,
            string_to_int_map: self.read_string_to_int_map("stringToIntMap")?,
            uchar_eye: self.read("ucharEye")?,
            double_zeros: self.read("doubleZeros")?,
            some_data: self.read("someData")?,
            no_thing: self.read("no thing")?,
        })
    }
}

/// Everything read back from a document, printable in the demo's report format.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadBack {
    pub some_integer: i64,
    pub string_sequence: Vec<String>,
    pub string_to_int_map: Vec<(String, i64)>,
    pub uchar_eye: Mat<u8>,
    pub double_zeros: Mat<f64>,
    pub some_data: SomeData,
    /// What reading the absent `"no thing"` key produced.
    pub no_thing: SomeData,
}

impl fmt::Display for ReadBack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "someInteger = {}", self.some_integer)?;
        write!(f, "stringSequence = [")?;
        for s in &self.string_sequence {
            write!(f, " \"{}\"", s)?;
        }
        writeln!(f, " ]")?;
        write!(f, "stringToIntMap = {{")?;
        for (ix, (name, value)) in self.string_to_int_map.iter().enumerate() {
            let separator = if ix == 0 { " " } else { ", " };
            write!(f, "{}\"{}\" {}", separator, name, value)?;
        }
        writeln!(f, " }}")?;
        writeln!(f)?;
        writeln!(f, "ucharEye = \n{}", self.uchar_eye)?;
        writeln!(f, "doubleZeros = \n{}", self.double_zeros)?;
        writeln!(f)?;
        writeln!(f, "someData = {}", self.some_data)?;
        writeln!(f)?;
        writeln!(f, "Read 'no thing' into a SomeData for default.")?;
        write!(f, "someData: {}", self.no_thing)
    }
}
