use crate::{FileFormat, Result};
use nalgebra::{DMatrix, Scalar};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{f64::consts::PI, fmt, path::Path};

/// A small record with one field of each scalar kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SomeData {
    #[serde(rename = "anInt")]
    pub an_int: i32,
    #[serde(rename = "aDouble")]
    pub a_double: f64,
    #[serde(rename = "aString")]
    pub a_string: String,
}

impl SomeData {
    pub fn sample() -> Self {
        Self {
            an_int: 97,
            a_double: PI,
            a_string: "mydata1234".to_owned(),
        }
    }
}

impl Default for SomeData {
    fn default() -> Self {
        Self {
            an_int: 1,
            a_double: 1.1,
            a_string: "default SomeData ctor".to_owned(),
        }
    }
}

impl fmt::Display for SomeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "anInt = {}, aDouble = {}, aString = \"{}\"",
            self.an_int, self.a_double, self.a_string
        )
    }
}

/// Matrix element types and their one-letter type tags.
pub trait Element: Scalar + Copy {
    const DT: &'static str;
}

impl Element for u8 {
    const DT: &'static str = "u";
}

impl Element for f64 {
    const DT: &'static str = "d";
}

/// A dense matrix as stored on disk: shape, element tag and row-major data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mat<T> {
    pub rows: usize,
    pub cols: usize,
    pub dt: String,
    pub data: Vec<T>,
}

impl<T: Element> Mat<T> {
    /// Back to a matrix, or `None` when the data does not fill the shape.
    pub fn to_matrix(&self) -> Option<DMatrix<T>> {
        (self.data.len() == self.rows * self.cols)
            .then(|| DMatrix::from_row_slice(self.rows, self.cols, &self.data))
    }
}

impl<T: Element> From<&DMatrix<T>> for Mat<T> {
    fn from(matrix: &DMatrix<T>) -> Self {
        Self {
            rows: matrix.nrows(),
            cols: matrix.ncols(),
            dt: T::DT.to_owned(),
            data: matrix.transpose().iter().copied().collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Mat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.data.chunks(self.cols.max(1)).enumerate() {
            if r > 0 {
                write!(f, ";\n ")?;
            }
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
        }
        write!(f, "]")
    }
}

/// The whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    pub some_integer: i32,
    pub string_sequence: Vec<String>,
    /// Named integers, kept in the order they were written.
    pub string_to_int_map: Map<String, Value>,
    pub uchar_eye: Mat<u8>,
    pub double_zeros: Mat<f64>,
    pub some_data: SomeData,
}

impl Storage {
    pub fn sample() -> Self {
        Self {
            some_integer: 100,
            string_sequence: ["image.jpg", "wild", "lena.jpg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            string_to_int_map: [("One", 1), ("Two", 2)]
                .into_iter()
                .map(|(name, value)| (name.to_owned(), Value::from(value)))
                .collect(),
            uchar_eye: Mat::from(&DMatrix::<u8>::identity(3, 3)),
            double_zeros: Mat::from(&DMatrix::<f64>::zeros(3, 1)),
            some_data: SomeData::sample(),
        }
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        FileFormat::from_path(&path)?.write(path, self)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        FileFormat::from_path(&path)?.read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat_is_row_major() {
        let matrix = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mat = Mat::from(&matrix);
        assert_eq!((mat.rows, mat.cols, mat.dt.as_str()), (2, 3, "d"));
        assert_eq!(mat.data, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(mat.to_matrix(), Some(matrix));
    }

    #[test]
    fn short_data_is_not_a_matrix() {
        let mat = Mat {
            rows: 2,
            cols: 2,
            dt: "u".to_owned(),
            data: vec![1u8, 2, 3],
        };
        assert_eq!(mat.to_matrix(), None);
    }

    #[test]
    fn mat_display() {
        let eye = Mat::from(&DMatrix::<u8>::identity(3, 3));
        assert_eq!(eye.to_string(), "[1, 0, 0;\n 0, 1, 0;\n 0, 0, 1]");
    }

    #[test]
    fn some_data_defaults() {
        let data = SomeData::default();
        assert_eq!(data.an_int, 1);
        assert_eq!(
            data.to_string(),
            "anInt = 1, aDouble = 1.1, aString = \"default SomeData ctor\""
        );
    }
}
