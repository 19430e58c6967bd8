//! Reading distance information and writing hierarchies.
//!
//! Input is a JSON record:
//!
//! ```json
//! {
//!   "charset": "latin",
//!   "fonts": [{ "name": "Futura", "family": "sans" }, { "name": "Didot" }],
//!   "distances": [[0.0, 0.7], [0.7, 0.0]]
//! }
//! ```
//!
//! Only `name` is read from each font; everything else rides along in
//! [`FontRecord::metadata`]. Output is the hierarchy as nested arrays of
//! names, pretty-printed.

use crate::distance::DistanceIndex;
use crate::error::Result;
use crate::hierarchy::ClusterHierarchy;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// One entity of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRecord {
    /// Unique identifier.
    pub name: String,
    /// Everything else in the record, untouched.
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// The input record: entities plus a matrix aligned with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceInformation {
    /// Character set the distances were measured on, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    /// Entities, in matrix order.
    pub fonts: Vec<FontRecord>,
    /// `fonts.len()` rows of `fonts.len()` distances.
    pub distances: Vec<Vec<f64>>,
}

impl DistanceInformation {
    /// Parse from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Entity names, in matrix order.
    pub fn names(&self) -> Vec<String> {
        self.fonts.iter().map(|f| f.name.clone()).collect()
    }

    /// Build a validated index without consuming the record.
    pub fn to_index(&self) -> Result<DistanceIndex> {
        DistanceIndex::new(self.names(), self.distances.clone())
    }

    /// Build a validated index, consuming the record.
    pub fn into_index(self) -> Result<DistanceIndex> {
        let names = self.fonts.into_iter().map(|f| f.name).collect();
        DistanceIndex::new(names, self.distances)
    }
}

/// Write a hierarchy as pretty JSON followed by a newline.
pub fn write_hierarchy<W: Write, T: Serialize>(
    mut writer: W,
    hierarchy: &ClusterHierarchy<T>,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, hierarchy)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a hierarchy to a file, replacing it.
pub fn save_hierarchy<T: Serialize>(
    path: impl AsRef<Path>,
    hierarchy: &ClusterHierarchy<T>,
) -> Result<()> {
    let file = File::create(path)?;
    write_hierarchy(BufWriter::new(file), hierarchy)
}
