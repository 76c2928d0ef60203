use serde::{Deserialize, Serialize};
use snafu::ensure;

use super::*;
use crate::store::Document;

/// A named media span. Before assembly into a [Reel], `end_timecode` is the clip's length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub name: String,
    pub description: String,
    pub standard: Standard,
    pub definition: Definition,
    pub start_timecode: Timecode,
    pub end_timecode: Timecode,
}

/// Serialized shape of a [Clip], as found in the clip catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRecord {
    pub name: String,
    pub description: String,
    pub standard: String,
    pub definition: String,
    pub start_timecode: String,
    pub end_timecode: String,
}

impl Clip {
    pub fn new(
        name: impl Into<String>, description: impl Into<String>, standard: Standard,
        definition: Definition, start_timecode: Timecode, end_timecode: Timecode,
    ) -> Result<Self> {
        for timecode in [&start_timecode, &end_timecode] {
            ensure!(
                timecode.standard == standard,
                StandardMismatchSnafu {
                    left: timecode.standard,
                    right: standard,
                }
            );
        }

        Ok(Self {
            name: name.into(),
            description: description.into(),
            standard,
            definition,
            start_timecode,
            end_timecode,
        })
    }

    /// Length of the clip, whether or not it has been placed on a reel.
    pub fn duration(&self) -> Result<Timecode> {
        self.end_timecode.subtract(&self.start_timecode)
    }

    pub fn from_record(record: &ClipRecord) -> Result<Self> {
        let standard: Standard = record.standard.parse()?;
        let definition: Definition = record.definition.parse()?;
        let start_timecode = Timecode::from_string(&record.start_timecode, standard)?;
        let end_timecode = Timecode::from_string(&record.end_timecode, standard)?;

        Self::new(
            record.name.clone(),
            record.description.clone(),
            standard,
            definition,
            start_timecode,
            end_timecode,
        )
    }

    pub fn to_record(&self) -> ClipRecord {
        ClipRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            standard: self.standard.name().to_string(),
            definition: self.definition.name().to_string(),
            start_timecode: self.start_timecode.to_string(),
            end_timecode: self.end_timecode.to_string(),
        }
    }
}

impl Document for Clip {
    type Record = ClipRecord;

    const KIND: &'static str = "clip";

    fn from_record(record: &Self::Record) -> Result<Self> {
        Clip::from_record(record)
    }

    fn to_record(&self) -> Self::Record {
        Clip::to_record(self)
    }
}
