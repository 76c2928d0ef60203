use serde::{Deserialize, Serialize};
use snafu::{ensure, OptionExt as _};

use super::*;
use crate::store::Document;

/// Clips laid end to end on one continuous timeline.
///
/// A `Reel` only exists in its assembled form: every clip's timecodes are absolute positions on
/// the reel and `duration` is the end of the last clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reel {
    pub name: String,
    pub standard: Standard,
    pub definition: Definition,
    clips: Vec<Clip>,
    duration: Timecode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelRecord {
    pub name: String,
    pub standard: String,
    pub definition: String,
    pub clips: Vec<ClipRecord>,
    pub duration: String,
}

impl Reel {
    /// Validate and assemble `clips` in order.
    ///
    /// The reel owns its clips, so callers holding catalog entries pass clones and the catalog is
    /// never rewritten. Nothing is assembled unless every clip passes validation.
    pub fn new(
        name: impl Into<String>, standard: Standard, definition: Definition, mut clips: Vec<Clip>,
    ) -> Result<Self> {
        let name = name.into();
        validate(&name, standard, definition, &clips)?;

        let mut cursor = Timecode::zero(standard);
        for clip in clips.iter_mut() {
            let end = clip.end_timecode.add(&cursor)?;
            clip.start_timecode = cursor;
            clip.end_timecode = end;
            cursor = end;
        }

        Ok(Self {
            name,
            standard,
            definition,
            clips,
            duration: cursor,
        })
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Total length of the reel.
    pub fn get_duration(&self) -> Timecode {
        self.duration
    }

    /// Restore a reel that was already assembled when it was saved.
    ///
    /// Clip positions are taken as stored rather than assembled again, which would push every clip
    /// after the first further down the timeline. The stored duration is recomputed.
    pub fn from_record(record: &ReelRecord) -> Result<Self> {
        let standard: Standard = record.standard.parse()?;
        let definition: Definition = record.definition.parse()?;
        let clips = record
            .clips
            .iter()
            .map(Clip::from_record)
            .collect::<Result<Vec<_>>>()?;

        let duration = validate(&record.name, standard, definition, &clips)?.end_timecode;

        Ok(Self {
            name: record.name.clone(),
            standard,
            definition,
            clips,
            duration,
        })
    }

    pub fn to_record(&self) -> ReelRecord {
        ReelRecord {
            name: self.name.clone(),
            standard: self.standard.name().to_string(),
            definition: self.definition.name().to_string(),
            clips: self.clips.iter().map(Clip::to_record).collect(),
            duration: self.duration.to_string(),
        }
    }
}

/// Check the reel invariants and hand back the last clip.
fn validate<'a>(
    reel: &str, standard: Standard, definition: Definition, clips: &'a [Clip],
) -> Result<&'a Clip> {
    let last = clips.last().context(EmptyReelSnafu { reel })?;

    for clip in clips {
        ensure!(
            clip.standard == standard,
            StandardMismatchSnafu {
                left: clip.standard,
                right: standard,
            }
        );
        ensure!(
            clip.definition == definition,
            DefinitionMismatchSnafu {
                clip: &clip.name,
                reel,
                expected: definition,
                actual: clip.definition,
            }
        );
    }

    Ok(last)
}

impl Document for Reel {
    type Record = ReelRecord;

    const KIND: &'static str = "reel";

    fn from_record(record: &Self::Record) -> Result<Self> {
        Reel::from_record(record)
    }

    fn to_record(&self) -> Self::Record {
        Reel::to_record(self)
    }
}
