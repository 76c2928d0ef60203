use std::fmt;

use snafu::{ensure, OptionExt as _};

use super::{MalformedTimecodeSnafu, Result, Standard, StandardMismatchSnafu, TimecodeOverflowSnafu};

/// A broadcast timecode (`HH:MM:SS:FF`) whose frame component is interpreted under its [Standard].
///
/// Arithmetic is only defined between timecodes of the same standard. Mixing them is reported as
/// [ModelError::StandardMismatch](super::ModelError::StandardMismatch) instead of silently converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timecode {
    pub standard: Standard,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
}

impl Timecode {
    pub fn new(standard: Standard, hours: u64, minutes: u64, seconds: u64, frames: u64) -> Self {
        Self {
            standard,
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    /// `00:00:00:00` under the given standard.
    pub fn zero(standard: Standard) -> Self {
        Self::new(standard, 0, 0, 0, 0)
    }

    /// Absolute number of frames under this timecode's own standard, saturating at `u64::MAX`.
    ///
    /// Timecodes built by [Timecode::from_string] or by arithmetic always fit.
    pub fn total_frames(&self) -> u64 {
        self.checked_total_frames().unwrap_or(u64::MAX)
    }

    pub fn checked_total_frames(&self) -> Option<u64> {
        let total_seconds = self
            .hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)?;

        total_seconds
            .checked_mul(self.standard.rate())?
            .checked_add(self.frames)
    }

    fn frame_count(&self) -> Result<u64> {
        self.checked_total_frames().context(TimecodeOverflowSnafu {
            timecode: self.to_string(),
        })
    }

    /// Normalize a frame count into hours, minutes, seconds and frames.
    pub fn from_frames(total_frames: u64, standard: Standard) -> Self {
        let rate = standard.rate();
        let total_seconds = total_frames / rate;

        Self {
            standard,
            hours: total_seconds / 3600,
            minutes: total_seconds / 60 % 60,
            seconds: total_seconds % 60,
            frames: total_frames % rate,
        }
    }

    /// Parse `HH:MM:SS:FF`. Fields are not range-checked, only required to be integers, but the
    /// whole value must be countable in frames.
    pub fn from_string(input: &str, standard: Standard) -> Result<Self> {
        let fields = input
            .split(':')
            .map(|field| field.trim().parse::<u64>().ok())
            .collect::<Option<Vec<u64>>>()
            .context(MalformedTimecodeSnafu { input })?;

        match fields[..] {
            [hours, minutes, seconds, frames] => {
                let timecode = Self::new(standard, hours, minutes, seconds, frames);
                timecode.frame_count()?;
                Ok(timecode)
            }
            _ => MalformedTimecodeSnafu { input }.fail(),
        }
    }

    pub fn add(&self, other: &Timecode) -> Result<Self> {
        self.ensure_same_standard(other)?;
        let sum = self
            .frame_count()?
            .checked_add(other.frame_count()?)
            .context(TimecodeOverflowSnafu {
                timecode: format!("{self} + {other}"),
            })?;
        Ok(Self::from_frames(sum, self.standard))
    }

    /// Subtract `other`, clamping at `00:00:00:00` when `other` is the greater timecode.
    pub fn subtract(&self, other: &Timecode) -> Result<Self> {
        self.ensure_same_standard(other)?;

        let difference = match self.frame_count()?.checked_sub(other.frame_count()?) {
            Some(frames) => frames,
            None => {
                tracing::warn!(
                    minuend = %self,
                    subtrahend = %other,
                    "subtracting a greater timecode, clamping to zero"
                );
                0
            }
        };

        Ok(Self::from_frames(difference, self.standard))
    }

    /// Standard-aware equality. Comparing timecodes of different standards is an error, not `false`.
    pub fn equals(&self, other: &Timecode) -> Result<bool> {
        self.ensure_same_standard(other)?;
        Ok(self.to_string() == other.to_string())
    }

    fn ensure_same_standard(&self, other: &Timecode) -> Result<()> {
        ensure!(
            self.standard == other.standard,
            StandardMismatchSnafu {
                left: self.standard,
                right: other.standard,
            }
        );
        Ok(())
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}
