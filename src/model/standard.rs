use std::fmt;
use std::str::FromStr;

use snafu::OptionExt as _;

use super::{ModelError, UnknownEnumValueSnafu};

/// Broadcast frame-rate standard. Every [Timecode](super::Timecode) carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Standard {
    PAL,
    NTSC,
}

const STANDARDS: [(&str, Standard); 2] = [("PAL", Standard::PAL), ("NTSC", Standard::NTSC)];

impl Standard {
    /// Frames per second.
    pub const fn rate(self) -> u64 {
        match self {
            Standard::PAL => 25,
            Standard::NTSC => 30,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Standard::PAL => "PAL",
            Standard::NTSC => "NTSC",
        }
    }
}

impl FromStr for Standard {
    type Err = ModelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        STANDARDS
            .iter()
            .find(|(name, _)| *name == input)
            .map(|(_, standard)| *standard)
            .context(UnknownEnumValueSnafu {
                kind: "standard",
                value: input,
            })
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolution class. Only used for compatibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Definition {
    HD,
    SD,
}

const DEFINITIONS: [(&str, Definition); 2] = [("HD", Definition::HD), ("SD", Definition::SD)];

impl Definition {
    pub const fn name(self) -> &'static str {
        match self {
            Definition::HD => "HD",
            Definition::SD => "SD",
        }
    }
}

impl FromStr for Definition {
    type Err = ModelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        DEFINITIONS
            .iter()
            .find(|(name, _)| *name == input)
            .map(|(_, definition)| *definition)
            .context(UnknownEnumValueSnafu {
                kind: "definition",
                value: input,
            })
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_by_name() {
        assert_eq!("PAL".parse::<Standard>().unwrap(), Standard::PAL);
        assert_eq!("NTSC".parse::<Standard>().unwrap(), Standard::NTSC);
        assert_eq!("HD".parse::<Definition>().unwrap(), Definition::HD);
        assert_eq!("SD".parse::<Definition>().unwrap(), Definition::SD);
    }

    #[test]
    fn unknown_names_are_rejected() {
        for input in ["SECAM", "pal", "25", ""] {
            let result = input.parse::<Standard>();
            assert!(
                matches!(result, Err(ModelError::UnknownEnumValue { kind: "standard", .. })),
                "`{input}` should not resolve to a standard"
            );
        }

        let result = "4K".parse::<Definition>();
        assert!(matches!(
            result,
            Err(ModelError::UnknownEnumValue { kind: "definition", .. })
        ));
    }

    #[test]
    fn frame_rates() {
        assert_eq!(Standard::PAL.rate(), 25);
        assert_eq!(Standard::NTSC.rate(), 30);
    }
}
