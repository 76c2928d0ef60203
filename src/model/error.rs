use snafu::{Location, Snafu};

use super::{Definition, Standard};
use crate::Located;

pub type Result<T, E = ModelError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ModelError {
    #[snafu(display("standards do not match ({left} and {right})"))]
    StandardMismatch {
        left: Standard,
        right: Standard,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("clip `{clip}` is {actual} but reel `{reel}` is {expected}"))]
    DefinitionMismatch {
        clip: String,
        reel: String,
        expected: Definition,
        actual: Definition,
        #[snafu(implicit)]
        location: Location,
    },

    /// A reel needs at least one clip to have a timeline at all
    #[snafu(display("reel `{reel}` requires at least 1 clip"))]
    EmptyReel {
        reel: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("`{input}` is not in the format HH:MM:SS:FF"))]
    MalformedTimecode {
        input: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("timecode `{timecode}` has more frames than can be counted"))]
    TimecodeOverflow {
        timecode: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("`{value}` is not a known {kind}"))]
    UnknownEnumValue {
        kind: &'static str,
        value: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl Located for ModelError {
    fn location(&self) -> Location {
        match self {
            ModelError::StandardMismatch { location, .. }
            | ModelError::DefinitionMismatch { location, .. }
            | ModelError::EmptyReel { location, .. }
            | ModelError::MalformedTimecode { location, .. }
            | ModelError::TimecodeOverflow { location, .. }
            | ModelError::UnknownEnumValue { location, .. } => *location,
        }
    }
}
