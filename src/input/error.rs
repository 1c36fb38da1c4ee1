//! Errors raised while reading configuration and reference files

use std::fmt;
use std::error::Error;

/// Broad category of an `InputError`
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum InputErrorKind {
    /// The file could not be opened or is not valid YAML
    File,
    /// A key along a colon-separated path is absent
    Location,
    /// A value was found, but not of the requested kind
    Conversion,
}

pub enum InputError {
    File,
    Location { path: String, missing: String },
    Conversion { path: String, field: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::File =>
                write!(f, "config or reference file is missing or malformed"),
            InputError::Location { path, missing } =>
                write!(f, "no '{}' key while looking up '{}'", missing, path),
            InputError::Conversion { path, field } =>
                write!(f, "'{}' in '{}' has an unusable value", field, path),
        }?;
        write!(f, " (run approx-pi --help for the available options)")
    }
}

impl fmt::Debug for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Error for InputError {}

impl InputError {
    pub fn file() -> Self {
        InputError::File
    }

    pub fn location(path: &str, missing: &str) -> Self {
        InputError::Location { path: path.to_owned(), missing: missing.to_owned() }
    }

    pub fn conversion(path: &str, field: &str) -> Self {
        InputError::Conversion { path: path.to_owned(), field: field.to_owned() }
    }

    pub fn kind(&self) -> InputErrorKind {
        match self {
            InputError::File => InputErrorKind::File,
            InputError::Location { .. } => InputErrorKind::Location,
            InputError::Conversion { .. } => InputErrorKind::Conversion,
        }
    }
}
