use std::{fmt, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwathError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("photon product missing these fields: {}", MissingList(.0))]
    MissingFields(Vec<&'static str>),

    #[error("invalid reference region table {path}, line {line}: {reason}")]
    RegionTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("correction series unusable: {0}")]
    Interp(&'static str),

    #[error("segment mapping failed: {0}")]
    Mapping(&'static str),

    #[error("projection unavailable: {0}")]
    Projection(&'static str),

    #[error("rotation fit failed: {0}")]
    Rotation(&'static str),

    #[error("invalid ground track '{0}'")]
    GroundTrack(String),

    #[error("field length mismatch, {field}: expected {expected}, got {actual}")]
    Length {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Returns a [`SwathError::Length`] unless `actual == expected`.
pub(crate) fn check_len(
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), SwathError> {
    if expected == actual {
        Ok(())
    } else {
        Err(SwathError::Length {
            field,
            expected,
            actual,
        })
    }
}

/// Formats missing field names as a numbered list.
struct MissingList<'a>(&'a [&'static str]);

impl fmt::Display for MissingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, field) in self.0.iter().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}) {field}", n + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SwathError;

    #[test]
    fn test_missing_fields_display() {
        let err = SwathError::MissingFields(vec!["Latitude (lat_ph)", "Height (h_ph)"]);
        assert_eq!(
            err.to_string(),
            "photon product missing these fields: 1) Latitude (lat_ph), 2) Height (h_ph)"
        );
    }
}
