//! Small parsing helpers used by command line options

use std::{num::ParseIntError, time::Duration};

/// Parses a Duration from a string containing seconds.
/// Useful for command line parsing
pub fn parse_seconds(src: &str) -> Result<Duration, ParseIntError> {
    let seconds = src.parse::<u64>()?;
    Ok(Duration::from_secs(seconds))
}

/// Parses a Duration from a string containing milliseconds
pub fn parse_millis(src: &str) -> Result<Duration, ParseIntError> {
    let millis = src.parse::<u64>()?;
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod does {
    use super::*;

    #[test]
    fn parse_durations() {
        assert_eq!(parse_seconds("3"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_millis("250"), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_millis("soon").is_err());
        assert!(parse_seconds("-1").is_err());
    }
}
