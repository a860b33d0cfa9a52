//! Low-level segment scanning and frame building.

use std::fmt::Write as _;

use crate::error::WireError;

/// Server token ending the session.
pub const SHUTDOWN: &str = "***shutdown***";
/// Server token restarting the race without tearing the session down.
pub const RESTART: &str = "***restart***";
/// Server acknowledgement of the init handshake.
pub const IDENTIFIED: &str = "***identified***";

/// What an inbound message turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerEvent<'a> {
    Shutdown,
    Restart,
    Identified,
    /// An ordinary sensor frame, to be decoded by [`crate::CarState::parse`].
    Frame(&'a str),
}

/// Classify an inbound message into lifecycle token or sensor frame.
///
/// Trailing NULs and whitespace are tolerated; some transports pad datagrams.
pub fn classify(msg: &str) -> ServerEvent<'_> {
    let trimmed = msg.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    match trimmed {
        SHUTDOWN => ServerEvent::Shutdown,
        RESTART => ServerEvent::Restart,
        IDENTIFIED => ServerEvent::Identified,
        _ => ServerEvent::Frame(trimmed),
    }
}

/// Iterator over `(name body)` segments of a frame.
pub struct Segments<'a> {
    rest: &'a str,
}

/// Scan a frame into its segments, yielding `(name, body)` pairs.
/// The body is the raw whitespace-separated value list and may be empty.
pub fn segments(input: &str) -> Segments<'_> {
    Segments { rest: input }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<(&'a str, &'a str), WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self
            .rest
            .trim_start_matches(|c: char| c == '\0' || c.is_whitespace());
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }
        let Some(after_open) = rest.strip_prefix('(') else {
            self.rest = "";
            return Some(Err(WireError::StrayText(
                rest.chars().take(16).collect::<String>(),
            )));
        };
        let Some(close) = after_open.find(')') else {
            self.rest = "";
            return Some(Err(WireError::UnterminatedSegment));
        };
        let inner = &after_open[..close];
        self.rest = &after_open[close + 1..];

        let inner = inner.trim();
        if inner.is_empty() {
            return Some(Err(WireError::EmptySegment));
        }
        match inner.split_once(char::is_whitespace) {
            Some((name, body)) => Some(Ok((name, body.trim_start()))),
            None => Some(Ok((inner, ""))),
        }
    }
}

/// Parse the first value of a segment body as `f32`.
pub fn scalar(key: &str, body: &str) -> Result<f32, WireError> {
    let token = body
        .split_whitespace()
        .next()
        .ok_or_else(|| WireError::MissingValue {
            key: key.to_string(),
        })?;
    token.parse::<f32>().map_err(|_| WireError::BadNumber {
        key: key.to_string(),
        value: token.to_string(),
    })
}

/// Parse a fixed-arity segment body into `out`, rejecting length mismatches.
pub fn fill<const N: usize>(
    key: &'static str,
    body: &str,
    out: &mut [f32; N],
) -> Result<(), WireError> {
    let mut got = 0usize;
    for token in body.split_whitespace() {
        if got < N {
            out[got] = token.parse::<f32>().map_err(|_| WireError::BadNumber {
                key: key.to_string(),
                value: token.to_string(),
            })?;
        }
        got += 1;
    }
    if got != N {
        return Err(WireError::WrongArity {
            key,
            expected: N,
            got,
        });
    }
    Ok(())
}

/// Build the one-shot init frame carrying the requested range-finder angles.
pub fn init_frame(angles: &[f32]) -> String {
    let mut out = String::from("(init");
    for a in angles {
        // Angles are whole degrees; keep the wire form integral.
        let _ = write!(out, " {a}");
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_adjacent_segments() {
        let mut it = segments("(angle 0.5)(gear 1)");
        assert_eq!(it.next().unwrap().unwrap(), ("angle", "0.5"));
        assert_eq!(it.next().unwrap().unwrap(), ("gear", "1"));
        assert!(it.next().is_none());
    }

    #[test]
    fn unterminated_segment_is_an_error() {
        let mut it = segments("(angle 0.5");
        assert_eq!(it.next().unwrap(), Err(WireError::UnterminatedSegment));
        assert!(it.next().is_none());
    }

    #[test]
    fn classifies_lifecycle_tokens() {
        assert_eq!(classify("***shutdown***\0"), ServerEvent::Shutdown);
        assert_eq!(classify(" ***restart***"), ServerEvent::Restart);
        assert_eq!(classify("***identified***"), ServerEvent::Identified);
        assert!(matches!(classify("(angle 0)"), ServerEvent::Frame(_)));
    }

    #[test]
    fn init_frame_lists_angles_in_order() {
        assert_eq!(init_frame(&[-90.0, 0.0, 90.0]), "(init -90 0 90)");
    }
}
