//! Slash-separated directory paths

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use super::error::{DomainError, DomainResult};

pub const SEPARATOR: &str = "/";

/// A parsed directory path: a non-empty list of non-empty segments,
/// starting at a top-level directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirPath {
    segments: Vec<String>,
}

impl DirPath {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.is_empty() {
            return Err(DomainError::invalid_argument("no directory path provided"));
        }
        let segments: Vec<String> = raw.split(SEPARATOR).map(str::to_string).collect();
        if let Some(position) = segments.iter().position(String::is_empty) {
            return Err(DomainError::invalid_argument(format!(
                "empty segment {} in path {}",
                position + 1,
                raw
            )));
        }
        Ok(Self { segments })
    }

    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> DomainResult<Self> {
        let joined = join(segments);
        Self::parse(&joined)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, the name of the directory the path points at.
    pub fn name(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }

    /// True if `self` is `other` or lies inside it, compared segment by
    /// segment so `a/bc` is not inside `a/b`.
    pub fn is_within(&self, other: &DirPath) -> bool {
        is_within(&self.segments, &other.segments)
    }
}

impl FromStr for DirPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DirPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join(&self.segments))
    }
}

impl AsRef<[String]> for DirPath {
    fn as_ref(&self) -> &[String] {
        &self.segments
    }
}

/// Segment-wise test whether `inner` equals `outer` or lies beneath it.
pub fn is_within<S: AsRef<str>, T: AsRef<str>>(inner: &[S], outer: &[T]) -> bool {
    inner.len() >= outer.len()
        && inner
            .iter()
            .zip(outer.iter())
            .all(|(i, o)| i.as_ref() == o.as_ref())
}

/// Join segments back into slash form.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments.iter().map(AsRef::<str>::as_ref).join(SEPARATOR)
}
