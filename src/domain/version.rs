//! PEP 440 version parsing and ordering
//!
//! Handles version formats:
//! - Release: `1.2.3`, `2024.1`, with optional epoch `1!2.0`
//! - Pre-release: `1.0a1`, `1.0b2`, `1.0rc1` (and `alpha`, `beta`, `c`, `pre`, `preview`)
//! - Post-release: `1.0.post1`, `1.0-1`, `1.0rev2`
//! - Development release: `1.0.dev3`
//! - Local version: `1.0+ubuntu.1`

use crate::error::VersionError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)[-_.]?(?P<pre_n>[0-9]+)?)?
        (?:
            -(?P<post_n1>[0-9]+)
            |
            [-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?
        )?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .unwrap()
});

/// Pre-release phase, ordered alpha < beta < release candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha,
    Beta,
    Rc,
}

impl PreRelease {
    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => PreRelease::Alpha,
            "b" | "beta" => PreRelease::Beta,
            _ => PreRelease::Rc,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PreRelease::Alpha => "a",
            PreRelease::Beta => "b",
            PreRelease::Rc => "rc",
        }
    }
}

/// One dot-separated segment of a local version label
///
/// Numeric segments sort after alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalSegment {
    Text(String),
    Number(u64),
}

/// A parsed PEP 440 version
///
/// Equality follows PEP 440 ordering, so `1.0` equals `1.0.0`.
#[derive(Debug, Clone)]
pub struct Version {
    pub epoch: u64,
    pub release: Vec<u64>,
    pub pre: Option<(PreRelease, u64)>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
    pub local: Vec<LocalSegment>,
}

/// Position of the pre-release part in the sort key
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    /// `1.0.dev1` sorts before `1.0a1`
    DevOnly,
    Pre(PreRelease, u64),
    Final,
}

/// Position of the dev part in the sort key
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(u64),
    Absent,
}

type SortKey<'a> = (
    u64,
    &'a [u64],
    PreKey,
    Option<u64>,
    DevKey,
    Option<&'a [LocalSegment]>,
);

impl Version {
    /// Parse a version string
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let caps = VERSION_RE
            .captures(input)
            .ok_or_else(|| VersionError::invalid(input))?;
        let number = |s: &str| s.parse::<u64>().map_err(|_| VersionError::invalid(input));

        let epoch = match caps.name("epoch") {
            Some(m) => number(m.as_str())?,
            None => 0,
        };

        let release = caps["release"]
            .split('.')
            .map(number)
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => {
                let n = match caps.name("pre_n") {
                    Some(m) => number(m.as_str())?,
                    None => 0,
                };
                Some((PreRelease::from_label(label.as_str()), n))
            }
            None => None,
        };

        let post = if let Some(m) = caps.name("post_n1") {
            Some(number(m.as_str())?)
        } else if caps.name("post_l").is_some() {
            match caps.name("post_n2") {
                Some(m) => Some(number(m.as_str())?),
                None => Some(0),
            }
        } else {
            None
        };

        let dev = if caps.name("dev_l").is_some() {
            match caps.name("dev_n") {
                Some(m) => Some(number(m.as_str())?),
                None => Some(0),
            }
        } else {
            None
        };

        let local = caps
            .name("local")
            .map(|m| {
                m.as_str()
                    .split(['.', '-', '_'])
                    .map(|segment| match segment.parse::<u64>() {
                        Ok(n) => LocalSegment::Number(n),
                        Err(_) => LocalSegment::Text(segment.to_ascii_lowercase()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// Returns true for pre-releases and development releases
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Returns true if the version carries a local label
    pub fn is_local(&self) -> bool {
        !self.local.is_empty()
    }

    fn sort_key(&self) -> SortKey<'_> {
        let significant = self
            .release
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |i| i + 1);

        let pre = match (self.pre, self.post, self.dev) {
            (Some((phase, n)), _, _) => PreKey::Pre(phase, n),
            (None, None, Some(_)) => PreKey::DevOnly,
            _ => PreKey::Final,
        };

        let dev = match self.dev {
            Some(n) => DevKey::Dev(n),
            None => DevKey::Absent,
        };

        let local = if self.local.is_empty() {
            None
        } else {
            Some(self.local.as_slice())
        };

        (
            self.epoch,
            &self.release[..significant],
            pre,
            self.post,
            dev,
            local,
        )
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

/// Renders the normalized form
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((phase, n)) = self.pre {
            write!(f, "{}{}", phase.label(), n)?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        if !self.local.is_empty() {
            let local: Vec<String> = self
                .local
                .iter()
                .map(|segment| match segment {
                    LocalSegment::Text(s) => s.clone(),
                    LocalSegment::Number(n) => n.to_string(),
                })
                .collect();
            write!(f, "+{}", local.join("."))?;
        }
        Ok(())
    }
}

/// Compare two version strings under PEP 440 ordering
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, VersionError> {
    Ok(Version::parse(a)?.cmp(&Version::parse(b)?))
}
