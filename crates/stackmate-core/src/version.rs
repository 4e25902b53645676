use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

/// Half-open version interval: `min` inclusive, `max` exclusive, unbounded
/// above when `max` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionWindow {
    pub min: Version,
    pub max: Option<Version>,
}

impl VersionWindow {
    pub fn new(min: Version, max: Option<Version>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, version: &Version) -> bool {
        if *version < self.min {
            return false;
        }
        match &self.max {
            Some(max) => version < max,
            None => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.max {
            Some(max) => *max <= self.min,
            None => false,
        }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let min = if other.min > self.min {
            other.min.clone()
        } else {
            self.min.clone()
        };
        let max = match (&self.max, &other.max) {
            (Some(a), Some(b)) => Some(if a < b { a.clone() } else { b.clone() }),
            (Some(a), None) => Some(a.clone()),
            (None, Some(b)) => Some(b.clone()),
            (None, None) => None,
        };
        Self { min, max }
    }
}

impl fmt::Display for VersionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.max {
            Some(max) => write!(f, ">={}, <{}", self.min, max),
            None => write!(f, ">={}", self.min),
        }
    }
}
