use crate::builder::GroupKey;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

//===========================================================================//

/// One icon file to embed, and how its group resource should be addressed.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconSpec {
    path: PathBuf,
    group: GroupKey,
}

impl IconSpec {
    /// Creates a spec for an icon group addressed by `name`.
    pub fn named<P: Into<PathBuf>>(path: P, name: &str) -> IconSpec {
        IconSpec { path: path.into(), group: GroupKey::Named(name.to_string()) }
    }

    /// Creates a spec for an icon group addressed by a numeric ID.
    pub fn numeric<P: Into<PathBuf>>(path: P) -> IconSpec {
        IconSpec { path: path.into(), group: GroupKey::Numeric }
    }

    /// Parses a command-line style spec: `NAME=PATH` for a named group, or
    /// just `PATH` for a numbered one.
    pub fn parse(arg: &str) -> IconSpec {
        match arg.split_once('=') {
            Some((name, path)) => IconSpec::named(path, name),
            None => IconSpec::numeric(arg),
        }
    }

    /// Returns the path of the icon file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns how the group resource is addressed.
    pub fn group(&self) -> &GroupKey {
        &self.group
    }
}

//===========================================================================//


//===========================================================================//
