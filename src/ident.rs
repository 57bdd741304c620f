use crate::error::Result;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

//===========================================================================//

/// The bit that marks a 32-bit resource identifier as a string table index
/// rather than a literal numeric ID.
pub const MASK_NAME: u32 = 0x8000_0000;

//===========================================================================//

/// How a resource is addressed within its type: by numeric ID, or by name.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ResourceId {
    /// A literal 16-bit ID.
    Numeric(u16),
    /// An index into the resource table's string table.
    Named(u32),
}

impl ResourceId {
    /// Returns the 32-bit identifier as stored in a resource directory entry.
    /// Named identifiers have [`MASK_NAME`] set.
    pub fn raw(&self) -> u32 {
        match *self {
            ResourceId::Numeric(id) => id as u32,
            ResourceId::Named(index) => index | MASK_NAME,
        }
    }

    /// Parses a 32-bit identifier.  Returns `None` for unmasked values that
    /// don't fit in 16 bits.
    pub fn from_raw(raw: u32) -> Option<ResourceId> {
        if raw & MASK_NAME != 0 {
            Some(ResourceId::Named(raw & !MASK_NAME))
        } else if raw <= u16::MAX as u32 {
            Some(ResourceId::Numeric(raw as u16))
        } else {
            None
        }
    }

    /// Returns true if this identifier refers to the string table.
    pub fn is_named(&self) -> bool {
        matches!(self, ResourceId::Named(_))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResourceId::Numeric(id) => write!(formatter, "{}", id),
            ResourceId::Named(index) => write!(formatter, "#str{}", index),
        }
    }
}

//===========================================================================//

/// A length-prefixed UTF-16 string, as stored in a resource directory's
/// string table.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DirString {
    len: u16,
    chars: Vec<u16>,
}

impl DirString {
    /// Encodes a resource name.  The name must not contain NUL characters,
    /// and must fit in `u16::MAX` UTF-16 code units.  An empty name encodes
    /// to a zero-length string.
    pub fn encode(name: &str) -> Result<DirString> {
        if name.contains('\0') {
            encoding_error!("Resource name {:?} contains a NUL character", name);
        }
        let chars: Vec<u16> = name.encode_utf16().collect();
        if chars.len() > u16::MAX as usize {
            encoding_error!(
                "Resource name is too long ({} UTF-16 code units, max is {})",
                chars.len(),
                u16::MAX
            );
        }
        Ok(DirString { len: chars.len() as u16, chars })
    }

    /// Returns the number of UTF-16 code units, not counting any terminator.
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Returns true if the string has no code units.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the UTF-16 code units.
    pub fn chars(&self) -> &[u16] {
        &self.chars
    }

    /// Decodes the string, replacing invalid code units.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.chars)
    }
}

//===========================================================================//


//===========================================================================//
