#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// The type of resource stored in an ICO/CUR container, as recorded in the
/// second field of its directory header.
///
/// Only icon directories are read.  `Cursor` is there so that
/// [`IconDirHeader::new`](crate::IconDirHeader::new) can write a CUR header,
/// and so that a CUR file handed to the decoder is named as such in its error.
pub enum ResourceType {
    /// Plain images (ICO files)
    Icon,
    /// Images with cursor hotspots (CUR files)
    Cursor,
}

impl ResourceType {
    pub(crate) fn from_number(number: u16) -> Option<ResourceType> {
        match number {
            1 => Some(ResourceType::Icon),
            2 => Some(ResourceType::Cursor),
            _ => None,
        }
    }

    pub(crate) fn number(&self) -> u16 {
        match *self {
            ResourceType::Icon => 1,
            ResourceType::Cursor => 2,
        }
    }
}

//===========================================================================//

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
/// A resource type tag of the PE resource format (the `RT_*` constants).
pub enum ResourceKind {
    /// `RT_CURSOR`: a single cursor image
    Cursor,
    /// `RT_ICON`: a single icon image
    Icon,
    /// `RT_GROUP_CURSOR`: a directory of cursor images
    GroupCursor,
    /// `RT_GROUP_ICON`: a directory of icon images
    GroupIcon,
    /// `RT_VERSION`: version information
    Version,
    /// `RT_MANIFEST`: a side-by-side assembly manifest
    Manifest,
}

impl ResourceKind {
    /// Returns the kind with the given `RT_*` number, if it is one this
    /// crate knows about.
    pub fn from_number(number: u16) -> Option<ResourceKind> {
        match number {
            1 => Some(ResourceKind::Cursor),
            3 => Some(ResourceKind::Icon),
            12 => Some(ResourceKind::GroupCursor),
            14 => Some(ResourceKind::GroupIcon),
            16 => Some(ResourceKind::Version),
            24 => Some(ResourceKind::Manifest),
            _ => None,
        }
    }

    /// Returns the `RT_*` number of this kind.
    pub fn number(&self) -> u16 {
        match *self {
            ResourceKind::Cursor => 1,
            ResourceKind::Icon => 3,
            ResourceKind::GroupCursor => 12,
            ResourceKind::GroupIcon => 14,
            ResourceKind::Version => 16,
            ResourceKind::Manifest => 24,
        }
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{ResourceKind, ResourceType};

    #[test]
    fn resource_type_round_trip() {
        let restypes = &[ResourceType::Icon, ResourceType::Cursor];
        for &restype in restypes.iter() {
            assert_eq!(
                ResourceType::from_number(restype.number()),
                Some(restype)
            );
        }
    }

    #[test]
    fn resource_kind_numbers() {
        assert_eq!(ResourceKind::Icon.number(), 3);
        assert_eq!(ResourceKind::GroupIcon.number(), 14);
        assert_eq!(ResourceKind::from_number(14), Some(ResourceKind::GroupIcon));
        assert_eq!(ResourceKind::from_number(2), None);
    }
}

//===========================================================================//
