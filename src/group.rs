use crate::error::Result;
use crate::icondir::{
    truncated, IconDirEntryCommon, IconDirHeader, ENTRY_COMMON_LEN, ICONDIR_LEN,
};
use crate::restype::ResourceType;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

//===========================================================================//

/// The size of a GRPICONDIRENTRY record, in bytes.
pub const GROUP_ENTRY_LEN: u64 = ENTRY_COMMON_LEN + 2;

//===========================================================================//

/// One image listed in a group directory: its display metadata plus the ID of
/// the `RT_ICON` resource holding its bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct GroupDirectoryEntry {
    common: IconDirEntryCommon,
    id: u16,
}

impl GroupDirectoryEntry {
    /// Creates an entry pointing at the `RT_ICON` resource `id`.
    pub fn new(common: IconDirEntryCommon, id: u16) -> GroupDirectoryEntry {
        GroupDirectoryEntry { common, id }
    }

    /// Returns the image's display metadata.
    pub fn common(&self) -> &IconDirEntryCommon {
        &self.common
    }

    /// Returns the numeric ID of the referenced `RT_ICON` resource.
    pub fn id(&self) -> u16 {
        self.id
    }
}

//===========================================================================//

/// The contents of an `RT_GROUP_ICON` resource: an index of the `RT_ICON`
/// resources that together make up one multi-resolution icon.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct GroupDirectory {
    header: IconDirHeader,
    entries: Vec<GroupDirectoryEntry>,
}

impl GroupDirectory {
    /// Creates a new, empty group directory.
    pub fn new() -> GroupDirectory {
        GroupDirectory {
            header: IconDirHeader::new(ResourceType::Icon, 0),
            entries: Vec::new(),
        }
    }

    /// Creates an empty group directory with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> GroupDirectory {
        GroupDirectory {
            header: IconDirHeader::new(ResourceType::Icon, 0),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the directory header.
    pub fn header(&self) -> &IconDirHeader {
        &self.header
    }

    /// Returns the entries, in the order the images were added.
    pub fn entries(&self) -> &[GroupDirectoryEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the IDs of the referenced `RT_ICON` resources, in order.
    pub fn ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.iter().map(GroupDirectoryEntry::id)
    }

    /// Appends an entry, keeping the header's image count in step.  Panics if
    /// the directory already holds `u16::MAX` entries.
    pub fn push(&mut self, common: IconDirEntryCommon, id: u16) {
        if self.entries.len() >= u16::MAX as usize {
            panic!(
                "Too many entries in GroupDirectory (max is {})",
                u16::MAX
            );
        }
        self.entries.push(GroupDirectoryEntry { common, id });
        self.header.set_count(self.entries.len() as u16);
    }

    /// Returns the serialized size of the directory, in bytes.
    pub fn size(&self) -> u64 {
        ICONDIR_LEN + GROUP_ENTRY_LEN * (self.entries.len() as u64)
    }

    /// Reads a serialized group directory.
    pub fn read<R: Read>(mut reader: R) -> Result<GroupDirectory> {
        let header = IconDirHeader::read(&mut reader)?;
        let mut group = GroupDirectory::with_capacity(header.count() as usize);
        for _ in 0..header.count() {
            let mut buffer = [0u8; GROUP_ENTRY_LEN as usize];
            reader
                .read_exact(&mut buffer)
                .map_err(truncated("GRPICONDIRENTRY"))?;
            let mut fields = &buffer[..];
            let common = IconDirEntryCommon::read(&mut fields)?;
            let id = fields.read_u16::<LittleEndian>()?;
            group.push(common, id);
        }
        Ok(group)
    }

    /// Writes the directory out in its resource form.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        self.header.write(&mut writer)?;
        for entry in self.entries.iter() {
            entry.common.write(&mut writer)?;
            writer.write_u16::<LittleEndian>(entry.id)?;
        }
        Ok(())
    }
}

impl Default for GroupDirectory {
    fn default() -> GroupDirectory {
        GroupDirectory::new()
    }
}

//===========================================================================//


//===========================================================================//
