use crate::error::{Error, Result};
use crate::restype::ResourceType;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

//===========================================================================//

/// The size of an ICONDIR (or GRPICONDIR) header, in bytes.
pub const ICONDIR_LEN: u64 = 6;

/// The size of the fields shared by ICONDIRENTRY and GRPICONDIRENTRY, in
/// bytes.
pub const ENTRY_COMMON_LEN: u64 = 12;

/// The size of an ICONDIRENTRY record in an ICO file, in bytes.
pub const ICONDIRENTRY_LEN: u64 = ENTRY_COMMON_LEN + 4;

//===========================================================================//

/// The header at the start of an ICO file, and of a group directory
/// resource.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirHeader {
    restype: ResourceType,
    count: u16,
}

impl IconDirHeader {
    /// Creates a header for `count` images of the given type.  Headers of
    /// either type can be written, but [`IconDirHeader::read`] only accepts
    /// icon directories.
    pub fn new(restype: ResourceType, count: u16) -> IconDirHeader {
        IconDirHeader { restype, count }
    }

    /// Returns the type of resource the directory holds.
    pub fn resource_type(&self) -> ResourceType {
        self.restype
    }

    /// Returns the number of images the directory lists.
    pub fn count(&self) -> u16 {
        self.count
    }

    pub(crate) fn set_count(&mut self, count: u16) {
        self.count = count;
    }

    /// Reads a header, rejecting anything that isn't an icon directory.
    pub fn read<R: Read>(mut reader: R) -> Result<IconDirHeader> {
        let mut buffer = [0u8; ICONDIR_LEN as usize];
        reader.read_exact(&mut buffer).map_err(truncated("ICONDIR"))?;
        let mut fields = &buffer[..];
        let reserved = fields.read_u16::<LittleEndian>()?;
        let restype = fields.read_u16::<LittleEndian>()?;
        let count = fields.read_u16::<LittleEndian>()?;
        match ResourceType::from_number(restype) {
            Some(ResourceType::Icon) if reserved == 0 => {
                Ok(IconDirHeader { restype: ResourceType::Icon, count })
            }
            Some(ResourceType::Cursor) if reserved == 0 => {
                format_error!("ICONDIR holds cursors, not icons")
            }
            _ => format_error!(
                "Bad magic number in ICONDIR \
                 (reserved was {}, type was {}; must be 0 and 1)",
                reserved,
                restype
            ),
        }
    }

    /// Writes the header out in its on-disk form.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(self.restype.number())?;
        writer.write_u16::<LittleEndian>(self.count)?;
        Ok(())
    }
}

//===========================================================================//

/// The display metadata that an ICO directory entry and a group directory
/// entry have in common.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirEntryCommon {
    width: u8,
    height: u8,
    color_count: u8,
    reserved: u8,
    planes: u16,
    bit_count: u16,
    bytes_in_res: u32,
}

impl IconDirEntryCommon {
    /// Creates a new metadata record.  Widths and heights of 256 or more are
    /// stored as zero, the way ICO files store them.
    pub fn new(
        width: u32,
        height: u32,
        color_count: u8,
        planes: u16,
        bit_count: u16,
        bytes_in_res: u32,
    ) -> IconDirEntryCommon {
        // A width/height byte of zero indicates a size of 256 or more.
        let width = if width > 255 { 0 } else { width as u8 };
        let height = if height > 255 { 0 } else { height as u8 };
        IconDirEntryCommon {
            width,
            height,
            color_count,
            reserved: 0,
            planes,
            bit_count,
            bytes_in_res,
        }
    }

    /// Returns the width of the image, in pixels, as recorded in the
    /// directory (a stored zero reads as 256).
    pub fn width(&self) -> u32 {
        if self.width == 0 {
            256
        } else {
            self.width as u32
        }
    }

    /// Returns the height of the image, in pixels, as recorded in the
    /// directory (a stored zero reads as 256).
    pub fn height(&self) -> u32 {
        if self.height == 0 {
            256
        } else {
            self.height as u32
        }
    }

    /// Returns the number of palette colors, or zero for images without a
    /// palette.
    pub fn color_count(&self) -> u8 {
        self.color_count
    }

    /// Returns the number of color planes.
    pub fn planes(&self) -> u16 {
        self.planes
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bit_count(&self) -> u16 {
        self.bit_count
    }

    /// Returns the length of the image payload, in bytes.
    pub fn bytes_in_res(&self) -> u32 {
        self.bytes_in_res
    }

    pub(crate) fn read<R: Read>(mut reader: R) -> io::Result<IconDirEntryCommon> {
        let width = reader.read_u8()?;
        let height = reader.read_u8()?;
        let color_count = reader.read_u8()?;
        let reserved = reader.read_u8()?;
        let planes = reader.read_u16::<LittleEndian>()?;
        let bit_count = reader.read_u16::<LittleEndian>()?;
        let bytes_in_res = reader.read_u32::<LittleEndian>()?;
        Ok(IconDirEntryCommon {
            width,
            height,
            color_count,
            reserved,
            planes,
            bit_count,
            bytes_in_res,
        })
    }

    pub(crate) fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.width)?;
        writer.write_u8(self.height)?;
        writer.write_u8(self.color_count)?;
        writer.write_u8(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.planes)?;
        writer.write_u16::<LittleEndian>(self.bit_count)?;
        writer.write_u32::<LittleEndian>(self.bytes_in_res)?;
        Ok(())
    }
}

//===========================================================================//

/// One image listed in an ICO file's directory: where its payload lives, and
/// how it is meant to be displayed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconImageDescriptor {
    common: IconDirEntryCommon,
    image_offset: u32,
}

impl IconImageDescriptor {
    /// Creates a descriptor for a payload stored at `image_offset`.
    pub fn new(
        common: IconDirEntryCommon,
        image_offset: u32,
    ) -> IconImageDescriptor {
        IconImageDescriptor { common, image_offset }
    }

    /// Returns the image's display metadata.
    pub fn common(&self) -> &IconDirEntryCommon {
        &self.common
    }

    /// Returns the byte offset of the payload within the ICO file.
    pub fn image_offset(&self) -> u32 {
        self.image_offset
    }

    /// Returns the length of the payload, in bytes.
    pub fn bytes_in_res(&self) -> u32 {
        self.common.bytes_in_res
    }

    /// Writes the ICONDIRENTRY record for this image.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        self.common.write(&mut writer)?;
        writer.write_u32::<LittleEndian>(self.image_offset)?;
        Ok(())
    }
}

//===========================================================================//

/// Reads the directory of an ICO file, returning one descriptor per image in
/// the order they are listed.  No image payload bytes are read.
pub fn decode_headers<R: Read>(
    mut reader: R,
) -> Result<Vec<IconImageDescriptor>> {
    let header = IconDirHeader::read(&mut reader)?;
    let num_entries = header.count() as usize;
    let mut descriptors = Vec::with_capacity(num_entries);
    for index in 0..num_entries {
        let mut buffer = [0u8; ICONDIRENTRY_LEN as usize];
        reader.read_exact(&mut buffer).map_err(truncated("ICONDIRENTRY"))?;
        let mut fields = &buffer[..];
        let common = IconDirEntryCommon::read(&mut fields)?;
        let image_offset = fields.read_u32::<LittleEndian>()?;
        if common.reserved != 0 {
            log::warn!(
                "ICONDIRENTRY {} has nonzero reserved byte ({})",
                index,
                common.reserved
            );
        }
        descriptors.push(IconImageDescriptor { common, image_offset });
    }
    Ok(descriptors)
}

// Running out of bytes inside the directory means the file isn't a complete
// ICO container, rather than that the file couldn't be read.
pub(crate) fn truncated(record: &'static str) -> impl Fn(io::Error) -> Error {
    move |error| {
        if error.kind() == io::ErrorKind::UnexpectedEof {
            Error::Format(format!("Truncated {} record", record))
        } else {
            Error::from(error)
        }
    }
}

//===========================================================================//


//===========================================================================//
