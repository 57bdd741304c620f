use crate::error::Result;
use crate::group::GroupDirectory;
use crate::icondir::IconImageDescriptor;
use crate::ident::{DirString, ResourceId};
use crate::ids::IdSource;
use crate::registry::{Payload, Resource, ResourceRegistry};
use crate::restype::ResourceKind;
use crate::source::IconSource;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;

//===========================================================================//

/// How the `RT_GROUP_ICON` resource for an icon file is addressed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum GroupKey {
    /// By name, through a new string table entry.
    Named(String),
    /// By one more numeric ID, drawn after those of the images.
    Numeric,
}

//===========================================================================//

/// The resources assembled from one icon file, not yet registered.
#[derive(Clone, Debug)]
pub struct StagedIconGroup {
    images: Vec<Resource>,
    group: GroupDirectory,
}

impl StagedIconGroup {
    /// Returns the group directory listing the staged images.
    pub fn group(&self) -> &GroupDirectory {
        &self.group
    }

    /// Returns the staged `RT_ICON` resources, in directory order.
    pub fn images(&self) -> &[Resource] {
        &self.images
    }

    /// Returns true if the icon file had no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Registers the images, then the group under `group_id`, as one batch.
    fn commit<R>(self, registry: &mut R, group_id: ResourceId)
    where
        R: ResourceRegistry + ?Sized,
    {
        let mut resources = self.images;
        resources.push(Resource::new(
            ResourceKind::GroupIcon,
            group_id,
            Payload::Group(self.group),
        ));
        registry.register_all(resources);
    }
}

//===========================================================================//

/// Assigns each image of `source` a fresh ID and stages it as an `RT_ICON`
/// resource viewing the image's bytes, building up the group directory that
/// lists them.
///
/// Nothing is registered; a failure part way through leaves no trace other
/// than the IDs already drawn.  Every image's byte range is checked against
/// the length of the source, so that payloads which can't be read are
/// reported now rather than when the resource table is serialized.
pub fn assemble<S>(
    source: &Arc<IconSource>,
    descriptors: &[IconImageDescriptor],
    ids: &S,
) -> Result<StagedIconGroup>
where
    S: IdSource + ?Sized,
{
    let mut staged = StagedIconGroup {
        images: Vec::with_capacity(descriptors.len()),
        group: GroupDirectory::with_capacity(descriptors.len()),
    };
    if descriptors.is_empty() {
        return Ok(staged);
    }
    let source_len = source.byte_len()?;
    for descriptor in descriptors {
        let id = ids.next_id()?;
        let offset = descriptor.image_offset() as u64;
        let len = descriptor.bytes_in_res() as u64;
        if offset + len > source_len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Image data at {}..{} runs past the end of {} ({} bytes)",
                    offset,
                    offset + len,
                    source.name(),
                    source_len
                ),
            )
            .into());
        }
        staged.images.push(Resource::new(
            ResourceKind::Icon,
            ResourceId::Numeric(id),
            Payload::Section(source.section(offset, len)),
        ));
        staged.group.push(*descriptor.common(), id);
    }
    Ok(staged)
}

/// Registers every image of `source` as an `RT_ICON` resource, plus one
/// `RT_GROUP_ICON` resource listing them under the identifier `key` asks
/// for.  Returns the group's identifier, or `None` if the file has no
/// images (in which case nothing at all is registered).
pub fn add_icon_group<R, S>(
    registry: &mut R,
    source: &Arc<IconSource>,
    key: &GroupKey,
    ids: &S,
) -> Result<Option<ResourceId>>
where
    R: ResourceRegistry + ?Sized,
    S: IdSource + ?Sized,
{
    let descriptors = source.decode_headers()?;
    let staged = assemble(source, &descriptors, ids)?;
    if staged.is_empty() {
        log::debug!("{} has no images; no icon group added", source.name());
        return Ok(None);
    }
    let group_id = match *key {
        GroupKey::Named(ref name) => {
            log::info!("icon group is {}", name);
            let string = DirString::encode(name)?;
            ResourceId::Named(registry.append_string_table_entry(string))
        }
        GroupKey::Numeric => ResourceId::Numeric(ids.next_id()?),
    };
    log::debug!(
        "adding icon group {} with {} images from {}",
        group_id,
        staged.group.len(),
        source.name()
    );
    staged.commit(registry, group_id);
    Ok(Some(group_id))
}

/// Like [`add_icon_group`], with the group addressed by `name`.
pub fn add_named_icon<R, S>(
    registry: &mut R,
    source: &Arc<IconSource>,
    name: &str,
    ids: &S,
) -> Result<Option<ResourceId>>
where
    R: ResourceRegistry + ?Sized,
    S: IdSource + ?Sized,
{
    add_icon_group(registry, source, &GroupKey::Named(name.to_string()), ids)
}

/// Like [`add_icon_group`], with the group addressed by a numeric ID.
pub fn add_icon<R, S>(
    registry: &mut R,
    source: &Arc<IconSource>,
    ids: &S,
) -> Result<Option<ResourceId>>
where
    R: ResourceRegistry + ?Sized,
    S: IdSource + ?Sized,
{
    add_icon_group(registry, source, &GroupKey::Numeric, ids)
}

//===========================================================================//


//===========================================================================//
