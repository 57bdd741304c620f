use crate::error::Result;
use crate::group::GroupDirectory;
use crate::icondir::{IconDirHeader, IconImageDescriptor, ICONDIRENTRY_LEN, ICONDIR_LEN};
use crate::ident::{DirString, ResourceId};
use crate::restype::{ResourceKind, ResourceType};
use crate::source::FileSection;
use std::io::Cursor;
use std::sync::{Arc, Mutex, PoisonError};

//===========================================================================//

/// The bytes of a registered resource.
#[derive(Clone, Debug)]
pub enum Payload {
    /// A byte range of an open source file, read when serialized.
    Section(FileSection),
    /// A group directory, serialized on demand.
    Group(GroupDirectory),
}

impl Payload {
    /// Returns the size of the payload, in bytes, without reading or
    /// serializing it.
    pub fn size(&self) -> u64 {
        match *self {
            Payload::Section(ref section) => section.len(),
            Payload::Group(ref group) => group.size(),
        }
    }

    /// Produces the payload bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match *self {
            Payload::Section(ref section) => section.read_to_vec(),
            Payload::Group(ref group) => {
                let mut data = Vec::with_capacity(group.size() as usize);
                group.write(&mut data)?;
                Ok(data)
            }
        }
    }
}

//===========================================================================//

/// A resource registered under a (kind, identifier) key.
#[derive(Clone, Debug)]
pub struct Resource {
    kind: ResourceKind,
    id: ResourceId,
    payload: Payload,
}

impl Resource {
    /// Creates a new resource.
    pub fn new(kind: ResourceKind, id: ResourceId, payload: Payload) -> Resource {
        Resource { kind, id, payload }
    }

    /// Returns the resource's type tag.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the resource's identifier.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns the resource's payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

//===========================================================================//

/// An append-only table that resources and resource names are registered
/// into.
pub trait ResourceRegistry {
    /// Registers a resource under `(kind, id)`.
    fn register_resource(
        &mut self,
        kind: ResourceKind,
        id: ResourceId,
        payload: Payload,
    );

    /// Appends a name to the string table, returning its index.
    fn append_string_table_entry(&mut self, entry: DirString) -> u32;

    /// Registers several resources in order.  Shared registries register the
    /// whole batch without letting other callers' resources in between.
    fn register_all(&mut self, resources: Vec<Resource>) {
        for resource in resources {
            self.register_resource(resource.kind, resource.id, resource.payload);
        }
    }
}

impl<R: ResourceRegistry + ?Sized> ResourceRegistry for &mut R {
    fn register_resource(
        &mut self,
        kind: ResourceKind,
        id: ResourceId,
        payload: Payload,
    ) {
        (**self).register_resource(kind, id, payload)
    }

    fn append_string_table_entry(&mut self, entry: DirString) -> u32 {
        (**self).append_string_table_entry(entry)
    }

    fn register_all(&mut self, resources: Vec<Resource>) {
        (**self).register_all(resources)
    }
}

impl<R: ResourceRegistry> ResourceRegistry for &Mutex<R> {
    fn register_resource(
        &mut self,
        kind: ResourceKind,
        id: ResourceId,
        payload: Payload,
    ) {
        let mut registry = self.lock().unwrap_or_else(PoisonError::into_inner);
        registry.register_resource(kind, id, payload)
    }

    fn append_string_table_entry(&mut self, entry: DirString) -> u32 {
        let mut registry = self.lock().unwrap_or_else(PoisonError::into_inner);
        registry.append_string_table_entry(entry)
    }

    fn register_all(&mut self, resources: Vec<Resource>) {
        let mut registry = self.lock().unwrap_or_else(PoisonError::into_inner);
        registry.register_all(resources)
    }
}

impl<R: ResourceRegistry> ResourceRegistry for Arc<Mutex<R>> {
    fn register_resource(
        &mut self,
        kind: ResourceKind,
        id: ResourceId,
        payload: Payload,
    ) {
        let mut shared: &Mutex<R> = self;
        shared.register_resource(kind, id, payload)
    }

    fn append_string_table_entry(&mut self, entry: DirString) -> u32 {
        let mut shared: &Mutex<R> = self;
        shared.append_string_table_entry(entry)
    }

    fn register_all(&mut self, resources: Vec<Resource>) {
        let mut shared: &Mutex<R> = self;
        shared.register_all(resources)
    }
}

//===========================================================================//

/// An in-memory resource table: the resources and string table of the
/// resource section being built.
#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
    resources: Vec<Resource>,
    strings: Vec<DirString>,
}

impl ResourceTable {
    /// Creates a new, empty table.
    pub fn new() -> ResourceTable {
        ResourceTable::default()
    }

    /// Returns the registered resources, in registration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Returns the string table.
    pub fn strings(&self) -> &[DirString] {
        &self.strings
    }

    /// Returns the string table entry at `index`, if any.
    pub fn string(&self, index: u32) -> Option<&DirString> {
        self.strings.get(index as usize)
    }

    /// Returns the number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if no resources or strings have been registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.strings.is_empty()
    }

    /// Looks up the resource registered under `(kind, id)`.
    pub fn find(&self, kind: ResourceKind, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|res| res.kind == kind && res.id == id)
    }

    /// Looks up a resource registered under the given name.
    pub fn find_named(&self, kind: ResourceKind, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|res| {
            res.kind == kind
                && match res.id {
                    ResourceId::Named(index) => self
                        .string(index)
                        .map_or(false, |string| string.to_string_lossy() == name),
                    ResourceId::Numeric(_) => false,
                }
        })
    }

    /// Returns the resources of the given kind, in registration order.
    pub fn resources_of(
        &self,
        kind: ResourceKind,
    ) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.iter().filter(move |res| res.kind == kind)
    }

    /// Rebuilds an ICO file from the `RT_GROUP_ICON` resource `group_id` and
    /// the `RT_ICON` resources it refers to.
    pub fn extract_icon(&self, group_id: ResourceId) -> Result<Vec<u8>> {
        let group = match self.find(ResourceKind::GroupIcon, group_id) {
            Some(resource) => match resource.payload {
                Payload::Group(ref group) => group.clone(),
                Payload::Section(ref section) => {
                    GroupDirectory::read(Cursor::new(section.read_to_vec()?))?
                }
            },
            None => format_error!("No RT_GROUP_ICON resource {}", group_id),
        };
        let mut images = Vec::with_capacity(group.len());
        for entry in group.entries() {
            let id = ResourceId::Numeric(entry.id());
            let data = match self.find(ResourceKind::Icon, id) {
                Some(resource) => resource.payload.to_bytes()?,
                None => format_error!(
                    "RT_GROUP_ICON resource {} refers to missing RT_ICON {}",
                    group_id,
                    id
                ),
            };
            if data.len() as u64 != entry.common().bytes_in_res() as u64 {
                format_error!(
                    "RT_ICON {} has {} bytes, but its group entry says {}",
                    id,
                    data.len(),
                    entry.common().bytes_in_res()
                );
            }
            images.push((entry.common(), data));
        }
        let mut output = Vec::<u8>::new();
        IconDirHeader::new(ResourceType::Icon, group.len() as u16)
            .write(&mut output)?;
        let mut data_offset = ICONDIR_LEN + ICONDIRENTRY_LEN * (images.len() as u64);
        for &(common, ref data) in images.iter() {
            IconImageDescriptor::new(*common, data_offset as u32)
                .write(&mut output)?;
            data_offset += data.len() as u64;
        }
        for (_, data) in images.iter() {
            output.extend_from_slice(data);
        }
        Ok(output)
    }
}

impl ResourceRegistry for ResourceTable {
    fn register_resource(
        &mut self,
        kind: ResourceKind,
        id: ResourceId,
        payload: Payload,
    ) {
        log::debug!(
            "registering {:?} resource {} ({} bytes)",
            kind,
            id,
            payload.size()
        );
        self.resources.push(Resource { kind, id, payload });
    }

    fn append_string_table_entry(&mut self, entry: DirString) -> u32 {
        let index = self.strings.len() as u32;
        self.strings.push(entry);
        index
    }
}

//===========================================================================//


//===========================================================================//
