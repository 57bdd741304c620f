//! A library for turning ICO files into the icon resources of a Windows
//! executable's resource section.
//!
//! Each image of an ICO file becomes an `RT_ICON` resource whose payload is a
//! view of the image's bytes in the file, and the file as a whole becomes one
//! `RT_GROUP_ICON` resource listing those images by ID.  Numeric IDs come from
//! an [`IdSource`] shared with the builders of any other resources in the same
//! table, so they never collide.
//!
//! # Example
//!
//! ```no_run
//! use ico_rsrc::{BuildSession, IconSpec, IdSequence, ResourceKind};
//!
//! let mut session = BuildSession::new(IdSequence::new());
//! let group = session.add(&IconSpec::named("app.ico", "APPICON"))?;
//! let table = session.table();
//! println!("{} resources, group {:?}", table.len(), group);
//! for icon in table.resources_of(ResourceKind::Icon) {
//!     println!("RT_ICON {}: {} bytes", icon.id(), icon.payload().size());
//! }
//! # Ok::<(), ico_rsrc::Error>(())
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod builder;
mod config;
mod error;
mod group;
mod icondir;
mod ident;
mod ids;
mod registry;
mod restype;
mod session;
mod source;

pub use crate::builder::{
    add_icon, add_icon_group, add_named_icon, assemble, GroupKey,
    StagedIconGroup,
};
pub use crate::config::IconSpec;
pub use crate::error::{Error, Result};
pub use crate::group::{GroupDirectory, GroupDirectoryEntry, GROUP_ENTRY_LEN};
pub use crate::icondir::{
    decode_headers, IconDirEntryCommon, IconDirHeader, IconImageDescriptor,
    ENTRY_COMMON_LEN, ICONDIRENTRY_LEN, ICONDIR_LEN,
};
pub use crate::ident::{DirString, ResourceId, MASK_NAME};
pub use crate::ids::{IdChannel, IdSequence, IdSource};
pub use crate::registry::{Payload, Resource, ResourceRegistry, ResourceTable};
pub use crate::restype::{ResourceKind, ResourceType};
pub use crate::session::BuildSession;
pub use crate::source::{FileSection, IconSource};
