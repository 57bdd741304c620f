use crate::builder::{self, GroupKey};
use crate::config::IconSpec;
use crate::error::Result;
use crate::ident::ResourceId;
use crate::ids::IdSource;
use crate::registry::ResourceTable;
use crate::source::IconSource;
use std::path::Path;
use std::sync::Arc;

//===========================================================================//

/// The state of one resource section build: the resource table, the ID
/// source its numeric IDs come from, and every icon file opened for it.
///
/// The session owns the opened files.  Registered icon payloads read from
/// them lazily, so they are only let go of by [`BuildSession::finish`] (or by
/// dropping the session) once the table has been serialized.
#[derive(Debug)]
pub struct BuildSession<S: IdSource> {
    table: ResourceTable,
    ids: S,
    sources: Vec<Arc<IconSource>>,
}

impl<S: IdSource> BuildSession<S> {
    /// Starts a new session drawing numeric IDs from `ids`.
    pub fn new(ids: S) -> BuildSession<S> {
        BuildSession { table: ResourceTable::new(), ids, sources: Vec::new() }
    }

    /// Returns the session's ID source, for builders of other resource kinds.
    pub fn ids(&self) -> &S {
        &self.ids
    }

    /// Returns the resource table built so far.
    pub fn table(&self) -> &ResourceTable {
        &self.table
    }

    /// Returns the resource table, for registering other resource kinds.
    pub fn table_mut(&mut self) -> &mut ResourceTable {
        &mut self.table
    }

    /// Returns every source opened during the session.
    pub fn sources(&self) -> &[Arc<IconSource>] {
        &self.sources
    }

    /// Opens an icon file and takes ownership of it for the session.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<Arc<IconSource>> {
        let source = Arc::new(IconSource::open(path)?);
        self.sources.push(Arc::clone(&source));
        Ok(source)
    }

    /// Adds the icon file described by `spec`.  Returns the identifier of its
    /// group resource, or `None` if the file holds no images.
    pub fn add(&mut self, spec: &IconSpec) -> Result<Option<ResourceId>> {
        let source = self.open(spec.path())?;
        self.add_source(source, spec.group())
    }

    /// Adds an already-open icon source.
    pub fn add_source(
        &mut self,
        source: Arc<IconSource>,
        key: &GroupKey,
    ) -> Result<Option<ResourceId>> {
        if !self.sources.iter().any(|known| Arc::ptr_eq(known, &source)) {
            self.sources.push(Arc::clone(&source));
        }
        builder::add_icon_group(&mut self.table, &source, key, &self.ids)
    }

    /// Ends the session, handing back the table and the sources its payloads
    /// read from.
    pub fn finish(self) -> (ResourceTable, Vec<Arc<IconSource>>) {
        (self.table, self.sources)
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::BuildSession;
    use crate::builder::GroupKey;
    use crate::config::IconSpec;
    use crate::ids::IdSequence;
    use crate::source::IconSource;
    use std::io::Cursor;
    use std::sync::Arc;

    #[test]
    fn missing_file_leaves_session_empty() {
        let mut session = BuildSession::new(IdSequence::new());
        let spec = IconSpec::numeric("/nonexistent/ico-rsrc/missing.ico");
        assert!(session.add(&spec).unwrap_err().is_io());
        assert!(session.table().is_empty());
        assert!(session.sources().is_empty());
    }

    #[test]
    fn sources_are_kept_until_finish() {
        let mut session = BuildSession::new(IdSequence::new());
        let source = Arc::new(IconSource::from_reader(
            "empty",
            Cursor::new(b"\x00\x00\x01\x00\x00\x00".to_vec()),
        ));
        let group = session.add_source(Arc::clone(&source), &GroupKey::Numeric);
        assert_eq!(group.unwrap(), None);
        session.add_source(Arc::clone(&source), &GroupKey::Numeric).unwrap();
        assert_eq!(session.sources().len(), 1);
        let (table, sources) = session.finish();
        assert!(table.is_empty());
        assert!(Arc::ptr_eq(&sources[0], &source));
    }
}

//===========================================================================//
