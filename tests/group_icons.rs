use ico_rsrc::{
    add_icon, add_named_icon, BuildSession, Error, IconDirEntryCommon, IconDirHeader,
    IconImageDescriptor, IconSource, IconSpec, IdChannel, IdSequence,
    Payload, ResourceId, ResourceKind, ResourceTable, ResourceType,
};
use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

//===========================================================================//

#[test]
fn named_group_with_three_images() {
    let ico = build_ico(&[(16, "sixteen"), (32, "thirty-two"), (48, "48")]);
    let source = memory_source(&ico);
    let mut table = ResourceTable::new();
    let ids = IdChannel::spawn(vec![101, 102, 103]);
    let group_id =
        add_named_icon(&mut table, &source, "APPICON", &ids).unwrap().unwrap();
    assert_eq!(group_id, ResourceId::Named(0));
    assert_eq!(table.strings().len(), 1);
    assert_eq!(table.strings()[0].to_string_lossy(), "APPICON");
    assert_eq!(table.strings()[0].len(), 7);
    for id in [101, 102, 103] {
        assert!(table.find(ResourceKind::Icon, ResourceId::Numeric(id)).is_some());
    }
    assert_eq!(table.resources_of(ResourceKind::Icon).count(), 3);
    assert_eq!(table.resources_of(ResourceKind::GroupIcon).count(), 1);
    let group = match table
        .find_named(ResourceKind::GroupIcon, "APPICON")
        .unwrap()
        .payload()
    {
        Payload::Group(group) => group.clone(),
        Payload::Section(_) => panic!("group payload should be a directory"),
    };
    assert_eq!(group.header().count(), 3);
    assert_eq!(group.ids().collect::<Vec<u16>>(), vec![101, 102, 103]);
    assert_eq!(group.entries()[1].common().width(), 32);
    // The group is never also registered under a numeric ID.
    assert!(table
        .resources_of(ResourceKind::GroupIcon)
        .all(|resource| resource.id().is_named()));
}

#[test]
fn numeric_group_with_one_image() {
    let ico = build_ico(&[(64, "pixels")]);
    let source = memory_source(&ico);
    let mut table = ResourceTable::new();
    let ids = IdChannel::spawn(vec![5, 6]);
    let group_id = add_icon(&mut table, &source, &ids).unwrap();
    assert_eq!(group_id, Some(ResourceId::Numeric(6)));
    assert!(table.strings().is_empty());
    assert_eq!(table.len(), 2);
    assert_eq!(table.resources()[0].kind(), ResourceKind::Icon);
    assert_eq!(table.resources()[0].id(), ResourceId::Numeric(5));
    let group = table
        .find(ResourceKind::GroupIcon, ResourceId::Numeric(6))
        .unwrap();
    match group.payload() {
        Payload::Group(group) => {
            assert_eq!(group.ids().collect::<Vec<u16>>(), vec![5])
        }
        Payload::Section(_) => panic!("group payload should be a directory"),
    }
    assert_eq!(group.payload().size(), 6 + 14);
}

#[test]
fn empty_icon_file_registers_nothing() {
    let ico = build_ico(&[]);
    let mut table = ResourceTable::new();
    let ids = IdSequence::starting_at(1);
    assert_eq!(add_icon(&mut table, &memory_source(&ico), &ids).unwrap(), None);
    assert_eq!(
        add_named_icon(&mut table, &memory_source(&ico), "EMPTY", &ids)
            .unwrap(),
        None
    );
    assert!(table.is_empty());
}

#[test]
fn missing_file_is_io_error() {
    let mut session = BuildSession::new(IdSequence::new());
    let spec = IconSpec::named("/nonexistent/ico-rsrc/app.ico", "APPICON");
    let error = session.add(&spec).unwrap_err();
    assert!(error.is_io());
    assert!(session.table().is_empty());
}

#[test]
fn malformed_file_is_format_error() {
    let mut table = ResourceTable::new();
    let source = memory_source(b"\x00\x00\x02\x00\x01\x00");
    let error = add_icon(&mut table, &source, &IdSequence::new()).unwrap_err();
    assert!(error.is_format());
    assert!(table.is_empty());
}

#[test]
fn unreadable_image_leaves_no_orphans() {
    let mut ico = build_ico(&[(16, "first"), (32, "second")]);
    // Cut off the end of the second image's payload.
    ico.truncate(ico.len() - 2);
    let mut table = ResourceTable::new();
    let ids = IdSequence::starting_at(1);
    let error = add_icon(&mut table, &memory_source(&ico), &ids).unwrap_err();
    assert!(error.is_io());
    assert!(table.is_empty());
}

#[test]
fn exhausted_ids_for_group_leave_no_orphans() {
    let ico = build_ico(&[(16, "only image")]);
    let mut table = ResourceTable::new();
    // Enough IDs for the image, but none left over for the group.
    let ids = IdChannel::spawn(vec![5]);
    let error = add_icon(&mut table, &memory_source(&ico), &ids).unwrap_err();
    assert!(matches!(error, Error::IdsExhausted));
    assert!(table.is_empty());
}

#[test]
fn empty_name_is_zero_length_string() {
    let ico = build_ico(&[(16, "image")]);
    let mut table = ResourceTable::new();
    let group_id =
        add_named_icon(&mut table, &memory_source(&ico), "", &IdSequence::new())
            .unwrap();
    assert_eq!(group_id, Some(ResourceId::Named(0)));
    assert_eq!(table.strings().len(), 1);
    assert!(table.strings()[0].is_empty());
}

#[test]
fn group_entries_point_at_image_payloads() {
    let images: &[(u32, &str)] =
        &[(16, "aaaa"), (24, "bbbbbbb"), (256, "cc")];
    let ico = build_ico(images);
    let source = memory_source(&ico);
    let mut table = ResourceTable::new();
    let group_id = add_icon(&mut table, &source, &IdSequence::starting_at(40))
        .unwrap()
        .unwrap();
    let group = match table.find(ResourceKind::GroupIcon, group_id).unwrap().payload() {
        Payload::Group(group) => group.clone(),
        Payload::Section(_) => panic!("group payload should be a directory"),
    };
    for (entry, &(_, data)) in group.entries().iter().zip(images.iter()) {
        let icon = table
            .find(ResourceKind::Icon, ResourceId::Numeric(entry.id()))
            .unwrap();
        assert_eq!(icon.payload().to_bytes().unwrap(), data.as_bytes());
        assert_eq!(entry.common().bytes_in_res() as usize, data.len());
    }
}

#[test]
fn extracted_icon_matches_source_file() {
    let ico = build_ico(&[(16, "small image"), (48, "large image data")]);
    let path = temp_ico_path("round-trip");
    fs::write(&path, &ico).unwrap();
    let mut session = BuildSession::new(IdSequence::starting_at(7));
    let group_id = session
        .add(&IconSpec::named(&path, "ROUNDTRIP"))
        .unwrap()
        .unwrap();
    let extracted = session.table().extract_icon(group_id).unwrap();
    assert_eq!(extracted, ico);
    let (table, sources) = session.finish();
    assert_eq!(sources.len(), 1);
    drop(table);
    drop(sources);
    fs::remove_file(&path).unwrap();
}

#[test]
fn concurrent_builders_draw_disjoint_ids() {
    let table = Arc::new(Mutex::new(ResourceTable::new()));
    let ids = Arc::new(IdSequence::starting_at(1));
    let handles: Vec<_> = (0..4)
        .map(|thread_index| {
            let table = Arc::clone(&table);
            let ids = Arc::clone(&ids);
            thread::spawn(move || {
                let ico = build_ico(&[(16, "one"), (32, "two"), (48, "three")]);
                let mut registry = table;
                for file_index in 0..10 {
                    let source = memory_source(&ico);
                    if (thread_index + file_index) % 2 == 0 {
                        add_icon(&mut registry, &source, &*ids).unwrap();
                    } else {
                        let name = format!("ICON_{}_{}", thread_index, file_index);
                        add_named_icon(&mut registry, &source, &name, &*ids)
                            .unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let table = table.lock().unwrap();
    assert_eq!(table.resources_of(ResourceKind::Icon).count(), 120);
    assert_eq!(table.resources_of(ResourceKind::GroupIcon).count(), 40);
    assert_eq!(table.strings().len(), 20);
    let mut seen = HashSet::new();
    for resource in table.resources() {
        if let ResourceId::Numeric(id) = resource.id() {
            assert!(seen.insert(id), "ID {} was registered twice", id);
        }
    }
    assert_eq!(seen.len(), 120 + 20);
}

//===========================================================================//

fn build_ico(images: &[(u32, &str)]) -> Vec<u8> {
    let mut output = Vec::<u8>::new();
    IconDirHeader::new(ResourceType::Icon, images.len() as u16)
        .write(&mut output)
        .unwrap();
    let mut data_offset = 6 + 16 * images.len() as u32;
    for &(size, data) in images.iter() {
        let common =
            IconDirEntryCommon::new(size, size, 0, 1, 32, data.len() as u32);
        IconImageDescriptor::new(common, data_offset)
            .write(&mut output)
            .unwrap();
        data_offset += data.len() as u32;
    }
    for &(_, data) in images.iter() {
        output.extend_from_slice(data.as_bytes());
    }
    output
}

fn memory_source(data: &[u8]) -> Arc<IconSource> {
    Arc::new(IconSource::from_reader("memory", Cursor::new(data.to_vec())))
}

fn temp_ico_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("ico-rsrc-{}-{}.ico", std::process::id(), name))
}

//===========================================================================//
