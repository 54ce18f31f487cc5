//! Integration tests for loading crafted DEX images through the public API.
//!
//! The images are assembled in memory by the shared builder, so every expectation below is
//! derived from what the builder was told to emit.

#[path = "../src/test/builder.rs"]
mod builder;

use std::{sync::Arc, thread};

use builder::{minimal_class, offsets, patch_u32, peek_u32, ClassSpec, DexBuilder};
use dexscope::{metadata::tables::MapItemType, prelude::*};

/// A small app: a linked list node, a listener interface and an activity implementing it
fn sample_app() -> Vec<u8> {
    let mut builder = DexBuilder::new();
    let node = builder.type_id("Lcom/example/Node;");
    let listener = builder.type_id("Lcom/example/Listener;");
    let activity = builder.type_id("Lcom/example/MainActivity;");
    let platform = builder.type_id("Landroid/app/Activity;");
    let source = builder.string("Node.java");

    let next = builder.field("Lcom/example/Node;", "Lcom/example/Node;", "next");
    let value = builder.field("Lcom/example/Node;", "I", "value");
    let count = builder.field("Lcom/example/Node;", "I", "COUNT");
    let node_init = builder.method("Lcom/example/Node;", "<init>", "V", &["I"]);
    let node_clinit = builder.method("Lcom/example/Node;", "<clinit>", "V", &[]);
    let get_next = builder.method("Lcom/example/Node;", "getNext", "Lcom/example/Node;", &[]);

    let on_node = builder.method("Lcom/example/Listener;", "onNode", "V", &["Lcom/example/Node;"]);

    let head = builder.field("Lcom/example/MainActivity;", "Lcom/example/Node;", "head");
    let on_create = builder.method(
        "Lcom/example/MainActivity;",
        "onCreate",
        "V",
        &["Landroid/os/Bundle;"],
    );
    let activity_on_node = builder.method(
        "Lcom/example/MainActivity;",
        "onNode",
        "V",
        &["Lcom/example/Node;"],
    );

    builder.class(
        ClassSpec::new(node)
            .with_access_flags(0x11)
            .with_source_file(source)
            .with_static_field(count, 0x19)
            .with_instance_field(next, 0x2)
            .with_instance_field(value, 0x12)
            .with_direct_method(node_init, 0x1_0001)
            .with_direct_method(node_clinit, 0x1_0008)
            .with_virtual_method(get_next, 0x1),
    );
    builder.class(
        ClassSpec::new(listener)
            .with_access_flags(0x601)
            .with_virtual_method(on_node, 0x401),
    );
    builder.class(
        ClassSpec::new(activity)
            .with_superclass(platform)
            .with_interface(listener)
            .with_instance_field(head, 0x2)
            .with_virtual_method(on_create, 0x4)
            .with_virtual_method(activity_on_node, 0x1),
    );
    builder.build()
}

#[test]
fn header_and_tables() -> Result<()> {
    let dex = DexObject::from_mem(sample_app())?;
    let view = dex.view();
    let header = dex.header();

    assert!(header.has_valid_magic());
    assert_eq!(header.version(), Some(35));
    assert_eq!(header.class_defs_size, 3);
    assert_eq!(view.class_defs().row_count(), 3);

    let node_def = view.class_def(0)?;
    assert_eq!(view.class_name(node_def.class_idx)?, "com.example.Node");
    assert_eq!(
        view.string_by_id(node_def.source_file().unwrap())?.as_ref(),
        "Node.java"
    );
    assert!(view.class_def(2)?.superclass().is_some());
    assert!(view.class_def(3).is_err());

    let class_data = view.class_data(&node_def)?;
    assert_eq!(class_data.field_count(), 3);
    assert_eq!(class_data.method_count(), 3);

    let map = view.map_list()?;
    assert_eq!(map.first().and_then(MapItem::item_type), Some(MapItemType::HeaderItem));
    assert_eq!(map.last().and_then(MapItem::item_type), Some(MapItemType::MapList));
    let class_defs = map
        .iter()
        .find(|item| item.item_type() == Some(MapItemType::ClassDefItem))
        .unwrap();
    assert_eq!(class_defs.size, 3);
    assert_eq!(class_defs.offset, header.class_defs_off);

    Ok(())
}

#[test]
fn raw_classes() -> Result<()> {
    let dex = DexObject::from_mem(sample_app())?;

    assert_eq!(
        dex.class_names()?,
        vec![
            "com.example.Node",
            "com.example.Listener",
            "com.example.MainActivity"
        ]
    );

    let node = dex.class_by_name("com.example.Node")?.unwrap();
    assert_eq!(node.superclass.as_deref(), Some(ROOT_OBJECT));
    assert!(node.access_flags.contains(AccessFlags::FINAL));

    let fields: Vec<_> = node.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, vec!["next", "value", "COUNT"]);
    assert!(node.fields[2].access_flags.is_static());
    assert_eq!(node.fields[0].field_type, "com.example.Node");
    assert_eq!(node.fields[1].field_type, "I");

    let methods: Vec<_> = node.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["<init>", "<clinit>", "getNext"]);
    assert!(node.methods[0].is_constructor());
    assert_eq!(node.methods[0].parameter_types, vec!["I".to_string()]);
    assert!(node.methods[1].is_static_initializer());
    assert_eq!(node.methods[2].return_type, "com.example.Node");

    let listener = dex.class_by_name("Lcom/example/Listener;")?.unwrap();
    assert!(listener.access_flags.is_interface());
    assert!(listener.methods[0].access_flags.is_abstract());

    assert!(dex.class_by_name("android.app.Activity")?.is_none());
    assert!(dex.class_by_name("")?.is_none());

    Ok(())
}

#[test]
fn resolved_graph() -> Result<()> {
    let dex = DexObject::from_mem(sample_app())?;

    let activity = dex
        .class_by_name_resolved("com.example.MainActivity")?
        .unwrap();
    let node = dex.class_by_name_resolved("com.example.Node")?.unwrap();
    let listener = dex.class_by_name_resolved("com.example.Listener")?.unwrap();

    let platform = activity.superclass().unwrap();
    assert!(platform.stub);
    assert_eq!(platform.name, "android.app.Activity");
    assert!(platform.superclass().is_none());

    assert!(activity.interface(0).unwrap().is(&listener));
    assert!(activity.field(0).unwrap().field_type.is(&node));

    // Node -> Node through its own field and return type
    assert!(node.field(0).unwrap().field_type.is(&node));
    assert!(node.method(2).unwrap().return_type.is(&node));

    // the primitive `I` is one shared stub
    let value_type = node.field(1).unwrap().field_type.upgrade().unwrap();
    let init_param = node.method(0).unwrap().parameter_types[0]
        .upgrade()
        .unwrap();
    assert!(value_type.stub);
    assert!(Arc::ptr_eq(&value_type, &init_param));

    // java.lang.Object is shared between Node and Listener
    assert!(Arc::ptr_eq(
        &node.superclass().unwrap(),
        &listener.superclass().unwrap()
    ));
    assert!(node.superclass().unwrap().is_root_object());

    let again = dex.class_by_name_resolved("Lcom/example/Node;")?.unwrap();
    assert!(Arc::ptr_eq(&node, &again));

    assert!(dex.class_by_name_resolved("android.app.Activity")?.is_none());
    assert!(dex.class_by_name_resolved("android.os.Bundle")?.is_none());

    Ok(())
}

#[test]
fn concurrent_resolution() -> Result<()> {
    let dex = Arc::new(DexObject::from_mem(sample_app())?);

    let resolved: Vec<ClassTypeRc> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let dex = &dex;
                scope.spawn(move || {
                    let name = if i % 2 == 0 {
                        "com.example.MainActivity"
                    } else {
                        "Lcom/example/MainActivity;"
                    };
                    dex.class_by_name_resolved(name).unwrap().unwrap()
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for class in &resolved[1..] {
        assert!(Arc::ptr_eq(&resolved[0], class));
    }
    assert_eq!(resolved[0].fields().count(), 1);
    assert_eq!(resolved[0].methods().count(), 2);

    Ok(())
}

#[test]
fn rejected_inputs() {
    assert!(matches!(DexObject::from_mem(Vec::new()), Err(Error::Empty)));
    assert!(matches!(
        DexObject::from_mem(vec![0u8; 0x40]),
        Err(Error::OutOfBounds { .. })
    ));

    let mut builder = DexBuilder::new();
    builder.set_magic(b"dey\n035\0");
    assert!(matches!(
        DexObject::from_mem(builder.build()),
        Err(Error::InvalidMagic(_))
    ));

    let mut data = sample_app();
    data.truncate(data.len() - 4);
    assert!(matches!(
        DexObject::from_mem(data.clone()),
        Err(Error::FileSizeMismatch { .. })
    ));

    // a truncated map only breaks the map
    let dex = DexObject::from_mem_with_validation(data, ValidationConfig::disabled()).unwrap();
    assert!(dex.view().map_list().is_err());
    assert!(dex.class_by_name("com.example.Node").unwrap().is_some());
}

#[test]
fn corrupt_table_is_reported_on_access() {
    let mut data = sample_app();
    let file_size = data.len() as u32;
    patch_u32(&mut data, offsets::METHOD_IDS_OFF, file_size - 4);

    let dex = DexObject::from_mem(data).unwrap();
    assert_eq!(dex.class_names().unwrap().len(), 3);

    // fields still decode, methods do not
    assert!(dex.view().field_id(0).is_ok());
    assert!(matches!(
        dex.view().method_id(0),
        Err(Error::OutOfBounds { .. })
    ));
    assert!(dex.class_by_name("com.example.Node").is_err());
    assert!(dex.class_by_name_resolved("com.example.Node").is_err());

    // a failed class never leaves a record behind
    assert!(dex.class_by_name_resolved("com.example.Node").is_err());
    assert_eq!(dex.loader().resolved_count(), 0);
}

#[test]
fn oversized_class_def_count() {
    let mut data = minimal_class("Lcom/example/Foo;");
    patch_u32(&mut data, offsets::CLASS_DEFS_SIZE, 0xFFFF_FFFF);

    let dex = DexObject::from_mem(data).unwrap();
    assert_eq!(dex.header().class_defs_size, 0xFFFF_FFFF);

    let foo = dex.class_by_name_resolved("com.example.Foo").unwrap().unwrap();
    assert_eq!(foo.name, "com.example.Foo");
    assert!(dex.class_by_name("com.example.Missing").is_err());
    assert!(dex.class_names().is_err());
    assert!(dex.classes().is_err());
}

#[test]
fn corrupt_class_def_row() {
    let mut builder = DexBuilder::new();
    let a = builder.type_id("La/A;");
    let b = builder.type_id("La/B;");
    builder.class(ClassSpec::new(a));
    builder.class(ClassSpec::new(b));
    let mut data = builder.build();
    let second_row = peek_u32(&data, offsets::CLASS_DEFS_OFF) as usize + 32;
    patch_u32(&mut data, second_row, 0x7777);

    let dex = DexObject::from_mem(data).unwrap();
    assert_eq!(dex.class_by_name("a.A").unwrap().unwrap().name, "a.A");
    let resolved = dex.class_by_name_resolved("a.A").unwrap().unwrap();
    assert!(resolved.superclass().unwrap().is_root_object());

    assert!(matches!(
        dex.class_by_name("a.B"),
        Err(Error::IndexOutOfRange { index: 0x7777, .. })
    ));
}
