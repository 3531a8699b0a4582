mod common;

use std::sync::Arc;
use std::thread;
use localdex::{DocumentItem, ErrorKind, IndexConfig, IndexRegistry, SearchStatus};

#[test]
fn test_create_lookup_destroy() {
    common::init_tracing();
    let registry = IndexRegistry::new();
    let index = registry.create("settings", IndexConfig::default()).unwrap();

    assert!(registry.get("settings").is_some());
    assert_eq!(registry.names(), vec!["settings".to_string()]);

    let err = registry.create("settings", IndexConfig::default()).err().unwrap();
    assert_eq!(err.kind, ErrorKind::AlreadyExists);

    assert!(registry.destroy("settings"));
    assert!(!registry.destroy("settings"));
    assert_eq!(registry.lookup("settings").err().unwrap().kind, ErrorKind::NotFound);

    // Handles outlive their registry entry
    assert_eq!(index.lock().size(), 0);
}

#[test]
fn test_named_indexes_are_independent() {
    let registry = IndexRegistry::new();
    let apps = registry.create("apps", IndexConfig::default()).unwrap();
    let help = registry.create("help", IndexConfig::default()).unwrap();

    {
        let mut apps = apps.lock();
        apps.add_or_update(vec![DocumentItem::from_text("calc", "calculator app")]).unwrap();
        apps.wait_idle().unwrap();
    }
    {
        let mut help = help.lock();
        help.add_or_update(vec![DocumentItem::from_text("wifi", "connect to wifi")]).unwrap();
        help.wait_idle().unwrap();
    }

    assert_eq!(apps.lock().find("wifi", 5).unwrap().status, SearchStatus::EmptyResult);
    assert_eq!(help.lock().find("wifi", 5).unwrap().ids(), vec!["wifi"]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_get_or_create_returns_same_instance() {
    let registry = IndexRegistry::new();
    let first = registry.get_or_create("files", IndexConfig::default()).unwrap();
    let second = registry.get_or_create("files", IndexConfig::default()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_invalid_config_or_name_is_rejected() {
    let registry = IndexRegistry::new();
    let bad = IndexConfig::default().with_token_length(0, 10);
    assert_eq!(registry.create("bad", bad).err().unwrap().kind, ErrorKind::InvalidArgument);
    assert_eq!(registry.create("", IndexConfig::default()).err().unwrap().kind, ErrorKind::InvalidArgument);
    assert!(registry.is_empty());
}

#[test]
fn test_shared_index_moves_between_threads() {
    let registry = IndexRegistry::new();
    let index = registry.create("shared", IndexConfig::default()).unwrap();

    let writer = {
        let index = index.clone();
        thread::spawn(move || {
            let mut index = index.lock();
            index.add_or_update(vec![DocumentItem::from_text("d1", "from another thread")]).unwrap();
            index.wait_idle().unwrap();
        })
    };
    writer.join().unwrap();

    assert_eq!(index.lock().find("thread", 5).unwrap().ids(), vec!["d1"]);
}
