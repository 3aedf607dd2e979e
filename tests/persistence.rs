//! Snapshot persistence: bootstrap with no store, reload on restart,
//! and merge rules that never drop folder/share state.

mod common;

use atelier::{Atelier, AtelierConfig, AuthApi, DocumentApi, FolderApi, ShareApi};
use common::init_tracing;
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Atelier {
    init_tracing();
    Atelier::open(AtelierConfig::new(dir.path())).unwrap()
}

#[test]
fn missing_store_bootstraps_empty() {
    let dir = TempDir::new().unwrap();
    let service = open(&dir);

    // Nothing persisted yet: a fresh registration works immediately
    service.register("alice", "pass1234").unwrap();
    assert!(service.login("alice", "pass1234").unwrap().is_some());
}

#[test]
fn state_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let service = open(&dir);
        service.register("alice", "pass1234").unwrap();
        let token = service.login("alice", "pass1234").unwrap().unwrap();
        service.create_document(token, "notes").unwrap();
        service.save_document(token, "notes", "persisted").unwrap();
        service.create_folder(token, "reports").unwrap();
        service.add_document_to_folder(token, "reports", "notes").unwrap();
        service.flush().unwrap();
    }

    let service = open(&dir);
    let token = service.login("alice", "pass1234").unwrap().unwrap();
    assert_eq!(service.open_document(token, "notes").unwrap(), "persisted");
    assert_eq!(
        service.list_folder_documents(token, "reports").unwrap(),
        vec!["notes".to_string()]
    );
}

#[test]
fn flush_on_drop_persists_without_explicit_flush() {
    let dir = TempDir::new().unwrap();

    {
        let service = open(&dir);
        service.register("alice", "pass1234").unwrap();
        // No explicit flush: the drop hook writes the snapshot
    }

    let service = open(&dir);
    assert!(service.login("alice", "pass1234").unwrap().is_some());
}

#[test]
fn share_mappings_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let service = open(&dir);
        service.register("alice", "pass1234").unwrap();
        service.register("bob", "pass1234").unwrap();
        let alice = service.login("alice", "pass1234").unwrap().unwrap();
        service.create_folder(alice, "F").unwrap();
        service.create_document(alice, "doc1").unwrap();
        service.save_document(alice, "doc1", "v1").unwrap();
        service.add_document_to_folder(alice, "F", "doc1").unwrap();
        service.share_folder(alice, "F", "bob").unwrap();
        service.flush().unwrap();
    }

    // Wipe the on-disk mirror to prove the mapping itself was persisted
    let mirrored = dir
        .path()
        .join("workspaces/bob/shared/alice/F/doc1");
    fs::remove_file(&mirrored).unwrap();

    let service = open(&dir);
    let _bob = service.login("bob", "pass1234").unwrap().unwrap();
    // Login re-synchronizes from the persisted mapping
    assert_eq!(fs::read_to_string(&mirrored).unwrap(), "v1");
}

#[test]
fn reload_merges_without_dropping_share_state() {
    let dir = TempDir::new().unwrap();

    {
        let service = open(&dir);
        service.register("alice", "pass1234").unwrap();
        service.register("bob", "pass1234").unwrap();
        let alice = service.login("alice", "pass1234").unwrap().unwrap();
        service.create_folder(alice, "F").unwrap();
        service.share_folder(alice, "F", "bob").unwrap();
        service.flush().unwrap();
    }

    {
        // Second run adds state of its own, then flushes over the old file
        let service = open(&dir);
        service.register("carol", "pass1234").unwrap();
        let alice = service.login("alice", "pass1234").unwrap().unwrap();
        service.create_folder(alice, "G").unwrap();
        service.share_folder(alice, "G", "carol").unwrap();
        service.flush().unwrap();
    }

    let service = open(&dir);
    let alice = service.login("alice", "pass1234").unwrap().unwrap();
    let mut folders = service.list_folders(alice).unwrap();
    folders.sort();
    assert_eq!(folders, vec!["F".to_string(), "G".to_string()]);

    // Both share mappings still drive mirroring
    let _bob = service.login("bob", "pass1234").unwrap().unwrap();
    let _carol = service.login("carol", "pass1234").unwrap().unwrap();
    assert!(dir.path().join("workspaces/bob/shared/alice/F").exists());
    assert!(dir.path().join("workspaces/carol/shared/alice/G").exists());
}

#[test]
fn restart_does_not_resurrect_sessions() {
    let dir = TempDir::new().unwrap();

    let token = {
        let service = open(&dir);
        service.register("alice", "pass1234").unwrap();
        let token = service.login("alice", "pass1234").unwrap().unwrap();
        service.flush().unwrap();
        token
    };

    // Sessions are runtime state, not persisted state
    let service = open(&dir);
    assert!(service.validate(token).is_none());
}
