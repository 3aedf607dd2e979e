//! Cross-user folder sharing: mirror copy, push-on-save freshness,
//! synchronize, and teardown on unshare.

mod common;

use atelier::{AuthApi, DocumentApi, Error, FolderApi, ShareApi};
use common::{open_service, register_and_login};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Path of a mirrored document under the service's storage root
fn mirror_path(dir: &TempDir, sharee: &str, owner: &str, folder: &str, doc: &str) -> PathBuf {
    dir.path()
        .join("workspaces")
        .join(sharee)
        .join("shared")
        .join(owner)
        .join(folder)
        .join(doc)
}

#[test]
fn share_round_trip() {
    let (dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    let _bob = register_and_login(&service, "bob");

    // alice creates folder F with doc1 = "v1" and shares it with bob
    service.create_folder(alice, "F").unwrap();
    service.create_document(alice, "doc1").unwrap();
    service.save_document(alice, "doc1", "v1").unwrap();
    service.add_document_to_folder(alice, "F", "doc1").unwrap();
    assert!(service.share_folder(alice, "F", "bob").unwrap());

    let mirrored = mirror_path(&dir, "bob", "alice", "F", "doc1");
    assert_eq!(fs::read_to_string(&mirrored).unwrap(), "v1");

    // alice updates doc1; the push-on-save path refreshes bob's mirror
    service.save_document(alice, "doc1", "v2").unwrap();
    assert_eq!(fs::read_to_string(&mirrored).unwrap(), "v2");

    // alice unshares F; bob's mirror of it no longer exists
    assert!(service.unshare_folder(alice, "F", "bob").unwrap());
    assert!(!mirrored.exists());
    assert!(!mirror_path(&dir, "bob", "alice", "F", "doc1")
        .parent()
        .unwrap()
        .exists());
}

#[test]
fn sharing_with_unknown_user_fails_without_mapping() {
    let (dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    service.create_folder(alice, "F").unwrap();

    assert!(matches!(
        service.share_folder(alice, "F", "nobody").unwrap_err(),
        Error::NotFound { .. }
    ));
    assert!(!mirror_path(&dir, "nobody", "alice", "F", "any")
        .parent()
        .unwrap()
        .exists());
}

#[test]
fn sharing_unknown_folder_fails() {
    let (_dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    register_and_login(&service, "bob");

    assert!(matches!(
        service.share_folder(alice, "ghost", "bob").unwrap_err(),
        Error::NotFound { .. }
    ));
}

#[test]
fn documents_added_after_share_appear_on_synchronize() {
    let (dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    let bob = register_and_login(&service, "bob");

    service.create_folder(alice, "F").unwrap();
    service.share_folder(alice, "F", "bob").unwrap();

    // A new member added after the initial mirror copy
    service.create_document(alice, "late.txt").unwrap();
    service.save_document(alice, "late.txt", "late").unwrap();
    service.add_document_to_folder(alice, "F", "late.txt").unwrap();

    service.synchronize(bob).unwrap();
    assert_eq!(
        fs::read_to_string(mirror_path(&dir, "bob", "alice", "F", "late.txt")).unwrap(),
        "late"
    );
}

#[test]
fn login_refreshes_mirrors() {
    let (dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    let bob = register_and_login(&service, "bob");

    service.create_folder(alice, "F").unwrap();
    service.create_document(alice, "doc1").unwrap();
    service.add_document_to_folder(alice, "F", "doc1").unwrap();
    service.share_folder(alice, "F", "bob").unwrap();

    // Simulate drift: the mirror file disappears out from under bob
    let mirrored = mirror_path(&dir, "bob", "alice", "F", "doc1");
    fs::remove_file(&mirrored).unwrap();

    // A fresh login runs the synchronize sweep
    service.logout(bob);
    let _bob = common::login(&service, "bob");
    assert!(mirrored.exists());
}

#[test]
fn deleting_a_shared_document_removes_the_mirrored_copy() {
    let (dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    register_and_login(&service, "bob");

    service.create_folder(alice, "F").unwrap();
    service.create_document(alice, "doc1").unwrap();
    service.save_document(alice, "doc1", "v1").unwrap();
    service.add_document_to_folder(alice, "F", "doc1").unwrap();
    service.share_folder(alice, "F", "bob").unwrap();

    service.delete_document(alice, "doc1").unwrap();
    assert!(!mirror_path(&dir, "bob", "alice", "F", "doc1").exists());
}

#[test]
fn saves_outside_shared_folders_are_not_mirrored() {
    let (dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    register_and_login(&service, "bob");

    service.create_folder(alice, "F").unwrap();
    service.share_folder(alice, "F", "bob").unwrap();

    service.create_document(alice, "private").unwrap();
    service.save_document(alice, "private", "secret").unwrap();

    assert!(!mirror_path(&dir, "bob", "alice", "F", "private").exists());
}

#[test]
fn sharing_with_two_users_mirrors_both() {
    let (dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    register_and_login(&service, "bob");
    register_and_login(&service, "carol");

    service.create_folder(alice, "F").unwrap();
    service.create_document(alice, "doc1").unwrap();
    service.save_document(alice, "doc1", "v1").unwrap();
    service.add_document_to_folder(alice, "F", "doc1").unwrap();

    service.share_folder(alice, "F", "bob").unwrap();
    service.share_folder(alice, "F", "carol").unwrap();

    assert!(mirror_path(&dir, "bob", "alice", "F", "doc1").exists());
    assert!(mirror_path(&dir, "carol", "alice", "F", "doc1").exists());

    // Unsharing one target leaves the other's mirror intact
    service.unshare_folder(alice, "F", "bob").unwrap();
    assert!(!mirror_path(&dir, "bob", "alice", "F", "doc1").exists());
    assert!(mirror_path(&dir, "carol", "alice", "F", "doc1").exists());
}

#[test]
fn unshare_without_prior_share_reports_false() {
    let (_dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    register_and_login(&service, "bob");
    service.create_folder(alice, "F").unwrap();

    assert!(!service.unshare_folder(alice, "F", "bob").unwrap());
}

#[test]
fn deleting_a_shared_folder_tears_down_mirrors() {
    let (dir, service) = open_service();
    let alice = register_and_login(&service, "alice");
    register_and_login(&service, "bob");

    service.create_folder(alice, "F").unwrap();
    service.create_document(alice, "doc1").unwrap();
    service.add_document_to_folder(alice, "F", "doc1").unwrap();
    service.share_folder(alice, "F", "bob").unwrap();

    service.delete_folder(alice, "F").unwrap();
    assert!(!mirror_path(&dir, "bob", "alice", "F", "doc1")
        .parent()
        .unwrap()
        .exists());
}
