use super::*;

fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
    FileSessionStore::new(dir.path().join("nested").join("session.json"))
}

#[test]
fn missing_file_is_no_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    assert_eq!(store.load(), None);
    assert!(!store.is_logged_in());
}

#[test]
fn saved_tokens_survive_a_new_handle() {
    let dir = tempfile::tempdir().expect("tempdir");
    store_in(&dir).set_token("abc", Some("refresh")).expect("save");

    let reopened = store_in(&dir);
    assert_eq!(reopened.token().as_deref(), Some("abc"));
    assert_eq!(reopened.refresh_token().as_deref(), Some("refresh"));
}

#[test]
fn clear_removes_file_and_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    store.set_token("abc", None).expect("save");
    store.clear().expect("clear");
    store.clear().expect("clear again");
    assert!(!store.path().exists());
}

#[test]
fn corrupt_file_reads_as_logged_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    fs::write(&path, "not json").expect("write");
    assert_eq!(FileSessionStore::new(path).load(), None);
}

#[test]
fn default_path_uses_dotfile_name() {
    assert!(default_session_path().ends_with(DEFAULT_FILE_NAME));
}
