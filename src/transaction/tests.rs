//! Tests for the write ledger

use super::*;
use tempfile::TempDir;

fn server_dir() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    (temp, root)
}

#[test]
fn test_rollback_removes_nested_directories_children_first() {
    let (_temp, root) = server_dir();
    let outer = root.join("plugins");
    let inner = outer.join("Geyser-Spigot");
    fs::create_dir(&outer).unwrap();
    fs::create_dir(&inner).unwrap();

    let mut ledger = WriteLedger::new();
    ledger.record_directory(&outer);
    ledger.record_directory(&inner);

    let report = ledger.rollback();

    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert_eq!(report.removed, vec![inner.clone(), outer.clone()]);
    assert!(!outer.exists());
}

#[test]
fn test_rollback_files_then_directories() {
    let (_temp, root) = server_dir();
    let mut ledger = WriteLedger::new();

    let mods = root.join("mods");
    ledger.make_dirs(&mods).unwrap();
    ledger
        .save_file(&mods.join("Geyser-Fabric.jar"), b"jar")
        .unwrap();
    ledger.save_file(&root.join("start.sh"), "#!/bin/bash\n").unwrap();

    let report = ledger.rollback();

    assert!(report.is_clean());
    assert!(!mods.exists());
    assert!(!root.join("start.sh").exists());
    assert!(root.exists(), "pre-existing root must survive");
}

#[test]
fn test_rollback_leaves_unrecorded_paths_alone() {
    let (_temp, root) = server_dir();
    let world = root.join("world");
    fs::create_dir(&world).unwrap();
    fs::write(world.join("level.dat"), "data").unwrap();
    fs::write(root.join("notes.txt"), "keep me").unwrap();

    let mut ledger = WriteLedger::new();
    ledger.save_file(&root.join("eula.txt"), "eula=true\n").unwrap();
    let report = ledger.rollback();

    assert!(report.is_clean());
    assert!(world.join("level.dat").exists());
    assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), "keep me");
    assert!(!root.join("eula.txt").exists());
}

#[test]
fn test_rollback_continues_after_failure() {
    let (_temp, root) = server_dir();
    let real = root.join("server.properties");
    fs::write(&real, "motd=hi").unwrap();

    let mut ledger = WriteLedger::new();
    ledger.record_file(root.join("already-gone.jar"));
    ledger.record_file(&real);

    let report = ledger.rollback();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, EntryKind::File);
    assert_eq!(report.failures[0].path, root.join("already-gone.jar"));
    assert!(!real.exists());
}

#[test]
fn test_rollback_reports_non_empty_directory_and_continues() {
    let (_temp, root) = server_dir();
    let config = root.join("config");
    let busy = root.join("busy");
    fs::create_dir(&config).unwrap();
    fs::create_dir(&busy).unwrap();
    fs::write(busy.join("stray.txt"), "not ours").unwrap();

    let mut ledger = WriteLedger::new();
    ledger.record_directory(&config);
    ledger.record_directory(&busy);

    let report = ledger.rollback();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, EntryKind::Directory);
    assert!(busy.exists());
    assert!(!config.exists());
}

#[test]
fn test_make_dirs_records_only_new_segments() {
    let (_temp, root) = server_dir();
    let existing = root.join("config");
    fs::create_dir(&existing).unwrap();

    let mut ledger = WriteLedger::new();
    let target = existing.join("Geyser-Fabric").join("extensions");
    ledger.make_dirs(&target).unwrap();

    assert!(target.is_dir());
    assert_eq!(
        ledger.directories(),
        &[existing.join("Geyser-Fabric"), target.clone()]
    );

    ledger.rollback();
    assert!(existing.is_dir());
    assert!(!existing.join("Geyser-Fabric").exists());
}

#[test]
fn test_make_dirs_existing_directory_records_nothing() {
    let (_temp, root) = server_dir();
    let mut ledger = WriteLedger::new();
    ledger.make_dirs(&root).unwrap();
    assert!(ledger.directories().is_empty());
    ledger.commit();
}

#[test]
fn test_make_dirs_over_file_fails() {
    let (_temp, root) = server_dir();
    let blocker = root.join("plugins");
    fs::write(&blocker, "i am a file").unwrap();

    let mut ledger = WriteLedger::new();
    let result = ledger.make_dirs(&blocker.join("Geyser-Spigot"));
    assert!(result.is_err());
    assert!(ledger.directories().is_empty());
    ledger.commit();
}

#[test]
fn test_save_file_overwrite_is_restored() {
    let (_temp, root) = server_dir();
    let props = root.join("server.properties");
    fs::write(&props, "server-port=25565\n").unwrap();

    let mut ledger = WriteLedger::new();
    ledger.save_file(&props, "server-port=25570\n").unwrap();
    assert!(ledger.files().is_empty());

    let report = ledger.rollback();
    assert_eq!(report.restored, vec![props.clone()]);
    assert_eq!(fs::read_to_string(&props).unwrap(), "server-port=25565\n");
}

#[test]
fn test_save_file_twice_on_new_path_is_still_removed() {
    let (_temp, root) = server_dir();
    let script = root.join("start.sh");

    let mut ledger = WriteLedger::new();
    ledger.save_file(&script, "one").unwrap();
    ledger.save_file(&script, "two").unwrap();
    assert_eq!(ledger.files(), &[script.clone()]);

    let report = ledger.rollback();
    assert!(report.is_clean());
    assert!(!script.exists());
}

#[test]
fn test_commit_keeps_files() {
    let (_temp, root) = server_dir();
    let eula = root.join("eula.txt");

    let mut ledger = WriteLedger::new();
    ledger.save_file(&eula, "eula=true\n").unwrap();
    ledger.commit();

    assert!(eula.exists());
}

#[test]
fn test_drop_without_commit_rolls_back() {
    let (_temp, root) = server_dir();
    let plugins = root.join("plugins");

    {
        let mut ledger = WriteLedger::new();
        ledger.make_dirs(&plugins).unwrap();
        ledger
            .save_file(&plugins.join("Floodgate-Spigot.jar"), b"jar")
            .unwrap();
    }

    assert!(!plugins.exists());
}

#[test]
fn test_failed_write_removes_partial_file() {
    let (_temp, root) = server_dir();
    let server = root.join("server");
    let jar = server.join("paper.jar");

    let mut ledger = WriteLedger::new();
    ledger.make_dirs(&server).unwrap();
    let result = ledger.write_with(&jar, || {
        fs::write(&jar, b"partial jar")?;
        Err(io::Error::other("File too large"))
    });

    assert!(matches!(result, Err(SetupError::FileWriteFailed { .. })));
    assert!(!jar.exists());
    assert!(ledger.files().is_empty());

    let report = ledger.rollback();
    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert!(!server.exists());
}

#[test]
fn test_failed_write_keeps_existing_file() {
    let (_temp, root) = server_dir();
    let props = root.join("server.properties");
    fs::write(&props, "motd=Old\n").unwrap();

    let mut ledger = WriteLedger::new();
    let result = ledger.write_with(&props, || Err(io::Error::other("disk full")));

    assert!(result.is_err());
    assert!(props.exists());
    assert!(ledger.files().is_empty());
    ledger.commit();
}
