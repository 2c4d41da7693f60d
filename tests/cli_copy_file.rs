use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(args: &[&Path], flags: &[&str]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("blockcp");
    Command::new(&me)
        .args(flags)
        .args(args)
        .output()
        .expect("spawn binary")
}

#[test]
fn file_to_new_file_is_byte_identical() {
    let td = tempdir().unwrap();
    let src = td.path().join("a.bin");
    let dst = td.path().join("b.bin");
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 253) as u8).collect();
    fs::write(&src, &data).unwrap();

    let out = run(&[&src, &dst], &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&dst).unwrap(), data);
    assert!(out.stdout.is_empty(), "non-verbose run must not print");
}

#[test]
fn file_to_existing_file_truncates() {
    let td = tempdir().unwrap();
    let src = td.path().join("short");
    let dst = td.path().join("long");
    fs::write(&src, b"tiny").unwrap();
    fs::write(&dst, b"a much longer previous body").unwrap();

    let out = run(&[&src, &dst], &[]);
    assert!(out.status.success());
    assert_eq!(fs::read(&dst).unwrap(), b"tiny");
}

#[test]
fn empty_file_copies_to_empty_file() {
    let td = tempdir().unwrap();
    let src = td.path().join("empty");
    let dst = td.path().join("copy");
    fs::write(&src, b"").unwrap();

    let out = run(&[&src, &dst], &[]);
    assert!(out.status.success());
    assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
}

#[test]
fn file_into_directory_twice_overwrites() {
    let td = tempdir().unwrap();
    let src = td.path().join("report.txt");
    let dir = td.path().join("inbox");
    fs::create_dir(&dir).unwrap();

    fs::write(&src, b"version one, rather long").unwrap();
    let out = run(&[&src, &dir], &[]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.join("report.txt")).unwrap(), b"version one, rather long");

    fs::write(&src, b"v2").unwrap();
    let out = run(&[&src, &dir], &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.join("report.txt")).unwrap(), b"v2");
}

#[test]
fn missing_source_is_fatal_and_names_path() {
    let td = tempdir().unwrap();
    let src = td.path().join("ghost");
    let dst = td.path().join("out");

    let out = run(&[&src, &dst], &[]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains(&format!("{}: ", src.display())),
        "stderr: {stderr}"
    );
    assert!(!dst.exists(), "nothing should be created for a missing source");
}

#[test]
fn verbose_prints_transfer_line() {
    let td = tempdir().unwrap();
    let src = td.path().join("v.txt");
    let dst = td.path().join("w.txt");
    fs::write(&src, b"x").unwrap();

    let out = run(&[&src, &dst], &["-v"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout,
        format!("{} -> {}\n", src.display(), dst.display())
    );
}

#[cfg(unix)]
#[test]
fn file_into_unwritable_directory_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    // Root bypasses permission checks.
    unsafe {
        if libc::geteuid() == 0 {
            eprintln!("skipping: running as root");
            return;
        }
    }

    let td = tempdir().unwrap();
    let src = td.path().join("f.txt");
    fs::write(&src, b"data").unwrap();
    let dir = td.path().join("locked");
    fs::create_dir(&dir).unwrap();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

    let out = run(&[&src, &dir], &[]);

    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains(&format!("{}: ", dir.join("f.txt").display())),
        "stderr: {stderr}"
    );
    assert!(stderr.to_ascii_lowercase().contains("permission denied"), "stderr: {stderr}");
}

#[cfg(unix)]
#[test]
fn copying_into_a_character_device_is_silent() {
    let dev_null = Path::new("/dev/null");
    if !dev_null.exists() {
        eprintln!("skipping: /dev/null unavailable");
        return;
    }
    let td = tempdir().unwrap();
    let src = td.path().join("payload.bin");
    fs::write(&src, vec![9u8; 12_345]).unwrap();

    let out = run(&[&src, dev_null], &[]);
    assert_eq!(out.status.code(), Some(0));
    assert!(
        out.stderr.is_empty(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}
