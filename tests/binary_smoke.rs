use std::process::Command;

#[test]
fn binary_help_succeeds() {
    let me = assert_cmd::cargo::cargo_bin!("blockcp");
    let out = Command::new(&me).arg("--help").output().expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --help");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("SOURCE"), "help missing SOURCE: {stdout}");
}

#[test]
fn wrong_argument_counts_exit_1_with_usage_on_stderr() {
    let me = assert_cmd::cargo::cargo_bin!("blockcp");
    for args in [vec![], vec!["one"], vec!["a", "b", "c"]] {
        let out = Command::new(&me).args(&args).output().expect("spawn binary");
        assert_eq!(out.status.code(), Some(1), "args {args:?}");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("Usage"), "args {args:?}, stderr: {stderr}");
        assert!(out.stdout.is_empty(), "args {args:?} wrote to stdout");
    }
}

#[test]
fn unknown_flag_exits_1() {
    let me = assert_cmd::cargo::cargo_bin!("blockcp");
    let out = Command::new(&me)
        .args(["--bogus", "a", "b"])
        .output()
        .expect("spawn binary");
    assert_eq!(out.status.code(), Some(1));
}
