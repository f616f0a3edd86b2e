use clap::Parser;
use kiln::cli::Args;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("kiln")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["my-new-project"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.name, "my-new-project");
    assert_eq!(parsed.template, PathBuf::from("template"));
    assert!(!parsed.force);
    assert!(!parsed.verbose);
    assert!(!parsed.stdin);
    assert!(!parsed.skip_hooks);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--force",
        "--verbose",
        "--stdin",
        "--skip-hooks",
        "--template",
        "./custom-template",
        "my-new-project",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.force);
    assert!(parsed.verbose);
    assert!(parsed.stdin);
    assert!(parsed.skip_hooks);
    assert_eq!(parsed.template, PathBuf::from("./custom-template"));
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-f", "-v", "-s", "my-new-project"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.force);
    assert!(parsed.verbose);
    assert!(parsed.stdin);
}

#[test]
fn test_missing_args() {
    let args = make_args(&[]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["my-new-project", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
