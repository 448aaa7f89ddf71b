use docmatch_core::{Reason, Value};
use docmatch_help::{Document, HelpError, Outcome, Settings, run};

const NAVAL_FATE: &str = "\
Naval Fate.

Usage:
  naval_fate ship new <name>...
  naval_fate ship <name> move <x> <y> [--speed=<kn>]
  naval_fate ship shoot <x> <y>
  naval_fate mine (set|remove) <x> <y> [--moored|--drifting]
  naval_fate -h | --help
  naval_fate --version

Options:
  -h --help     Show this screen.
  --version     Show version.
  --speed=<kn>  Speed in knots [default: 10].
  --moored      Moored (anchored) mine.
  --drifting    Drifting mine.
";

fn matched(doc: &str, argv: &str) -> docmatch_core::Bindings {
    match run(doc, argv.split_whitespace(), &Settings::default()) {
        Ok(Outcome::Matched(bindings)) => bindings,
        other => panic!("expected a match for {argv:?}, got {other:?}"),
    }
}

#[test]
fn test_naval_fate_move() {
    let bindings = matched(NAVAL_FATE, "ship Guardian move 150 300 --speed=20");
    assert!(bindings.get_bool("ship"));
    assert!(bindings.get_bool("move"));
    assert!(!bindings.get_bool("new"));
    assert_eq!(bindings.get_list("<name>").unwrap(), ["Guardian"]);
    assert_eq!(bindings.get_str("<x>"), Some("150"));
    assert_eq!(bindings.get_str("<y>"), Some("300"));
    assert_eq!(bindings.get_str("--speed"), Some("20"));
    assert!(!bindings.get_bool("--help"));
}

#[test]
fn test_naval_fate_mine_defaults() {
    let bindings = matched(NAVAL_FATE, "mine set 1 2 --drifting");
    assert!(bindings.get_bool("mine"));
    assert!(bindings.get_bool("set"));
    assert!(!bindings.get_bool("remove"));
    assert!(bindings.get_bool("--drifting"));
    assert!(!bindings.get_bool("--moored"));
    assert_eq!(bindings.get_str("--speed"), Some("10"));
}

#[test]
fn test_naval_fate_every_name_is_bound() {
    let bindings = matched(NAVAL_FATE, "ship shoot 3 4");
    let names = bindings.iter().map(|(name, _)| name).collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            "--drifting",
            "--help",
            "--moored",
            "--speed",
            "--version",
            "<name>",
            "<x>",
            "<y>",
            "mine",
            "move",
            "new",
            "remove",
            "set",
            "ship",
            "shoot",
        ]
    );
}

#[test]
fn test_help_request_returns_document() {
    let outcome = run(NAVAL_FATE, ["-h"], &Settings::default()).unwrap();
    assert_eq!(outcome, Outcome::Help(NAVAL_FATE.trim_matches('\n').to_string()));
}

#[test]
fn test_help_disabled_matches_pattern() {
    let settings = Settings::default().with_help(false);
    let Outcome::Matched(bindings) = run(NAVAL_FATE, ["--help"], &settings).unwrap() else {
        panic!("expected a match");
    };
    assert!(bindings.get_bool("--help"));
}

#[test]
fn test_version_request() {
    let settings = Settings::default().with_version("Naval Fate 2.0");
    let outcome = run(NAVAL_FATE, ["--version"], &settings).unwrap();
    assert_eq!(outcome, Outcome::Version("Naval Fate 2.0".into()));

    let Outcome::Matched(bindings) = run(NAVAL_FATE, ["--version"], &Settings::default()).unwrap()
    else {
        panic!("expected a match without version text");
    };
    assert!(bindings.get_bool("--version"));
}

#[test]
fn test_user_error_carries_usage() {
    let err = run(NAVAL_FATE, ["ship"], &Settings::default()).unwrap_err();
    assert!(err.is_user_error());
    assert!(matches!(
        &err,
        HelpError::User {
            reason: Reason::NoMatch { .. },
            ..
        }
    ));
    let usage = err.usage().unwrap();
    assert!(usage.starts_with("Usage:"));
    assert!(usage.ends_with("naval_fate --version"));
}

#[test]
fn test_long_prefixes() {
    let doc = "Usage: prog [options]\n\nOptions:\n  --verbose  Talk.\n  --version  Print version.\n  --quiet    Hush.\n";

    let bindings = matched(doc, "--verb");
    assert!(bindings.get_bool("--verbose"));
    assert!(!bindings.get_bool("--version"));

    let err = run(doc, ["--ver"], &Settings::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "--ver is not a unique prefix: --verbose, --version?"
    );
}

#[test]
fn test_counted_flag() {
    let doc = "Usage: prog -v...\n\nOptions:\n  -v  Verbosity.";
    let bindings = matched(doc, "-vvv");
    assert_eq!(bindings.get("-v"), Some(&Value::Count(3)));
}

#[test]
fn test_list_option_default_is_split() {
    let doc = "\
Usage: prog [--path=<p>...]

Options:
  --path=<p>  Search path [default: ./ /usr/lib]
";
    let bindings = matched(doc, "");
    assert_eq!(bindings.get_list("--path").unwrap(), ["./", "/usr/lib"]);

    let bindings = matched(doc, "--path a --path=b");
    assert_eq!(bindings.get_list("--path").unwrap(), ["a", "b"]);
}

#[test]
fn test_options_first() {
    let doc = "Usage: prog [-v] <command> [<args>...]\n\nOptions:\n  -v  Verbose.";
    let settings = Settings::default().with_options_first(true);
    let Outcome::Matched(bindings) = run(doc, ["-v", "commit", "-m", "msg"], &settings).unwrap()
    else {
        panic!("expected a match");
    };
    assert!(bindings.get_bool("-v"));
    assert_eq!(bindings.get_str("<command>"), Some("commit"));
    assert_eq!(bindings.get_list("<args>").unwrap(), ["-m", "msg"]);
}

#[test]
fn test_options_first_does_not_hide_help() {
    let doc = "Usage: prog [-h] <command> [<args>...]\n\nOptions:\n  -h  Help.";
    let settings = Settings::default().with_options_first(true);
    assert!(matches!(
        run(doc, ["-h", "x"], &settings).unwrap(),
        Outcome::Help(_)
    ));
    assert!(matches!(
        run(doc, ["x", "-h"], &settings).unwrap(),
        Outcome::Matched(_)
    ));
}

#[test]
fn test_declared_value_option_written_as_flag() {
    let err = Document::parse("Usage: prog --long\n\nOptions:\n  --long ARG  Takes a value.").unwrap_err();
    assert!(matches!(
        err,
        HelpError::Specification(Reason::MissingArgument(ref name)) if name == "--long"
    ));
}

#[test]
fn test_undeclared_option_in_usage() {
    let err = Document::parse("Usage: prog --quiet").unwrap_err();
    assert!(matches!(
        err,
        HelpError::Specification(Reason::UnknownOption(_))
    ));
}

#[test]
fn test_usage_section_rules() {
    assert!(matches!(
        Document::parse("no usage here"),
        Err(HelpError::NoUsageSection)
    ));
    assert!(matches!(
        Document::parse("Usage: prog\n\nusage: prog"),
        Err(HelpError::MultipleUsageSections)
    ));
    assert!(matches!(
        Document::parse("Usage: prog (a"),
        Err(HelpError::Specification(Reason::UnmatchedDelimiter('(')))
    ));
}

#[test]
fn test_document_is_reusable() {
    let doc = Document::parse("Usage: prog add <x>\n       prog rm <x>").unwrap();
    assert_eq!(doc.usage(), "Usage: prog add <x>\n       prog rm <x>");
    assert!(doc.registry().is_empty());

    for (argv, command) in [(["add", "1"], "add"), (["rm", "2"], "rm")] {
        let Outcome::Matched(bindings) = doc.run(argv, &Settings::default()).unwrap() else {
            panic!("expected a match");
        };
        assert!(bindings.get_bool(command));
    }
}

#[test]
fn test_empty_usage_matches_empty_invocation() {
    let doc = "Usage: prog";
    assert!(matched(doc, "").is_empty());
    assert!(run(doc, ["extra"], &Settings::default()).is_err());
}
