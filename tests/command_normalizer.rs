use std::ffi::OsString;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use procgate::errors::GatewayError;
use procgate::exec::CommandLine;

fn os(words: &[&str]) -> Vec<OsString> {
    words.iter().map(OsString::from).collect()
}

#[test]
fn string_is_tokenized_with_quotes_and_escapes() {
    let cmd = CommandLine::from(r#"git commit -m "first commit" --author='A B' a\ b"#);

    let normalized = cmd.normalize().unwrap();

    assert_eq!(
        normalized.argv(),
        os(&["git", "commit", "-m", "first commit", "--author=A B", "a b"]).as_slice()
    );
    assert_eq!(
        normalized.display(),
        r#"git commit -m "first commit" --author='A B' a\ b"#
    );
    assert_eq!(normalized.program(), "git");
    assert_eq!(normalized.args().len(), 5);
}

#[test]
fn token_list_passes_through_and_displays_space_joined() {
    let cmd = CommandLine::from(vec!["echo", "two words", "x"]);

    let normalized = cmd.normalize().unwrap();

    assert_eq!(normalized.argv(), os(&["echo", "two words", "x"]).as_slice());
    assert_eq!(normalized.display(), "echo two words x");
}

#[test]
fn path_tokens_are_accepted() {
    let cmd = CommandLine::from([PathBuf::from("/bin/echo"), PathBuf::from("out dir/file")]);

    let normalized = cmd.normalize().unwrap();

    assert_eq!(normalized.argv(), os(&["/bin/echo", "out dir/file"]).as_slice());
    assert_eq!(normalized.display(), "/bin/echo out dir/file");
}

#[test]
fn single_path_displays_as_is() {
    let cmd = CommandLine::from(Path::new("/usr/bin/env"));

    let normalized = cmd.normalize().unwrap();

    assert_eq!(normalized.argv(), os(&["/usr/bin/env"]).as_slice());
    assert_eq!(normalized.display(), "/usr/bin/env");
}

#[test]
fn empty_and_unbalanced_commands_are_config_errors() {
    for bad in ["", "   ", "echo 'oops"] {
        match CommandLine::from(bad).normalize() {
            Err(GatewayError::ConfigError(_)) => {}
            other => panic!("expected ConfigError for {bad:?}, got {other:?}"),
        }
    }

    let empty: Vec<String> = Vec::new();
    assert!(matches!(
        CommandLine::from(empty).normalize(),
        Err(GatewayError::ConfigError(_))
    ));
}

#[test]
fn normalizing_does_not_change_the_command() {
    let cmd = CommandLine::from("echo 'a b'");
    let before = cmd.clone();

    let first = cmd.normalize().unwrap();
    let second = cmd.normalize().unwrap();

    assert_eq!(cmd, before);
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn quoted_string_tokenizes_back_to_its_words(
        words in proptest::collection::vec("[ -~]{0,12}", 1..6)
    ) {
        // An all-empty first word still yields a (quoted) token.
        let line = shell_words::join(&words);
        let normalized = CommandLine::from(line.as_str()).normalize().unwrap();

        let expected: Vec<OsString> = words.iter().map(OsString::from).collect();
        prop_assert_eq!(normalized.argv(), expected.as_slice());
        prop_assert_eq!(normalized.display(), line.as_str());
    }
}
