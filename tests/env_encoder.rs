use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;

use procgate::exec::{encode_environment, Environment};

#[test]
fn explicit_mapping_is_encoded_without_touching_input() {
    let mut env = Environment::new();
    env.set("PLAIN", "value");
    env.set("UNICODE", "naïve café ☕");
    let before = env.clone();

    let pairs = encode_environment(Some(&env));

    assert_eq!(env, before);
    assert_eq!(pairs.len(), 2);
    assert!(pairs.contains(&(OsString::from("UNICODE"), OsString::from("naïve café ☕"))));
    assert!(pairs.contains(&(OsString::from("PLAIN"), OsString::from("value"))));
}

#[test]
fn none_means_ambient_environment() {
    let ambient: Vec<(OsString, OsString)> = std::env::vars_os().collect();

    let pairs = encode_environment(None);

    for (key, value) in ambient {
        assert!(
            pairs.iter().any(|(k, v)| *k == key && *v == value),
            "missing ambient var {key:?}"
        );
    }
}

#[test]
fn from_ambient_matches_process_environment() {
    let env = Environment::from_ambient();

    for (key, value) in std::env::vars_os() {
        assert_eq!(env.get(&key), Some(value.as_os_str()));
    }
}

#[test]
fn string_maps_convert() {
    let mut hash = HashMap::new();
    hash.insert("A".to_string(), "1".to_string());
    let mut tree = BTreeMap::new();
    tree.insert("A".to_string(), "1".to_string());

    let from_hash = Environment::from(hash);
    let from_tree = Environment::from(tree);

    assert_eq!(from_hash, from_tree);
    assert_eq!(from_hash.get("A").unwrap(), "1");
}

#[test]
fn removing_absent_key_is_a_no_op() {
    let mut env = Environment::new();
    env.set("KEEP", "1");

    assert_eq!(env.remove("NOT_THERE"), None);
    assert_eq!(env.len(), 1);
}

#[cfg(unix)]
#[test]
fn non_utf8_values_survive_encoding() {
    use std::os::unix::ffi::OsStringExt;

    let raw = OsString::from_vec(vec![b'a', 0xff, b'b']);
    let mut env = Environment::new();
    env.set("RAW", raw.clone());

    let pairs = encode_environment(Some(&env));

    assert_eq!(pairs, vec![(OsString::from("RAW"), raw)]);
}
