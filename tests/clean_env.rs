use procgate::exec::clean_env::{INTERPRETER_VARS, MANAGER_VARS};
use procgate::exec::{CleanEnvOptions, Environment, sanitize_environment};

fn polluted() -> Environment {
    let mut env = Environment::new();
    for key in INTERPRETER_VARS.iter().chain(MANAGER_VARS.iter()) {
        env.set(*key, "polluted");
    }
    env.set("PATH", "/usr/bin:/bin");
    env.set("LANG", "C.UTF-8");
    env
}

#[test]
fn strips_all_six_variables_and_keeps_the_rest() {
    let env = polluted();

    let clean = sanitize_environment(&env, CleanEnvOptions::default());

    for key in INTERPRETER_VARS.iter().chain(MANAGER_VARS.iter()) {
        assert!(!clean.contains_key(key), "{key} should have been removed");
    }
    assert_eq!(clean.get("PATH").unwrap(), "/usr/bin:/bin");
    assert_eq!(clean.get("LANG").unwrap(), "C.UTF-8");
    assert_eq!(clean.len(), 2);
}

#[test]
fn input_environment_is_left_untouched() {
    let env = polluted();
    let before = env.clone();

    let _ = sanitize_environment(&env, CleanEnvOptions::default());

    assert_eq!(env, before);
}

#[test]
fn environment_without_named_variables_is_a_no_op() {
    let mut env = Environment::new();
    env.set("PATH", "/usr/bin");
    env.set("HOME", "/home/someone");

    let clean = sanitize_environment(&env, CleanEnvOptions::default());

    assert_eq!(clean, env);
}

#[test]
fn groups_toggle_independently() {
    let env = polluted();

    let keep_interpreter = sanitize_environment(
        &env,
        CleanEnvOptions {
            clean_interpreter: false,
            clean_manager: true,
        },
    );
    assert!(keep_interpreter.contains_key("PYTHONPATH"));
    assert!(keep_interpreter.contains_key("PYTHONHOME"));
    assert!(!keep_interpreter.contains_key("CONDA_EXE"));

    let keep_manager = sanitize_environment(
        &env,
        CleanEnvOptions {
            clean_interpreter: true,
            clean_manager: false,
        },
    );
    assert!(!keep_manager.contains_key("PYTHONPATH"));
    for key in MANAGER_VARS {
        assert!(keep_manager.contains_key(key));
    }

    let keep_all = sanitize_environment(
        &env,
        CleanEnvOptions {
            clean_interpreter: false,
            clean_manager: false,
        },
    );
    assert_eq!(keep_all, env);
}

#[cfg(unix)]
mod through_gateway {
    use procgate::exec::{CleanEnvOptions, Environment, Gateway, ProcessRegistry, SubprocessCall};
    use procgate_test_utils::config_in;
    use tempfile::TempDir;

    #[tokio::test]
    async fn child_never_sees_interpreter_or_manager_variables() {
        let dir = TempDir::new().unwrap();
        let registry = ProcessRegistry::new();
        let gw = Gateway::new(config_in(dir.path()), registry.clone());

        // An explicit env on the call is replaced by the sanitized ambient one.
        let mut env = Environment::new();
        env.set("PYTHONPATH", "/should/not/leak");

        let response = gw
            .call_with_clean_env(
                SubprocessCall::new([
                    "sh",
                    "-c",
                    "printf '%s %s' \"${PYTHONPATH-unset}\" \"${CONDA_EXE-unset}\"",
                ])
                .env(env),
                CleanEnvOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(response.stdout, "unset unset");
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn nonzero_exit_still_raises() {
        let dir = TempDir::new().unwrap();
        let gw = Gateway::new(config_in(dir.path()), ProcessRegistry::new());

        let err = gw
            .call_with_clean_env(SubprocessCall::new("false"), CleanEnvOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), Some(1));
    }
}
