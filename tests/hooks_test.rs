use kiln::error::{Error, Result};
use kiln::generator::{Generator, Seed};
use kiln::hooks::{run_hooks, GenerationContext, PackageManager, VersionControl};
use kiln::prompt::AcceptDefaults;
use kiln::resolver::resolve;
use kiln::schema::AnswerSet;
use kiln::store::MemoryStore;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
struct RecordingVcs {
    calls: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl VersionControl for RecordingVcs {
    fn init(&self, dir: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(dir.to_path_buf());
        if self.fail {
            Err(Error::HookError {
                hook: "init-repository".to_string(),
                message: "refused".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
struct RecordingPackageManager {
    calls: Mutex<Vec<(PathBuf, String)>>,
    fail: bool,
}

impl PackageManager for RecordingPackageManager {
    fn install(&self, dir: &Path, client: &str) -> Result<()> {
        self.calls.lock().unwrap().push((dir.to_path_buf(), client.to_string()));
        if self.fail {
            Err(Error::HookError {
                hook: "install-dependencies".to_string(),
                message: "install exited with 1".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn answers(extra: serde_json::Value) -> AnswerSet {
    let mut overrides = json!({
        "name": "my-package-name",
        "email": "user@example.com",
        "username": "user"
    });
    for (key, value) in extra.as_object().unwrap() {
        overrides.as_object_mut().unwrap().insert(key.clone(), value.clone());
    }
    let generator = Generator::new(&Seed::default());
    let mut store = MemoryStore::new();
    resolve(generator.schema(), &overrides, &AcceptDefaults, &mut store).unwrap()
}

#[test]
fn test_hooks_run_in_order_with_the_chosen_client() {
    let generator = Generator::new(&Seed::default());
    let resolved = answers(json!({ "pm": "yarn" }));
    let vcs = RecordingVcs::default();
    let pm = RecordingPackageManager::default();
    let ctx = GenerationContext {
        output_dir: PathBuf::from("/tmp/out"),
        answers: &resolved,
        vcs: &vcs,
        package_manager: &pm,
    };

    let outcome = run_hooks(generator.hooks(), &ctx).unwrap();

    assert_eq!(
        outcome.completed,
        vec!["init-repository", "install-dependencies", "show-tips"]
    );
    assert!(outcome.failed.is_empty());
    assert_eq!(vcs.calls.lock().unwrap().as_slice(), &[PathBuf::from("/tmp/out")]);
    assert_eq!(
        pm.calls.lock().unwrap().as_slice(),
        &[(PathBuf::from("/tmp/out"), "yarn".to_string())]
    );
}

#[test]
fn test_fatal_hook_failure_aborts_the_rest() {
    let generator = Generator::new(&Seed::default());
    let resolved = answers(json!({}));
    let vcs = RecordingVcs::default();
    let pm = RecordingPackageManager { fail: true, ..Default::default() };
    let ctx = GenerationContext {
        output_dir: PathBuf::from("/tmp/out"),
        answers: &resolved,
        vcs: &vcs,
        package_manager: &pm,
    };

    match run_hooks(generator.hooks(), &ctx) {
        Err(Error::GenerationAborted { hook, .. }) => {
            assert_eq!(hook, "install-dependencies");
        }
        other => panic!("expected GenerationAborted, got {:?}", other.map(|_| ())),
    }

    // The earlier step still ran; install was attempted exactly once.
    assert_eq!(vcs.calls.lock().unwrap().len(), 1);
    assert_eq!(pm.calls.lock().unwrap().len(), 1);
}

#[test]
fn test_non_fatal_failure_is_recorded_and_does_not_stop_the_sequence() {
    let generator = Generator::new(&Seed::default());
    let resolved = answers(json!({}));
    let vcs = RecordingVcs { fail: true, ..Default::default() };
    let pm = RecordingPackageManager::default();
    let ctx = GenerationContext {
        output_dir: PathBuf::from("/tmp/out"),
        answers: &resolved,
        vcs: &vcs,
        package_manager: &pm,
    };

    let outcome = run_hooks(generator.hooks(), &ctx).unwrap();

    assert_eq!(outcome.completed, vec!["install-dependencies", "show-tips"]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, "init-repository");
    // The install still ran after the non-fatal failure.
    assert_eq!(pm.calls.lock().unwrap().len(), 1);
}
