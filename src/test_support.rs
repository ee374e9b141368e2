use crate::evaluate::{Evaluated, evaluate};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Create a temporary source tree from `(relative path, content)` pairs.
pub(crate) fn create_source_tree(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = temp_dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    temp_dir
}

/// Evaluate every `(relative path, content)` pair as one source tree.
///
/// Paths are passed in the given order.
pub(crate) fn evaluate_sources(files: &[(&str, &str)]) -> (TempDir, Vec<Evaluated>) {
    let temp_dir = create_source_tree(files);
    let paths: Vec<PathBuf> = files
        .iter()
        .map(|(rel, _)| temp_dir.path().join(rel))
        .collect();
    let evaluated = evaluate(&paths).unwrap();
    (temp_dir, evaluated)
}

pub(crate) const DEPLOYMENT: &str = r#"
deployment:
  apiVersion: apps/v1
  kind: Deployment
  metadata:
    name: web
  spec:
    replicas: 2
"#;

pub(crate) const SERVICE: &str = r#"
service:
  apiVersion: v1
  kind: Service
  metadata:
    name: web
    namespace: prod
  spec:
    ports:
      - port: 80
"#;
