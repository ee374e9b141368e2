//! Loading source files into evaluated instances.

use super::error::LoadError;
use super::parse::from_yaml;
use super::resolve::{finalize, resolve};
use super::unify::unify;
use super::value::Value;
use std::path::{Path, PathBuf};

/// One unit of configuration: the source files of a single directory,
/// unified into one value.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Directory the instance was loaded from, used to name it in messages.
    pub dir: PathBuf,
    /// Source files in load order.
    pub files: Vec<PathBuf>,
    /// The evaluated value.
    pub value: Value,
}

impl Instance {
    /// Display name of the instance.
    pub fn name(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Load and evaluate source files.
///
/// Files are grouped by parent directory; groups keep the order in which
/// their first file appears.
pub fn load_instances(files: &[PathBuf]) -> Result<Vec<Instance>, LoadError> {
    group_by_dir(files)
        .into_iter()
        .map(|(dir, files)| build_instance(dir, files))
        .collect()
}

fn group_by_dir(files: &[PathBuf]) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut groups: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
    for file in files {
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        match groups.iter_mut().find(|(d, _)| *d == dir) {
            Some((_, members)) => members.push(file.clone()),
            None => groups.push((dir, vec![file.clone()])),
        }
    }
    groups
}

fn build_instance(dir: PathBuf, files: Vec<PathBuf>) -> Result<Instance, LoadError> {
    let mut unified = Value::Struct(Vec::new());
    for file in &files {
        unified = unify(unified, load_file(file)?);
    }
    let value = finalize(resolve(&unified));
    Ok(Instance { dir, files, value })
}

fn load_file(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|source| LoadError::Syntax {
            path: path.to_path_buf(),
            source,
        })?;

    let doc = match doc {
        serde_yaml::Value::Null => serde_yaml::Value::Mapping(serde_yaml::Mapping::new()),
        serde_yaml::Value::Mapping(_) => doc,
        _ => {
            return Err(LoadError::NotAMapping {
                path: path.to_path_buf(),
            });
        }
    };

    from_yaml(doc, "").map_err(|(field, message)| LoadError::Invalid {
        path: path.to_path_buf(),
        field,
        message,
    })
}
