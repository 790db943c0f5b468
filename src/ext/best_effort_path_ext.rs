use std::env;
use std::path::{Component, Path, PathBuf};

/// Absolute form of `path`, as close to the real location as can be determined.
///
/// Existing entries are canonicalized. Anything else is made absolute against the
/// current directory and normalized lexically, so the result is still meaningful
/// for entries that have not been created yet.
pub fn best_effort_absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|current_dir| current_dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    normalize_path(&absolute)
}

/// Resolves `.` and `..` without touching the filesystem. `..` never climbs above the root.
fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::new(), |mut components, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(components.last(), Some(Component::Normal(_))) {
                        components.pop();
                    }
                }
                other => components.push(other),
            }
            components
        })
        .iter()
        .collect()
}

pub trait BestEffortPathExt {
    fn best_effort_absolute(&self) -> PathBuf;

    fn best_effort_path_display(&self) -> String {
        self.best_effort_absolute().display().to_string()
    }
}

impl BestEffortPathExt for Path {
    fn best_effort_absolute(&self) -> PathBuf {
        best_effort_absolute(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_absolute(&self) -> PathBuf {
        best_effort_absolute(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use tempfile::TempDir;

    #[rstest]
    #[case("/a/b/../c", "/a/c")]
    #[case("/a/./b/./c", "/a/b/c")]
    #[case("/../a", "/a")]
    #[case("/a/b/../../..", "/")]
    #[case("/", "/")]
    fn normalize_resolves_dots_lexically(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn existing_path_is_canonicalized() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested");
        std::fs::create_dir(&nested).expect("Failed to create nested directory");

        let dotted = nested.join("..").join("nested");

        assert_eq!(
            dotted.best_effort_absolute(),
            nested.canonicalize().expect("Failed to canonicalize")
        );
    }

    #[test]
    fn missing_path_is_made_absolute() {
        let relative = Path::new("does/not/../exist.txt");

        let absolute = relative.best_effort_absolute();

        assert!(absolute.is_absolute());
        assert!(absolute.ends_with("does/exist.txt"));
    }
}
