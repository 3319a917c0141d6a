use std::path::{Path, PathBuf};
use weekplan_core::paths::WEEKPLAN_DIR;

/// Resolve the planner root directory.
///
/// Priority:
/// 1. `--root` flag / `WEEKPLAN_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.weekplan/`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_planner_dir(&cwd).unwrap_or(cwd)
}

fn find_planner_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(WEEKPLAN_DIR).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_weekplan_dir_above_start() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".weekplan")).unwrap();
        let subdir = dir.path().join("notes/2024");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_planner_dir(&subdir).as_deref(), Some(dir.path()));
    }

    #[test]
    fn no_weekplan_dir_found() {
        let dir = TempDir::new().unwrap();
        let subdir = dir.path().join("a/b");
        std::fs::create_dir_all(&subdir).unwrap();
        let found = find_planner_dir(&subdir);
        assert!(found.map_or(true, |p| !p.starts_with(dir.path())));
    }
}
