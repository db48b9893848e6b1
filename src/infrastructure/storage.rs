use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Hidden scratch path next to `target`, on the same filesystem so it can be renamed over it
pub fn temp_sibling(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let temp_name = format!(".{}.{}.tmp", file_name, Uuid::new_v4());
    match target.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    }
}

/// Move `from` over `to` in one step
pub fn replace_file(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
}

/// Delete `path`; returns whether a file was removed
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flashcards-storage-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_temp_sibling_stays_in_parent() {
        let target = Path::new("data").join("n5-vocab.csv");
        let temp = temp_sibling(&target);
        assert_eq!(temp.parent(), Some(Path::new("data")));
        let name = temp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".n5-vocab.csv."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn test_replace_file_overwrites_target() {
        let dir = scratch_dir();
        let target = dir.join("out.csv");
        fs::write(&target, "old").unwrap();
        let temp = temp_sibling(&target);
        fs::write(&temp, "new").unwrap();

        replace_file(&temp, &target).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(!temp.exists());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_remove_if_exists() {
        let dir = scratch_dir();
        let path = dir.join("gone.csv");
        assert!(!remove_if_exists(&path).unwrap());
        fs::write(&path, "x").unwrap();
        assert!(remove_if_exists(&path).unwrap());
        assert!(!path.exists());
        fs::remove_dir_all(dir).ok();
    }
}
