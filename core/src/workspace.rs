use std::io;
use std::path::{Path, PathBuf};

use rand::Rng as _;

/// A per-attempt directory holding a submission's source and build artifacts.
///
/// The directory is removed when the value is dropped, so every exit path of a
/// compile/run attempt (including early returns and timeouts) releases it.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    const MAX_CREATE_ATTEMPTS: usize = 8;

    pub fn create(root: impl AsRef<Path>) -> fsutil::Result<Self> {
        fsutil::mkdir_all(&root)?;
        // Absolute, so that commands stay valid whatever the child's cwd is.
        let root = fsutil::canonicalize_path(&root)?;

        for _ in 0..Self::MAX_CREATE_ATTEMPTS {
            let dir = root.join(Self::new_id());
            match fsutil::mkdir_new(&dir) {
                Ok(()) => {
                    log::debug!("Created workspace {}", dir.to_string_lossy());
                    return Ok(Self { dir });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(fsutil::Error::SingleIO("Cannot create workspace", dir, e));
                }
            }
        }
        Err(fsutil::Error::SingleIO(
            "Cannot create workspace: every generated name was taken",
            root,
            io::ErrorKind::AlreadyExists.into(),
        ))
    }

    fn new_id() -> String {
        format!("{:016x}", rand::thread_rng().gen::<u64>())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.join(name)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        match fsutil::remove_dir_all(&self.dir) {
            Ok(()) => log::debug!("Removed workspace {}", self.dir.to_string_lossy()),
            Err(e) => log::warn!("Failed to clean up workspace: {:#}", e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dir_is_removed_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::create(root.path()).unwrap();
        let dir = ws.dir().to_owned();
        fsutil::write(ws.file("main.py"), "print(1)").unwrap();
        fsutil::mkdir_all(ws.file("classes/pkg")).unwrap();
        assert!(dir.is_dir());

        drop(ws);
        assert!(!dir.exists());
        assert!(root.path().is_dir());
    }

    #[test]
    fn each_workspace_gets_its_own_dir() {
        let root = tempfile::tempdir().unwrap();
        let a = Workspace::create(root.path()).unwrap();
        let b = Workspace::create(root.path()).unwrap();
        assert_ne!(a.dir(), b.dir());
        let root = root.path().canonicalize().unwrap();
        assert_eq!(a.dir().parent(), Some(root.as_path()));
        assert_eq!(b.dir().parent(), Some(root.as_path()));
    }

    #[test]
    fn root_is_created_if_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("not/yet/there");
        let ws = Workspace::create(&root).unwrap();
        assert!(ws.dir().is_absolute());
        assert!(ws.dir().starts_with(root.canonicalize().unwrap()));
    }
}
