//! Enrollment registry: username -> canonical enrollment audio file.
//!
//! Stored as YAML (~/.voxgate/users.yaml). Records are created or
//! overwritten on enrollment and read on every verification.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid username {name:?}: {reason}")]
    InvalidUsername { name: String, reason: &'static str },

    #[error("registry io: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry format: {0}")]
    Format(#[from] serde_yaml::Error),
}

/// One enrolled user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub username: String,
    pub voice_file: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    users: BTreeMap<String, PathBuf>,
}

/// YAML-backed enrollment registry.
#[derive(Debug)]
pub struct Registry {
    users: BTreeMap<String, PathBuf>,
    path: PathBuf,
}

impl Registry {
    /// Loads the registry at `path`. A missing file is an empty registry.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        let users = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_yaml::from_str::<RegistryFile>(&content)?.users,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { users, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the registry to disk.
    pub fn save(&self) -> Result<(), RegistryError> {
        write_users(&self.path, &self.users)
    }

    /// Looks up a user's enrollment.
    pub fn get(&self, username: &str) -> Option<Enrollment> {
        self.users.get(username).map(|voice_file| Enrollment {
            username: username.to_string(),
            voice_file: voice_file.clone(),
        })
    }

    /// Inserts or replaces a record and saves. Returns the previous record.
    ///
    /// The in-memory registry only changes once the file is written.
    pub fn upsert(&mut self, enrollment: Enrollment) -> Result<Option<Enrollment>, RegistryError> {
        validate_username(&enrollment.username)?;
        let previous = self.get(&enrollment.username);
        let mut users = self.users.clone();
        users.insert(enrollment.username, enrollment.voice_file);
        write_users(&self.path, &users)?;
        self.users = users;
        Ok(previous)
    }

    /// Lists all enrollments ordered by username.
    pub fn list(&self) -> Vec<Enrollment> {
        self.users
            .iter()
            .map(|(username, voice_file)| Enrollment {
                username: username.clone(),
                voice_file: voice_file.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn write_users(path: &Path, users: &BTreeMap<String, PathBuf>) -> Result<(), RegistryError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = RegistryFile {
        users: users.clone(),
    };
    std::fs::write(path, serde_yaml::to_string(&file)?)?;
    Ok(())
}

/// Checks that `name` can be used as a file name component.
pub fn validate_username(name: &str) -> Result<(), RegistryError> {
    let invalid = |reason| RegistryError::InvalidUsername {
        name: name.to_string(),
        reason,
    };
    if name.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(invalid("must not contain path separators"));
    }
    if name == "." || name.contains("..") {
        return Err(invalid("must not contain '..'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment(name: &str, file: &str) -> Enrollment {
        Enrollment {
            username: name.to_string(),
            voice_file: PathBuf::from(file),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let reg = Registry::load(dir.path().join("users.yaml")).unwrap();
        assert!(reg.is_empty());
        assert!(reg.get("alice").is_none());
    }

    #[test]
    fn test_upsert_persists_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.yaml");

        let mut reg = Registry::load(&path).unwrap();
        assert_eq!(reg.upsert(enrollment("alice", "data/alice.wav")).unwrap(), None);
        reg.upsert(enrollment("bob", "data/bob.wav")).unwrap();

        let prev = reg.upsert(enrollment("alice", "data/alice2.wav")).unwrap();
        assert_eq!(prev, Some(enrollment("alice", "data/alice.wav")));

        let reg = Registry::load(&path).unwrap();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("alice"), Some(enrollment("alice", "data/alice2.wav")));
        let names: Vec<String> = reg.list().into_iter().map(|e| e.username).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn test_upsert_rejects_bad_username() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = Registry::load(dir.path().join("users.yaml")).unwrap();
        for name in ["", "  ", "../etc", "a/b", "a\\b", "."] {
            let err = reg.upsert(enrollment(name, "x.wav")).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidUsername { .. }), "{name:?}");
        }
        assert!(reg.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.yaml");
        let mut reg = Registry::load(&path).unwrap();
        reg.upsert(enrollment("alice", "data/alice.wav")).unwrap();

        // A directory in place of the file makes the write fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            reg.upsert(enrollment("bob", "data/bob.wav")),
            Err(RegistryError::Io(_))
        ));
        assert!(reg.upsert(enrollment("alice", "data/other.wav")).is_err());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("alice"), Some(enrollment("alice", "data/alice.wav")));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.yaml");
        std::fs::write(&path, "users: [not, a, map").unwrap();
        assert!(matches!(Registry::load(&path), Err(RegistryError::Format(_))));
    }
}
