//! Durable session storage: the `auth_token` / `user_data` entry pair kept
//! under a root directory. The pair is the unit — a session is readable only
//! when both entries exist and the profile parses.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::profile::{SessionRecord, UserProfile};
use crate::error::{SessionError, SessionResult};

pub const TOKEN_ENTRY: &str = "auth_token";
pub const USER_ENTRY: &str = "user_data";

pub struct SessionVault {
    root: PathBuf,
}

impl SessionVault {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn token_path(&self) -> PathBuf { self.root.join(TOKEN_ENTRY) }
    fn user_path(&self) -> PathBuf { self.root.join(USER_ENTRY) }

    /// Write both entries or neither. Both entries are staged to temp
    /// files before either rename, so a failure while writing leaves the
    /// previous pair untouched; the token rename goes last because `read`
    /// requires it.
    pub fn persist(&self, record: &SessionRecord) -> SessionResult<()> {
        std::fs::create_dir_all(&self.root)?;
        let user_json = serde_json::to_string(&record.user)
            .map_err(|e| SessionError::storage(e.to_string()))?;
        let user_tmp = stage(&self.user_path(), &user_json)?;
        let token_tmp = stage(&self.token_path(), &record.token)?;
        std::fs::rename(&user_tmp, self.user_path())?;
        std::fs::rename(&token_tmp, self.token_path())?;
        Ok(())
    }

    /// `None` when either entry is missing or the stored profile does not
    /// parse — a corrupt record is indistinguishable from no record.
    pub fn read(&self) -> Option<SessionRecord> {
        let token = std::fs::read_to_string(self.token_path()).ok()?;
        let raw = std::fs::read_to_string(self.user_path()).ok()?;
        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Some(SessionRecord { token, user }),
            Err(e) => {
                debug!("stored profile failed to parse, treating as no session: {}", e);
                None
            }
        }
    }

    /// Remove both entries. Idempotent; missing files are not errors.
    pub fn clear(&self) {
        for path in [self.token_path(), self.user_path()] {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != ErrorKind::NotFound {
                    warn!("could not remove session entry {}: {}", path.display(), e);
                }
            }
        }
    }
}

fn stage(path: &Path, contents: &str) -> SessionResult<PathBuf> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents)?;
    Ok(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record() -> SessionRecord {
        SessionRecord {
            token: "h.p.s".into(),
            user: UserProfile {
                id: "108".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                picture: Some("https://p/x.png".into()),
                api_key: Some("A".into()),
            },
        }
    }

    #[test]
    fn round_trip() {
        let tmp = tempdir().unwrap();
        let vault = SessionVault::new(tmp.path());
        vault.persist(&record()).unwrap();
        assert_eq!(vault.read().unwrap(), record());
    }

    #[test]
    fn empty_vault_reads_none() {
        let tmp = tempdir().unwrap();
        assert!(SessionVault::new(tmp.path()).read().is_none());
    }

    #[test]
    fn half_a_pair_is_no_session() {
        let tmp = tempdir().unwrap();
        let vault = SessionVault::new(tmp.path());
        std::fs::write(tmp.path().join(TOKEN_ENTRY), "h.p.s").unwrap();
        assert!(vault.read().is_none());
    }

    #[test]
    fn corrupt_profile_is_no_session() {
        let tmp = tempdir().unwrap();
        let vault = SessionVault::new(tmp.path());
        std::fs::write(tmp.path().join(TOKEN_ENTRY), "h.p.s").unwrap();
        std::fs::write(tmp.path().join(USER_ENTRY), "{not json").unwrap();
        assert!(vault.read().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let tmp = tempdir().unwrap();
        let vault = SessionVault::new(tmp.path());
        vault.persist(&record()).unwrap();
        vault.clear();
        vault.clear();
        assert!(vault.read().is_none());
        assert!(!tmp.path().join(TOKEN_ENTRY).exists());
        assert!(!tmp.path().join(USER_ENTRY).exists());
    }

    #[test]
    fn failed_persist_keeps_the_previous_record() {
        let tmp = tempdir().unwrap();
        let vault = SessionVault::new(tmp.path());
        vault.persist(&record()).unwrap();
        // Occupy the staging path with a non-empty directory so the next
        // persist cannot stage its profile entry.
        let blocker = tmp.path().join(format!("{USER_ENTRY}.tmp"));
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("x"), "x").unwrap();
        let mut next = record();
        next.user.api_key = Some("B".into());
        assert!(vault.persist(&next).is_err());
        assert_eq!(vault.read().unwrap(), record());
    }

    #[test]
    fn persist_replaces_previous_record() {
        let tmp = tempdir().unwrap();
        let vault = SessionVault::new(tmp.path());
        vault.persist(&record()).unwrap();
        let mut next = record();
        next.user.api_key = Some("B".into());
        vault.persist(&next).unwrap();
        assert_eq!(vault.read().unwrap().user.api_key.as_deref(), Some("B"));
    }
}
