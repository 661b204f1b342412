// ── SftpChannel – remote filesystem operations ───────────────────────────────

use async_trait::async_trait;
use log::{debug, info};
use ssh2::{OpenFlags, OpenType, Sftp};
use std::io::{Read, Write};
use std::path::Path;

use crate::deploy::error::{DirectoryError, TransferError};
use crate::deploy::session::TransportSession;

/// Upload buffer size; one SFTP write per chunk.
const CHUNK_SIZE: usize = 1_048_576; // 1 MiB

/// Remote-filesystem operations the orchestrator needs. [`SftpChannel`] is
/// the production implementation; tests substitute an in-memory fake.
#[async_trait]
pub trait RemoteFs {
    /// Create `path` and any missing parents (`mkdir -p` semantics).
    /// Succeeds as a no-op when the directory already exists; fails when a
    /// non-directory entry occupies any segment of the path.
    async fn ensure_directory(&self, path: &str) -> Result<(), DirectoryError>;

    /// Stream the full contents of `local` to `remote`, overwriting any
    /// existing file. Returns the number of bytes written. On failure the
    /// remote file's state is undefined; callers must not rely on partial
    /// writes.
    async fn put_file(&self, local: &Path, remote: &str) -> Result<u64, TransferError>;
}

/// SFTP sub-channel over an open [`TransportSession`]. One per deploy run;
/// the lifetime keeps it from outliving its session.
pub struct SftpChannel<'s> {
    sftp: Sftp,
    #[allow(dead_code)]
    session: &'s TransportSession,
}

impl<'s> SftpChannel<'s> {
    pub(crate) fn new(session: &'s TransportSession, sftp: Sftp) -> Self {
        SftpChannel { sftp, session }
    }
}

#[async_trait]
impl RemoteFs for SftpChannel<'_> {
    async fn ensure_directory(&self, path: &str) -> Result<(), DirectoryError> {
        // Build up from the root, skipping segments that already exist.
        let mut current = String::new();
        for part in path.split('/').filter(|s| !s.is_empty()) {
            current.push('/');
            current.push_str(part);

            match self.sftp.stat(Path::new(&current)) {
                Ok(stat) if stat.is_dir() => continue,
                Ok(_) => {
                    return Err(DirectoryError::NotADirectory { path: current });
                }
                Err(_) => {
                    self.sftp
                        .mkdir(Path::new(&current), 0o755)
                        .map_err(|e| DirectoryError::Create {
                            path: current.clone(),
                            source: e,
                        })?;
                }
            }
        }
        debug!("ensured remote directory {}", path);
        Ok(())
    }

    async fn put_file(&self, local: &Path, remote: &str) -> Result<u64, TransferError> {
        let mut local_file =
            std::fs::File::open(local).map_err(|e| TransferError::LocalRead {
                path: local.display().to_string(),
                source: e,
            })?;

        let mut remote_file = self
            .sftp
            .open_mode(
                Path::new(remote),
                OpenFlags::WRITE | OpenFlags::CREATE | OpenFlags::TRUNCATE,
                0o644,
                OpenType::File,
            )
            .map_err(|e| TransferError::RemoteOpen {
                path: remote.to_string(),
                source: e,
            })?;

        let mut transferred = 0u64;
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = local_file.read(&mut buf).map_err(|e| TransferError::LocalRead {
                path: local.display().to_string(),
                source: e,
            })?;
            if n == 0 {
                break;
            }
            remote_file
                .write_all(&buf[..n])
                .map_err(|e| TransferError::RemoteWrite {
                    path: remote.to_string(),
                    source: e,
                })?;
            transferred += n as u64;
        }

        info!("uploaded {} ({} bytes)", remote, transferred);
        Ok(transferred)
    }
}

// ── Remote path construction ─────────────────────────────────────────────────

/// Join a remote base and a walk-relative path with forward slashes, which
/// remote hosts require regardless of the local OS separator.
pub fn remote_join(base: &str, relative: &Path) -> String {
    let rel = relative.to_string_lossy().replace('\\', "/");
    if rel.is_empty() {
        return base.trim_end_matches('/').to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn remote_join_uses_forward_slashes() {
        let rel = PathBuf::from("sub").join("b.txt");
        let joined = remote_join("/var/www/html/dist", &rel);
        assert_eq!(joined, "/var/www/html/dist/sub/b.txt");
        assert!(!joined.contains('\\'));
    }

    #[test]
    fn remote_join_normalises_backslashes() {
        let joined = remote_join("/srv/www", Path::new("assets\\logo.png"));
        assert_eq!(joined, "/srv/www/assets/logo.png");
    }

    #[test]
    fn remote_join_tolerates_trailing_slash_on_base() {
        assert_eq!(
            remote_join("/var/www/html/", Path::new("dist")),
            "/var/www/html/dist"
        );
    }

    #[test]
    fn remote_join_with_empty_relative_is_the_base() {
        assert_eq!(remote_join("/var/www/html/", Path::new("")), "/var/www/html");
    }
}
