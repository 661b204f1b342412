// ── Upload orchestrator ──────────────────────────────────────────────────────
//
// Composes session, channel, and walker into one deploy run: connect, open
// the SFTP channel, mirror the local tree under `<remote_root>/dist`, and
// tear the session down exactly once whatever the outcome.

use chrono::Utc;
use log::{info, warn};
use std::path::Path;
use uuid::Uuid;

use crate::deploy::channel::{remote_join, RemoteFs};
use crate::deploy::error::DeployError;
use crate::deploy::events::{DeployEvent, ProgressSink};
use crate::deploy::session::TransportSession;
use crate::deploy::types::{DeployConfig, DeploySummary, TransferOutcome, TransferStatus};
use crate::deploy::walker::{EntryKind, TreeWalker};

/// Name appended to the remote root once, at the top level only; nested
/// directories keep their own names. The deployed tree always lands at
/// `<remote_root>/dist`.
const DEPLOY_SUBDIR: &str = "dist";

/// Counters accumulated while the tree goes up.
#[derive(Debug, Default)]
struct TreeStats {
    files_uploaded: u32,
    directories_created: u32,
    bytes_transferred: u64,
    outcomes: Vec<TransferOutcome>,
}

/// Upload `config.local_root` to `config.remote_root/dist` over one
/// authenticated session. Progress goes into `sink`; the session is closed
/// (and `ConnectionClosed` emitted) exactly once per call, whether the
/// deploy succeeded or failed.
pub async fn deploy(
    config: &DeployConfig,
    sink: &mut dyn ProgressSink,
) -> Result<DeploySummary, DeployError> {
    let deploy_id = Uuid::new_v4().to_string();
    let started = Utc::now();

    let mut session = match TransportSession::open(config).await {
        Ok(session) => session,
        Err(e) => {
            // Never reached Ready: nothing was transferred and nothing is
            // open on the wire, but the lifecycle event contract still
            // holds — closed exactly once per deploy call.
            sink.emit(DeployEvent::ConnectionClosed);
            return Err(DeployError::Connection(e));
        }
    };
    sink.emit(DeployEvent::ConnectionEstablished {
        host: config.host.clone(),
        port: config.port,
    });

    let result = upload_phase(&session, config, sink).await;

    session.close();
    sink.emit(DeployEvent::ConnectionClosed);

    let stats = result?;
    let duration = (Utc::now() - started).num_milliseconds().max(0) as u64;
    info!(
        "deploy {} finished: {} files, {} bytes in {} ms",
        deploy_id, stats.files_uploaded, stats.bytes_transferred, duration
    );

    Ok(DeploySummary {
        deploy_id,
        started_at: started,
        duration_ms: duration,
        files_uploaded: stats.files_uploaded,
        directories_created: stats.directories_created,
        bytes_transferred: stats.bytes_transferred,
        outcomes: stats.outcomes,
    })
}

/// Everything between Ready and teardown, split out so `deploy` has a
/// single close point on both the success and the failure path.
async fn upload_phase(
    session: &TransportSession,
    config: &DeployConfig,
    sink: &mut dyn ProgressSink,
) -> Result<TreeStats, DeployError> {
    let channel = session.open_channel()?;
    let remote_base = remote_join(&config.remote_root, Path::new(DEPLOY_SUBDIR));
    upload_tree(&channel, &config.local_root, &remote_base, sink).await
}

/// Mirror `local_root` under `remote_base`: the base and every directory
/// are ensured before anything inside them is written, files go up strictly
/// one at a time, and the first failure aborts the remaining walk.
async fn upload_tree<R: RemoteFs>(
    remote: &R,
    local_root: &Path,
    remote_base: &str,
    sink: &mut dyn ProgressSink,
) -> Result<TreeStats, DeployError> {
    let mut stats = TreeStats::default();

    remote.ensure_directory(remote_base).await?;
    stats.directories_created += 1;
    sink.emit(DeployEvent::DirectoryEnsured {
        path: remote_base.to_string(),
    });

    for entry in TreeWalker::new(local_root) {
        let entry = entry?;
        let remote_path = remote_join(remote_base, &entry.relative);

        match entry.kind {
            EntryKind::Directory => {
                remote.ensure_directory(&remote_path).await?;
                stats.directories_created += 1;
                sink.emit(DeployEvent::DirectoryEnsured { path: remote_path });
            }
            EntryKind::File => match remote.put_file(&entry.path, &remote_path).await {
                Ok(bytes) => {
                    stats.files_uploaded += 1;
                    stats.bytes_transferred += bytes;
                    sink.emit(DeployEvent::FileUploaded {
                        path: remote_path.clone(),
                        bytes,
                    });
                    stats.outcomes.push(TransferOutcome {
                        path: remote_path,
                        status: TransferStatus::Success,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("upload of {} failed: {}", remote_path, e);
                    sink.emit(DeployEvent::FileFailed {
                        path: remote_path.clone(),
                        error: e.to_string(),
                    });
                    stats.outcomes.push(TransferOutcome {
                        path: remote_path,
                        status: TransferStatus::Failure,
                        error: Some(e.to_string()),
                    });
                    // First failure aborts the walk; siblings and
                    // descendants are not attempted.
                    return Err(DeployError::Transfer(e));
                }
            },
        }
    }

    Ok(stats)
}
