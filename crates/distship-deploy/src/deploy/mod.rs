// ── distship-deploy / deploy module ──────────────────────────────────────────
//
// The recursive directory-upload engine:
//   • TransportSession – authenticated SSH connection lifecycle
//   • SftpChannel – remote directory creation and single-file puts
//   • TreeWalker – lazy depth-first enumeration of the local tree
//   • deploy() – the orchestrator tying the above together

pub mod channel;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod session;
pub mod types;
pub mod walker;

pub use channel::{remote_join, RemoteFs, SftpChannel};
pub use error::{
    ChannelError, ConnectionError, DeployError, DirectoryError, TransferError, ValidationError,
};
pub use events::{DeployEvent, NullSink, ProgressSink};
pub use orchestrator::deploy;
pub use session::{SessionState, TransportSession};
pub use types::{DeployConfig, DeploySummary, TransferOutcome, TransferStatus};
pub use walker::{EntryKind, LocalEntry, TreeWalker};
