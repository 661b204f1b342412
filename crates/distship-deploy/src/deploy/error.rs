// ── Error taxonomy ───────────────────────────────────────────────────────────
//
// One enum per engine component, each variant carrying the path or peer it
// concerns plus the underlying cause. `DeployError` is the single error type
// `deploy()` surfaces to the caller.

use thiserror::Error;

/// Session establishment failures: the connection never reached Ready.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("cannot resolve '{host}:{port}': {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("TCP connection to {addr} failed: {source}")]
    Tcp {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("SSH handshake with {addr} failed: {source}")]
    Handshake {
        addr: String,
        #[source]
        source: ssh2::Error,
    },

    #[error("authentication failed for user '{username}': {reason}")]
    Auth { username: String, reason: String },

    #[error("private key material unusable: {0}")]
    Key(String),
}

/// The session is healthy but the SFTP subsystem could not be used.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("session is closed")]
    SessionClosed,

    #[error("failed to open SFTP channel: {0}")]
    Open(#[from] ssh2::Error),
}

/// Remote directory creation failures.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("remote path '{path}' exists and is not a directory")]
    NotADirectory { path: String },

    #[error("cannot create remote directory '{path}': {source}")]
    Create {
        path: String,
        #[source]
        source: ssh2::Error,
    },
}

/// Single-file transfer failures, on either side of the wire.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("cannot read local file '{path}': {source}")]
    LocalRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open remote file '{path}': {source}")]
    RemoteOpen {
        path: String,
        #[source]
        source: ssh2::Error,
    },

    #[error("write to remote '{path}' failed: {source}")]
    RemoteWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("walking local tree under '{path}' failed: {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },
}

/// The overall deploy outcome: exactly one of the component failures.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Pre-flight configuration validation. The caller's concern: `deploy()`
/// assumes a validated config and never returns this.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{0}' must not be empty")]
    Empty(&'static str),

    #[error("port must not be zero")]
    ZeroPort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_display_names_the_peer() {
        let err = ConnectionError::Tcp {
            addr: "203.0.113.9:22".into(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };
        let text = err.to_string();
        assert!(text.contains("203.0.113.9:22"));
        assert!(text.contains("refused"));
    }

    #[test]
    fn directory_error_display_names_the_path() {
        let err = DirectoryError::NotADirectory {
            path: "/var/www/html/dist".into(),
        };
        assert!(err.to_string().contains("/var/www/html/dist"));
    }

    #[test]
    fn transfer_error_keeps_io_source() {
        use std::error::Error as _;
        let err = TransferError::RemoteWrite {
            path: "/srv/www/dist/a.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::WriteZero, "short write"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn deploy_error_is_transparent_over_its_cause() {
        let cause = ConnectionError::Auth {
            username: "deploy".into(),
            reason: "all methods exhausted".into(),
        };
        let wrapped = DeployError::from(cause);
        assert!(wrapped.to_string().contains("deploy"));
        assert!(matches!(wrapped, DeployError::Connection(_)));
    }

    #[test]
    fn channel_error_wraps_ssh2() {
        let err = ChannelError::from(ssh2::Error::new(
            ssh2::ErrorCode::Session(-7),
            "failure establishing subsystem",
        ));
        assert!(matches!(err, ChannelError::Open(_)));
        assert!(err.to_string().contains("SFTP"));
    }
}
