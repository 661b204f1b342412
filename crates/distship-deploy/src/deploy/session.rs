// ── TransportSession – connection lifecycle ──────────────────────────────────

use log::{debug, info};
use ssh2::Session;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use uuid::Uuid;

use crate::deploy::channel::SftpChannel;
use crate::deploy::error::{ChannelError, ConnectionError};
use crate::deploy::types::DeployConfig;

/// Observable lifecycle of an existing session. The Disconnected/Connecting/
/// Failed phases of the full state machine live inside [`TransportSession::open`]:
/// a session value only exists once it is Ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Closed,
}

/// One live authenticated SSH connection, exclusively owned by a single
/// deploy run. Exactly one `open` per instance (opening is constructing);
/// not reusable after [`close`](Self::close).
pub struct TransportSession {
    session: Session,
    /// Held so the underlying socket outlives the libssh2 handle.
    #[allow(dead_code)]
    tcp: TcpStream,
    state: SessionState,
    addr: String,
}

impl std::fmt::Debug for TransportSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportSession")
            .field("state", &self.state)
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

impl TransportSession {
    /// Resolve, connect, handshake, and authenticate with the key material
    /// in `config`. The returned session is Ready; every failure path maps
    /// to one [`ConnectionError`] cause and leaves nothing to clean up.
    pub async fn open(config: &DeployConfig) -> Result<Self, ConnectionError> {
        let addr = config.addr();
        info!("connecting to {}", addr);

        let socket_addr = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|e| ConnectionError::Resolve {
                host: config.host.clone(),
                port: config.port,
                source: e,
            })?
            .next()
            .ok_or_else(|| ConnectionError::Resolve {
                host: config.host.clone(),
                port: config.port,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "resolver returned no addresses",
                ),
            })?;

        let tcp = TcpStream::connect_timeout(
            &socket_addr,
            Duration::from_secs(config.timeout_secs),
        )
        .map_err(|e| ConnectionError::Tcp {
            addr: addr.clone(),
            source: e,
        })?;

        let mut session = Session::new().map_err(|e| ConnectionError::Handshake {
            addr: addr.clone(),
            source: e,
        })?;

        session.set_tcp_stream(tcp.try_clone().map_err(|e| ConnectionError::Tcp {
            addr: addr.clone(),
            source: e,
        })?);
        session.handshake().map_err(|e| ConnectionError::Handshake {
            addr: addr.clone(),
            source: e,
        })?;

        if let Some(banner) = session.banner() {
            debug!("server banner: {}", banner);
        }

        authenticate(&mut session, config)?;
        info!("authenticated to {} as {}", addr, config.username);

        Ok(TransportSession {
            session,
            tcp,
            state: SessionState::Ready,
            addr,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Open the SFTP sub-channel. The borrow ties the channel's validity to
    /// this session staying alive.
    pub fn open_channel(&self) -> Result<SftpChannel<'_>, ChannelError> {
        if self.state == SessionState::Closed {
            return Err(ChannelError::SessionClosed);
        }
        let sftp = self.session.sftp()?;
        debug!("SFTP channel opened to {}", self.addr);
        Ok(SftpChannel::new(self, sftp))
    }

    /// Gracefully end the connection. Idempotent: the first call sends the
    /// SSH disconnect; later calls are no-ops.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;
        let _ = self.session.disconnect(None, "deploy finished", None);
        info!("session to {} closed", self.addr);
    }
}

/// Public-key auth from in-memory key material. ssh2 has no portable
/// in-memory userauth, so the key is staged in a uuid-named temp file for
/// the duration of the call and removed before returning.
fn authenticate(session: &mut Session, config: &DeployConfig) -> Result<(), ConnectionError> {
    let tmp_key = std::env::temp_dir().join(format!("distship_key_{}", Uuid::new_v4()));
    std::fs::write(&tmp_key, config.private_key.as_bytes())
        .map_err(|e| ConnectionError::Key(format!("cannot stage key material: {}", e)))?;

    let result = session.userauth_pubkey_file(&config.username, None, &tmp_key, None);
    let _ = std::fs::remove_file(&tmp_key);

    result.map_err(|e| ConnectionError::Auth {
        username: config.username.clone(),
        reason: e.to_string(),
    })?;

    if !session.authenticated() {
        return Err(ConnectionError::Auth {
            username: config.username.clone(),
            reason: "not authenticated after public-key exchange".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(host: &str, port: u16) -> DeployConfig {
        DeployConfig {
            host: host.into(),
            port,
            username: "deploy".into(),
            private_key: "not a real key".into(),
            local_root: PathBuf::from("."),
            remote_root: "/srv/www".into(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn unresolvable_host_is_a_resolve_error() {
        let err = TransportSession::open(&config("host.invalid.", 22))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Resolve { .. }));
    }

    #[tokio::test]
    async fn refused_port_is_a_tcp_error() {
        // Bind-then-drop to obtain a local port with nothing listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = TransportSession::open(&config("127.0.0.1", port))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Tcp { .. }));
    }

    #[tokio::test]
    async fn peer_that_never_speaks_ssh_fails_the_handshake() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let accept = std::thread::spawn(move || {
            // Accept and immediately hang up; the client handshake dies.
            let _ = listener.accept();
        });

        let err = TransportSession::open(&config("127.0.0.1", port))
            .await
            .unwrap_err();
        accept.join().unwrap();
        assert!(matches!(err, ConnectionError::Handshake { .. }));
    }
}
