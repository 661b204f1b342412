// ── Progress events ──────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Discrete notifications emitted while a deploy runs. The engine knows
/// nothing about how they are rendered; the caller supplies a sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum DeployEvent {
    ConnectionEstablished { host: String, port: u16 },
    DirectoryEnsured { path: String },
    FileUploaded { path: String, bytes: u64 },
    FileFailed { path: String, error: String },
    ConnectionClosed,
}

/// Receiver for [`DeployEvent`]s.
pub trait ProgressSink {
    fn emit(&mut self, event: DeployEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&mut self, _event: DeployEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_their_variant() {
        let event = DeployEvent::FileUploaded {
            path: "/srv/www/dist/a.txt".into(),
            bytes: 42,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"fileUploaded\""));
        let back: DeployEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn null_sink_accepts_everything() {
        let mut sink = NullSink;
        sink.emit(DeployEvent::ConnectionClosed);
        sink.emit(DeployEvent::DirectoryEnsured {
            path: "/srv".into(),
        });
    }
}
