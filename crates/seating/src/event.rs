//! Status events published by the cafe, and the sinks that receive them.
//!
//! The cafe never prints; it publishes each state change to an `EventSink`.
//! Subscribers decide presentation:
//! - `TextSink`: the classic human-readable lines on stdout
//! - `JsonSink`: one JSON object per line on stdout
//! - `mpsc::UnboundedSender<SeatingEvent>`: forward to another task
//! - `NullSink`: drop everything

use std::fmt;
use std::io::Write;

use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Seated,
    Queued,
    Departed,
    Promoted,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seated => "seated",
            Self::Queued => "queued",
            Self::Departed => "departed",
            Self::Promoted => "promoted",
        }
    }
}

/// A change in who sits where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeatingEvent {
    /// Guest found a free table on arrival.
    Seated { name: String, table: usize },
    /// Guest arrived with every table taken.
    Queued { name: String },
    /// Guest's visit finished and the table was cleared.
    Departed { name: String, table: usize },
    /// Guest moved from the head of the queue to a freed table.
    Promoted { name: String, table: usize },
}

impl SeatingEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Seated { .. } => EventKind::Seated,
            Self::Queued { .. } => EventKind::Queued,
            Self::Departed { .. } => EventKind::Departed,
            Self::Promoted { .. } => EventKind::Promoted,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Seated { name, .. }
            | Self::Queued { name }
            | Self::Departed { name, .. }
            | Self::Promoted { name, .. } => name,
        }
    }

    /// Table number, for every kind but `Queued`.
    pub fn table(&self) -> Option<usize> {
        match self {
            Self::Seated { table, .. }
            | Self::Departed { table, .. }
            | Self::Promoted { table, .. } => Some(*table),
            Self::Queued { .. } => None,
        }
    }
}

impl fmt::Display for SeatingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seated { name, table } => write!(f, "{name} sat at table number {table}"),
            Self::Queued { name } => write!(f, "{name} is in queue"),
            Self::Departed { name, table } => {
                write!(f, "{name} finished and left\nTable number {table} is free")
            }
            Self::Promoted { name, table } => {
                write!(f, "{name} left the queue and sat at table number {table}")
            }
        }
    }
}

/// Receiver of seating events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: SeatingEvent);
}

impl EventSink for mpsc::UnboundedSender<SeatingEvent> {
    fn publish(&self, event: SeatingEvent) {
        // A closed receiver means nobody is listening any more.
        let _ = self.send(event);
    }
}

/// Writes the human-readable rendering to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSink;

impl EventSink for TextSink {
    fn publish(&self, event: SeatingEvent) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{event}") {
            tracing::warn!(error = %e, "Failed to write event");
        }
    }
}

/// Writes each event as a JSON line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSink;

impl EventSink for JsonSink {
    fn publish(&self, event: SeatingEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize event");
                return;
            }
        };
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{line}") {
            tracing::warn!(error = %e, "Failed to write event");
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: SeatingEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seated() -> SeatingEvent {
        SeatingEvent::Seated {
            name: "Maria".to_string(),
            table: 1,
        }
    }

    #[test]
    fn kind_and_accessors() {
        let queued = SeatingEvent::Queued {
            name: "Nikita".to_string(),
        };
        assert_eq!(queued.kind(), EventKind::Queued);
        assert_eq!(queued.name(), "Nikita");
        assert_eq!(queued.table(), None);

        assert_eq!(seated().kind().as_str(), "seated");
        assert_eq!(seated().table(), Some(1));
    }

    #[test]
    fn renders_reference_text() {
        let events = [
            seated(),
            SeatingEvent::Queued {
                name: "Vitoria".to_string(),
            },
            SeatingEvent::Departed {
                name: "Oleg".to_string(),
                table: 2,
            },
            SeatingEvent::Promoted {
                name: "Vitoria".to_string(),
                table: 2,
            },
        ];
        let text = events
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        insta::assert_snapshot!(text, @r"
        Maria sat at table number 1
        Vitoria is in queue
        Oleg finished and left
        Table number 2 is free
        Vitoria left the queue and sat at table number 2
        ");
    }

    #[test]
    fn seated_serializes_with_kind_tag() {
        insta::assert_json_snapshot!(seated(), @r#"
        {
          "kind": "seated",
          "name": "Maria",
          "table": 1
        }
        "#);
    }

    #[test]
    fn queued_serializes_without_table() {
        let event = SeatingEvent::Queued {
            name: "Alexandra".to_string(),
        };
        insta::assert_json_snapshot!(event, @r#"
        {
          "kind": "queued",
          "name": "Alexandra"
        }
        "#);
    }

    #[test]
    fn event_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&EventKind::Promoted).unwrap(),
            "\"promoted\""
        );
    }

    #[test]
    fn channel_sink_forwards_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.publish(seated());
        assert_eq!(rx.try_recv().unwrap(), seated());
    }

    #[test]
    fn channel_sink_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<SeatingEvent>();
        drop(rx);
        tx.publish(seated());
    }
}
