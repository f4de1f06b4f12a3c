//! UI sink that streams every [`UiEvent`] as one JSON line.
//!
//! The browser front end (or any other client) reads these lines from the
//! engine's stdout and renders them. The set of zones the client can
//! present is fixed at startup; a zone outside that set is reported as a
//! missing surface.

use std::collections::BTreeSet;
use std::io::Write;

use stratos_core::UiSink;
use stratos_types::{UiEvent, ZoneId};
use tracing::warn;

/// Writes UI events as newline-delimited JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    surfaces: BTreeSet<ZoneId>,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink over `out` that can present the given zones.
    pub fn new(out: W, surfaces: impl IntoIterator<Item = ZoneId>) -> Self {
        Self {
            out,
            surfaces: surfaces.into_iter().collect(),
            written: 0,
        }
    }

    /// Number of events written so far.
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Consume the sink and return the writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> UiSink for JsonLinesSink<W> {
    fn emit(&mut self, event: UiEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to serialize UI event");
                return;
            }
        };
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "failed to write UI event");
            return;
        }
        self.written = self.written.saturating_add(1);
    }

    fn has_zone_surface(&self, zone: &ZoneId) -> bool {
        self.surfaces.contains(zone)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stratos_types::AlertSeverity;

    use super::*;

    #[test]
    fn events_are_written_one_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new(), [ZoneId::new("zone-vertical-farm")]);
        sink.zone_entered(&ZoneId::new("zone-vertical-farm"));
        sink.show_alert("Rest", "Energy restored by 20 units.", AlertSeverity::Success);
        assert_eq!(sink.written(), 2);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines.first().copied(),
            Some(r#"{"event":"zone_entered","zone":"zone-vertical-farm"}"#)
        );
        let alert: UiEvent = serde_json::from_str(lines.get(1).copied().unwrap()).unwrap();
        assert!(matches!(alert, UiEvent::Alert { ref title, .. } if title == "Rest"));
    }

    #[test]
    fn only_configured_zones_have_surfaces() {
        let sink = JsonLinesSink::new(Vec::new(), [ZoneId::new("zone-drone-port")]);
        assert!(sink.has_zone_surface(&ZoneId::new("zone-drone-port")));
        assert!(!sink.has_zone_surface(&ZoneId::new("zone-hidden-lab")));
    }
}
