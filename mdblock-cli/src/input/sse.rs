//! Server-sent-event transcripts from text generation APIs
//!
//! Each `data:` line holds a JSON message whose `output.text` is the whole
//! answer generated so far. `data: [DONE]` ends the stream. Other SSE fields
//! (`event:`, `id:`, comments) are ignored.

use crate::error::CliError;
use anyhow::Result;
use mdblock_engine::SnapshotDiffer;
use serde::Deserialize;

const DATA_PREFIX: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    output: Option<Output>,
}

#[derive(Debug, Deserialize)]
struct Output {
    #[serde(default)]
    text: String,
}

/// Cumulative snapshots carried by a transcript, in order
///
/// Lines that are not valid JSON, or that carry no `output.text`, are
/// skipped with a warning.
pub fn snapshots(transcript: &str) -> Vec<String> {
    let mut snapshots = Vec::new();

    for (line_no, line) in transcript.lines().enumerate() {
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            continue;
        };
        let payload = payload.trim();
        if payload == DONE_MARKER {
            break;
        }

        match serde_json::from_str::<Message>(payload) {
            Ok(Message {
                output: Some(output),
            }) => snapshots.push(output.text),
            Ok(_) => log::debug!("line {}: event without output text", line_no + 1),
            Err(e) => log::warn!("line {}: skipping malformed event: {}", line_no + 1, e),
        }
    }

    snapshots
}

/// Text deltas carried by a transcript
pub fn deltas(transcript: &str) -> Result<Vec<String>> {
    let mut differ = SnapshotDiffer::new();
    let mut deltas = Vec::new();

    for snapshot in snapshots(transcript) {
        let delta = differ
            .delta(&snapshot)
            .map_err(|e| CliError::StreamError(e.to_string()))?;
        if let Some(delta) = delta {
            deltas.push(delta.to_string());
        }
    }

    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSCRIPT: &str = "id:1\n\
event:result\n\
data:{\"output\":{\"text\":\"Hi\"}}\n\
\n\
data: {\"output\":{\"text\":\"Hi there.\"}}\n\
data: not json\n\
data: {\"usage\":{}}\n\
data: {\"output\":{\"text\":\"Hi there.\\n\\n\"}}\n\
data: [DONE]\n\
data: {\"output\":{\"text\":\"ignored\"}}\n";

    #[test]
    fn test_snapshots() {
        assert_eq!(snapshots(TRANSCRIPT), ["Hi", "Hi there.", "Hi there.\n\n"]);
    }

    #[test]
    fn test_deltas() {
        assert_eq!(deltas(TRANSCRIPT).unwrap(), ["Hi", " there.", "\n\n"]);
    }

    #[test]
    fn test_crlf_lines() {
        let transcript =
            "data: {\"output\":{\"text\":\"a\"}}\r\ndata: {\"output\":{\"text\":\"ab\"}}\r\n";
        assert_eq!(deltas(transcript).unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_diverging_snapshot() {
        let transcript =
            "data: {\"output\":{\"text\":\"abc\"}}\ndata: {\"output\":{\"text\":\"abd\"}}\n";
        let err = deltas(transcript).unwrap_err();
        assert!(err.to_string().starts_with("Stream error:"));
    }
}
