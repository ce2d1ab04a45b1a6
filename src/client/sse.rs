//! Decoding of the relay's event stream into text deltas.
//!
//! Bytes arrive in arbitrary chunks. Lines are reassembled across chunk
//! boundaries before being decoded as UTF-8, so a frame or a multi-byte
//! character split between two reads is still seen whole.

use serde::Deserialize;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// One interpreted line of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Delta(String),
    Done,
    /// Not a data line, a frame without content, or a frame that failed to parse.
    Skip,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Option<StreamDelta>,
}

#[derive(Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Interprets a single line (without its terminator).
pub fn parse_line(line: &str) -> Frame {
    let Some(data) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Skip;
    };
    if data == DONE_SENTINEL {
        return Frame::Done;
    }
    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
            .filter(|content| !content.is_empty())
            .map(Frame::Delta)
            .unwrap_or(Frame::Skip),
        Err(_) => Frame::Skip,
    }
}

/// Incremental line splitter over a byte stream.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    finished: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the sentinel frame has been seen; later input is ignored.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feeds one chunk and returns the deltas it completed, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.finished {
            return Vec::new();
        }
        self.pending.extend_from_slice(chunk);

        let mut deltas = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.pending[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            let done = Self::accept(&self.pending[start..end], &mut deltas);
            start = end + 1;
            if done {
                self.finished = true;
                self.pending.clear();
                return deltas;
            }
        }
        self.pending.drain(..start);
        deltas
    }

    /// Flushes an unterminated final line at end of stream.
    pub fn finish(&mut self) -> Vec<String> {
        let mut deltas = Vec::new();
        if !self.finished && !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            Self::accept(&line, &mut deltas);
        }
        self.finished = true;
        self.pending.clear();
        deltas
    }

    // Returns true when the sentinel ends the stream.
    fn accept(bytes: &[u8], deltas: &mut Vec<String>) -> bool {
        let line = String::from_utf8_lossy(bytes);
        let line = line.strip_suffix('\r').unwrap_or(&*line);
        match parse_line(line) {
            Frame::Delta(text) => deltas.push(text),
            Frame::Done => return true,
            Frame::Skip => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(content: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({ "choices": [{ "delta": { "content": content } }] })
        )
    }

    #[test]
    fn parses_delta_sentinel_and_noise() {
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"content":"He"}}]}"#),
            Frame::Delta("He".into())
        );
        assert_eq!(parse_line("data: [DONE]"), Frame::Done);
        assert_eq!(parse_line("data: not-json"), Frame::Skip);
        assert_eq!(parse_line(": OPENROUTER PROCESSING"), Frame::Skip);
        assert_eq!(parse_line(""), Frame::Skip);
        assert_eq!(parse_line(r#"data: {"choices":[]}"#), Frame::Skip);
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#),
            Frame::Skip
        );
    }

    #[test]
    fn only_first_choice_counts() {
        let line = r#"data: {"choices":[{"delta":{"content":"a"}},{"delta":{"content":"b"}}]}"#;
        assert_eq!(parse_line(line), Frame::Delta("a".into()));
    }

    #[test]
    fn malformed_frame_between_valid_frames_is_skipped() {
        let mut decoder = SseDecoder::new();
        let input = format!("{}data: not-json\n\n{}", frame("He"), frame("llo"));
        assert_eq!(decoder.feed(input.as_bytes()), vec!["He", "llo"]);
    }

    #[test]
    fn reassembles_frames_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let whole = frame("héllo");
        let bytes = whole.as_bytes();
        // split inside the two-byte 'é'
        let split = whole.find('é').unwrap() + 1;
        assert!(decoder.feed(&bytes[..split]).is_empty());
        assert_eq!(decoder.feed(&bytes[split..]), vec!["héllo"]);
    }

    #[test]
    fn sentinel_stops_consumption() {
        let mut decoder = SseDecoder::new();
        let input = format!("{}data: [DONE]\n\n{}", frame("a"), frame("b"));
        assert_eq!(decoder.feed(input.as_bytes()), vec!["a"]);
        assert!(decoder.is_finished());
        assert!(decoder.feed(frame("c").as_bytes()).is_empty());
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn handles_crlf_and_unterminated_tail() {
        let mut decoder = SseDecoder::new();
        let input = "data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\r\n\r\n\
                     data: {\"choices\":[{\"delta\":{\"content\":\"y\"}}]}";
        assert_eq!(decoder.feed(input.as_bytes()), vec!["x"]);
        assert_eq!(decoder.finish(), vec!["y"]);
    }
}
