//! Streaming primitives: the NDJSON line decoder, simulated typing, and the
//! `CompletionStream` handle returned to callers.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use crate::llm_client::ChatResponse;

const STREAM_CHANNEL_CAPACITY: usize = 64;

/// Pacing for locally answered text that is "typed" to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingProfile {
    /// Characters per emitted chunk.
    pub chunk_size: usize,
    pub think_delay: Duration,
    pub min_chunk_delay: Duration,
    pub max_chunk_delay: Duration,
}

impl Default for TypingProfile {
    fn default() -> Self {
        Self {
            chunk_size: 10,
            think_delay: Duration::from_millis(300),
            min_chunk_delay: Duration::from_millis(20),
            max_chunk_delay: Duration::from_millis(50),
        }
    }
}

impl TypingProfile {
    /// Same chunking, no delays.
    pub fn instant() -> Self {
        Self {
            think_delay: Duration::ZERO,
            min_chunk_delay: Duration::ZERO,
            max_chunk_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    fn chunk_delay(&self) -> Duration {
        let min = self.min_chunk_delay.as_millis() as u64;
        let max = self.max_chunk_delay.as_millis() as u64;
        if max <= min {
            return self.min_chunk_delay;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..max))
    }
}

/// Splits on character boundaries; the last chunk may be shorter.
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size.max(1))
        .map(|c| c.iter().collect())
        .collect()
}

/// Incremental decoder for newline-delimited JSON completion chunks.
///
/// Network reads may split a line anywhere, including inside a UTF-8 sequence,
/// so raw bytes are buffered until a newline arrives.
#[derive(Debug, Default)]
pub struct NdjsonDecoder {
    buffer: Vec<u8>,
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one network read; returns the content fragments of every completed line.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut fragments = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(fragment) = parse_line(&String::from_utf8_lossy(&line)) {
                fragments.push(fragment);
            }
        }
        fragments
    }

    /// One last parse attempt for an unterminated trailing line.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        parse_line(&String::from_utf8_lossy(&rest))
    }
}

/// Malformed lines are logged and skipped, never fatal to the stream.
fn parse_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<ChatResponse>(line) {
        Ok(chunk) => chunk
            .message
            .map(|m| m.content)
            .filter(|content| !content.is_empty()),
        Err(e) => {
            warn!("Failed to parse completion stream line {line:?}: {e}");
            None
        }
    }
}

/// A finite, non-restartable sequence of text fragments.
///
/// Dropping the stream (or calling `abort`) stops the producer task; the producer
/// also checks for a closed receiver after every chunk it reads.
pub struct CompletionStream {
    inner: ReceiverStream<String>,
    task: JoinHandle<()>,
}

impl CompletionStream {
    pub(crate) fn spawn<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(mpsc::Sender<String>) -> Fut,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        let task = tokio::spawn(producer(tx));
        Self {
            inner: ReceiverStream::new(rx),
            task,
        }
    }

    /// Emits `text` in one piece.
    pub fn immediate(text: String) -> Self {
        Self::spawn(|tx| async move {
            let _ = tx.send(text).await;
        })
    }

    /// Emits `text` in fixed-size chunks, paced by `profile`.
    pub fn typed(text: String, profile: TypingProfile) -> Self {
        Self::spawn(|tx| type_out(tx, text, profile))
    }

    pub fn abort(self) {
        drop(self);
    }
}

#[cfg(test)]
impl CompletionStream {
    /// Drains the remaining fragments into one string.
    pub(crate) async fn collect_text(mut self) -> String {
        use futures::StreamExt;

        let mut text = String::new();
        while let Some(fragment) = self.next().await {
            text.push_str(&fragment);
        }
        text
    }
}

impl Stream for CompletionStream {
    type Item = String;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}

impl Drop for CompletionStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn type_out(tx: mpsc::Sender<String>, text: String, profile: TypingProfile) {
    tokio::time::sleep(profile.think_delay).await;

    for chunk in split_into_chunks(&text, profile.chunk_size) {
        if tx.send(chunk).await.is_err() {
            debug!("Typing stream receiver dropped");
            return;
        }
        tokio::time::sleep(profile.chunk_delay()).await;
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[test]
    fn test_split_into_chunks() {
        let chunks = split_into_chunks("abcdefghijklmnopqrstuvw", 10);
        assert_eq!(chunks, vec!["abcdefghij", "klmnopqrst", "uvw"]);
        assert!(split_into_chunks("", 10).is_empty());
    }

    #[test]
    fn test_split_respects_char_boundaries() {
        let text = "héllo wörld ✓ done";
        let chunks = split_into_chunks(text, 4);
        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
    }

    #[test]
    fn test_decoder_handles_split_lines() {
        let mut decoder = NdjsonDecoder::new();
        let line = r#"{"model":"gemma3","message":{"role":"assistant","content":"Hello"},"done":false}"#;
        let (head, tail) = line.split_at(17);

        assert!(decoder.push(head.as_bytes()).is_empty());
        assert!(decoder.push(tail.as_bytes()).is_empty());
        assert_eq!(decoder.push(b"\n"), vec!["Hello".to_string()]);
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn test_decoder_skips_malformed_lines() {
        let mut decoder = NdjsonDecoder::new();
        let body = concat!(
            r#"{"message":{"role":"assistant","content":"one"},"done":false}"#,
            "\n{bad json\n\n",
            r#"{"message":{"role":"assistant","content":"two"},"done":false}"#,
            "\n"
        );
        assert_eq!(decoder.push(body.as_bytes()), vec!["one", "two"]);
    }

    #[test]
    fn test_decoder_parses_trailing_line_on_finish() {
        let mut decoder = NdjsonDecoder::new();
        let tail = r#"{"message":{"role":"assistant","content":"end"},"done":true}"#;
        assert!(decoder.push(tail.as_bytes()).is_empty());
        assert_eq!(decoder.finish().as_deref(), Some("end"));
    }

    #[test]
    fn test_decoder_trailing_garbage_is_dropped() {
        let mut decoder = NdjsonDecoder::new();
        decoder.push(b"{\"message\":");
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn test_decoder_reassembles_multibyte_characters() {
        let mut decoder = NdjsonDecoder::new();
        let line = "{\"message\":{\"role\":\"assistant\",\"content\":\"caf\u{e9}\"}}\n";
        let bytes = line.as_bytes();
        let split = line.find('\u{e9}').unwrap() + 1; // inside the two-byte sequence
        assert!(decoder.push(&bytes[..split]).is_empty());
        assert_eq!(decoder.push(&bytes[split..]), vec!["café".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typed_stream_chunks_and_pacing() {
        let text = "a".repeat(25);
        let start = tokio::time::Instant::now();
        let chunks: Vec<String> = CompletionStream::typed(text.clone(), TypingProfile::default())
            .collect()
            .await;

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.concat(), text);
        // think delay plus at least the minimum delay after each chunk
        assert!(start.elapsed() >= Duration::from_millis(300 + 3 * 20));
    }

    #[tokio::test]
    async fn test_immediate_stream_single_fragment() {
        let chunks: Vec<String> = CompletionStream::immediate("whole".to_string())
            .collect()
            .await;
        assert_eq!(chunks, vec!["whole"]);
    }

    #[tokio::test]
    async fn test_abort_stops_producer() {
        let marker = std::sync::Arc::new(());
        let held = marker.clone();
        let mut stream = CompletionStream::spawn(|tx| async move {
            let _held = held;
            loop {
                if tx.send("tick".to_string()).await.is_err() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        });
        assert_eq!(stream.next().await.as_deref(), Some("tick"));
        assert_eq!(std::sync::Arc::strong_count(&marker), 2);

        stream.abort();
        for _ in 0..100 {
            if std::sync::Arc::strong_count(&marker) == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(std::sync::Arc::strong_count(&marker), 1);
    }
}
