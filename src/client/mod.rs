pub mod assembler;
pub mod settings;
pub mod sse;

use anyhow::{anyhow, Result};
use futures_util::{pin_mut, Stream, StreamExt};
use log::{debug, error, info};
use reqwest::Client;

use crate::web::models::{ChatRequest, ErrorBody};
use assembler::{Assembler, SubmitRejected};
use settings::Snapshot;
use sse::SseDecoder;

const FALLBACK_ERROR: &str = "Failed to get response";

/// HTTP client for the relay's chat endpoint.
pub struct RelayClient {
    url: String,
    client: Client,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            url: format!("{}/api/chat", base_url.trim_end_matches('/')),
            client: Client::new(),
        }
    }

    /// Posts the payload and hands back the response body as a byte stream.
    pub async fn open(
        &self,
        payload: &ChatRequest,
    ) -> Result<impl Stream<Item = reqwest::Result<impl AsRef<[u8]>>>> {
        info!(
            "Sending {} messages to {}",
            payload.messages.len(),
            self.url
        );
        let response = self.client.post(&self.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.error)
                .filter(|error| !error.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());
            debug!("Relay answered {}: {}", status, message);
            return Err(anyhow!(message));
        }

        Ok(response.bytes_stream())
    }
}

/// Reads the stream into the assembler, calling `on_delta` after each applied delta.
///
/// Stops at the sentinel frame or at end of stream, whichever comes first.
pub async fn consume<S, B, E>(
    assembler: &mut Assembler,
    stream: S,
    mut on_delta: impl FnMut(&Assembler, &str),
) -> Result<()>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<anyhow::Error>,
{
    assembler.begin_stream();
    let mut decoder = SseDecoder::new();
    pin_mut!(stream);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(Into::<anyhow::Error>::into)?;
        for delta in decoder.feed(chunk.as_ref()) {
            if assembler.apply_delta(&delta) {
                on_delta(assembler, &delta);
            }
        }
        if decoder.is_finished() {
            break;
        }
    }
    for delta in decoder.finish() {
        if assembler.apply_delta(&delta) {
            on_delta(assembler, &delta);
        }
    }

    assembler.settle();
    Ok(())
}

/// One full round: submit, stream, settle. Transport and relay failures end
/// up in the history as an error message rather than being returned.
pub async fn run_submission(
    assembler: &mut Assembler,
    relay: &RelayClient,
    input: &str,
    settings: &Snapshot,
    on_delta: impl FnMut(&Assembler, &str),
) -> Result<(), SubmitRejected> {
    let payload = assembler.submit(input, &settings.model, &settings.credential)?;

    let outcome = match relay.open(&payload).await {
        Ok(stream) => consume(assembler, stream, on_delta).await,
        Err(e) => Err(e),
    };
    if let Err(e) = outcome {
        error!("Chat submission failed: {}", e);
        assembler.fail(&e.to_string());
    }
    Ok(())
}
