use std::io;

use actix_web::web::Bytes;
use anyhow::Result;
use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt};
use log::{debug, info};
use reqwest::Client;

use crate::config::RelayConfig;
use crate::web::models::CompletionRequest;

pub type ByteStream = BoxStream<'static, Result<Bytes, io::Error>>;

/// What the upstream said once the connection was established.
pub enum UpstreamReply {
    /// 2xx; the raw event-stream body, not yet read.
    Stream(ByteStream),
    /// Non-2xx status with the body text as returned.
    Rejected { status: u16, body: String },
}

/// The completions API the relay forwards to.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Errors only when the call could not be made at all.
    async fn complete(&self, request: &CompletionRequest, credential: &str) -> Result<UpstreamReply>;
}

// OpenRouter chat-completions endpoint
pub struct OpenRouterClient {
    url: String,
    referer: String,
    title: String,
    client: Client,
}

impl OpenRouterClient {
    pub fn new(config: &RelayConfig) -> Self {
        info!("Using upstream completions endpoint: {}", config.upstream_url);
        Self {
            url: config.upstream_url.clone(),
            referer: config.referer.clone(),
            title: config.title.clone(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Upstream for OpenRouterClient {
    async fn complete(&self, request: &CompletionRequest, credential: &str) -> Result<UpstreamReply> {
        debug!(
            "Forwarding {} messages for model {:?}",
            request.messages.len(),
            request.model
        );

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", credential))
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Ok(UpstreamReply::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| io::Error::new(io::ErrorKind::Other, e)))
            .boxed();
        Ok(UpstreamReply::Stream(stream))
    }
}
