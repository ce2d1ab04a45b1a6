pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use anyhow::Result;
use tera::Tera;

use crate::upstream::Upstream;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Shared by every worker; the relay itself keeps no per-request state here.
pub struct AppState {
    pub tera: Tera,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn Upstream>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("index.html", INDEX_TEMPLATE)?;
        tera.autoescape_on(vec![".html"]);
        Ok(Self { tera, upstream })
    }
}
