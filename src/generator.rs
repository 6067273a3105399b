use crate::blob::BlobStore;
use crate::error::{SeatForgeError, SfResult};
use crate::model::ClassId;
use crate::protocol::{GenerationRequest, GenerationResponse};
use crate::store::{HistoryStore, SaveOutcome};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use tracing::{error, info};

/// Whatever computes the actual arrangement. Returns the raw JSON answer.
pub trait SeatingGenerator {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = SfResult<Value>> + Send;
}

pub struct HttpGenerator {
    client: Client,
    url: String,
}

impl HttpGenerator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl SeatingGenerator for HttpGenerator {
    async fn generate(&self, request: &GenerationRequest) -> SfResult<Value> {
        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| SeatForgeError::Generator(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SeatForgeError::Generator(format!("{}: {}", status, body)));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| SeatForgeError::Generator(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The class failed validation; nothing was sent.
    Blocked(Vec<String>),
    /// The call itself failed. Kept for display, never retried.
    Failed(String),
    Saved {
        outcome: SaveOutcome,
        fitness: f64,
        ignored: Vec<Value>,
    },
}

/// Validates the class, asks the generator for a seating and files the
/// answer through the store's duplicate check.
pub async fn generate_and_save<B, G>(
    store: &mut HistoryStore<B>,
    generator: &G,
    class_id: ClassId,
) -> SfResult<GenerationOutcome>
where
    B: BlobStore,
    G: SeatingGenerator,
{
    let Some(class) = store.find(class_id) else {
        return Ok(GenerationOutcome::Saved {
            outcome: SaveOutcome::ClassNotFound,
            fitness: 0.0,
            ignored: Vec::new(),
        });
    };

    let errors = crate::validator::validate(class);
    if !errors.is_empty() {
        return Ok(GenerationOutcome::Blocked(errors));
    }

    let request = GenerationRequest::from_class(class);
    let config = class.class_config;
    info!(
        "Requesting seating for '{}' ({} students)",
        class.name,
        request.students.len()
    );

    let response = match generator.generate(&request).await {
        Ok(v) => v,
        Err(e) => {
            error!("Seating generation failed: {}", e);
            return Ok(GenerationOutcome::Failed(e.to_string()));
        }
    };

    let (fitness, ignored) = GenerationResponse::from_value(&response)
        .map(|r| (r.fitness.unwrap_or(0.0), r.ignored))
        .unwrap_or_default();

    let outcome = store.save_seating(class_id, &response, config.as_ref())?;
    Ok(GenerationOutcome::Saved {
        outcome,
        fitness,
        ignored,
    })
}
