use super::{require_class, Store};
use crate::reports;
use clap::Args;
use seatforge::error::{SeatForgeError, SfResult};
use seatforge::generator::{generate_and_save, GenerationOutcome, HttpGenerator};
use seatforge::model::ClassId;
use seatforge::store::SaveOutcome;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    pub class: ClassId,
}

/// `Ok(false)` when nothing new was stored.
pub async fn run(args: GenerateArgs, api_url: &str, store: &mut Store) -> SfResult<bool> {
    let generator = HttpGenerator::new(api_url);
    info!("🪑 Asking {} for a seating", api_url);

    match generate_and_save(store, &generator, args.class).await? {
        GenerationOutcome::Blocked(errors) => {
            let class = require_class(store, args.class)?;
            reports::print_validation_report(class, &errors);
            Ok(false)
        }
        GenerationOutcome::Failed(message) => {
            println!("generation failed: {}", message);
            Ok(false)
        }
        GenerationOutcome::Saved {
            outcome,
            fitness,
            ignored,
        } => {
            if !ignored.is_empty() {
                warn!("Generator ignored {} wish(es)", ignored.len());
            }
            print_outcome(store, args.class, outcome, fitness)
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    pub class: ClassId,
    /// Generator response saved as JSON
    pub file: PathBuf,
}

pub fn run_import(args: ImportArgs, store: &mut Store) -> SfResult<bool> {
    let content = fs::read_to_string(&args.file).map_err(|e| {
        SeatForgeError::Config(format!(
            "could not read '{}': {}",
            args.file.display(),
            e
        ))
    })?;
    let response: Value = serde_json::from_str(&content)?;

    let config = store.find(args.class).and_then(|c| c.class_config);
    let outcome = store.save_seating(args.class, &response, config.as_ref())?;
    let fitness = response.get("Fitness").and_then(Value::as_f64).unwrap_or(0.0);
    print_outcome(store, args.class, outcome, fitness)
}

fn print_outcome(store: &Store, class: ClassId, outcome: SaveOutcome, fitness: f64) -> SfResult<bool> {
    println!("{}", outcome);
    if outcome.is_success() {
        println!("fitness: {:.3}", fitness);
        let class = require_class(store, class)?;
        if let Some(entry) = class.seatings.first() {
            reports::print_seating_grid(class, entry);
        }
    }
    Ok(outcome.is_success())
}
