//! Detail enrichment orchestrator.
//!
//! Fans out one detail fetch per directory reference, bounded by a semaphore,
//! and fans the outcomes back in over a channel. Only the aggregating loop
//! touches the running totals, so no counter is shared between tasks.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{info, instrument, warn};

use dinodir_crawler::{SourceClient, fetch_detail};
use dinodir_shared::{
    AggregateResult, DetailRecord, DinoDirError, EnrichConfig, EntityReference, Result,
};

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for long-running enrichment.
///
/// Called from the aggregating task only, never concurrently.
pub trait EnrichmentProgress: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each detail fetch finishes, successfully or not.
    fn item_done(&self, done: usize, total: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl EnrichmentProgress for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn item_done(&self, _done: usize, _total: usize) {}
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// What one worker hands back to the aggregator.
struct ItemOutcome {
    reference: EntityReference,
    result: Result<DetailRecord>,
}

/// Fetch the detail record for every reference and aggregate the results.
///
/// Never fails: a reference whose fetch errors is logged and left out.
/// Records arrive in completion order, not input order. Every spawned fetch
/// is awaited before returning.
#[instrument(skip_all, fields(references = references.len(), max_in_flight = config.max_in_flight))]
pub async fn enrich(
    client: &SourceClient,
    references: Vec<EntityReference>,
    config: &EnrichConfig,
    progress: &dyn EnrichmentProgress,
) -> AggregateResult {
    let total = references.len();
    let semaphore = Arc::new(Semaphore::new(config.max_in_flight.max(1)));
    let (tx, mut rx) = mpsc::channel::<ItemOutcome>(total.max(1));

    progress.phase("Fetching details");

    for reference in references {
        let tx = tx.clone();
        let client = client.clone();
        let sem = semaphore.clone();

        tokio::spawn(async move {
            let result = match sem.acquire_owned().await {
                Ok(_permit) => fetch_detail(&client, &reference.name).await,
                Err(e) => Err(DinoDirError::Fetch(format!("fetch limiter closed: {e}"))),
            };
            // The receiver outlives every sender.
            let _ = tx.send(ItemOutcome { reference, result }).await;
        });
    }

    // Only worker clones remain; the loop below ends once all of them are dropped.
    drop(tx);

    let mut records = Vec::with_capacity(total);
    let mut failed = 0;
    let mut done = 0;

    while let Some(ItemOutcome { reference, result }) = rx.recv().await {
        done += 1;
        progress.item_done(done, total);

        match result {
            Ok(mut record) => {
                record.name = reference.name;
                record.link = Some(reference.link);
                records.push(record);
            }
            Err(e) => {
                failed += 1;
                warn!(name = %reference.name, error = %e, "detail fetch failed, omitting entry");
            }
        }
    }

    // A panicked worker drops its sender without reporting.
    if done < total {
        warn!(missing = total - done, "some detail workers ended without a result");
    }

    let aggregate = AggregateResult::from_records(records);
    info!(
        records = aggregate.count,
        no_data = aggregate.no_data_count,
        failed,
        "enrichment completed"
    );

    aggregate
}
