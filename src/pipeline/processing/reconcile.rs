use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::ReconcileConfig;
use crate::constants::MERGED_SOURCE;
use crate::domain::Hotel;
use crate::error::MergeError;
use crate::observability::metrics;
use crate::pipeline::pipeline_config::ErrorHandlingStrategy;
use crate::pipeline::processing::merge::MergerRegistry;
use crate::pipeline::storage::{RawHotelStore, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    pub error_handling: ErrorHandlingStrategy,
    /// Pull previously stored raw records into each group before merging
    pub enrich_from_raw_store: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            error_handling: ErrorHandlingStrategy::ContinueOnError,
            enrich_from_raw_store: true,
        }
    }
}

impl From<&ReconcileConfig> for ReconcileOptions {
    fn from(config: &ReconcileConfig) -> Self {
        Self {
            error_handling: config.error_handling(),
            enrich_from_raw_store: config.enrich_from_raw_store,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    CollectGroups,
    MergeEachGroup,
    Done,
}

/// All records that share one identity key
#[derive(Debug, Clone, PartialEq)]
pub struct HotelGroup {
    pub hotel_id: String,
    pub records: Vec<Hotel>,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub phase: RunPhase,
    /// One merged record per reconciled group, in first-seen group order
    pub merged: Vec<Hotel>,
    pub errors: Vec<MergeError>,
    /// Groups with no usable records
    pub skipped: Vec<String>,
    /// Groups abandoned when the run timed out
    pub unreconciled: Vec<String>,
}

impl ReconcileReport {
    fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            phase: RunPhase::CollectGroups,
            merged: Vec::new(),
            errors: Vec::new(),
            skipped: Vec::new(),
            unreconciled: Vec::new(),
        }
    }

    fn finish(mut self, clock: Instant) -> Self {
        self.finished_at = Some(Utc::now());
        self.phase = RunPhase::Done;
        metrics::reconcile::run_duration(clock.elapsed().as_secs_f64());
        info!(
            run_id = %self.run_id,
            "Reconciliation finished: {} merged, {} failed, {} skipped, {} unreconciled",
            self.merged.len(),
            self.errors.len(),
            self.skipped.len(),
            self.unreconciled.len()
        );
        self
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.unreconciled.is_empty()
    }
}

/// Groups records by identity key and reduces each group to one merged record
pub struct Reconciler {
    mergers: MergerRegistry,
    options: ReconcileOptions,
    raw_store: Option<Arc<dyn RawHotelStore>>,
}

impl Reconciler {
    pub fn new(mergers: MergerRegistry, options: ReconcileOptions) -> Self {
        Self {
            mergers,
            options,
            raw_store: None,
        }
    }

    pub fn with_raw_store(mut self, store: Arc<dyn RawHotelStore>) -> Self {
        self.raw_store = Some(store);
        self
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Partition by identity key, keeping first-seen group order and
    /// insertion order within each group
    pub fn group_by_id(hotels: Vec<Hotel>) -> Vec<HotelGroup> {
        let mut groups: Vec<HotelGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for hotel in hotels {
            match index.get(&hotel.hotel_id).copied() {
                Some(position) => groups[position].records.push(hotel),
                None => {
                    index.insert(hotel.hotel_id.clone(), groups.len());
                    groups.push(HotelGroup {
                        hotel_id: hotel.hotel_id.clone(),
                        records: vec![hotel],
                    });
                }
            }
        }
        groups
    }

    /// Add stored raw records for sources the group does not already carry.
    ///
    /// Stored records come first so the group's own records stay last.
    pub fn enrich_group(&self, group: HotelGroup) -> StoreResult<HotelGroup> {
        let Some(store) = self.raw_store.as_ref().filter(|_| self.options.enrich_from_raw_store) else {
            return Ok(group);
        };

        let stored = store.find_all(std::slice::from_ref(&group.hotel_id))?;
        let mut records: Vec<Hotel> = stored
            .into_iter()
            .filter(|s| !group.records.iter().any(|r| r.source == s.source))
            .collect();

        if !records.is_empty() {
            debug!("Enriched group {} with {} stored records", group.hotel_id, records.len());
        }
        records.extend(group.records);

        Ok(HotelGroup {
            hotel_id: group.hotel_id,
            records,
        })
    }

    /// Merge one group; `Ok(None)` when it has no usable records
    pub fn merge_group(&self, group: &HotelGroup) -> Result<Option<Hotel>, MergeError> {
        let Some(last) = group.records.last() else {
            return Ok(None);
        };
        if group.hotel_id.trim().is_empty() {
            return Ok(None);
        }

        let mut merged = Hotel::new(last.hotel_id.clone(), last.destination_id, String::new(), MERGED_SOURCE);
        for merger in self.mergers.iter() {
            merger
                .apply(&group.records, &mut merged)
                .map_err(|e| e.for_hotel(&group.hotel_id))?;
        }
        Ok(Some(merged))
    }

    fn prepare_group(&self, group: HotelGroup) -> HotelGroup {
        metrics::reconcile::group_started(group.records.len());
        if self.raw_store.is_none() || !self.options.enrich_from_raw_store {
            return group;
        }

        let fallback = group.clone();
        self.enrich_group(group).unwrap_or_else(|e| {
            warn!("Raw store lookup failed for {}, merging without it: {}", fallback.hotel_id, e);
            fallback
        })
    }

    fn record_outcome(
        &self,
        report: &mut ReconcileReport,
        hotel_id: String,
        outcome: Result<Option<Hotel>, MergeError>,
    ) -> Result<(), MergeError> {
        match outcome {
            Ok(Some(hotel)) => {
                metrics::reconcile::group_merged();
                report.merged.push(hotel);
            }
            Ok(None) => {
                info!("Skipping group '{}' with no usable records", hotel_id);
                report.skipped.push(hotel_id);
            }
            Err(e) => {
                metrics::reconcile::group_failed(e.field.as_str());
                if self.options.error_handling.stops_on_error() {
                    error!("Reconciliation aborted: {}", e);
                    return Err(e);
                }
                warn!("Group not reconciled: {}", e);
                report.errors.push(e);
            }
        }
        Ok(())
    }

    /// Reconcile every group in order on the calling thread
    pub fn reconcile(&self, hotels: Vec<Hotel>) -> Result<ReconcileReport, MergeError> {
        let clock = Instant::now();
        let mut report = ReconcileReport::start();
        let groups = Self::group_by_id(hotels);
        info!(run_id = %report.run_id, "Reconciling {} groups", groups.len());

        report.phase = RunPhase::MergeEachGroup;
        for group in groups {
            let group = self.prepare_group(group);
            let outcome = self.merge_group(&group);
            self.record_outcome(&mut report, group.hotel_id, outcome)?;
        }

        Ok(report.finish(clock))
    }

    /// Reconcile groups in parallel on the blocking pool.
    ///
    /// Results are reduced in group order. Groups still running when `timeout`
    /// elapses are abandoned and listed in `unreconciled`.
    pub async fn reconcile_concurrent(
        self: Arc<Self>,
        hotels: Vec<Hotel>,
        timeout: Duration,
    ) -> Result<ReconcileReport, MergeError> {
        let clock = Instant::now();
        let mut report = ReconcileReport::start();
        let groups = Self::group_by_id(hotels);
        let keys: Vec<String> = groups.iter().map(|g| g.hotel_id.clone()).collect();
        info!(run_id = %report.run_id, "Reconciling {} groups concurrently", groups.len());

        report.phase = RunPhase::MergeEachGroup;
        let mut tasks = JoinSet::new();
        for (index, group) in groups.into_iter().enumerate() {
            let reconciler = Arc::clone(&self);
            tasks.spawn_blocking(move || {
                let group = reconciler.prepare_group(group);
                (index, reconciler.merge_group(&group))
            });
        }

        let mut outcomes: Vec<Option<Result<Option<Hotel>, MergeError>>> = vec![None; keys.len()];
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                joined = tasks.join_next() => match joined {
                    Some(Ok((index, outcome))) => outcomes[index] = Some(outcome),
                    Some(Err(e)) => error!("Merge task did not complete: {}", e),
                    None => break,
                },
                _ = &mut deadline => {
                    warn!("Reconciliation timed out after {:?}; abandoning {} groups", timeout, tasks.len());
                    tasks.abort_all();
                    break;
                }
            }
        }

        for (key, outcome) in keys.into_iter().zip(outcomes) {
            match outcome {
                Some(outcome) => self.record_outcome(&mut report, key, outcome)?,
                None => report.unreconciled.push(key),
            }
        }
        if !report.unreconciled.is_empty() {
            metrics::reconcile::groups_abandoned(report.unreconciled.len());
        }

        Ok(report.finish(clock))
    }
}
