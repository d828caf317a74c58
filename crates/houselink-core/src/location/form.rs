//! Asynchronous driver around `LocationResolver`.
//!
//! Map clicks update the coordinate synchronously and spawn a background
//! reverse geocode. Results come back over an MPSC channel and are applied
//! by `check_background_tasks` (non-blocking) or `wait_for_geocode`. A new
//! click aborts the previous in-flight lookup; any result that still
//! arrives for it is discarded by the resolver's generation check.
//!
//! Every mutation publishes the current address on a `watch` channel so the
//! parent form can follow along.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error};

use crate::geocode::{GeocodeResult, Geocoder};

use super::{Coordinate, GeocodeTicket, LocationArea, LocationError, LocationResolver, ResolvedAddress, ResolverState};

/// Buffer size for geocode results.
/// Superseded lookups are aborted, so more than a few queued results is unusual.
const GEOCODE_CHANNEL_SIZE: usize = 8;

/// Result of one background reverse geocode
#[derive(Debug)]
pub struct GeocodeOutcome {
    pub ticket: GeocodeTicket,
    pub result: Option<GeocodeResult>,
}

enum WaitStep {
    Outcome(GeocodeOutcome),
    Finished(Result<(), JoinError>),
}

pub struct LocationForm<G: Geocoder + 'static> {
    resolver: LocationResolver,
    geocoder: Arc<G>,
    outcome_tx: mpsc::Sender<GeocodeOutcome>,
    outcome_rx: mpsc::Receiver<GeocodeOutcome>,
    in_flight: Option<JoinHandle<()>>,
    updates: watch::Sender<ResolvedAddress>,
}

impl<G: Geocoder + 'static> LocationForm<G> {
    pub fn new(resolver: LocationResolver, geocoder: Arc<G>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(GEOCODE_CHANNEL_SIZE);
        let (updates, _) = watch::channel(resolver.address().clone());
        Self {
            resolver,
            geocoder,
            outcome_tx,
            outcome_rx,
            in_flight: None,
            updates,
        }
    }

    /// Form for creating a new record
    pub fn create(areas: Vec<LocationArea>, geocoder: Arc<G>) -> Self {
        Self::new(LocationResolver::new(areas), geocoder)
    }

    /// Form for editing an existing record
    pub fn edit(areas: Vec<LocationArea>, existing: &ResolvedAddress, geocoder: Arc<G>) -> Self {
        Self::new(LocationResolver::hydrate(areas, existing), geocoder)
    }

    /// Receive a snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<ResolvedAddress> {
        self.updates.subscribe()
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    pub fn address(&self) -> &ResolvedAddress {
        self.resolver.address()
    }

    pub fn state(&self) -> ResolverState {
        self.resolver.state()
    }

    pub fn is_complete(&self) -> bool {
        self.resolver.is_complete()
    }

    fn publish(&self) {
        self.updates.send_replace(self.resolver.address().clone());
    }

    pub fn select_area(&mut self, area_id: &str) -> Result<(), LocationError> {
        self.resolver.select_area(area_id)?;
        self.publish();
        Ok(())
    }

    pub fn select_district(&mut self, district: &str) -> Result<(), LocationError> {
        self.resolver.select_district(district)?;
        self.publish();
        Ok(())
    }

    pub fn set_street(&mut self, value: &str) {
        self.resolver.set_street(value);
        self.publish();
    }

    pub fn set_building_number(&mut self, value: &str) {
        self.resolver.set_building_number(value);
        self.publish();
    }

    /// Handle a map click. Must be called from within a Tokio runtime.
    /// Returns `false` when the coordinate was invalid and ignored.
    pub fn click(&mut self, latitude: f64, longitude: f64) -> bool {
        self.check_background_tasks();
        let Some(ticket) = self.resolver.on_map_click(latitude, longitude) else {
            return false;
        };
        self.publish();
        self.abort_in_flight();

        let geocoder = Arc::clone(&self.geocoder);
        let tx = self.outcome_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = geocoder.reverse_geocode(ticket.coordinate).await;
            if let Err(e) = tx.send(GeocodeOutcome { ticket, result }).await {
                error!(error = %e, "Failed to send geocode result - channel closed");
            }
        }));
        true
    }

    /// Reset the form and cancel any in-flight lookup
    pub fn clear(&mut self) {
        self.abort_in_flight();
        self.resolver.clear();
        self.publish();
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("Aborting superseded geocode request");
                handle.abort();
            }
        }
    }

    fn apply(&mut self, outcome: GeocodeOutcome) -> bool {
        let applied = self.resolver.apply_geocode(outcome.ticket, outcome.result);
        if applied {
            self.publish();
        }
        applied
    }

    /// Apply any geocode results that have arrived, without waiting.
    /// Returns how many were applied (stale results are not counted).
    pub fn check_background_tasks(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if self.apply(outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait until the latest click has been resolved.
    ///
    /// Outcomes are drained while waiting, so a lookup blocked on a full
    /// channel still completes. If the lookup task died without reporting,
    /// the click is resolved as a failed lookup so the form never stays
    /// pending.
    pub async fn wait_for_geocode(&mut self) {
        if let Some(mut handle) = self.in_flight.take() {
            loop {
                let step = tokio::select! {
                    Some(outcome) = self.outcome_rx.recv() => WaitStep::Outcome(outcome),
                    joined = &mut handle => WaitStep::Finished(joined),
                };
                match step {
                    WaitStep::Outcome(outcome) => {
                        self.apply(outcome);
                    }
                    WaitStep::Finished(joined) => {
                        if let Err(e) = joined {
                            if !e.is_cancelled() {
                                error!(error = %e, "Geocode task failed");
                            }
                        }
                        break;
                    }
                }
            }
        }
        self.check_background_tasks();

        if self.resolver.is_pending() {
            let generation = self.resolver.generation();
            if let (Some(latitude), Some(longitude)) = (self.address().latitude, self.address().longitude) {
                if let Some(coordinate) = Coordinate::new(latitude, longitude) {
                    self.apply(GeocodeOutcome {
                        ticket: GeocodeTicket { generation, coordinate },
                        result: None,
                    });
                }
            }
        }
    }

    /// Finish the form and hand the address to the parent payload
    pub fn into_address(mut self) -> ResolvedAddress {
        self.abort_in_flight();
        self.resolver.address().clone()
    }
}

impl<G: Geocoder + 'static> Drop for LocationForm<G> {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
