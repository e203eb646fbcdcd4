//! Webserver state management
//!
//! Holds the engine and the two last-write-wins publication slots, one per
//! page. Both slots are seeded with the initial views at construction, so
//! reads never trigger a computation. Every overview or map event, whether it
//! arrives over HTTP or the WebSocket, takes its ticket through
//! `issue_overview` / `issue_map` in arrival order and is then computed with
//! `compute_overview` / `compute_map`.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use engine::{DashboardEngine, LatestWins, Outcome, Publication};
use shared::{FilterState, MapSelection, MapViewSet, ProcessId, ViewSet, process_debug};

use crate::error::{WebServerError, WebServerResult};

#[derive(Debug)]
pub struct WebServerState {
    pub bind_address: SocketAddr,
    pub engine: DashboardEngine,
    pub overview: Arc<LatestWins<ViewSet>>,
    pub map: Arc<LatestWins<MapViewSet>>,
    pub server_start_time: Instant,
}

impl WebServerState {
    /// Build the state and publish the initial overview and map views
    pub fn new(bind_address: SocketAddr, engine: DashboardEngine) -> WebServerResult<Self> {
        let overview = LatestWins::new();
        let initial_overview = engine.overview(&engine.dataset().initial_filter())?;
        overview.publish(overview.issue(), initial_overview);

        let map = LatestWins::new();
        map.publish(map.issue(), engine.map(MapSelection::default()));

        Ok(Self {
            bind_address,
            engine,
            overview: Arc::new(overview),
            map: Arc::new(map),
            server_start_time: Instant::now(),
        })
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    /// Validate a filter change and take its ticket
    ///
    /// Invalid filters are rejected before a ticket is issued, so they never
    /// supersede an in-flight valid event.
    pub fn issue_overview(&self, filter: &FilterState) -> WebServerResult<u64> {
        self.engine.validate_filter(filter)?;
        Ok(self.overview.issue())
    }

    /// Recompute the overview for a ticket from `issue_overview`
    pub async fn compute_overview(&self, ticket: u64, filter: FilterState) -> WebServerResult<Outcome<ViewSet>> {
        let engine = self.engine.clone();
        let outcome = self
            .overview
            .submit_with_ticket(ticket, move || engine.overview(&filter))
            .await?;
        process_debug!(
            ProcessId::current(),
            "Overview {} for region {} [{}, {}]: {}",
            ticket,
            filter.selected_region,
            filter.crime_range.low,
            filter.crime_range.high,
            if outcome.is_published() { "published" } else { "superseded" }
        );
        Ok(outcome)
    }

    /// Filter change event: take a ticket now and recompute
    pub async fn submit_overview(&self, filter: FilterState) -> WebServerResult<Outcome<ViewSet>> {
        let ticket = self.issue_overview(&filter)?;
        self.compute_overview(ticket, filter).await
    }

    pub fn issue_map(&self) -> u64 {
        self.map.issue()
    }

    /// Recompute the map for a ticket from `issue_map`
    pub async fn compute_map(&self, ticket: u64, selection: MapSelection) -> WebServerResult<Outcome<MapViewSet>> {
        let engine = self.engine.clone();
        let outcome = self
            .map
            .submit_with_ticket(ticket, move || Ok(engine.map(selection)))
            .await?;
        Ok(outcome)
    }

    /// Metric or colour-scale change event
    pub async fn submit_map(&self, selection: MapSelection) -> WebServerResult<Outcome<MapViewSet>> {
        let ticket = self.issue_map();
        self.compute_map(ticket, selection).await
    }

    /// Latest published overview
    pub fn current_overview(&self) -> WebServerResult<Arc<Publication<ViewSet>>> {
        self.overview
            .latest()
            .ok_or_else(|| WebServerError::internal("no overview published".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Dataset;
    use shared::{CommunityRecord, RegionSelection, RegionTable};

    fn seeded_state() -> WebServerState {
        let dataset = Dataset::new(
            vec![CommunityRecord::new(6, 0.1), CommunityRecord::new(36, 0.5)],
            RegionTable::us_states(),
        );
        let engine = DashboardEngine::new(Arc::new(dataset));
        WebServerState::new("127.0.0.1:0".parse().unwrap(), engine).unwrap()
    }

    #[test]
    fn test_initial_views_are_published_at_construction() {
        let state = seeded_state();
        let overview = state.current_overview().unwrap();
        assert_eq!(overview.ticket, 1);
        assert_eq!(overview.value.scatter_points.len(), 2);

        let map = state.map.latest().unwrap();
        assert_eq!(map.value.metric, MapSelection::default().metric);
    }

    #[tokio::test]
    async fn test_read_does_not_take_a_ticket() {
        let state = seeded_state();
        let ticket = state.issue_overview(&FilterState::new(RegionSelection::State(6), 0.0, 1.0)).unwrap();

        // A read while the event is pending sees the seeded view and leaves the ticket current
        assert_eq!(state.current_overview().unwrap().ticket, 1);
        assert!(state.overview.is_current(ticket));

        let outcome = state
            .compute_overview(ticket, FilterState::new(RegionSelection::State(6), 0.0, 1.0))
            .await
            .unwrap();
        assert!(outcome.is_published());
    }

    #[test]
    fn test_invalid_filter_takes_no_ticket() {
        let state = seeded_state();
        let before = state.overview.latest_issued();
        assert!(state.issue_overview(&FilterState::new(RegionSelection::All, 0.9, 0.1)).is_err());
        assert_eq!(state.overview.latest_issued(), before);
    }
}
