use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use farefinder_core::{Flight, FlightProvider, HubRegistry, ProviderError, SearchQuery};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::{debug, info, warn};

use crate::selection::select_best;
use crate::synthetic;

/// Concurrent one-stop route builds.
pub const ONE_STOP_CONCURRENCY: usize = 5;
/// Concurrent two-stop route builds.
pub const TWO_STOP_CONCURRENCY: usize = 3;

const ESTIMATED_SEARCH_TIME: Duration = Duration::from_secs(40);

#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Route search cancelled: deadline passed before it started")]
    Cancelled,
}

/// Why a search phase contributed nothing.
#[derive(Debug, thiserror::Error)]
enum PhaseFailure {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("deadline reached before the phase completed")]
    DeadlineExceeded,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Direct,
    OneStop,
    TwoStop,
}

/// Finds direct flights and hub-routed alternatives for a query.
///
/// Cheap to clone; the provider and hub registry are shared.
#[derive(Clone)]
pub struct RouteOptimizer {
    provider: Arc<dyn FlightProvider>,
    hubs: Arc<HubRegistry>,
}

impl RouteOptimizer {
    pub fn new(provider: Arc<dyn FlightProvider>, hubs: Arc<HubRegistry>) -> Self {
        Self { provider, hubs }
    }

    /// Run the direct, one-stop and two-stop phases concurrently and return
    /// the best options, cheapest first.
    ///
    /// A failing phase only loses its own results. Once `deadline` passes,
    /// pending work is abandoned and whatever finished is returned.
    pub async fn optimize_routes(
        &self,
        query: &SearchQuery,
        deadline: Instant,
    ) -> Result<Vec<Flight>, OptimizerError> {
        if Instant::now() >= deadline {
            return Err(OptimizerError::Cancelled);
        }

        info!(
            "Optimizing routes {} -> {} on {}",
            query.origin, query.destination, query.date
        );

        let mut phases = JoinSet::new();

        let this = self.clone();
        let q = query.clone();
        phases.spawn(async move { (Phase::Direct, this.search_direct(&q, deadline).await) });

        let this = self.clone();
        let q = query.clone();
        phases.spawn(async move { (Phase::OneStop, Ok(this.search_one_stop(&q, deadline).await)) });

        let this = self.clone();
        let q = query.clone();
        phases.spawn(async move { (Phase::TwoStop, Ok(this.search_two_stop(&q, deadline).await)) });

        let mut flights = Vec::new();
        while let Some(joined) = phases.join_next().await {
            match joined {
                Ok((phase, Ok(found))) => {
                    debug!("{:?} phase produced {} flights", phase, found.len());
                    flights.extend(found);
                }
                Ok((phase, Err(e))) => warn!("{:?} phase failed: {}", phase, e),
                Err(e) => warn!("Route phase task aborted: {}", e),
            }
        }

        let selected = select_best(flights);
        info!("Returning {} route options", selected.len());
        Ok(selected)
    }

    /// Real non-stop offers from the provider.
    async fn search_direct(
        &self,
        query: &SearchQuery,
        deadline: Instant,
    ) -> Result<Vec<Flight>, PhaseFailure> {
        let response = timeout_at(deadline, self.provider.search_flights(query))
            .await
            .map_err(|_| PhaseFailure::DeadlineExceeded)??;

        Ok(self
            .provider
            .convert_offers(&response, query)
            .into_iter()
            .filter(Flight::is_direct)
            .collect())
    }

    async fn search_one_stop(&self, query: &SearchQuery, deadline: Instant) -> Vec<Flight> {
        self.one_stop_with(query, deadline, |query, hub| async move {
            vec![synthetic::via_hub(&query, &hub)]
        })
        .await
    }

    async fn search_two_stop(&self, query: &SearchQuery, deadline: Instant) -> Vec<Flight> {
        self.two_stop_with(query, deadline, |query, first, second| async move {
            vec![synthetic::via_two_hubs(&query, &first, &second)]
        })
        .await
    }

    /// One `build` job per usable hub, at most [`ONE_STOP_CONCURRENCY`] at once.
    async fn one_stop_with<B, Fut>(&self, query: &SearchQuery, deadline: Instant, build: B) -> Vec<Flight>
    where
        B: Fn(SearchQuery, String) -> Fut,
        Fut: Future<Output = Vec<Flight>> + Send + 'static,
    {
        let candidates = self.hubs.one_stop_candidates();
        let jobs = synthetic::one_stop_hubs(&candidates, query)
            .into_iter()
            .map(|hub| build(query.clone(), hub.to_string()))
            .collect();

        gated_fan_out(jobs, ONE_STOP_CONCURRENCY, deadline).await
    }

    /// One `build` job per hub pair, at most [`TWO_STOP_CONCURRENCY`] at once.
    async fn two_stop_with<B, Fut>(&self, query: &SearchQuery, deadline: Instant, build: B) -> Vec<Flight>
    where
        B: Fn(SearchQuery, String, String) -> Fut,
        Fut: Future<Output = Vec<Flight>> + Send + 'static,
    {
        let jobs = synthetic::two_stop_pairs(self.hubs.two_stop_candidates(), query)
            .into_iter()
            .map(|(first, second)| build(query.clone(), first.to_string(), second.to_string()))
            .collect();

        gated_fan_out(jobs, TWO_STOP_CONCURRENCY, deadline).await
    }
}

/// Rough upper bound on how long a full optimization of `query` takes.
/// Currently the same for every query.
pub fn estimate_search_time(_query: &SearchQuery) -> Duration {
    ESTIMATED_SEARCH_TIME
}

/// Run every job on its own task with at most `limit` in flight.
///
/// A job still waiting for a permit when `deadline` passes is abandoned.
async fn gated_fan_out<F>(jobs: Vec<F>, limit: usize, deadline: Instant) -> Vec<Flight>
where
    F: Future<Output = Vec<Flight>> + Send + 'static,
{
    let gate = Arc::new(Semaphore::new(limit));
    let mut tasks = JoinSet::new();

    for job in jobs {
        let gate = Arc::clone(&gate);
        tasks.spawn(async move {
            if Instant::now() >= deadline {
                return None;
            }
            let permit = tokio::select! {
                biased;
                _ = sleep_until(deadline) => None,
                permit = gate.acquire_owned() => permit.ok(),
            };
            let Some(_permit) = permit else {
                return None;
            };
            Some(job.await)
        });
    }

    let mut flights = Vec::new();
    let mut abandoned = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Some(found)) => flights.extend(found),
            Ok(None) => abandoned += 1,
            Err(e) => warn!("Route build task failed: {}", e),
        }
    }

    if abandoned > 0 {
        debug!("{} route builds abandoned at deadline", abandoned);
    }
    flights
}
