//! The state controller: commands in, snapshots out.
//!
//! Every command replaces the published `ViewState` as a whole under the
//! watch channel's write lock, so observers never see a half-applied update.
//! Fetches run on spawned tasks and publish their outcome when they resolve.
//!
//! At most one historical fetch is in flight. Starting another aborts the
//! previous task and bumps a generation counter; a result is applied only if
//! its generation is still current, checked under the same lock that applies
//! it. `is_loading` stays set while any live or historical fetch is unresolved.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, NaiveDateTime};
use common::{Error, WeatherPayload, WeatherSource, AUTO_IP};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::derive::{
    clamp_progress, extract_marine_summary, find_current_hour_index, timeline_date,
};
use crate::state::{AppMode, ViewState, HISTORICAL_HOUR_INDEX};

/// Owns the home-screen snapshot. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct StateController {
    inner: Arc<Shared>,
}

struct Shared {
    source: Arc<dyn WeatherSource>,
    clock: Arc<dyn Clock>,
    state: watch::Sender<ViewState>,
    historical: Mutex<Option<JoinHandle<()>>>,
    generation: AtomicU64,
    /// Generation of the unresolved historical fetch, 0 when none.
    historical_open: AtomicU64,
    live_in_flight: AtomicUsize,
}

impl Shared {
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&ViewState) -> ViewState,
    {
        self.state.send_modify(|state| {
            let next = f(state);
            *state = next;
        });
    }

    /// Publish `f`'s snapshot only if no newer historical fetch has started.
    fn apply_if_current<F>(&self, generation: u64, f: F) -> bool
    where
        F: FnOnce(&ViewState) -> ViewState,
    {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            let next = f(state);
            *state = next;
            true
        })
    }

    fn live_pending(&self) -> bool {
        self.live_in_flight.load(Ordering::SeqCst) > 0
    }

    fn historical_pending(&self) -> bool {
        self.historical_open.load(Ordering::SeqCst) != 0
    }

    fn historical_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.historical
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StateController {
    pub fn new(source: Arc<dyn WeatherSource>, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(ViewState::new(clock.today()));
        Self {
            inner: Arc::new(Shared {
                source,
                clock,
                state,
                historical: Mutex::new(None),
                generation: AtomicU64::new(0),
                historical_open: AtomicU64::new(0),
                live_in_flight: AtomicUsize::new(0),
            }),
        }
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.state.subscribe()
    }

    /// Fetch the live forecast for `location`.
    ///
    /// A no-op for `auto:ip` once data is loaded, so a late permission
    /// callback does not reload the screen.
    pub fn load_live(&self, location: &str) {
        if location == AUTO_IP && self.inner.state.borrow().weather_data.is_some() {
            debug!("Skipping auto:ip reload, data already present");
            return;
        }

        info!("Loading live forecast for {}", location);
        self.inner.live_in_flight.fetch_add(1, Ordering::SeqCst);
        self.inner.update(|s| ViewState {
            is_loading: true,
            error_message: None,
            ..s.clone()
        });

        let shared = Arc::clone(&self.inner);
        let location = location.to_string();
        tokio::spawn(async move {
            let result = shared.source.fetch_live_forecast(&location).await;
            if let Err(e) = &result {
                warn!("Live forecast for {} failed: {}", location, e);
            }
            let now = shared.clock.now();
            shared.update(|s| {
                shared.live_in_flight.fetch_sub(1, Ordering::SeqCst);
                ViewState {
                    is_loading: shared.live_pending() || shared.historical_pending(),
                    ..apply_live(s, result, now)
                }
            });
        });
    }

    /// Fetch the archived day `date`, superseding any outstanding historical
    /// fetch. Today's date switches back to live mode instead.
    pub fn load_historical(&self, date: NaiveDate) {
        let mut slot = self.inner.historical_slot();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = slot.take() {
            if !previous.is_finished() {
                info!("Superseding in-flight historical fetch");
            }
            previous.abort();
        }
        let superseded = self.inner.historical_open.swap(0, Ordering::SeqCst) != 0;

        if date == self.inner.clock.today() {
            drop(slot);
            if superseded {
                let live_pending = self.inner.live_pending();
                self.inner.update(|s| ViewState {
                    is_loading: live_pending,
                    ..s.clone()
                });
            }
            self.set_mode(AppMode::Live);
            let location = self.inner.state.borrow().location_query();
            self.load_live(&location);
            return;
        }

        let location = self.inner.state.borrow().location_query();
        info!("Loading historical weather for {} on {}", location, date);
        self.inner.historical_open.store(generation, Ordering::SeqCst);
        self.inner.update(|s| ViewState {
            is_loading: true,
            error_message: None,
            ..s.clone()
        });

        let shared = Arc::clone(&self.inner);
        *slot = Some(tokio::spawn(async move {
            let result = shared.source.fetch_historical(&location, date).await;
            if let Err(e) = &result {
                warn!("Historical weather for {} on {} failed: {}", location, date, e);
            }
            let applied = shared.apply_if_current(generation, |s| {
                shared.historical_open.store(0, Ordering::SeqCst);
                ViewState {
                    is_loading: shared.live_pending(),
                    ..apply_historical(s, result)
                }
            });
            if !applied {
                debug!("Discarded superseded historical result for {}", date);
            }
        }));
    }

    /// Switch presentation mode. Returning to live mode away from today
    /// refreshes current data.
    pub fn set_mode(&self, mode: AppMode) {
        info!("Mode -> {:?}", mode);
        self.inner.update(|s| ViewState {
            app_mode: mode,
            ..s.clone()
        });

        let (historical_date, location) = {
            let state = self.inner.state.borrow();
            (state.historical_date, state.location_query())
        };
        if mode == AppMode::Live && historical_date != self.inner.clock.today() {
            self.load_live(&location);
        }
    }

    /// Move the timeline scrubber. Never touches the network.
    pub fn on_timeline_drag(&self, progress: f32) {
        let today = self.inner.clock.today();
        let progress = clamp_progress(progress);
        self.inner.update(|s| ViewState {
            timeline_progress: progress,
            historical_date: timeline_date(today, progress),
            is_timeline_dragging: true,
            ..s.clone()
        });
    }

    /// Release the scrubber and load the selected day.
    pub fn on_timeline_drag_finished(&self) {
        self.inner.update(|s| ViewState {
            is_timeline_dragging: false,
            ..s.clone()
        });
        let date = self.inner.state.borrow().historical_date;
        self.load_historical(date);
    }

    /// Select an hourly row. Renderers clamp when reading.
    pub fn select_hour(&self, index: usize) {
        self.inner.update(|s| ViewState {
            selected_hour_index: index,
            ..s.clone()
        });
    }

    pub fn toggle_aqi_expansion(&self) {
        self.inner.update(|s| ViewState {
            is_aqi_expanded: !s.is_aqi_expanded,
            ..s.clone()
        });
    }
}

fn apply_live(
    prev: &ViewState,
    result: Result<WeatherPayload, Error>,
    now: NaiveDateTime,
) -> ViewState {
    match result {
        Ok(payload) => {
            let (selected_hour_index, marine_data) = match payload.first_day() {
                Some(day) => (
                    find_current_hour_index(&day.hour, now),
                    extract_marine_summary(day),
                ),
                None => {
                    warn!("Live payload for {} has no forecast days", payload.location.name);
                    (0, None)
                }
            };
            ViewState {
                is_loading: false,
                weather_data: Some(Arc::new(payload)),
                selected_hour_index,
                marine_data,
                ..prev.clone()
            }
        }
        Err(e) => ViewState {
            is_loading: false,
            error_message: Some(e.to_string()),
            ..prev.clone()
        },
    }
}

fn apply_historical(prev: &ViewState, result: Result<WeatherPayload, Error>) -> ViewState {
    match result {
        Ok(payload) => {
            let hours = payload.first_day().map(|d| d.hour.len()).unwrap_or(0);
            ViewState {
                is_loading: false,
                selected_hour_index: HISTORICAL_HOUR_INDEX.min(hours.saturating_sub(1)),
                weather_data: Some(Arc::new(payload)),
                ..prev.clone()
            }
        }
        Err(e) => ViewState {
            is_loading: false,
            error_message: Some(e.to_string()),
            ..prev.clone()
        },
    }
}
