//! Route view state with stale-result protection.
//!
//! A [`RouteSession`] mirrors the navigation view: a destination is chosen,
//! resolved and solved, and the result is displayed until the view closes or
//! another destination is chosen. Every choice bumps a generation counter;
//! results carrying an older generation are discarded so a slow, superseded
//! request never overwrites a newer one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::routing::{plan_route, RouteOutcome, RoutePlan};
use crate::venue::Venue;

/// What the route view is currently showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RouteState {
    Idle,
    Resolving { destination: String },
    Solved(RoutePlan),
    Unreachable { destination: String },
    UnknownDestination { name: String, suggestions: Vec<String> },
}

impl RouteState {
    /// Route to draw, if any. Every other state shows the bare map.
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            RouteState::Solved(plan) => Some(plan),
            _ => None,
        }
    }
}

impl From<RouteOutcome> for RouteState {
    fn from(outcome: RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Solved(plan) => RouteState::Solved(plan),
            RouteOutcome::Unreachable { destination, .. } => {
                RouteState::Unreachable { destination }
            }
            RouteOutcome::UnknownDestination { name, suggestions } => {
                RouteState::UnknownDestination { name, suggestions }
            }
        }
    }
}

/// Handle for an in-flight route request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTicket {
    generation: u64,
    destination: String,
}

impl RouteTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }
}

#[derive(Debug)]
struct Inner {
    generation: u64,
    state: RouteState,
}

/// Thread-safe route view state.
#[derive(Debug)]
pub struct RouteSession {
    inner: Mutex<Inner>,
}

impl Default for RouteSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSession {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                generation: 0,
                state: RouteState::Idle,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new request, superseding any request still in flight.
    pub fn choose(&self, destination: impl Into<String>) -> RouteTicket {
        let destination = destination.into();
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = RouteState::Resolving {
            destination: destination.clone(),
        };
        RouteTicket {
            generation: inner.generation,
            destination,
        }
    }

    /// Publish the outcome of `ticket`. Returns `false` when the ticket was
    /// superseded and the outcome discarded.
    pub fn complete(&self, ticket: &RouteTicket, outcome: RouteOutcome) -> bool {
        let mut inner = self.lock();
        if inner.generation != ticket.generation {
            debug!(
                stale = ticket.generation,
                current = inner.generation,
                destination = %ticket.destination,
                "discarding superseded route result"
            );
            return false;
        }
        inner.state = outcome.into();
        true
    }

    /// Drop a request that failed without an outcome. The view returns to
    /// idle unless `ticket` was already superseded.
    pub fn abandon(&self, ticket: &RouteTicket) -> bool {
        let mut inner = self.lock();
        if inner.generation != ticket.generation {
            return false;
        }
        inner.state = RouteState::Idle;
        true
    }

    /// Close the view: back to idle, in-flight requests become stale.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = RouteState::Idle;
    }

    pub fn state(&self) -> RouteState {
        self.lock().state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Choose, plan and publish in one step.
    pub fn request(&self, venue: &Venue, destination: &str) -> Result<RouteState> {
        let ticket = self.choose(destination);
        match plan_route(venue, ticket.destination()) {
            Ok(outcome) => {
                self.complete(&ticket, outcome);
                Ok(self.state())
            }
            Err(err) => {
                self.abandon(&ticket);
                Err(err)
            }
        }
    }
}
