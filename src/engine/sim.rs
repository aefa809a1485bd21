//! Simulated competing-bid feed.
//!
//! Live lots show a leaderboard of competing floor activity. With no real
//! rival bidders in the system, a cooperative background task per watched lot
//! fabricates display-only entries on a fixed cadence. The feed never touches
//! the auction aggregate, so it cannot violate the single-pending-submission
//! invariant, and every task is cancellable when its view is torn down.

use crate::domain::{AuctionId, AuctionStatus, Decimal};
use crate::store::AppStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

const RIVAL_NAMES: &[&str] = &[
    "Delhi Dealer",
    "Pune Auto Corp",
    "Elite Motors",
    "Hassan Aggregator",
];

/// New entries stop being generated past this count.
const GENERATION_LIMIT: usize = 5;
/// Entries retained for display.
const RETAINED_LIMIT: usize = 8;
/// Price step over the current floor per generated entry.
const PRICE_STEP: i64 = 2_000;

/// A display-only competing bid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimEntry {
    pub name: String,
    pub price: Decimal,
    pub time: DateTime<Utc>,
}

struct FeedState {
    entries: Vec<SimEntry>,
    task: JoinHandle<()>,
}

pub struct SimulatedBidFeed {
    store: Arc<AppStore>,
    interval: Duration,
    feeds: Mutex<HashMap<AuctionId, FeedState>>,
}

impl SimulatedBidFeed {
    pub fn new(store: Arc<AppStore>, interval: Duration) -> Arc<Self> {
        Arc::new(SimulatedBidFeed {
            store,
            interval,
            feeds: Mutex::new(HashMap::new()),
        })
    }

    /// Start generating competing entries for a lot. Idempotent; only live
    /// lots get a task.
    pub fn watch(self: &Arc<Self>, auction_id: &AuctionId) {
        let mut feeds = self.feeds.lock().expect("sim feed lock poisoned");
        if feeds.contains_key(auction_id) {
            return;
        }
        match self.store.auction(auction_id) {
            Some(a) if a.status == AuctionStatus::Live => {}
            _ => return,
        }

        let weak = Arc::downgrade(self);
        let id = auction_id.clone();
        let interval = self.interval;
        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let Some(feed) = weak.upgrade() else { break };
                if !feed.tick(&id) {
                    break;
                }
            }
        });

        feeds.insert(
            auction_id.clone(),
            FeedState {
                entries: Vec::new(),
                task,
            },
        );
    }

    /// One generation step. Returns false once the lot stops being live.
    fn tick(&self, auction_id: &AuctionId) -> bool {
        let Some(auction) = self.store.auction(auction_id) else {
            return false;
        };
        if auction.status != AuctionStatus::Live {
            return false;
        }

        let mut feeds = self.feeds.lock().expect("sim feed lock poisoned");
        let Some(state) = feeds.get_mut(auction_id) else {
            return false;
        };
        if state.entries.len() >= GENERATION_LIMIT {
            return true;
        }

        let n = state.entries.len();
        let entry = SimEntry {
            name: RIVAL_NAMES[n % RIVAL_NAMES.len()].to_string(),
            price: auction.current_bid + Decimal::from((n as i64 + 1) * PRICE_STEP),
            time: Utc::now(),
        };
        state.entries.insert(0, entry);
        state.entries.truncate(RETAINED_LIMIT);
        true
    }

    /// Current fabricated entries for a lot, newest first.
    pub fn entries(&self, auction_id: &AuctionId) -> Vec<SimEntry> {
        self.feeds
            .lock()
            .expect("sim feed lock poisoned")
            .get(auction_id)
            .map(|s| s.entries.clone())
            .unwrap_or_default()
    }

    /// Tear down the feed for one lot, cancelling its task.
    pub fn unwatch(&self, auction_id: &AuctionId) {
        if let Some(state) = self
            .feeds
            .lock()
            .expect("sim feed lock poisoned")
            .remove(auction_id)
        {
            state.task.abort();
        }
    }

    /// Cancel every feed task.
    pub fn shutdown(&self) {
        for (_, state) in self.feeds.lock().expect("sim feed lock poisoned").drain() {
            state.task.abort();
        }
    }
}
