//! In-process application state store.
//!
//! All domain state lives here for the lifetime of the process: the user
//! registry, the auction list, the active session, and the watchlist. Every
//! mutation is funnelled through the lifecycle engine or one of the explicit
//! methods below; handlers never reach into fields directly.

use crate::domain::{Auction, AuctionId, User, UserActivity, UserId};
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct StoreInner {
    users: Vec<User>,
    auctions: Vec<Auction>,
    watchlist: HashSet<AuctionId>,
    current_user_id: Option<UserId>,
}

/// Shared store behind a single writer lock. Critical sections are short and
/// never held across await points.
#[derive(Debug, Default)]
pub struct AppStore {
    inner: RwLock<StoreInner>,
}

impl AppStore {
    pub fn new(users: Vec<User>, auctions: Vec<Auction>) -> Self {
        AppStore {
            inner: RwLock::new(StoreInner {
                users,
                auctions,
                watchlist: HashSet::new(),
                current_user_id: None,
            }),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreInner> {
        self.inner.read().expect("store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().expect("store lock poisoned")
    }

    // =========================================================================
    // Auctions

    pub fn auctions(&self) -> Vec<Auction> {
        self.read().auctions.clone()
    }

    pub fn auction(&self, id: &AuctionId) -> Option<Auction> {
        self.read().auctions.iter().find(|a| &a.id == id).cloned()
    }

    /// Apply `f` to the auction with the given id. Returns the updated copy,
    /// or None when no such auction exists.
    pub fn mutate_auction<F>(&self, id: &AuctionId, f: F) -> Option<Auction>
    where
        F: FnOnce(&mut Auction),
    {
        let mut inner = self.write();
        let auction = inner.auctions.iter_mut().find(|a| &a.id == id)?;
        f(auction);
        Some(auction.clone())
    }

    /// Append freshly imported lots to the registry.
    pub fn insert_auctions(&self, lots: Vec<Auction>) {
        self.write().auctions.extend(lots);
    }

    // =========================================================================
    // Users and session

    pub fn user(&self, id: &UserId) -> Option<User> {
        self.read().users.iter().find(|u| &u.id == id).cloned()
    }

    pub fn users(&self) -> Vec<User> {
        self.read().users.clone()
    }

    pub fn mutate_user<F>(&self, id: &UserId, f: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut inner = self.write();
        let user = inner.users.iter_mut().find(|u| &u.id == id)?;
        f(user);
        Some(user.clone())
    }

    /// Prepend an activity to a user's history (newest first). Returns the
    /// updated user for session mirroring.
    pub fn push_activity(&self, id: &UserId, activity: UserActivity) -> Option<User> {
        self.mutate_user(id, |u| u.activity_history.insert(0, activity))
    }

    pub fn current_user(&self) -> Option<User> {
        let inner = self.read();
        let id = inner.current_user_id.as_ref()?;
        inner.users.iter().find(|u| &u.id == id).cloned()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.read().current_user_id.clone()
    }

    pub fn set_current_user(&self, id: Option<UserId>) {
        self.write().current_user_id = id;
    }

    // =========================================================================
    // Watchlist

    pub fn watchlist(&self) -> HashSet<AuctionId> {
        self.read().watchlist.clone()
    }

    /// Toggle a lot in the watchlist. Returns true when the lot is now
    /// watched.
    pub fn toggle_watch(&self, id: &AuctionId) -> bool {
        let mut inner = self.write();
        if inner.watchlist.remove(id) {
            false
        } else {
            inner.watchlist.insert(id.clone());
            true
        }
    }

    /// Replace the watchlist wholesale, used when restoring a saved session.
    pub fn restore_watchlist(&self, ids: HashSet<AuctionId>) {
        self.write().watchlist = ids;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn store() -> AppStore {
        AppStore::new(seed::seed_users(), seed::seed_auctions())
    }

    #[test]
    fn test_auction_lookup() {
        let s = store();
        let first = s.auctions().into_iter().next().unwrap();
        assert_eq!(s.auction(&first.id).unwrap().id, first.id);
        assert!(s.auction(&AuctionId::new("missing")).is_none());
    }

    #[test]
    fn test_mutate_auction_returns_updated_copy() {
        let s = store();
        let id = s.auctions()[0].id.clone();
        let updated = s
            .mutate_auction(&id, |a| a.bids_count += 1)
            .expect("auction exists");
        assert_eq!(updated.bids_count, s.auction(&id).unwrap().bids_count);
    }

    #[test]
    fn test_session_tracking() {
        let s = store();
        assert!(s.current_user().is_none());
        s.set_current_user(Some(UserId::new("bidder01")));
        assert_eq!(s.current_user().unwrap().id, UserId::new("bidder01"));
        s.set_current_user(None);
        assert!(s.current_user().is_none());
    }

    #[test]
    fn test_watchlist_toggle() {
        let s = store();
        let id = AuctionId::new("BANK-REPO-2024-100");
        assert!(s.toggle_watch(&id));
        assert!(s.watchlist().contains(&id));
        assert!(!s.toggle_watch(&id));
        assert!(!s.watchlist().contains(&id));
    }
}
