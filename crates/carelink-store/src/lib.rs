//! Carelink Store - reactive domain state
//!
//! Each store is a single lock-guarded state cell holding the
//! authoritative in-process snapshot of its domain collections.
//! Collections live behind `Arc` and are swapped wholesale on mutation,
//! so observers can rely on reference equality for change detection; a
//! broadcast channel additionally notifies subscribers after every
//! effective mutation. Store operations never fail: updates against a
//! missing id are silent no-ops, and derived queries over empty state
//! return empty results.
//!
//! `RwLock` guards use `unwrap()` intentionally. Lock poisoning only
//! occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state.

pub mod chat;
pub mod volunteer;

pub use chat::{AudioActivity, ChatEvent, ChatStore};
pub use volunteer::{VolunteerEvent, VolunteerStore};
