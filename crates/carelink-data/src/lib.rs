//! Carelink Data - data-access ports and in-memory mocks
//!
//! The ports are the seam between the domain core and whatever backend a
//! deployment binds: the mock implementations here return seeded
//! in-memory datasets after a simulated transport delay, and a
//! network-backed client can implement the same traits without the
//! domain logic noticing. Selection happens by injection, never by
//! conditional code inside the domain.

pub mod mock;
pub mod ports;

pub use mock::{MockConversationService, MockNewsFeed, MockVolunteerDirectory};
pub use ports::{AudioRef, ConversationService, NewsFeed, VolunteerDirectory};
