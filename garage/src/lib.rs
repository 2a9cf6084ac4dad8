//! Client-side session core of the garage vehicle manager
//!
//! Holds the logged-in user's claims in durable storage, enforces claim expiry, and gates
//! navigation between the public and private route trees.

pub mod claims;
pub mod clock;
pub mod expiry;
pub mod guard;
pub mod routes;
pub mod session;
pub mod storage;

pub use claims::UserClaims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use expiry::{ExpiryHandle, ExpiryWatcher};
pub use guard::{Admission, Guard, Navigation, PrivateGuard, PublicGuard, Router};
pub use routes::{Area, Route, Screen};
pub use session::{Session, SessionStore};
pub use storage::{MemoryStorage, SqliteStorage, Storage};
