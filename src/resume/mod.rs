//! Hand-off of live gameplay state across full-page navigations.
//!
//! A mini-game is a separate page, so the in-memory session is lost when the
//! player goes there. [`ResumptionGateway::suspend`] writes a
//! [`ResumptionSnapshot`] to session storage and tags the mini-game URL with
//! the phase to come back to; [`ReturnTicket`] is the mini-game's half of the
//! contract; [`ResumptionGateway::resume`] reads it all back on return.

mod error;
mod gateway;
mod params;
mod snapshot;
mod storage;

pub use error::StorageError;
pub use gateway::{HandOff, ResumptionGateway};
pub use params::{
    BONUS_HEARTS_PARAM, HEARTS_PARAM, RETURN_TO_PARAM, RETURN_URL_PARAM, ResumeParams,
    ReturnTicket, SCREEN_PARAM,
};
pub use snapshot::{ResumeTarget, ResumptionSnapshot, STORAGE_KEY_PREFIX};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
