//! External data adapters: place search, exchange rates, phrasebook.
//!
//! Each adapter normalizes a third-party response into the core's shapes
//! and carries a deterministic offline fallback so soft provider failures
//! never surface as hard errors.

pub mod exchange;
pub mod knowledge;
pub mod phrasebook;
pub mod places;

pub use exchange::{ExchangeAdapter, ExchangeRate};
pub use phrasebook::{Phrasebook, Translation};
pub use places::{PlaceResult, PlacesAdapter};
