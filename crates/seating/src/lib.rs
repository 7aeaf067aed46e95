//! seating: a fixed set of tables serving concurrent timed guests, with a FIFO
//! wait queue for guests who arrive when every table is taken.

mod error;
mod guest;
mod service_time;
mod table;

pub mod cafe;
pub mod config;
pub mod event;
pub mod logging;

pub use cafe::{Cafe, DEFAULT_POLL_INTERVAL, ServiceSummary};
pub use config::{CafeConfig, DEFAULT_GUESTS, DEFAULT_TABLES};
pub use error::{Result, SeatingError};
pub use event::{EventKind, EventSink, JsonSink, NullSink, SeatingEvent, TextSink};
pub use guest::{Guest, Visit};
pub use service_time::{DEFAULT_MAX_SECS, DEFAULT_MIN_SECS, ServiceTime};
pub use table::Table;
