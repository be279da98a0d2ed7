//! Event history rendering pipeline
//!
//! Raw path bytes and loosely typed event records go in; a bounded-width
//! table model comes out.
//!
//! - [`codec`]: path bytes → display text, never failing
//! - [`shorten`]: display text → fixed character budget
//! - [`row`]: one event → one [`DisplayRow`]
//! - [`table`]: a watched path → complete [`TableModel`]

pub mod codec;
pub mod icons;
pub mod row;
pub mod shorten;
pub mod style;
pub mod table;

pub use icons::IconMap;
pub use row::{DisplayRow, EventRowFormatter, Outcome, DEFAULT_MAX_WIDTH};
pub use style::{Emphasis, StyledText};
pub use table::{
    BuildStatus, HistoryTableBuilder, Notification, RowFailure, Severity, TableBuild,
    TableHeader, TableModel, TableRow,
};
