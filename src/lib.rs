// pathtrail - event history viewer for watched filesystem paths
//
// Library layout:
// - model: upstream descriptor and event types (paths as raw bytes)
// - history: decoding, shortening, row formatting, table building
// - config: layered configuration (file -> env -> defaults)
// - logging: tracing subscriber setup
// - theme / tui: thin ratatui glue that draws a finished TableModel

pub mod config;
pub mod history;
pub mod logging;
pub mod model;
pub mod theme;
pub mod tui;
