pub mod action;
pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod io;
pub mod lookup;
pub mod paths;
pub mod scope;

#[cfg(test)]
mod testing;

pub use action::{ActionStatus, CoordAction};
pub use aggregate::{collect_actions, ActionQuery, Identified};
pub use db::ActionDb;
pub use error::{CoordError, Result, ScopeFault};
pub use lookup::get_actions_in_date_range;
pub use scope::{format_utc, parse_scope, parse_utc, DateRange};
