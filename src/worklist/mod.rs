//! Worklist resolution.
//!
//! - `resolver`: concurrent fan-out from task entries to service requests
//! - `source`: reading the worklist (direct or via search bundle)

mod resolver;
mod source;

pub use resolver::{WorklistReport, WorklistResolver};
pub use source::{fetch_worklist_entries, resolve_worklist, WorklistSource};
