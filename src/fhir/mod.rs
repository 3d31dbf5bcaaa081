//! FHIR resources used by the worklist flow.
//!
//! - `models`: the resource shapes (List, Bundle, Task, ServiceRequest, ...)
//! - `queries`: typed fetch helpers on `ResourceClient`

mod models;
mod queries;

pub use models::*;
