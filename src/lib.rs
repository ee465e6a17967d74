//! Consistency audit for allocation datasets.
//!
//! Takes the clients, workers, and tasks imported for an allocation run,
//! plus the business rules authored on top of them, and reports whether
//! the combined dataset is consistent enough to schedule. The audit is a
//! deterministic, synchronous pass: it diagnoses, it never repairs data
//! or assigns work.
//!
//! # Modules
//!
//! - **`models`**: Entity records (`Client`, `Worker`, `Task`) and
//!   tagged `BusinessRule` variants
//! - **`validation`**: The checks, the `Validator` orchestrator, and
//!   `ValidationReport` summaries
//! - **`config`**: Tunable ranges and severities
//!
//! # Usage
//!
//! ```
//! use u_allocation_audit::models::{Client, Task, Worker};
//! use u_allocation_audit::validation::{Snapshot, Validator};
//!
//! let snapshot = Snapshot::new()
//!     .with_client(Client::new("C1").with_name("Acme").with_priority(2).with_requested_task("T1"))
//!     .with_worker(Worker::new("W1").with_name("Ada").with_skill("rust").with_slot(1))
//!     .with_task(
//!         Task::new("T1")
//!             .with_name("Parser")
//!             .with_required_skill("rust")
//!             .with_preferred_phase(1),
//!     );
//!
//! let report = Validator::default().report(&snapshot);
//! assert!(report.is_valid());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use config::ValidationConfig;
pub use error::{Error, Result};
