//! Core logic for umbase.
//!
//! - [`resolver`] picks the configuration block a recipe build should use.
//! - [`diagnostic`] carries the advisory messages a resolution can produce.
//! - [`recipe`] and [`export`] find changed recipes and plan their exports.

pub mod diagnostic;
pub mod export;
pub mod recipe;
pub mod resolver;

pub use diagnostic::Diagnostic;
pub use export::{CommandRunner, ExportPlan, ExportRef, ProcessRunner};
pub use recipe::Recipe;
pub use resolver::{Resolution, resolve};
