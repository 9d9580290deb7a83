//! Field validation and workflow-chain resolution for the onboarding admin UI.
//!
//! Two independent pieces: [`validate`] checks submitted form values against
//! declarative field rules, and [`chain`] linearizes the workflow canvas into
//! the order a multi-workflow onboarding run executes. Both are pure and
//! stateless; [`wasm`] exposes them to the browser.

pub mod chain;
pub mod error;
pub mod parse;
pub mod validate;
pub mod wasm;

pub use chain::{build_workflow_chain, plan_chain};
pub use error::{DefinitionError, Phase};
pub use validate::{StepReport, ValidationResult, validate_field, validate_step};
