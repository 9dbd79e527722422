//! The emission contract.
//!
//! [`ModelSurface`] plans what the generated class and its builder contain.
//! [`ModelInstance`] evaluates the runtime behavior that surface promises,
//! so model semantics can be checked without rendering any code.
//!
//! ## Key Types
//!
//! - [`ModelSurface`] - Setters, overrides, constructors, reset plan, builder methods
//! - [`ModelInstance`] - `set`/`reset`/`equals`/`hashCode`/`toString`
//! - [`Value`] - Attribute values with generated-code hashing

mod instance;
mod surface;
mod value;

pub use instance::{ContractError, ModelInstance, SuperState};
pub use surface::{
    BuilderMethod, BuilderTarget, ConstructorPlan, EqualityStep, ModelSurface, OverridePlan,
    ResetStep, ResetValue, SetterPlan,
};
pub use value::{Value, string_hash};
