//! ABAC Policy Evaluator
//!
//! A minimal attribute-based access control engine that compiles to both
//! WASM and native.
//!
//! Policies are flat allow rules. Each rule holds patterns for the user's
//! role, id and group and for the resource's name, namespace and
//! non-resource path, plus a read-only flag. A pattern of `"*"` or `""`
//! matches anything. A request is allowed when at least one rule matches
//! every field.
//!
//! ```
//! use abac_policy::{PolicyEvaluator, PolicyRule, ResourceAttributes, UserAttributes};
//!
//! let evaluator = PolicyEvaluator::builder()
//!     .with_default_policies()
//!     .with_policies([PolicyRule::new().with_group("ops").with_namespace("infra")])
//!     .build()
//!     .unwrap();
//!
//! let user = UserAttributes::new("alice").with_group("ops");
//! let write = ResourceAttributes::new("nodes").with_namespace("infra");
//! assert!(evaluator.evaluate(&user, &write));
//!
//! let elsewhere = ResourceAttributes::new("nodes").with_namespace("billing");
//! assert!(!evaluator.evaluate(&user, &elsewhere));
//! assert!(evaluator.evaluate(&user, &elsewhere.with_read_only(true)));
//! ```

pub mod decision;
pub mod error;
pub mod evaluator;
pub mod hash;
pub mod matcher;
pub mod parser;
pub mod policy;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use decision::{Decision, PolicyDecision};
pub use error::{PolicyError, Result};
pub use evaluator::{PolicyEvaluator, PolicyEvaluatorBuilder, PolicySource};
pub use parser::PolicyFormat;
pub use policy::{default_policies, PolicyRule, PolicyStore};
pub use types::{ResourceAttributes, UserAttributes};

/// Version of the policy evaluator.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::decision::{Decision, PolicyDecision};
    pub use crate::error::{PolicyError, Result};
    pub use crate::evaluator::{PolicyEvaluator, PolicyEvaluatorBuilder};
    pub use crate::policy::{PolicyRule, PolicyStore};
    pub use crate::types::*;
}
