// formwatch - observable, schema-driven validation
//
// A validation context runs per-field validators against an object, keeps
// the resulting error messages, and notifies subscribers when they change.

// Re-export core functionality
pub use formwatch_core::*;

// Re-export optional crates
#[cfg(feature = "rules")]
pub use formwatch_rules;

#[cfg(feature = "rules")]
pub use formwatch_rules::{
    FuncRule, PatternKind, PatternOracle, PatternRule, RequiredRule, RuleError, func, func_with,
    pattern, pattern_with, required, required_with,
};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BoundContext, ContextConfig, Errors, FieldRules, Outcome, Schema, SchemaBoundContext,
        Shared, SubscriptionId, Validatable, ValidationContext, ValidationOptions,
        ValidationState, Validator, bound_context, schema_bound_context, shared,
        validation_context,
    };

    #[cfg(feature = "rules")]
    pub use crate::{
        FuncRule, PatternKind, PatternRule, RequiredRule, func, func_with, pattern, pattern_with,
        required, required_with,
    };

    pub use serde_json::{Value, json};
}
