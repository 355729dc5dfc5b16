//! Ready-made validators for formwatch schemas
//!
//! Three combinators cover the common cases:
//!
//! - [`required`]: rejects missing and empty values
//! - [`pattern`]: tests values against an email / URL recognizer or a regex
//! - [`func`]: wraps a predicate and gives bare failures a message
//!
//! Each returns a plain value implementing [`Validator`](formwatch_core::Validator)
//! for any object type, so it can go into any [`FieldRules`](formwatch_core::FieldRules).
//!
//! # Examples
//!
//! ```
//! use formwatch_core::{FieldRules, Schema, ValidationContext};
//! use formwatch_rules::{PatternKind, pattern, required, required_with};
//! use serde_json::{json, Value};
//!
//! let schema: Schema<Value> = Schema::new()
//!     .field("name", FieldRules::new().rule(required_with("Name plz")))
//!     .field(
//!         "email",
//!         FieldRules::new()
//!             .rule(required())
//!             .rule(pattern(PatternKind::Email)),
//!     );
//!
//! let ctx = ValidationContext::new();
//! ctx.validate(&json!({ "name": "", "email": "test" }), &schema);
//!
//! assert_eq!(ctx.get_errors("name"), vec!["Name plz"]);
//! assert_eq!(ctx.get_errors("email"), vec!["This is not a valid email"]);
//! ```

mod error;
mod func;
mod message;
mod oracle;
mod pattern;
mod required;

pub use error::*;
pub use func::*;
pub use oracle::*;
pub use pattern::*;
pub use required::*;
