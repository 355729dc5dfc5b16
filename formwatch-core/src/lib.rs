//! Observable validation contexts for formwatch
//!
//! A [`ValidationContext`] runs a [`Schema`] (field name → ordered
//! validators) against a record-like object and keeps the resulting error
//! messages. Consumers observe the errors and the derived validity through
//! subscriptions instead of polling.
//!
//! # Examples
//!
//! ## Validating an object
//!
//! ```
//! use formwatch_core::{FieldRules, Schema, validation_context};
//! use serde_json::{json, Value};
//!
//! let schema: Schema<Value> = Schema::new()
//!     .field("name", FieldRules::new().check(|opts| !opts.value.is_null()))
//!     .field("age", FieldRules::new().check(|opts| {
//!         if opts.value.as_u64().is_some_and(|age| age >= 13) {
//!             Ok(())
//!         } else {
//!             Err("You must be over 13 years of age to sign up.".to_string())
//!         }
//!     }));
//!
//! let ctx = validation_context();
//! ctx.validate(&json!({ "name": "Jeff", "age": 9 }), &schema);
//!
//! assert!(!ctx.is_valid());
//! assert_eq!(
//!     ctx.get_error("age").as_deref(),
//!     Some("You must be over 13 years of age to sign up.")
//! );
//! ```
//!
//! ## Observing changes
//!
//! ```
//! use formwatch_core::ValidationContext;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let ctx = ValidationContext::new();
//! let notifications = Arc::new(AtomicUsize::new(0));
//! let counter = notifications.clone();
//! ctx.subscribe(move |state| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     println!("valid: {}", state.is_valid);
//! });
//!
//! ctx.add_errors([("email", ["Already taken"])]);
//! ctx.reset();
//! assert_eq!(notifications.load(Ordering::SeqCst), 2);
//! ```
//!
//! ## Binding an object
//!
//! ```
//! use formwatch_core::{FieldRules, Schema, bound_context, shared};
//! use serde_json::{json, Value};
//!
//! let form = shared(json!({ "name": "" }));
//! let validation = bound_context(form.clone());
//! let schema: Schema<Value> =
//!     Schema::new().field("name", FieldRules::new().check(|opts| opts.value != ""));
//!
//! validation.validate(&schema);
//! assert!(!validation.is_valid());
//!
//! form.write()["name"] = json!("Jeff");
//! validation.reset().validate(&schema);
//! assert!(validation.is_valid());
//! ```

mod bound;
mod config;
mod context;
mod errors;
mod observer;
mod schema;
mod store;
mod traits;
mod value;

pub use bound::*;
pub use config::*;
pub use context::*;
pub use errors::*;
pub use observer::{SubscriptionId, ValidationState};
pub use schema::*;
pub use store::*;
pub use traits::*;
pub use value::*;
