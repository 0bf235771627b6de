//! Notice template system.
//!
//! This module provides:
//! - Template descriptors with `{placeholder}` tokens
//! - The static GitHub event registry (declarative templates or handlers)
//! - The substitution engine that fills templates from a field bag
//!
//! # Example
//!
//! ```ignore
//! let entry = registry().lookup("star").unwrap();
//! let descriptor = entry.descriptor("created").unwrap();
//!
//! let mut fields = FieldBag::new();
//! fields.insert("sender", "bob");
//! fields.insert("repo", "acme/repo");
//!
//! let body = fill_template(descriptor.plain_template, &fields);
//! assert_eq!(body, "**bob** starred acme/repo");
//! ```

mod registry;
mod substitution;
mod types;

pub use registry::{registry, TemplateRegistry};
pub use substitution::{fill_template, placeholders};
pub use types::{EventHandler, FieldBag, RegistryEntry, TemplateDescriptor};
