pub mod engine;
pub mod generator;
pub mod i18n;
pub mod introspect;
pub mod matcher;
pub mod modifiers;
pub mod oracle;
pub mod report;
pub mod scan;
pub mod types;

pub use engine::run_units;
pub use generator::{GenerationError, VerificationUnit, generate_units};
pub use introspect::{DescriptorIntrospector, Introspector};
pub use oracle::{OracleDocument, load_oracle};

// Re-export the localization macros
pub use crate::i18n::{t, t_with_args};
