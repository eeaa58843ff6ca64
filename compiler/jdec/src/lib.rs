//! jdec decompiler core.
//!
//! Re-exports the two halves of the core:
//! - [`classfile`]: annotation and type-annotation attribute decoding
//! - [`matching`]: pattern compilation and structural matching
//!
//! and owns process-level logging setup ([`init_tracing`]).

use std::sync::Once;

pub use jdec_classfile as classfile;
pub use jdec_match as matching;

pub use jdec_classfile::{
    parse_annotations_attribute, parse_type_annotations_attribute, AnnotationNode,
    AnnotationValue, ConstantPool, DecodeError, SymbolTable, TypeAnnotation,
};
pub use jdec_match::{MatchEngine, MatchPattern, Matchable, PatternError, VariableBindings};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing after the first call.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .try_init();
            if installed.is_ok() {
                tracing::debug!("tracing initialized");
            }
        }
    });
}
