//! Stack guard for recursion driven by untrusted input.
//!
//! Annotation element values nest (arrays of annotations of arrays...) and
//! match patterns nest, and in both cases the depth is chosen by whoever
//! wrote the class file or the pattern text. Recursive entry points wrap
//! their bodies in [`ensure_sufficient_stack`] so a pathological input
//! grows the stack instead of aborting the process.
//!
//! On `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; the wasm runtime owns the stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
