//! On-demand stack growth for recursive compiler passes.
//!
//! Expression parsing, checking and lowering all recurse on the tree shape,
//! so a pathological input like `((((...))))` or a long operator chain can
//! exhaust the native stack. Each recursive entry point wraps its body in
//! [`ensure_sufficient_stack`], which allocates a fresh segment when the
//! remaining space drops below [`RED_ZONE`].

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
pub const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm32 manages its own stack; run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Depth of a right-leaning chain, counted the way the parser walks it.
    fn chain_depth(remaining: u32) -> u32 {
        ensure_sufficient_stack(|| {
            if remaining == 0 {
                0
            } else {
                1 + chain_depth(remaining - 1)
            }
        })
    }

    #[test]
    fn test_shallow_chain() {
        assert_eq!(chain_depth(16), 16);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        assert_eq!(chain_depth(200_000), 200_000);
    }

    #[test]
    fn test_result_passes_through() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Err("bad".to_string()));
        assert_eq!(result, Err("bad".to_string()));
    }
}
