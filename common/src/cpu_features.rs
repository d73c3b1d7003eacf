//! CPU feature detection for runtime SIMD dispatch.
//!
//! Detection runs once and is cached. Use these functions instead of the
//! `is_x86_feature_detected!` macro directly to avoid repeated CPUID calls
//! inside per-image dispatch.

use std::sync::OnceLock;

/// CPU feature flags detected once on first use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct X86Features {
    pub sse2: bool,
    pub ssse3: bool,
}

static FEATURES: OnceLock<X86Features> = OnceLock::new();

/// Get cached CPU features (detected once on first call).
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(|| X86Features {
        sse2: is_x86_feature_detected!("sse2"),
        ssse3: is_x86_feature_detected!("ssse3"),
    })
}

/// Get cached CPU features - all false on non-x86 platforms.
#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn get() -> X86Features {
    *FEATURES.get_or_init(X86Features::default)
}

#[inline]
pub fn has_sse2() -> bool {
    get().sse2
}

#[inline]
pub fn has_ssse3() -> bool {
    get().ssse3
}

/// NEON is part of the aarch64 baseline, so this is a compile-time answer.
#[inline]
pub fn has_neon() -> bool {
    cfg!(target_arch = "aarch64")
}
