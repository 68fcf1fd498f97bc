//! CPU execution context for fill kernels.

use scirs2_core::random::{thread_rng, SeedableRng, StdRng};

/// Execution context owning the random generator used by the random fill
/// kernels.
///
/// Each invocation takes the context by `&mut`, so two concurrent
/// invocations need two contexts; nothing here is shared implicitly.
/// Reproducibility across runs belongs to whoever constructs the context,
/// via [`CpuContext::seeded`].
pub struct CpuContext {
    rng: StdRng,
}

impl CpuContext {
    pub fn new() -> Self {
        CpuContext {
            rng: StdRng::from_rng(&mut thread_rng()),
        }
    }

    /// Deterministic context for reproducible fills.
    pub fn seeded(seed: u64) -> Self {
        CpuContext {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for CpuContext {
    fn default() -> Self {
        Self::new()
    }
}
