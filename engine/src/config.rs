//! Engine configuration

/// Matching engine configuration
///
/// `cpu_affinity` and `numa_node` are advisory hints for drivers that pin
/// the matcher thread or its allocations; the core itself does not act on
/// them.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Initial capacity hint for the symbol directory
    pub num_symbols: usize,
    /// Hard cap on concurrently outstanding orders
    pub order_pool_size: usize,
    /// Emit rate-limited capacity diagnostics
    pub enable_logging: bool,
    /// Core to pin the matcher thread to; -1 for none
    pub cpu_affinity: i32,
    /// NUMA node preference; -1 for none
    pub numa_node: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_symbols: 100,
            order_pool_size: 1_000_000,
            enable_logging: false,
            cpu_affinity: -1,
            numa_node: -1,
        }
    }
}
