//! Built-in firmware hints
//!
//! Guards of two UEFI network entry points that textual extraction gets
//! wrong (multi-condition `if`s and macro masks).

use crate::features::hints::domain::HintRegistry;
use crate::features::predicate::Predicate;

impl HintRegistry {
    /// Registry seeded with the built-in hints
    pub fn with_builtin_hints() -> Self {
        let mut registry = Self::new();
        register_builtin_hints(&mut registry);
        registry
    }
}

/// Register the built-in hints, replacing existing entries for those functions
pub fn register_builtin_hints(registry: &mut HintRegistry) {
    registry.register(
        "EfiPxeBcUdpRead",
        vec![
            Predicate::non_null("This"),
            Predicate::bitmask_set("OpFlags", 0x01),
            Predicate::non_null("DestPort"),
            Predicate::non_null("BufferSize"),
        ],
    );
    registry.register(
        "Ip4PreProcessPacket",
        vec![
            Predicate::greater("BufferSize", 0),
            Predicate::less_or_equal("HeaderLength", 60),
        ],
    );
}
