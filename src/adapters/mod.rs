// Adapters layer: concrete implementations for external systems (controller REST API, inventory files).

pub mod apic;
pub mod inventory;
