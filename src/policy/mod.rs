pub mod evicting;

pub use evicting::EvictingCache;
