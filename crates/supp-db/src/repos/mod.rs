//! Record repositories. Each is an `impl SuppDb` block with raw SQL access.

pub mod suppression;
