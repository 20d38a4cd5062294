// Lazily compiled patterns for fixed expressions used by the crate itself.

mod cache;
