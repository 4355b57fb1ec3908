//! Repository implementations.

pub mod post;

pub use post::PostRepository;
