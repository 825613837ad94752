//! Infrastructure Layer
//!
//! PostgreSQL and filesystem implementations.

pub mod media;
pub mod postgres;

pub use media::FsMediaStore;
pub use postgres::PgListingRepository;
