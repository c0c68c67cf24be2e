//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod like_repo;
pub mod review_repo;
pub mod track_repo;

pub use comment_repo::CommentRepo;
pub use like_repo::LikeRepo;
pub use review_repo::ReviewRepo;
pub use track_repo::TrackRepo;
