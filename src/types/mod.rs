pub mod error;
pub mod form;
pub mod id;
pub mod post;
pub mod report;
pub mod timestamp;

pub use error::Error;
pub use post::{Comment, Mood, Post, ReactionKind, Reactions};
pub use report::Report;
pub use timestamp::Timestamp;
