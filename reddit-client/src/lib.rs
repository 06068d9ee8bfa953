pub mod api;
pub mod auth;
pub mod stream;

pub use api::{RedditApiClient, RedditListing, RedditPostData};
pub use stream::{SubmissionSource, SubmissionStream, WindowedWalker};
