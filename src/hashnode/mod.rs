mod client;
mod normalize;
mod orchestrator;
mod queries;

pub use self::{
    client::{ContentSource, HashnodeClient, PostsPage},
    normalize::{normalize_post, normalize_series},
    orchestrator::{Listing, fetch_all, fetch_listing},
    queries::{RawPost, RawSeries},
};
