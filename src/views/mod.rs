//! View state for the listing and post pages

mod detail;
mod listing;

pub use detail::DetailView;
pub use listing::ListingView;
