//! Listing derivation.
//!
//! Everything here is a pure function of the catalog and the user's
//! selections: filtering, facets, sorting and pagination.

mod facets;
mod filter;
mod listing;
mod query;
mod results;

pub use facets::{brand_facets, model_facets, search_facets};
pub use filter::Filters;
pub use listing::{Facets, ListingView};
pub use query::{ListingQuery, SortOption};
pub use results::{Pagination, PAGE_SIZE};
