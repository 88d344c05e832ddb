//! Client-side catalog views over freshly fetched content.
//! Everything here is pure and synchronous: same input, same output, input order kept.

pub mod filter;
pub mod sponsors;
pub mod tickets;

pub use filter::{categories_of, CatalogFilter, CategorySelection, EmptyState, Searchable};
pub use sponsors::group_by_tier;
pub use tickets::{ticket_cards, TicketCard};
