//! Static KSE100 reference tables.
//!
//! Fixed in-memory data: the fallback index snapshot, the sector
//! composition table, and the top companies table. Rows are immutable for
//! the process lifetime; values reflect the PSX composition the tables
//! were captured from.

pub mod companies;
pub mod index;
pub mod sectors;

pub use companies::{all_companies, companies_in_sector};
pub use index::{fallback_index, INDEX_NAME, INDEX_SYMBOL};
pub use sectors::all_sectors;
