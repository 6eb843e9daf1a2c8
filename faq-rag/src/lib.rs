//! FAQ retrieval layer.
//!
//! Public API:
//! - `load_faq`: read the static FAQ dataset into ordered entries.
//! - `FaqIndex::build_fresh`: drop+create the collection, embed every entry,
//!   upsert, create payload indexes.
//! - `Retriever::retrieve`: embed a query and run a filtered top-k search.

mod embedding;
pub mod errors;
mod faq_loader;
mod index;
pub mod structs;
mod vector_db;

pub use faq_loader::load_faq;
pub use index::{FaqIndex, Retriever};
