pub mod faq_entry;
pub mod faq_rag_config;
pub mod retrieval;
