pub mod faq_rag_error;
