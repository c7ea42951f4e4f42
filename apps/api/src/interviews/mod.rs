// Interview generation and the `interviews` collection.
// All model calls go through llm_client; all writes go through store.

pub mod generate;
pub mod handlers;
pub mod prompts;
pub mod queries;
pub mod store;
