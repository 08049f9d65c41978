pub mod quote_store;
