pub mod url_store;
