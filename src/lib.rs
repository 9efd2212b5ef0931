pub mod api;
pub mod config;
pub mod entities;
pub mod form;
pub mod notify;
pub mod shared;
pub mod store;
pub mod tier;
pub mod wizard;
