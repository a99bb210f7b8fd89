pub mod dispatcher;
pub mod handle;
pub mod health;
pub mod presenter;
pub mod store;
