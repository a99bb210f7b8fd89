pub mod health;
pub mod history;
pub mod notification;
pub mod queue;
pub mod request;
pub mod response;
pub mod retry;
pub mod snapshot;
pub mod status;
pub mod validation;
