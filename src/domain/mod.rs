pub mod info_block;
pub mod pull_request;
pub mod ticket;
pub mod title;
