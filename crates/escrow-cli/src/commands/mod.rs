pub mod deal;
pub mod dispatch;
pub mod exchange;
pub mod feed;
pub mod notify;
pub mod review;
pub mod schema;
pub mod sequence;
pub mod shared;
pub mod user;
