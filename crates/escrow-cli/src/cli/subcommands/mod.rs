mod deal;
mod exchange;
mod review;
mod sequence;
mod user;

pub use deal::DealCommands;
pub use exchange::ExchangeCommands;
pub use review::ReviewCommands;
pub use sequence::SequenceCommands;
pub use user::UserCommands;
