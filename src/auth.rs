//! Token model, CSRF state handling, and the channel parsers behind them.

pub mod state;
pub mod token;

pub use state::*;
pub use token::*;
