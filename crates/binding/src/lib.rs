//! Contract bindings for the token contract.
//!
//! The token exposes the standard fungible-token interface implemented by
//! `BasicERC20`. Bindings are generated using alloy's `sol!` macro.

pub mod token;

pub use token::IERC20;
