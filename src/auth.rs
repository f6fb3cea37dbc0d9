//! Consumer identity, token material, and the credential vault.

pub mod token;
pub mod vault;

pub use token::*;
pub use vault::*;
