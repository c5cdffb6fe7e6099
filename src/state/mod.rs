//! State types

pub use account_type::*;
pub use escrow::*;
pub use job::*;

mod account_type;
mod escrow;
mod job;

use solana_program::pubkey::Pubkey;

/// A decoded record paired with the address it was fetched from.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedAccount<T> {
    /// Address the raw bytes were read from
    pub pubkey: Pubkey,
    /// Decoded record
    pub data: T,
}
