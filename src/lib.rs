#![deny(missing_docs)]

//! Client for the token escrow program on the Solana blockchain.
//!
//! This crate constructs the program's instructions and derives the
//! escrow and job addresses they reference. It also decodes raw account
//! bytes back into typed state. Fetching accounts, signing, and
//! transaction submission are left to the caller.

pub mod error;
pub mod instruction;
pub mod layout;
pub mod pda;
pub mod state;

solana_program::declare_id!("7g4aX3DYhk6xHiGuoAbEnVTp9HMgLqyENoK53AVm267E");
