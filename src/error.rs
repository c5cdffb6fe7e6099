//! Error types

use {
    num_derive::FromPrimitive,
    num_traits::FromPrimitive,
    solana_program::{
        decode_error::DecodeError,
        msg,
        program_error::{PrintProgramError, ProgramError},
    },
    thiserror::Error,
};

/// Errors that may be returned by the escrow client
#[derive(Clone, Copy, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum EscrowError {
    // 0
    /// Instruction data is truncated or carries an unknown tag
    #[error("Instruction cannot be unpacked")]
    InstructionUnpackError,
    /// Input does not match the fixed width of the value being decoded
    #[error("Input length does not match the record size")]
    LengthMismatch,
    /// Leading tag byte does not name the expected account type
    #[error("Account type is invalid")]
    UnknownAccountType,
    /// Every bump candidate produced an on-curve address
    #[error("No viable program address found for the given seeds")]
    NoValidAddress,
}

impl From<EscrowError> for ProgramError {
    fn from(e: EscrowError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for EscrowError {
    fn type_of() -> &'static str {
        "Escrow Error"
    }
}

impl PrintProgramError for EscrowError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        msg!(&self.to_string());
    }
}
