use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Enum representing the account types managed by the program
///
/// The first byte of every stored account is one of these values; any
/// other byte means the data is not a record of this program.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum AccountType {
    /// If the account has not been initialized, the value will be 0
    Uninitialized,
    /// Escrow
    EscrowV1,
    /// Job
    JobV1,
}

impl Default for AccountType {
    fn default() -> Self {
        AccountType::Uninitialized
    }
}
