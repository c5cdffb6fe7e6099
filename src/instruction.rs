//! Instruction types

use {
    crate::{
        error::EscrowError,
        layout,
        pda::{find_escrow_address, find_escrow_associated_token_address, find_job_address},
    },
    solana_program::{
        instruction::{AccountMeta, Instruction},
        msg,
        program_error::ProgramError,
        pubkey::Pubkey,
        system_program,
        sysvar::rent,
    },
    std::mem::size_of,
};

/// Instructions supported by the escrow program.
///
/// The account order and signer/writable flags documented on each
/// variant are part of the wire contract and must not be reordered.
#[derive(Clone, Debug, PartialEq)]
pub enum EscrowInstruction {
    // 0
    /// Initialize an Escrow account.
    ///
    /// Accounts expected by this instruction:
    ///
    ///   0. `[]` Token mint
    ///   1. `[signer, writable]` Funder paying for the new accounts
    ///   2. `[writable]` Escrow PDA account - uninitialized
    ///   3. `[writable]` Escrow token account
    ///   4. `[]` Rent sysvar
    ///   5. `[]` System program id
    ///   6. `[]` Token program id
    ///   7. `[]` Associated token program id
    InitEscrow {
        /// Owner authority that can disburse funds
        owner: Pubkey,
    },

    // 1
    /// Set the new owner of an Escrow account.
    ///
    /// Accounts expected by this instruction:
    ///
    ///   0. `[writable]` Escrow PDA account
    ///   1. `[signer]` Current Escrow owner authority
    SetEscrowOwner {
        /// The new owner
        new_owner: Pubkey,
    },

    // 2
    /// Transfer funds into an Escrow and credit a Job.
    ///
    /// Accounts expected by this instruction:
    ///
    ///   0. `[]` Token mint
    ///   1. `[signer, writable]` Funder paying for the job account
    ///   2. `[writable]` Source token account
    ///                     $authority can transfer $amount
    ///   3. `[signer]` Source token account authority ($authority)
    ///   4. `[writable]` Escrow PDA account
    ///   5. `[writable]` Escrow token account
    ///   6. `[writable]` Job PDA account
    ///   7. `[]` Rent sysvar
    ///   8. `[]` System program id
    ///   9. `[]` Token program id
    FundJob {
        /// Amount of tokens to escrow
        amount: u64,
    },

    // 3
    /// Transfer funds from an Escrow and debit a Job.
    ///
    /// Accounts expected by this instruction:
    ///
    ///   0. `[]` Token mint
    ///   1. `[writable]` Escrow PDA account
    ///   2. `[signer]` Escrow owner authority
    ///   3. `[writable]` Escrow token account
    ///   4. `[writable]` Job PDA account
    ///   5. `[writable]` Destination token account
    ///   6. `[]` Token program id
    DisburseFunds {
        /// Amount of tokens to disburse
        amount: u64,
    },
}

impl EscrowInstruction {
    /// Unpacks a byte buffer into an [EscrowInstruction](enum.EscrowInstruction.html).
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (tag, rest) =
            layout::unpack_u8(input).map_err(|_| EscrowError::InstructionUnpackError)?;
        Ok(match tag {
            0 => {
                let (owner, _rest) = layout::unpack_pubkey(rest)
                    .map_err(|_| EscrowError::InstructionUnpackError)?;
                Self::InitEscrow { owner }
            }
            1 => {
                let (new_owner, _rest) = layout::unpack_pubkey(rest)
                    .map_err(|_| EscrowError::InstructionUnpackError)?;
                Self::SetEscrowOwner { new_owner }
            }
            2 => {
                let (amount, _rest) =
                    layout::unpack_u64(rest).map_err(|_| EscrowError::InstructionUnpackError)?;
                Self::FundJob { amount }
            }
            3 => {
                let (amount, _rest) =
                    layout::unpack_u64(rest).map_err(|_| EscrowError::InstructionUnpackError)?;
                Self::DisburseFunds { amount }
            }
            _ => {
                msg!("Instruction cannot be unpacked");
                return Err(EscrowError::InstructionUnpackError.into());
            }
        })
    }

    /// Packs an [EscrowInstruction](enum.EscrowInstruction.html) into a byte buffer.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(size_of::<Self>());
        match *self {
            Self::InitEscrow { owner } => {
                layout::pack_u8(0, &mut buf);
                layout::pack_pubkey(&owner, &mut buf);
            }
            Self::SetEscrowOwner { new_owner } => {
                layout::pack_u8(1, &mut buf);
                layout::pack_pubkey(&new_owner, &mut buf);
            }
            Self::FundJob { amount } => {
                layout::pack_u8(2, &mut buf);
                layout::pack_u64(amount, &mut buf);
            }
            Self::DisburseFunds { amount } => {
                layout::pack_u8(3, &mut buf);
                layout::pack_u64(amount, &mut buf);
            }
        }
        buf
    }
}

/// Creates an 'InitEscrow' instruction.
///
/// The escrow address is derived from the token mint and the escrow
/// token account from the associated token scheme, so only the owner,
/// funder, and mint need to be supplied.
pub fn init_escrow(
    program_id: Pubkey,
    owner: Pubkey,
    funder: Pubkey,
    token_mint: Pubkey,
) -> Result<Instruction, EscrowError> {
    let (escrow_pubkey, _bump_seed) = find_escrow_address(&program_id, &token_mint)?;
    let (escrow_token_pubkey, _bump_seed) =
        find_escrow_associated_token_address(&escrow_pubkey, &token_mint)?;
    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(token_mint, false),
            AccountMeta::new(funder, true),
            AccountMeta::new(escrow_pubkey, false),
            AccountMeta::new(escrow_token_pubkey, false),
            AccountMeta::new_readonly(rent::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        ],
        data: EscrowInstruction::InitEscrow { owner }.pack(),
    })
}

/// Creates a 'SetEscrowOwner' instruction.
pub fn set_escrow_owner(
    program_id: Pubkey,
    escrow: Pubkey,
    current_owner: Pubkey,
    new_owner: Pubkey,
) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(escrow, false),
            AccountMeta::new_readonly(current_owner, true),
        ],
        data: EscrowInstruction::SetEscrowOwner { new_owner }.pack(),
    }
}

/// Creates a 'FundJob' instruction.
///
/// Derives the escrow from the token mint and the job from the funding
/// authority, so a job is created on first use per authority.
pub fn fund_job(
    program_id: Pubkey,
    amount: u64,
    token_mint: Pubkey,
    funder: Pubkey,
    source_token_account: Pubkey,
    authority: Pubkey,
) -> Result<Instruction, EscrowError> {
    let (escrow_pubkey, _bump_seed) = find_escrow_address(&program_id, &token_mint)?;
    let (escrow_token_pubkey, _bump_seed) =
        find_escrow_associated_token_address(&escrow_pubkey, &token_mint)?;
    let (job_pubkey, _bump_seed) = find_job_address(&program_id, &escrow_pubkey, &authority)?;
    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(token_mint, false),
            AccountMeta::new(funder, true),
            AccountMeta::new(source_token_account, false),
            AccountMeta::new_readonly(authority, true),
            AccountMeta::new(escrow_pubkey, false),
            AccountMeta::new(escrow_token_pubkey, false),
            AccountMeta::new(job_pubkey, false),
            AccountMeta::new_readonly(rent::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data: EscrowInstruction::FundJob { amount }.pack(),
    })
}

/// Creates a 'DisburseFunds' instruction.
///
/// The job to debit is passed in directly; its authority is read from
/// the job account on chain, not by this builder.
pub fn disburse_funds(
    program_id: Pubkey,
    amount: u64,
    token_mint: Pubkey,
    destination_token_account: Pubkey,
    job: Pubkey,
    owner: Pubkey,
) -> Result<Instruction, EscrowError> {
    let (escrow_pubkey, _bump_seed) = find_escrow_address(&program_id, &token_mint)?;
    let (escrow_token_pubkey, _bump_seed) =
        find_escrow_associated_token_address(&escrow_pubkey, &token_mint)?;
    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(token_mint, false),
            AccountMeta::new(escrow_pubkey, false),
            AccountMeta::new_readonly(owner, true),
            AccountMeta::new(escrow_token_pubkey, false),
            AccountMeta::new(job, false),
            AccountMeta::new(destination_token_account, false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ],
        data: EscrowInstruction::DisburseFunds { amount }.pack(),
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::pda::{find_escrow_address, find_escrow_associated_token_address, find_job_address},
        assert_matches::assert_matches,
    };

    #[test]
    fn pack_round_trip() {
        let variants = [
            EscrowInstruction::InitEscrow {
                owner: Pubkey::new_unique(),
            },
            EscrowInstruction::SetEscrowOwner {
                new_owner: Pubkey::new_unique(),
            },
            EscrowInstruction::FundJob { amount: 42 },
            EscrowInstruction::DisburseFunds { amount: u64::MAX },
        ];
        for instruction in variants {
            let data = instruction.pack();
            assert_eq!(EscrowInstruction::unpack(&data).unwrap(), instruction);
        }
    }

    #[test]
    fn payload_widths_are_fixed() {
        let owner = Pubkey::new_unique();
        assert_eq!(EscrowInstruction::InitEscrow { owner }.pack().len(), 33);
        assert_eq!(
            EscrowInstruction::SetEscrowOwner { new_owner: owner }
                .pack()
                .len(),
            33
        );
        assert_eq!(EscrowInstruction::FundJob { amount: 0 }.pack().len(), 9);
        assert_eq!(
            EscrowInstruction::DisburseFunds { amount: 0 }.pack().len(),
            9
        );
    }

    #[test]
    fn fund_job_wire_bytes() {
        let data = EscrowInstruction::FundJob {
            amount: 1_000_000_000,
        }
        .pack();
        assert_eq!(
            data,
            [0x02, 0x00, 0xCA, 0x9A, 0x3B, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn unpack_rejects_bad_input() {
        assert_matches!(EscrowInstruction::unpack(&[]), Err(_));
        assert_matches!(EscrowInstruction::unpack(&[4]), Err(_));
        // truncated argument blocks
        assert_matches!(EscrowInstruction::unpack(&[0; 32]), Err(_));
        assert_matches!(EscrowInstruction::unpack(&[2, 0, 0]), Err(_));
    }

    #[test]
    fn init_escrow_account_order() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let funder = Pubkey::new_unique();
        let token_mint = Pubkey::new_unique();

        let instruction = init_escrow(program_id, owner, funder, token_mint).unwrap();
        assert_eq!(instruction.program_id, program_id);
        assert_eq!(instruction.data[0], 0);
        assert_eq!(&instruction.data[1..], owner.as_ref());

        let (escrow_pubkey, _) = find_escrow_address(&program_id, &token_mint).unwrap();
        let (escrow_token_pubkey, _) =
            find_escrow_associated_token_address(&escrow_pubkey, &token_mint).unwrap();
        let expected = [
            (token_mint, false, false),
            (funder, true, true),
            (escrow_pubkey, false, true),
            (escrow_token_pubkey, false, true),
            (rent::id(), false, false),
            (system_program::id(), false, false),
            (spl_token::id(), false, false),
            (spl_associated_token_account::id(), false, false),
        ];
        assert_account_metas(&instruction.accounts, &expected);
    }

    #[test]
    fn set_escrow_owner_account_order() {
        let program_id = Pubkey::new_unique();
        let escrow = Pubkey::new_unique();
        let current_owner = Pubkey::new_unique();
        let new_owner = Pubkey::new_unique();

        let instruction = set_escrow_owner(program_id, escrow, current_owner, new_owner);
        assert_eq!(instruction.data[0], 1);
        assert_eq!(&instruction.data[1..], new_owner.as_ref());

        let expected = [(escrow, false, true), (current_owner, true, false)];
        assert_account_metas(&instruction.accounts, &expected);
    }

    #[test]
    fn fund_job_account_order() {
        let program_id = Pubkey::new_unique();
        let token_mint = Pubkey::new_unique();
        let funder = Pubkey::new_unique();
        let source_token_account = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let instruction = fund_job(
            program_id,
            1_000_000_000,
            token_mint,
            funder,
            source_token_account,
            authority,
        )
        .unwrap();
        assert_eq!(
            instruction.data,
            [0x02, 0x00, 0xCA, 0x9A, 0x3B, 0x00, 0x00, 0x00, 0x00]
        );

        let (escrow_pubkey, _) = find_escrow_address(&program_id, &token_mint).unwrap();
        let (escrow_token_pubkey, _) =
            find_escrow_associated_token_address(&escrow_pubkey, &token_mint).unwrap();
        let (job_pubkey, _) =
            find_job_address(&program_id, &escrow_pubkey, &authority).unwrap();
        let expected = [
            (token_mint, false, false),
            (funder, true, true),
            (source_token_account, false, true),
            (authority, true, false),
            (escrow_pubkey, false, true),
            (escrow_token_pubkey, false, true),
            (job_pubkey, false, true),
            (rent::id(), false, false),
            (system_program::id(), false, false),
            (spl_token::id(), false, false),
        ];
        assert_eq!(instruction.accounts.len(), 10);
        assert_account_metas(&instruction.accounts, &expected);
    }

    #[test]
    fn disburse_funds_account_order() {
        let program_id = Pubkey::new_unique();
        let token_mint = Pubkey::new_unique();
        let destination_token_account = Pubkey::new_unique();
        let job = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let instruction = disburse_funds(
            program_id,
            500,
            token_mint,
            destination_token_account,
            job,
            owner,
        )
        .unwrap();
        assert_eq!(instruction.data[0], 3);

        let (escrow_pubkey, _) = find_escrow_address(&program_id, &token_mint).unwrap();
        let (escrow_token_pubkey, _) =
            find_escrow_associated_token_address(&escrow_pubkey, &token_mint).unwrap();
        let expected = [
            (token_mint, false, false),
            (escrow_pubkey, false, true),
            (owner, true, false),
            (escrow_token_pubkey, false, true),
            (job, false, true),
            (destination_token_account, false, true),
            (spl_token::id(), false, false),
        ];
        assert_account_metas(&instruction.accounts, &expected);
    }

    fn assert_account_metas(actual: &[AccountMeta], expected: &[(Pubkey, bool, bool)]) {
        assert_eq!(actual.len(), expected.len());
        for (index, (meta, (pubkey, is_signer, is_writable))) in
            actual.iter().zip(expected.iter()).enumerate()
        {
            assert_eq!(meta.pubkey, *pubkey, "account {} pubkey", index);
            assert_eq!(meta.is_signer, *is_signer, "account {} signer flag", index);
            assert_eq!(
                meta.is_writable, *is_writable,
                "account {} writable flag",
                index
            );
        }
    }
}
