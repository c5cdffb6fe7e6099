//! Program derived address lookup.
//!
//! Escrow and job accounts live at addresses derived from fixed,
//! domain-separated seed lists, so clients recompute them on demand
//! instead of storing them. Derivation is a pure function of the seeds
//! and program id; both sides of the wire must land on the same pair.

use {crate::error::EscrowError, solana_program::pubkey::Pubkey};

/// Seed tag for escrow addresses.
pub const ESCROW_SEED: &[u8] = b"escrow";
/// Seed tag for job addresses.
pub const JOB_SEED: &[u8] = b"job";

/// Walk bump candidates from 255 down to 0 and return the first seed
/// combination that lands off the ed25519 curve.
///
/// `Pubkey::create_program_address` hashes the seeds and rejects any
/// candidate that is a valid curve point, so the first `Ok` is the
/// canonical address for the given seeds. An address with no curve
/// point has no private key; only the program can authorize its use.
pub fn find_derived_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), EscrowError> {
    let mut bump_seed = [u8::MAX];
    loop {
        {
            let mut seeds_with_bump = seeds.to_vec();
            seeds_with_bump.push(&bump_seed);
            if let Ok(address) = Pubkey::create_program_address(&seeds_with_bump, program_id) {
                return Ok((address, bump_seed[0]));
            }
        }
        if bump_seed[0] == 0 {
            return Err(EscrowError::NoValidAddress);
        }
        bump_seed[0] -= 1;
    }
}

/// Find the escrow address for a token mint.
///
/// One escrow exists per (program, mint) pair.
pub fn find_escrow_address(
    program_id: &Pubkey,
    token_mint: &Pubkey,
) -> Result<(Pubkey, u8), EscrowError> {
    find_derived_address(
        &[ESCROW_SEED, token_mint.as_ref(), spl_token::id().as_ref()],
        program_id,
    )
}

/// Find the job address for an escrow and funding authority.
pub fn find_job_address(
    program_id: &Pubkey,
    escrow: &Pubkey,
    authority: &Pubkey,
) -> Result<(Pubkey, u8), EscrowError> {
    find_derived_address(
        &[JOB_SEED, escrow.as_ref(), authority.as_ref()],
        program_id,
    )
}

/// Find the escrow's token account under the associated token program.
///
/// Standard associated token derivation, seeds `[owner, token program,
/// mint]` against the associated token program id.
pub fn find_escrow_associated_token_address(
    escrow: &Pubkey,
    token_mint: &Pubkey,
) -> Result<(Pubkey, u8), EscrowError> {
    find_derived_address(
        &[
            escrow.as_ref(),
            spl_token::id().as_ref(),
            token_mint.as_ref(),
        ],
        &spl_associated_token_account::id(),
    )
}
