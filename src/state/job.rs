use {
    super::*,
    crate::error::EscrowError,
    arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs},
    solana_program::{
        msg,
        program_error::ProgramError,
        program_pack::{IsInitialized, Pack, Sealed},
        pubkey::{Pubkey, PUBKEY_BYTES},
    },
    std::convert::TryFrom,
};

/// Job state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Job {
    /// Account type, must be JobV1 currently
    pub account_type: AccountType,
    /// Amount of tokens in escrow for the job
    pub amount: u64,
    /// User authority that initialized the job
    pub authority: Pubkey,
}

impl Job {
    /// Create a job
    pub fn new(params: InitJobParams) -> Self {
        let mut job = Self::default();
        Self::init(&mut job, params);
        job
    }

    /// Initialize a job
    pub fn init(&mut self, params: InitJobParams) {
        self.account_type = AccountType::JobV1;
        self.amount = 0;
        self.authority = params.authority;
    }
}

/// Initialize a job
pub struct InitJobParams {
    /// User authority that initialized the job
    pub authority: Pubkey,
}

/// True iff the raw bytes have the exact job size and carry the job tag.
pub fn is_job(data: &[u8]) -> bool {
    data.len() == Job::LEN && data[0] == u8::from(AccountType::JobV1)
}

/// Decode raw account bytes as a job.
///
/// Returns `None` when the bytes belong to some other kind of account.
pub fn parse_job(pubkey: &Pubkey, data: &[u8]) -> Option<ParsedAccount<Job>> {
    if !is_job(data) {
        return None;
    }
    let job = Job::unpack_from_slice(data).ok()?;
    Some(ParsedAccount {
        pubkey: *pubkey,
        data: job,
    })
}

impl Sealed for Job {}

impl IsInitialized for Job {
    fn is_initialized(&self) -> bool {
        self.account_type != AccountType::Uninitialized
    }
}

const JOB_LEN: usize = 41; // 1 + 8 + 32
impl Pack for Job {
    const LEN: usize = JOB_LEN;

    fn pack_into_slice(&self, output: &mut [u8]) {
        let output = array_mut_ref![output, 0, JOB_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (account_type, amount, authority) = mut_array_refs![output, 1, 8, PUBKEY_BYTES];

        *account_type = u8::from(self.account_type).to_le_bytes();
        *amount = self.amount.to_le_bytes();
        authority.copy_from_slice(&self.authority.to_bytes());
    }

    fn unpack_from_slice(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() != JOB_LEN {
            msg!("Job account data has an invalid length");
            return Err(EscrowError::LengthMismatch.into());
        }
        let input = array_ref![input, 0, JOB_LEN];
        #[allow(clippy::ptr_offset_with_cast)]
        let (account_type, amount, authority) = array_refs![input, 1, 8, PUBKEY_BYTES];

        let account_type = AccountType::try_from(u8::from_le_bytes(*account_type))
            .map_err(|_| EscrowError::UnknownAccountType)?;
        if account_type != AccountType::JobV1 {
            msg!("Job account type is invalid");
            return Err(EscrowError::UnknownAccountType.into());
        }

        Ok(Self {
            account_type,
            amount: u64::from_le_bytes(*amount),
            authority: Pubkey::new_from_array(*authority),
        })
    }
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches};

    #[test]
    fn pack_round_trip() {
        let mut job = Job::new(InitJobParams {
            authority: Pubkey::new_unique(),
        });
        job.amount = 1;

        let mut data = [0u8; Job::LEN];
        Job::pack(job.clone(), &mut data).unwrap();
        assert_eq!(Job::unpack(&data).unwrap(), job);
    }

    #[test]
    fn packed_width_is_41() {
        assert_eq!(Job::get_packed_len(), 41);
    }

    #[test]
    fn probe_requires_width_and_tag() {
        let authority = Pubkey::new_unique();
        let mut data = vec![u8::from(AccountType::JobV1)];
        data.extend_from_slice(&9u64.to_le_bytes());
        data.extend_from_slice(authority.as_ref());
        assert!(is_job(&data));

        assert!(!is_job(&data[..40]));

        let mut wrong_tag = data;
        wrong_tag[0] = u8::from(AccountType::EscrowV1);
        assert!(!is_job(&wrong_tag));
    }

    #[test]
    fn parse_returns_none_for_foreign_accounts() {
        let pubkey = Pubkey::new_unique();
        let escrow = Escrow::new(InitEscrowParams {
            owner: Pubkey::new_unique(),
        });
        let mut data = [0u8; Escrow::LEN];
        Escrow::pack(escrow, &mut data).unwrap();

        assert_eq!(parse_job(&pubkey, &data), None);
    }

    #[test]
    fn hard_decode_rejects_bad_input() {
        assert_matches!(Job::unpack(&[0u8; 42]), Err(_));
        let mut data = [0u8; Job::LEN];
        data[0] = 3;
        assert_matches!(Job::unpack(&data), Err(_));
    }
}
