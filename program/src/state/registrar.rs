use super::*;
use crate::layout::*;

/// Exchange rate and lockup bonus parameters for one voting mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VotingMintConfig {
    pub mint: Pubkey,

    /// May grant locked tokens to voters; opaque to power computation.
    pub grant_authority: Pubkey,

    /// Vote weight factor for all deposited funds, scaled by 1e9.
    pub baseline_vote_weight_scaled_factor: u64,

    /// Maximum extra vote weight factor for lockups, scaled by 1e9.
    pub max_extra_lockup_vote_weight_scaled_factor: u64,

    /// Lockups longer than this don't earn more bonus.
    pub lockup_saturation_secs: u64,

    /// Decimal shift the on-chain program applies when converting native
    /// amounts; carried for completeness, power uses the configured token
    /// decimals instead.
    pub digit_shift: i8,
}

impl VotingMintConfig {
    /// Configured slots carry a nonzero baseline; unused ones are zeroed.
    pub fn is_active(&self) -> bool {
        self.baseline_vote_weight_scaled_factor > 0
    }

    fn decode(data: &[u8], offset: usize) -> Result<Self, DecodeError> {
        Ok(VotingMintConfig {
            mint: read_pubkey(data, offset + VOTING_MINT_MINT)?,
            grant_authority: read_pubkey(data, offset + VOTING_MINT_GRANT_AUTHORITY)?,
            baseline_vote_weight_scaled_factor: read_u64(data, offset + VOTING_MINT_BASELINE_FACTOR)?,
            max_extra_lockup_vote_weight_scaled_factor: read_u64(
                data,
                offset + VOTING_MINT_MAX_EXTRA_FACTOR,
            )?,
            lockup_saturation_secs: read_u64(data, offset + VOTING_MINT_LOCKUP_SATURATION_SECS)?,
            digit_shift: read_u8(data, offset + VOTING_MINT_DIGIT_SHIFT)? as i8,
        })
    }

    fn serialize_into(&self, data: &mut [u8], offset: usize) {
        write_bytes(data, offset + VOTING_MINT_MINT, self.mint.as_ref());
        write_bytes(data, offset + VOTING_MINT_GRANT_AUTHORITY, self.grant_authority.as_ref());
        write_bytes(
            data,
            offset + VOTING_MINT_BASELINE_FACTOR,
            &self.baseline_vote_weight_scaled_factor.to_le_bytes(),
        );
        write_bytes(
            data,
            offset + VOTING_MINT_MAX_EXTRA_FACTOR,
            &self.max_extra_lockup_vote_weight_scaled_factor.to_le_bytes(),
        );
        write_bytes(
            data,
            offset + VOTING_MINT_LOCKUP_SATURATION_SECS,
            &self.lockup_saturation_secs.to_le_bytes(),
        );
        write_bytes(data, offset + VOTING_MINT_DIGIT_SHIFT, &[self.digit_shift as u8]);
    }
}

/// Realm-wide voting configuration, one per governance realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registrar {
    pub governance_program_id: Pubkey,
    pub realm: Pubkey,
    pub governing_token_mint: Pubkey,
    pub realm_authority: Pubkey,
    pub voting_mints: [VotingMintConfig; MAX_VOTING_MINTS],

    /// Debug only: time offset, to allow tests to move forward in time.
    pub time_offset: i64,
    pub bump: u8,
}

impl Registrar {
    /// The first voting mint with a nonzero baseline.
    pub fn active_voting_mint(&self) -> Option<(usize, &VotingMintConfig)> {
        self.voting_mints
            .iter()
            .enumerate()
            .find(|(_, config)| config.is_active())
    }

    /// Checks that the voting mints can weigh deposits at all: at least one
    /// is active and every active one has a nonzero lockup saturation.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.active_voting_mint().is_none() {
            return Err(ConfigurationError::new(
                ConfigurationErrorKind::NoActiveVotingMint,
            ));
        }
        match self
            .voting_mints
            .iter()
            .position(|config| config.is_active() && config.lockup_saturation_secs == 0)
        {
            Some(mint_index) => Err(ConfigurationError::new(
                ConfigurationErrorKind::ZeroLockupSaturation { mint_index },
            )),
            None => Ok(()),
        }
    }

    /// The voting mint `voting_mint_config_idx` points at, if that slot is
    /// configured. Deposits naming anything else are weighed with
    /// `active_voting_mint`.
    pub fn configured_voting_mint(
        &self,
        voting_mint_config_idx: u8,
    ) -> Option<(usize, &VotingMintConfig)> {
        let index = voting_mint_config_idx as usize;
        self.voting_mints
            .get(index)
            .filter(|config| config.is_active())
            .map(|config| (index, config))
    }

    pub fn serialize_into(&self, data: &mut [u8]) -> Result<(), DecodeError> {
        ensure_len(data, REGISTRAR_MIN_SIZE)?;
        self.write(data);
        Ok(())
    }

    /// Full-size account data, discriminator included.
    pub fn to_account_data(&self) -> Vec<u8> {
        let mut data = vec![0; REGISTRAR_ACCOUNT_SIZE];
        self.write(&mut data);
        data
    }

    // `data` must be at least REGISTRAR_MIN_SIZE long
    fn write(&self, data: &mut [u8]) {
        data.fill(0);
        write_bytes(data, 0, &REGISTRAR_DISCRIMINATOR);
        write_bytes(
            data,
            REGISTRAR_GOVERNANCE_PROGRAM_ID,
            self.governance_program_id.as_ref(),
        );
        write_bytes(data, REGISTRAR_REALM, self.realm.as_ref());
        write_bytes(data, REGISTRAR_GOVERNING_TOKEN_MINT, self.governing_token_mint.as_ref());
        write_bytes(data, REGISTRAR_REALM_AUTHORITY, self.realm_authority.as_ref());
        for (index, config) in self.voting_mints.iter().enumerate() {
            config.serialize_into(data, voting_mint_offset(index));
        }
        write_bytes(data, REGISTRAR_TIME_OFFSET, &self.time_offset.to_le_bytes());
        write_bytes(data, REGISTRAR_BUMP, &[self.bump]);
    }
}

/// Decodes Registrar account data, discriminator included.
pub fn decode_registrar(data: &[u8]) -> Result<Registrar, DecodeError> {
    ensure_len(data, REGISTRAR_MIN_SIZE)?;
    ensure_discriminator(data, REGISTRAR_DISCRIMINATOR)?;

    let mut voting_mints = [VotingMintConfig::default(); MAX_VOTING_MINTS];
    for (index, config) in voting_mints.iter_mut().enumerate() {
        *config = VotingMintConfig::decode(data, voting_mint_offset(index))?;
    }

    Ok(Registrar {
        governance_program_id: read_pubkey(data, REGISTRAR_GOVERNANCE_PROGRAM_ID)?,
        realm: read_pubkey(data, REGISTRAR_REALM)?,
        governing_token_mint: read_pubkey(data, REGISTRAR_GOVERNING_TOKEN_MINT)?,
        realm_authority: read_pubkey(data, REGISTRAR_REALM_AUTHORITY)?,
        voting_mints,
        time_offset: read_i64(data, REGISTRAR_TIME_OFFSET)?,
        bump: read_u8(data, REGISTRAR_BUMP)?,
    })
}
