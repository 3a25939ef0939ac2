//! Instruction types and builders for the address lookup table program.

use {
    crate::error::{LookupTableInstructionError, MapToProgramIoError},
    bincode::Options,
    serde::{Deserialize, Serialize},
    solana_program::{
        clock::Slot,
        instruction::{AccountMeta, Instruction},
        program_error::ProgramError,
        pubkey::{Pubkey, PubkeyError},
        system_program,
    },
};

/// Wire form of the program's instructions.
///
/// Serialized with bincode's fixed-width encoding, so every payload starts
/// with the variant index as a little-endian `u32`. Variant order is part of
/// the wire format and must not change.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub enum ProgramInstruction {
    /// Create an address lookup table
    ///
    /// # Account references
    ///   0. `[WRITE]` Uninitialized address lookup table account
    ///   1. `[SIGNER]` Account used to derive and control the new address lookup table.
    ///   2. `[SIGNER, WRITE]` Account that will fund the new address lookup table.
    ///   3. `[]` System program for CPI.
    CreateLookupTable {
        /// A recent slot must be used in the derivation path
        /// for each initialized table. When closing table accounts,
        /// the initialization slot must no longer be "recent" to prevent
        /// address tables from being recreated with reordered or
        /// otherwise malicious addresses.
        recent_slot: Slot,
        /// Address tables are always initialized at program-derived
        /// addresses using the funding address, recent blockhash, and
        /// the user-passed `bump_seed`.
        bump_seed: u8,
    },

    /// Permanently freeze an address lookup table, making it immutable.
    ///
    /// # Account references
    ///   0. `[WRITE]` Address lookup table account to freeze
    ///   1. `[SIGNER]` Current authority
    FreezeLookupTable,

    /// Extend an address lookup table with new addresses. Funding account and
    /// system program account references are only required if the lookup table
    /// account requires additional lamports to cover the rent-exempt balance
    /// after being extended.
    ///
    /// # Account references
    ///   0. `[WRITE]` Address lookup table account to extend
    ///   1. `[SIGNER]` Current authority
    ///   2. `[SIGNER, WRITE, OPTIONAL]` Account that will fund the table reallocation
    ///   3. `[OPTIONAL]` System program for CPI.
    ExtendLookupTable { new_addresses: Vec<Pubkey> },

    /// Deactivate an address lookup table, making it unusable and
    /// eligible for closure after a short period of time.
    ///
    /// # Account references
    ///   0. `[WRITE]` Address lookup table account to deactivate
    ///   1. `[SIGNER]` Current authority
    DeactivateLookupTable,

    /// Close an address lookup table account
    ///
    /// # Account references
    ///   0. `[WRITE]` Address lookup table account to close
    ///   1. `[SIGNER]` Current authority
    ///   2. `[WRITE]` Recipient of closed account lamports
    CloseLookupTable,
}

impl ProgramInstruction {
    /// Decode instruction data produced by one of the builders below.
    /// Trailing bytes are rejected.
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        bincode::options()
            .with_fixint_encoding()
            .reject_trailing_bytes()
            .deserialize(input)
            .map_to_program_io_error()
    }
}

/// Builds lookup table instructions addressed to a single program id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTableInstructions {
    program_id: Pubkey,
}

impl Default for LookupTableInstructions {
    fn default() -> Self {
        Self::new(crate::id())
    }
}

impl LookupTableInstructions {
    pub const fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Derives the address of an address table account from a wallet address
    /// and a recent block's slot.
    ///
    /// Bump seeds are tried from `u8::MAX` down to 1, and the first one that
    /// yields an address off the ed25519 curve is returned along with it.
    pub fn derive_lookup_table_address(
        &self,
        authority_address: &Pubkey,
        recent_block_slot: Slot,
    ) -> Result<(Pubkey, u8), ProgramError> {
        let slot_seed = recent_block_slot.to_le_bytes();
        for bump_seed in (1..=u8::MAX).rev() {
            match Pubkey::create_program_address(
                &[authority_address.as_ref(), &slot_seed, &[bump_seed]],
                &self.program_id,
            ) {
                Ok(address) => {
                    log::debug!(
                        "derived lookup table {address} for authority {authority_address} \
                         at slot {recent_block_slot} with bump {bump_seed}"
                    );
                    return Ok((address, bump_seed));
                }
                Err(PubkeyError::InvalidSeeds) => {
                    log::trace!("bump seed {bump_seed} produced an on-curve address");
                }
                Err(err) => return Err(err.into()),
            }
        }
        log::warn!(
            "no valid lookup table address for authority {authority_address} \
             at slot {recent_block_slot}"
        );
        Err(LookupTableInstructionError::DerivationExhausted.into())
    }

    /// Constructs an instruction to create a table account and returns
    /// the instruction and the table account's derived address.
    pub fn create_lookup_table(
        &self,
        authority_address: Pubkey,
        payer_address: Pubkey,
        recent_slot: Slot,
    ) -> Result<(Instruction, Pubkey), ProgramError> {
        let (lookup_table_address, bump_seed) =
            self.derive_lookup_table_address(&authority_address, recent_slot)?;
        let instruction = Instruction::new_with_bincode(
            self.program_id,
            &ProgramInstruction::CreateLookupTable {
                recent_slot,
                bump_seed,
            },
            vec![
                AccountMeta::new(lookup_table_address, false),
                AccountMeta::new_readonly(authority_address, true),
                AccountMeta::new(payer_address, true),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
        );

        Ok((instruction, lookup_table_address))
    }

    /// Constructs an instruction that freezes an address lookup
    /// table so that it can never be closed or extended again. Empty
    /// lookup tables cannot be frozen.
    pub fn freeze_lookup_table(
        &self,
        lookup_table_address: Pubkey,
        authority_address: Pubkey,
    ) -> Instruction {
        Instruction::new_with_bincode(
            self.program_id,
            &ProgramInstruction::FreezeLookupTable,
            vec![
                AccountMeta::new(lookup_table_address, false),
                AccountMeta::new_readonly(authority_address, true),
            ],
        )
    }

    /// Constructs an instruction which extends an address lookup
    /// table account with new addresses.
    pub fn extend_lookup_table(
        &self,
        lookup_table_address: Pubkey,
        authority_address: Pubkey,
        payer_address: Option<Pubkey>,
        new_addresses: Vec<Pubkey>,
    ) -> Instruction {
        let mut accounts = vec![
            AccountMeta::new(lookup_table_address, false),
            AccountMeta::new_readonly(authority_address, true),
        ];

        if let Some(payer_address) = payer_address {
            accounts.extend([
                AccountMeta::new(payer_address, true),
                AccountMeta::new_readonly(system_program::id(), false),
            ]);
        }

        Instruction::new_with_bincode(
            self.program_id,
            &ProgramInstruction::ExtendLookupTable { new_addresses },
            accounts,
        )
    }

    /// Constructs an instruction that deactivates an address lookup
    /// table so that it cannot be extended again and will be unusable
    /// and eligible for closure after a short amount of time.
    pub fn deactivate_lookup_table(
        &self,
        lookup_table_address: Pubkey,
        authority_address: Pubkey,
    ) -> Instruction {
        Instruction::new_with_bincode(
            self.program_id,
            &ProgramInstruction::DeactivateLookupTable,
            vec![
                AccountMeta::new(lookup_table_address, false),
                AccountMeta::new_readonly(authority_address, true),
            ],
        )
    }

    /// Returns an instruction that closes an address lookup table
    /// account. The account will be deallocated and the lamports
    /// will be drained to the recipient address.
    pub fn close_lookup_table(
        &self,
        lookup_table_address: Pubkey,
        authority_address: Pubkey,
        recipient_address: Pubkey,
    ) -> Instruction {
        Instruction::new_with_bincode(
            self.program_id,
            &ProgramInstruction::CloseLookupTable,
            vec![
                AccountMeta::new(lookup_table_address, false),
                AccountMeta::new_readonly(authority_address, true),
                AccountMeta::new(recipient_address, false),
            ],
        )
    }
}

/// Derives the address of an address table account for the lookup table
/// program at [`crate::ID`].
pub fn derive_lookup_table_address(
    authority_address: &Pubkey,
    recent_block_slot: Slot,
) -> Result<(Pubkey, u8), ProgramError> {
    LookupTableInstructions::default()
        .derive_lookup_table_address(authority_address, recent_block_slot)
}

pub fn create_lookup_table(
    authority_address: Pubkey,
    payer_address: Pubkey,
    recent_slot: Slot,
) -> Result<(Instruction, Pubkey), ProgramError> {
    LookupTableInstructions::default().create_lookup_table(
        authority_address,
        payer_address,
        recent_slot,
    )
}

pub fn freeze_lookup_table(lookup_table_address: Pubkey, authority_address: Pubkey) -> Instruction {
    LookupTableInstructions::default().freeze_lookup_table(lookup_table_address, authority_address)
}

pub fn extend_lookup_table(
    lookup_table_address: Pubkey,
    authority_address: Pubkey,
    payer_address: Option<Pubkey>,
    new_addresses: Vec<Pubkey>,
) -> Instruction {
    LookupTableInstructions::default().extend_lookup_table(
        lookup_table_address,
        authority_address,
        payer_address,
        new_addresses,
    )
}

pub fn deactivate_lookup_table(
    lookup_table_address: Pubkey,
    authority_address: Pubkey,
) -> Instruction {
    LookupTableInstructions::default()
        .deactivate_lookup_table(lookup_table_address, authority_address)
}

pub fn close_lookup_table(
    lookup_table_address: Pubkey,
    authority_address: Pubkey,
    recipient_address: Pubkey,
) -> Instruction {
    LookupTableInstructions::default().close_lookup_table(
        lookup_table_address,
        authority_address,
        recipient_address,
    )
}
