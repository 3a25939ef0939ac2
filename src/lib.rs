//! Instruction builders for the Address Lookup Table Program

pub mod error;
pub mod instruction;

use solana_program::pubkey::Pubkey;
pub use instruction::{
    close_lookup_table, create_lookup_table, deactivate_lookup_table,
    derive_lookup_table_address, extend_lookup_table, freeze_lookup_table,
    LookupTableInstructions, ProgramInstruction,
};

solana_program::declare_id!("AddressLookupTab1e1111111111111111111111111");

/// The definition of address lookup table accounts.
///
/// As used by the `v0` message format.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AddressLookupTableAccount {
    pub key: Pubkey,
    pub addresses: Vec<Pubkey>,
}

impl From<(Pubkey, Vec<Pubkey>)> for AddressLookupTableAccount {
    fn from((key, addresses): (Pubkey, Vec<Pubkey>)) -> Self {
        Self { key, addresses }
    }
}
