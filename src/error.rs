use {solana_program::program_error::ProgramError, spl_program_error::*};

// The lookup table program maps all bincode errors to
// `InstructionError::GenericError`, which has no `ProgramError` counterpart.
// Decoding failures of instruction data are surfaced as
// `ProgramError::BorshIoError` carrying the bincode message instead.
pub trait MapToProgramIoError<T> {
    fn map_to_program_io_error(self) -> Result<T, ProgramError>;
}
impl<T> MapToProgramIoError<T> for Result<T, bincode::Error> {
    fn map_to_program_io_error(self) -> Result<T, ProgramError> {
        self.map_err(|e| ProgramError::BorshIoError(e.to_string()))
    }
}

#[spl_program_error]
pub enum LookupTableInstructionError {
    /// No bump seed produced an off-curve lookup table address
    #[error("No bump seed produced an off-curve lookup table address")]
    DerivationExhausted,
}
