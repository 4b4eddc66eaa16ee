use crate::verifier::RejectReason;

/// Error types for script construction, parsing, and signing templates.
///
/// Verification outcomes are never reported through this type; they are
/// returned as [`crate::VerificationResult`] values. A `ScriptError` means
/// the inputs could not even be assembled into something to verify.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Structurally invalid script, e.g. `required` outside `[1, n]`.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Script bytes do not match any supported template.
    #[error("unsupported script: {0}")]
    UnsupportedScript(String),

    /// Invalid opcode data encountered during ASM parsing.
    #[error("invalid opcode data")]
    InvalidOpcodeData,

    /// Attempted to append a push opcode without a payload.
    #[error("use append_push_data for push data opcodes: {0}")]
    InvalidOpcodeType(String),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds maximum allowed size.
    #[error("data too big")]
    DataTooBig,

    /// A push data part exceeds protocol limits.
    #[error("part too big '{0}'")]
    PartTooBig(usize),

    /// Invalid address string.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Base58Check checksum does not match.
    #[error("checksum failed")]
    EncodingChecksumFailed,

    /// A signing template could not produce an unlocking script.
    #[error("signing error: {0}")]
    SigningError(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] scriptcheck_primitives::PrimitivesError),
}

impl ScriptError {
    /// The verdict a verifier would give for inputs that fail this way.
    ///
    /// Every construction or parse failure is a structural problem with the
    /// input, so it maps to [`RejectReason::MalformedInput`].
    pub fn reason(&self) -> RejectReason {
        RejectReason::MalformedInput
    }
}
