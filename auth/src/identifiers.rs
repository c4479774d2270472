use rand::rngs::OsRng;
use rand::Rng;

/// Characters used for user ids, account numbers and routing codes.
pub const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Characters used for PINs.
pub const DIGITS: &[u8] = b"0123456789";

/// Shape of every generated identifier.
///
/// This is a contract with downstream systems: it is fixed when the generator
/// is built and never re-derived per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierFormat {
    pub user_id_length: usize,
    pub account_number_length: usize,
    pub routing_code_length: usize,
    pub pin_length: usize,
}

impl IdentifierFormat {
    pub const ACCOUNT_NUMBER_PREFIX: &'static str = "AC";
    pub const ROUTING_CODE_PREFIX: &'static str = "IFSC";
}

impl Default for IdentifierFormat {
    fn default() -> Self {
        Self {
            user_id_length: 8,
            account_number_length: 10,
            routing_code_length: 4,
            pin_length: 6,
        }
    }
}

/// Random identifier candidates drawn from the operating system CSPRNG.
///
/// The generator only proposes values. Uniqueness is decided by whoever
/// persists them, and the caller is expected to ask for a fresh candidate
/// when a value turns out to be taken.
#[derive(Debug, Clone, Default)]
pub struct IdentifierGenerator {
    format: IdentifierFormat,
}

impl IdentifierGenerator {
    pub fn new(format: IdentifierFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &IdentifierFormat {
        &self.format
    }

    /// Alphanumeric user id of exactly `length` characters.
    pub fn new_user_id(&self, length: usize) -> String {
        random_string(ALPHANUMERIC, length)
    }

    /// `AC` followed by the configured number of alphanumeric characters.
    pub fn new_account_number(&self) -> String {
        format!(
            "{}{}",
            IdentifierFormat::ACCOUNT_NUMBER_PREFIX,
            random_string(ALPHANUMERIC, self.format.account_number_length)
        )
    }

    /// `IFSC` followed by the configured number of alphanumeric characters.
    pub fn new_routing_code(&self) -> String {
        format!(
            "{}{}",
            IdentifierFormat::ROUTING_CODE_PREFIX,
            random_string(ALPHANUMERIC, self.format.routing_code_length)
        )
    }

    /// Fixed-width decimal PIN (leading zeros kept).
    pub fn new_pin(&self) -> String {
        random_string(DIGITS, self.format.pin_length)
    }
}

fn random_string(charset: &[u8], length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}
