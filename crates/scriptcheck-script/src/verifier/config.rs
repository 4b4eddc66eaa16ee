//! Verifier limits.

/// Largest key list a bare multisig locking script may carry.
pub const MAX_PUB_KEYS_PER_MULTISIG: usize = 20;

/// Limits applied while verifying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_pub_keys_per_multisig: usize,
}

impl Config {
    pub fn new() -> Self {
        Config {
            max_pub_keys_per_multisig: MAX_PUB_KEYS_PER_MULTISIG,
        }
    }

    /// Lower the multisig key limit, e.g. to the 3 keys relay policy allows.
    ///
    /// Values above [`MAX_PUB_KEYS_PER_MULTISIG`] are clamped, since no
    /// locking script can be built with more keys than that.
    pub fn with_max_pub_keys_per_multisig(mut self, max: usize) -> Self {
        self.max_pub_keys_per_multisig = max.min(MAX_PUB_KEYS_PER_MULTISIG);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits() {
        assert_eq!(Config::default().max_pub_keys_per_multisig, 20);
        assert_eq!(
            Config::new().with_max_pub_keys_per_multisig(3).max_pub_keys_per_multisig,
            3
        );
        assert_eq!(
            Config::new().with_max_pub_keys_per_multisig(100).max_pub_keys_per_multisig,
            MAX_PUB_KEYS_PER_MULTISIG
        );
    }
}
