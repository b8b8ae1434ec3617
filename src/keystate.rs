use crate::error::ErrorDetail;

/// The number of keys on the hex keypad.
const NUMBER_OF_KEYS: u8 = 16;

/// The keypad latch.
///
/// `keys` holds the host-sampled state (bit k set means key k is held).  `release_mask`
/// records which keys are eligible to satisfy a key wait: a key loses eligibility when it is
/// taken by FX0A, or when it is already held as the wait begins, and regains it once released.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct KeyState {
    keys: u16,
    release_mask: u16,
}

impl KeyState {
    /// Constructor that returns a [KeyState] with no keys held and every key eligible.
    pub(crate) fn new() -> Self {
        KeyState {
            keys: 0x0,
            release_mask: 0xFFFF,
        }
    }

    /// Returns true if the given key is held.  Only the low nibble is considered, so any
    /// register value names a key.
    pub(crate) fn is_key_pressed(&self, key: u8) -> bool {
        self.keys & (1 << (key & 0xF)) != 0
    }

    /// Replaces the whole latch with a host-sampled bitmask and re-arms every released key.
    pub(crate) fn set_keys(&mut self, keys: u16) {
        self.keys = keys;
        self.release_mask |= !keys;
    }

    /// Sets the state of the specified key; returns an [ErrorDetail::InvalidKey] if the
    /// key is outside the keypad.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    /// * `status` - true meaning pressed
    pub(crate) fn set_key_status(&mut self, key: u8, status: bool) -> Result<(), ErrorDetail> {
        if key >= NUMBER_OF_KEYS {
            return Err(ErrorDetail::InvalidKey { key });
        }
        let keys = match status {
            true => self.keys | (1 << key),
            false => self.keys & !(1 << key),
        };
        self.set_keys(keys);
        Ok(())
    }

    /// Marks every currently held key as ineligible, so only a fresh press satisfies a wait.
    pub(crate) fn exclude_held_keys(&mut self) {
        self.release_mask &= !self.keys;
    }

    /// Takes the lowest-numbered key that is both held and eligible, clearing its eligibility.
    pub(crate) fn take_eligible_key(&mut self) -> Option<u8> {
        let eligible: u16 = self.keys & self.release_mask;
        if eligible == 0 {
            return None;
        }
        let key: u8 = eligible.trailing_zeros() as u8;
        self.release_mask &= !(1 << key);
        Some(key)
    }
}
