/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// The interpreter only ever asks whether a logical key `0x0..=0xF` is currently
/// held; mapping physical input onto those keys is left to the host.
pub trait Keypad {
    fn is_key_held(&self, key: u8) -> bool;

    /// The lowest numbered key currently held, if any.
    fn first_held(&self) -> Option<u8> {
        (0x0..=0xF).find(|&key| self.is_key_held(key))
    }
}

/// Pressed status of each key, updated from the host's event loop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keys {
    held: [bool; 16],
}

impl Keys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key
    pub fn press(&mut self, key: u8) {
        if let Some(held) = self.held.get_mut(key as usize) {
            *held = true;
        }
    }

    /// Unset the pressed status of key
    pub fn release(&mut self, key: u8) {
        if let Some(held) = self.held.get_mut(key as usize) {
            *held = false;
        }
    }

    pub fn reset(&mut self) {
        self.held = [false; 16];
    }
}

impl Keypad for Keys {
    fn is_key_held(&self, key: u8) -> bool {
        // Vx can hold any byte, only the low 16 values name a key
        self.held.get(key as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = Keys::new();
        keys.press(0xE);
        assert!(keys.is_key_held(0xE));
        keys.release(0xE);
        assert!(!keys.is_key_held(0xE));
    }

    #[test]
    fn test_out_of_range_keys_are_never_held() {
        let mut keys = Keys::new();
        keys.press(0x10);
        assert!(!keys.is_key_held(0x10));
        assert_eq!(keys, Keys::new());
    }

    #[test]
    fn test_first_held() {
        let mut keys = Keys::new();
        assert_eq!(keys.first_held(), None);
        keys.press(0xB);
        keys.press(0x3);
        assert_eq!(keys.first_held(), Some(0x3));
        keys.reset();
        assert_eq!(keys.first_held(), None);
    }
}
