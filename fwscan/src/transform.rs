//! The transform interface: the user-supplied de-obfuscation/decryption
//! function, described here solely by its interface. Actually cracking or
//! reversing an unknown cipher is out of scope for this tool — the user is
//! assumed to already hold the key or know the obfuscation algorithm — so
//! this module only defines the contract and a couple of trivial reference
//! implementations used by the test suite and as a sane default when no
//! real transform is configured.

/// Three-phase lifecycle: `init` once with the chosen blocksize, `apply`
/// once per starting offset on the scratch window in place, `teardown`
/// once at shutdown.
///
/// Implementations must be deterministic with respect to input bytes and
/// position-independent: the same bytes transform the same way regardless
/// of which starting offset produced them.
pub trait Transform {
    fn init(&mut self, blocksize: usize);
    fn apply(&mut self, block: &mut [u8]);
    fn teardown(&mut self);
}

/// The no-op transform: useful for unobfuscated images and for exercising
/// the scanner/engine/reporter wiring in tests without a real cipher.
#[derive(Default)]
pub struct IdentityTransform;

impl Transform for IdentityTransform {
    fn init(&mut self, _blocksize: usize) {}
    fn apply(&mut self, _block: &mut [u8]) {}
    fn teardown(&mut self) {}
}

/// XORs every byte with a fixed key byte. Deliberately trivial — real
/// obfuscation schemes belong in a caller-supplied `Transform`, not here —
/// but it is enough to exercise a scan against an obfuscated image in
/// tests without requiring a prebuilt encrypted fixture.
pub struct XorByteTransform {
    key: u8,
}

impl XorByteTransform {
    pub fn new(key: u8) -> XorByteTransform {
        XorByteTransform { key }
    }
}

impl Transform for XorByteTransform {
    fn init(&mut self, _blocksize: usize) {}

    fn apply(&mut self, block: &mut [u8]) {
        for b in block.iter_mut() {
            *b ^= self.key;
        }
    }

    fn teardown(&mut self) {}
}
