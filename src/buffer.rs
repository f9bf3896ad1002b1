/// One bounded capture slot: tag name, attribute name, attribute value, or
/// inner text. Storage is borrowed from the caller for as long as it stays
/// bound; an unbound slot still tracks lengths but never writes.
///
/// `len` is the number of bytes actually written (capped by the storage
/// capacity), `real_len` the number of bytes the current region produced.
/// They diverge exactly when the region outgrew the storage.
pub(crate) struct Capture<'a> {
    storage: Option<&'a mut [u8]>,
    len: usize,
    real_len: usize,
    lowercase: bool,
}

impl<'a> Capture<'a> {
    pub fn new() -> Self {
        Self {
            storage: None,
            len: 0,
            real_len: 0,
            lowercase: false,
        }
    }

    pub fn bind(&mut self, storage: &'a mut [u8]) {
        // Invariant: len never exceeds the bound capacity, even when the
        // caller rebinds a smaller region mid-run.
        self.len = self.len.min(storage.len());
        self.storage = Some(storage);
    }

    pub fn release(&mut self) {
        self.storage = None;
        self.len = 0;
    }

    pub fn set_lowercase(&mut self, lowercase: bool) {
        self.lowercase = lowercase;
    }

    /// Starts a new region: both lengths restart from zero. Bytes beyond the
    /// new length are left as-is.
    pub fn begin(&mut self) {
        self.len = 0;
        self.real_len = 0;
    }

    pub fn push(&mut self, byte: u8) {
        let byte = if self.lowercase {
            byte.to_ascii_lowercase()
        } else {
            byte
        };
        if let Some(storage) = self.storage.as_deref_mut() {
            if self.len < storage.len() {
                storage[self.len] = byte;
                self.len += 1;
            }
        }
        self.real_len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn real_len(&self) -> usize {
        self.real_len
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.storage {
            Some(storage) => &storage[..self.len],
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_only_counts() {
        let mut capture = Capture::new();
        capture.begin();
        capture.push(b'a');
        capture.push(b'b');
        assert_eq!(capture.len(), 0);
        assert_eq!(capture.real_len(), 2);
        assert_eq!(capture.bytes(), b"");
    }

    #[test]
    fn truncates_at_capacity() {
        let mut storage = [0u8; 2];
        let mut capture = Capture::new();
        capture.bind(&mut storage);
        capture.begin();
        for &byte in b"article" {
            capture.push(byte);
        }
        assert_eq!(capture.len(), 2);
        assert_eq!(capture.real_len(), 7);
        assert_eq!(capture.bytes(), b"ar");
    }

    #[test]
    fn begin_restarts_lengths() {
        let mut storage = [0u8; 8];
        let mut capture = Capture::new();
        capture.bind(&mut storage);
        capture.begin();
        capture.push(b'x');
        capture.begin();
        capture.push(b'y');
        assert_eq!(capture.len(), 1);
        assert_eq!(capture.real_len(), 1);
        assert_eq!(capture.bytes(), b"y");
    }

    #[test]
    fn lowercase_applies_from_toggle() {
        let mut storage = [0u8; 8];
        let mut capture = Capture::new();
        capture.bind(&mut storage);
        capture.begin();
        capture.set_lowercase(true);
        capture.push(b'D');
        capture.push(b'I');
        capture.set_lowercase(false);
        capture.push(b'V');
        assert_eq!(capture.bytes(), b"diV");
    }

    #[test]
    fn rebinding_smaller_clamps_len() {
        let mut big = [0u8; 8];
        let mut small = [0u8; 2];
        let mut capture = Capture::new();
        capture.bind(&mut big);
        capture.begin();
        for &byte in b"nav" {
            capture.push(byte);
        }
        capture.bind(&mut small);
        assert_eq!(capture.len(), 2);
        assert!(capture.bytes().len() <= 2);
    }

    #[test]
    fn release_zeroes_len() {
        let mut storage = [0u8; 8];
        let mut capture = Capture::new();
        capture.bind(&mut storage);
        capture.begin();
        capture.push(b'a');
        capture.release();
        assert_eq!(capture.len(), 0);
        assert_eq!(capture.bytes(), b"");
    }
}
