use crate::io::err::Error;
use byteorder::{ByteOrder, NetworkEndian};

const LENGTH_SHORT_MAX_VALUE: usize = 127;
const LENGTH_BIT_LONG_FORM: u8 = 0b1_0000000;
const LENGTH_INDEFINITE: u8 = 0b1_0000000;
const LENGTH_MAX_OCTETS: usize = 4;

/// Marks the placeholder of a length octet that still needs to be written. Created by
/// [`OctetBuffer::reserve_length`] and consumed by [`OctetBuffer::finalize_length`].
#[derive(Debug)]
#[must_use = "the reserved length octet must be finalized"]
pub struct LengthSlot(usize);

/// Marks an indefinite length element whose End-of-Contents octets still need to be written
#[derive(Debug)]
#[must_use = "the indefinite length element must be finalized"]
pub struct IndefiniteSlot(());

#[derive(Default, Debug)]
pub struct OctetBuffer {
    pub(crate) buffer: Vec<u8>,
}

impl OctetBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn content(&self) -> &[u8] {
        &self.buffer
    }

    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    #[inline]
    pub fn write_octet(&mut self, octet: u8) {
        self.buffer.push(octet);
    }

    #[inline]
    pub fn write_octets(&mut self, octets: &[u8]) {
        self.buffer.extend_from_slice(octets);
    }

    /// Removes everything written after the first `len` octets. Used to undo an element whose
    /// content failed to encode.
    pub fn truncate(&mut self, len: usize) {
        if len < self.buffer.len() {
            debug!("discarding {} byte(s) of a failed encode", self.buffer.len() - len);
            self.buffer.truncate(len);
        }
    }

    /// Appends a single placeholder octet for the length of the content that is about to be
    /// written.
    #[inline]
    pub fn reserve_length(&mut self) -> LengthSlot {
        let slot = LengthSlot(self.buffer.len());
        self.buffer.push(0x00);
        slot
    }

    /// Replaces the placeholder with the length of everything written since the slot was
    /// reserved. If the long form is required, the content is moved to the right to make room
    /// for the additional length octets.
    pub fn finalize_length(&mut self, slot: LengthSlot) -> Result<(), Error> {
        let LengthSlot(marker) = slot;
        let content_len = self.buffer.len() - marker - 1;

        if content_len <= LENGTH_SHORT_MAX_VALUE {
            self.buffer[marker] = content_len as u8;
            return Ok(());
        }

        if content_len > u32::MAX as usize {
            return Err(Error::range_violation(format!(
                "content length {} exceeds the supported {} length octets",
                content_len, LENGTH_MAX_OCTETS
            )));
        }

        let len_octets = minimal_octet_count(content_len as u64);
        let content_start = marker + 1;
        let content_end = self.buffer.len();

        debug!(
            "moving {} byte(s) of content by {} for a long form length",
            content_len, len_octets
        );
        self.buffer
            .extend(core::iter::repeat(0u8).take(len_octets));
        self.buffer
            .copy_within(content_start..content_end, content_start + len_octets);

        self.buffer[marker] = LENGTH_BIT_LONG_FORM | len_octets as u8;
        NetworkEndian::write_uint(
            &mut self.buffer[content_start..content_start + len_octets],
            content_len as u64,
            len_octets,
        );
        Ok(())
    }

    /// Writes the length octet of the indefinite form
    #[inline]
    pub fn reserve_indefinite(&mut self) -> IndefiniteSlot {
        self.buffer.push(LENGTH_INDEFINITE);
        IndefiniteSlot(())
    }

    /// Writes the End-of-Contents octets
    #[inline]
    pub fn finalize_indefinite(&mut self, _slot: IndefiniteSlot) {
        self.buffer.extend_from_slice(&[0x00, 0x00]);
    }
}

/// The number of octets required to represent the given value unsigned and big-endian, at
/// least one
#[inline]
pub(crate) fn minimal_octet_count(value: u64) -> usize {
    let leading_zero_bytes = (value.leading_zeros() / u8::BITS) as usize;
    (std::mem::size_of::<u64>() - leading_zero_bytes).max(1)
}

impl From<OctetBuffer> for Vec<u8> {
    fn from(buffer: OctetBuffer) -> Self {
        buffer.buffer
    }
}

impl From<Vec<u8>> for OctetBuffer {
    fn from(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }
}
