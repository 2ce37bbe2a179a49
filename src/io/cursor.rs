use crate::io::ber::{BasicRead, Length};
use crate::io::err::{Error, ErrorKind};

/// A bounded, read-only view into a shared byte buffer.
///
/// The view is described by its own `offset`, `len` and `position`, so child views created by
/// [`OctetCursor::sub_view`] or [`OctetCursor::sub_view_indefinite`] never copy the underlying
/// bytes and never alias the position of their parent.
#[derive(Debug, Clone, Copy)]
pub struct OctetCursor<'a> {
    buffer: &'a [u8],
    offset: usize,
    len: usize,
    position: usize,
}

impl<'a> OctetCursor<'a> {
    #[inline]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            len: buffer.len(),
            position: 0,
        }
    }

    /// The current position, relative to the start of this view
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The current position, relative to the start of the shared buffer
    #[inline]
    pub const fn absolute_position(&self) -> usize {
        self.offset + self.position
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.len - self.position
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread bytes of this view
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.buffer[self.offset + self.position..self.offset + self.len]
    }

    pub fn set_position(&mut self, position: usize) -> Result<(), Error> {
        if position > self.len {
            return Err(Error::truncated());
        }
        self.position = position;
        Ok(())
    }

    pub fn advance(&mut self, len: usize) -> Result<(), Error> {
        if len > self.remaining() {
            return Err(Error::truncated());
        }
        self.position += len;
        Ok(())
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.as_slice().first().copied()
    }

    pub fn read(&mut self) -> Result<u8, Error> {
        let octet = self.peek().ok_or_else(Error::truncated)?;
        self.position += 1;
        Ok(octet)
    }

    /// Copies as many bytes as available - but at most `dst.len()` - into `dst` and returns the
    /// number of bytes copied. Reaching the end of the view is not an error here, the caller has
    /// to compare the returned count with the requested one.
    pub fn read_into(&mut self, dst: &mut [u8]) -> usize {
        let count = dst.len().min(self.remaining());
        dst[..count].copy_from_slice(&self.as_slice()[..count]);
        self.position += count;
        count
    }

    pub fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        if dst.len() > self.remaining() {
            return Err(Error::truncated());
        }
        self.read_into(dst);
        Ok(())
    }

    /// Borrows the next `len` bytes from the shared buffer without copying them
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if len > self.remaining() {
            return Err(Error::truncated());
        }
        let slice = &self.as_slice()[..len];
        self.position += len;
        Ok(slice)
    }

    /// Creates a view over the next `len` bytes and moves this view past them
    pub fn sub_view(&mut self, len: usize) -> Result<OctetCursor<'a>, Error> {
        if len > self.remaining() {
            return Err(Error::truncated());
        }
        let child = OctetCursor {
            buffer: self.buffer,
            offset: self.absolute_position(),
            len,
            position: 0,
        };
        self.position += len;
        trace!(
            "sub view of {} byte(s) at offset {}",
            child.len,
            child.offset
        );
        Ok(child)
    }

    /// Creates a view over the content of an indefinite length element. The current position
    /// must be at the first byte of the content. Nested elements are skipped until the
    /// End-of-Contents octets of this level are found, nested indefinite length elements are
    /// tracked by their depth instead of recursion. The returned view does not include the
    /// End-of-Contents octets, but this view is moved past them.
    pub fn sub_view_indefinite(&mut self) -> Result<OctetCursor<'a>, Error> {
        let start = self.position;
        let mut scan = *self;
        let mut depth = 0_usize;
        loop {
            if scan.remaining() < 2 {
                return Err(Error::unterminated_indefinite());
            }
            let content_end = scan.position;
            if scan.try_read_end_of_contents()? {
                if depth > 0 {
                    depth -= 1;
                    continue;
                }
                debug!(
                    "indefinite length content of {} byte(s) at offset {}",
                    content_end - start,
                    self.offset + start
                );
                let child = OctetCursor {
                    buffer: self.buffer,
                    offset: self.offset + start,
                    len: content_end - start,
                    position: 0,
                };
                self.position = scan.position;
                return Ok(child);
            }
            match scan.read_element_header().map_err(|e| match e.kind() {
                ErrorKind::Truncated => Error::unterminated_indefinite(),
                _ => e,
            })? {
                Length::Definite(len) => scan
                    .advance(len)
                    .map_err(|_| Error::unterminated_indefinite())?,
                Length::Indefinite => depth += 1,
            }
        }
    }

    /// Creates the view over the content of an element according to its length octets
    #[inline]
    pub fn sub_view_for(&mut self, length: Length) -> Result<OctetCursor<'a>, Error> {
        match length {
            Length::Definite(len) => self.sub_view(len),
            Length::Indefinite => self.sub_view_indefinite(),
        }
    }

    /// Skips one complete element (identifier, length and content)
    pub fn skip_value(&mut self) -> Result<(), Error> {
        match self.read_element_header()? {
            Length::Definite(len) => self.advance(len),
            Length::Indefinite => self.sub_view_indefinite().map(drop),
        }
    }

    /// Reads the identifier and length octets of any element. The indefinite length is only
    /// accepted for a constructed encoding.
    fn read_element_header(&mut self) -> Result<Length, Error> {
        let identifier = self.read_identifier()?;
        let length = self.read_length()?;
        if Length::Indefinite == length && !identifier.is_constructed() {
            return Err(Error::framing_violation(
                "primitive encoding",
                "the indefinite length form is only allowed for constructed encodings",
            ));
        }
        Ok(length)
    }

    /// Borrows the complete encoding (identifier, length and content) of the next element
    pub fn read_raw_value(&mut self) -> Result<&'a [u8], Error> {
        let mut scan = *self;
        scan.skip_value()?;
        self.read_slice(scan.position - self.position)
    }

    /// Consumes the End-of-Contents octets if they are next. An identifier octet of zero that is
    /// followed by anything but a zero length octet is illegal.
    pub fn try_read_end_of_contents(&mut self) -> Result<bool, Error> {
        match self.as_slice() {
            [0x00, 0x00, ..] => {
                self.position += 2;
                Ok(true)
            }
            [0x00, _, ..] => Err(Error::framing_violation(
                "End-of-Contents",
                "length octet must be zero",
            )),
            _ => Ok(false),
        }
    }
}

impl<'a> From<&'a [u8]> for OctetCursor<'a> {
    #[inline]
    fn from(buffer: &'a [u8]) -> Self {
        Self::new(buffer)
    }
}
