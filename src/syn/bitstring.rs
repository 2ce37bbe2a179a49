use crate::model::Tag;
use crate::syn::{ReadableType, Reader, TaggedType, WritableType, Writer};
use std::marker::PhantomData;

pub struct BitString<C: Constraint = NoConstraint>(PhantomData<C>);

impl<C: Constraint> Default for BitString<C> {
    fn default() -> Self {
        Self(Default::default())
    }
}

pub trait Constraint: super::common::Constraint {}

#[derive(Default)]
pub struct NoConstraint;
impl super::common::Constraint for NoConstraint {
    const TAG: Tag = Tag::DEFAULT_BIT_STRING;
}
impl Constraint for NoConstraint {}

impl<C: Constraint> TaggedType for BitString<C> {
    const TAG: Tag = C::TAG;
}

impl<C: Constraint> WritableType for BitString<C> {
    type Type = BitVec;

    #[inline]
    fn write_value<W: Writer>(writer: &mut W, value: &Self::Type) -> Result<(), W::Error> {
        writer.write_bit_string::<C>(value.as_byte_slice(), value.1)
    }
}

impl<C: Constraint> ReadableType for BitString<C> {
    type Type = BitVec;

    #[inline]
    fn read_value<R: Reader>(reader: &mut R) -> Result<Self::Type, <R as Reader>::Error> {
        let (vec, bit_len) = reader.read_bit_string::<C>()?;
        Ok(BitVec(vec, bit_len))
    }
}

/// Bits stored most significant first together with their exact count. Bits beyond the count
/// are always zero.
#[derive(Debug, Default, Clone, PartialOrd, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitVec(Vec<u8>, u64);

impl BitVec {
    /// Takes the first `bit_len` bits of `bytes`, missing octets are filled with zeros
    pub fn from_bytes(mut bytes: Vec<u8>, bit_len: u64) -> Self {
        bytes.resize(Self::octets_for(bit_len), 0x00);
        let mut bits = BitVec(bytes, bit_len);
        bits.clear_padding();
        bits
    }

    pub fn with_len(bits: u64) -> Self {
        BitVec(vec![0x00; Self::octets_for(bits)], bits)
    }

    pub fn with_capacity(bits: u64) -> Self {
        BitVec(Vec::with_capacity(Self::octets_for(bits)), 0)
    }

    pub fn is_bit_set(&self, bit: u64) -> bool {
        let byte = bit / 8;
        let bit = bit % 8;
        let mask = 0x80_u8 >> bit;
        self.0
            .get(byte as usize)
            .map(|b| *b & mask != 0)
            .unwrap_or(false)
    }

    pub fn set_bit(&mut self, bit: u64) {
        self.ensure_vec_large_enough(bit);
        let byte = bit / 8;
        let bit = bit % 8;
        let mask = 0x80_u8 >> bit;
        self.0[byte as usize] |= mask;
    }

    pub fn reset_bit(&mut self, bit: u64) {
        self.ensure_vec_large_enough(bit);
        let byte = bit / 8;
        let bit = bit % 8;
        let mask = 0x80_u8 >> bit;
        self.0[byte as usize] &= !mask;
    }

    fn ensure_vec_large_enough(&mut self, bit: u64) {
        if bit >= self.1 {
            self.1 = bit.saturating_add(1);
            self.0.resize(Self::octets_for(self.1), 0x00);
        }
    }

    fn clear_padding(&mut self) {
        let used = (self.1 % 8) as u32;
        if used != 0 {
            if let Some(last) = self.0.last_mut() {
                *last &= 0xFF_u8 << (8 - used);
            }
        }
    }

    #[inline]
    fn octets_for(bits: u64) -> usize {
        (bits / 8 + u64::from(bits % 8 != 0)) as usize
    }

    pub fn bit_len(&self) -> u64 {
        self.1
    }

    pub fn byte_len(&self) -> usize {
        self.0.len()
    }

    pub fn as_byte_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}
