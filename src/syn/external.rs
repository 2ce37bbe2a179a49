//! The EXTERNAL type of ITU-T X.680 (1990), 34 and its encoding according to ITU-T X.690 |
//! ISO/IEC 8825-1, 8.18:
//!
//! ```asn1
//! EXTERNAL ::= [UNIVERSAL 8] IMPLICIT SEQUENCE {
//!     direct-reference      OBJECT IDENTIFIER OPTIONAL,
//!     indirect-reference    INTEGER OPTIONAL,
//!     data-value-descriptor ObjectDescriptor OPTIONAL,
//!     encoding              CHOICE {
//!         single-ASN1-type  [0] ANY,
//!         octet-aligned     [1] IMPLICIT OCTET STRING,
//!         arbitrary         [2] IMPLICIT BIT STRING
//!     }
//! }
//! ```

use crate::model::Tag;
use crate::syn::graphicstring::ObjectDescriptor;
use crate::syn::*;

type AsnDefExternal = Sequence<External>;
type AsnDefDirectReference = Option<ObjectIdentifierT>;
type AsnDefIndirectReference = Option<Integer<i64>>;
type AsnDefDataValueDescriptor = Option<GraphicString<ObjectDescriptor>>;
type AsnDefEncoding = Choice<ExternalEncoding>;

type AsnDefSingleAsn1Type = Explicit<SingleAsn1TypeTag, Any>;
type AsnDefOctetAligned = OctetString<OctetAlignedTag>;
type AsnDefArbitrary = BitString<ArbitraryTag>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct External {
    pub direct_reference: Option<ObjectIdentifier>,
    pub indirect_reference: Option<i64>,
    pub data_value_descriptor: Option<String>,
    pub encoding: ExternalEncoding,
}

impl External {
    pub fn new(encoding: ExternalEncoding) -> Self {
        Self {
            direct_reference: None,
            indirect_reference: None,
            data_value_descriptor: None,
            encoding,
        }
    }

    pub fn with_direct_reference(mut self, reference: impl Into<ObjectIdentifier>) -> Self {
        self.direct_reference = Some(reference.into());
        self
    }

    pub fn with_indirect_reference(mut self, reference: i64) -> Self {
        self.indirect_reference = Some(reference);
        self
    }

    pub fn with_data_value_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.data_value_descriptor = Some(descriptor.into());
        self
    }

    /// Replaces the encoding with the complete encoding of a single ASN.1 value
    pub fn set_single_asn1_type(&mut self, encoded: Vec<u8>) {
        self.encoding = ExternalEncoding::SingleAsn1Type(encoded);
    }

    /// Replaces the encoding with octet aligned data
    pub fn set_octet_aligned(&mut self, octets: Vec<u8>) {
        self.encoding = ExternalEncoding::OctetAligned(octets);
    }

    /// Replaces the encoding with arbitrary bits
    pub fn set_arbitrary(&mut self, bits: BitVec) {
        self.encoding = ExternalEncoding::Arbitrary(bits);
    }
}

impl common::Constraint for External {
    const TAG: Tag = Tag::DEFAULT_EXTERNAL;
}

impl sequence::Constraint for External {
    const NAME: &'static str = "EXTERNAL";

    fn read_seq<R: Reader>(reader: &mut R) -> Result<Self, R::Error>
    where
        Self: Sized,
    {
        Ok(Self {
            direct_reference: AsnDefDirectReference::read_value(reader)?,
            indirect_reference: AsnDefIndirectReference::read_value(reader)?,
            data_value_descriptor: AsnDefDataValueDescriptor::read_value(reader)?,
            encoding: AsnDefEncoding::read_value(reader)?,
        })
    }

    fn write_seq<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        AsnDefDirectReference::write_value(writer, &self.direct_reference)?;
        AsnDefIndirectReference::write_value(writer, &self.indirect_reference)?;
        AsnDefDataValueDescriptor::write_value(writer, &self.data_value_descriptor)?;
        AsnDefEncoding::write_value(writer, &self.encoding)?;
        Ok(())
    }
}

impl Writable for External {
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        AsnDefExternal::write_value(writer, self)
    }
}

impl Readable for External {
    fn read<R: Reader>(reader: &mut R) -> Result<Self, R::Error> {
        AsnDefExternal::read_value(reader)
    }
}

/// The alternatives of the `encoding` of an [`External`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExternalEncoding {
    /// The complete encoding of a single value, explicitly tagged with `[0]`
    SingleAsn1Type(Vec<u8>),
    OctetAligned(Vec<u8>),
    Arbitrary(BitVec),
}

pub struct SingleAsn1TypeTag;
impl common::Constraint for SingleAsn1TypeTag {
    const TAG: Tag = Tag::ContextSpecific(0);
}

pub struct OctetAlignedTag;
impl common::Constraint for OctetAlignedTag {
    const TAG: Tag = Tag::ContextSpecific(1);
}
impl octetstring::Constraint for OctetAlignedTag {}

pub struct ArbitraryTag;
impl common::Constraint for ArbitraryTag {
    const TAG: Tag = Tag::ContextSpecific(2);
}
impl bitstring::Constraint for ArbitraryTag {}

impl choice::Constraint for ExternalEncoding {
    const NAME: &'static str = "EXTERNAL.encoding";
    const VARIANT_TAGS: &'static [Tag] = &[
        <SingleAsn1TypeTag as common::Constraint>::TAG,
        <OctetAlignedTag as common::Constraint>::TAG,
        <ArbitraryTag as common::Constraint>::TAG,
    ];

    fn to_choice_index(&self) -> u64 {
        match self {
            ExternalEncoding::SingleAsn1Type(_) => 0,
            ExternalEncoding::OctetAligned(_) => 1,
            ExternalEncoding::Arbitrary(_) => 2,
        }
    }

    fn write_content<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            ExternalEncoding::SingleAsn1Type(encoded) => {
                AsnDefSingleAsn1Type::write_value(writer, encoded)
            }
            ExternalEncoding::OctetAligned(octets) => {
                AsnDefOctetAligned::write_value(writer, octets)
            }
            ExternalEncoding::Arbitrary(bits) => AsnDefArbitrary::write_value(writer, bits),
        }
    }

    fn read_content<R: Reader>(index: u64, reader: &mut R) -> Result<Option<Self>, R::Error> {
        Ok(Some(match index {
            0 => ExternalEncoding::SingleAsn1Type(AsnDefSingleAsn1Type::read_value(reader)?),
            1 => ExternalEncoding::OctetAligned(AsnDefOctetAligned::read_value(reader)?),
            2 => ExternalEncoding::Arbitrary(AsnDefArbitrary::read_value(reader)?),
            _ => return Ok(None),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::err::ErrorKind;
    use crate::syn::io::{BerReader, BerWriter};

    fn serialize(external: &External) -> Vec<u8> {
        let mut writer = BerWriter::default();
        writer.write(external).unwrap();
        writer.into_bytes_vec()
    }

    fn deserialize(bytes: &[u8]) -> Result<External, crate::io::err::Error> {
        let mut reader = BerReader::new(bytes);
        reader.read::<External>()
    }

    #[test]
    fn test_octet_aligned_with_references() {
        let external = External::new(ExternalEncoding::OctetAligned(vec![0xCA, 0xFE]))
            .with_direct_reference(vec![2, 1, 1])
            .with_indirect_reference(3);
        let bytes = serialize(&external);
        assert_eq!(
            &[
                0x28, 0x0B, // EXTERNAL
                0x06, 0x02, 0x51, 0x01, // 2.1.1
                0x02, 0x01, 0x03, // 3
                0x81, 0x02, 0xCA, 0xFE, // [1] IMPLICIT OCTET STRING
            ][..],
            &bytes[..]
        );
        assert_eq!(external, deserialize(&bytes).unwrap());
    }

    #[test]
    fn test_single_asn1_type_is_explicit() {
        let mut external = External::new(ExternalEncoding::OctetAligned(Vec::new()))
            .with_data_value_descriptor("greeting");
        external.set_single_asn1_type(vec![0x0C, 0x02, b'h', b'i']);
        let bytes = serialize(&external);
        assert_eq!(&[0xA0, 0x04, 0x0C, 0x02, b'h', b'i'], &bytes[bytes.len() - 6..]);
        assert_eq!(&[0x07, 0x08], &bytes[2..4]);
        assert_eq!(external, deserialize(&bytes).unwrap());
    }

    #[test]
    fn test_arbitrary_keeps_bit_length() {
        let mut external = External::new(ExternalEncoding::OctetAligned(Vec::new()));
        external.set_arbitrary(BitVec::from_bytes(vec![0xAB, 0xC0], 10));
        let bytes = serialize(&external);
        assert_eq!(&[0x28, 0x05, 0x82, 0x03, 0x06, 0xAB, 0xC0], &bytes[..]);
        assert_eq!(external, deserialize(&bytes).unwrap());
    }

    #[test]
    fn test_missing_and_unknown_alternative() {
        assert!(matches!(
            deserialize(&[0x28, 0x03, 0x02, 0x01, 0x03]).unwrap_err().kind(),
            ErrorKind::UnexpectedChoiceTag { got: None, .. }
        ));
        assert!(matches!(
            deserialize(&[0x28, 0x02, 0x83, 0x00]).unwrap_err().kind(),
            ErrorKind::UnexpectedChoiceTag {
                got: Some(Tag::ContextSpecific(3)),
                ..
            }
        ));
    }

    #[test]
    fn test_choice_must_be_last() {
        assert!(matches!(
            deserialize(&[0x28, 0x04, 0x81, 0x00, 0x05, 0x00]).unwrap_err().kind(),
            ErrorKind::TrailingData(2)
        ));
    }

    #[test]
    fn test_indefinite_length_external() {
        let bytes = [0x28, 0x80, 0x81, 0x01, 0x2A, 0x00, 0x00];
        let external = deserialize(&bytes).unwrap();
        assert_eq!(ExternalEncoding::OctetAligned(vec![0x2A]), external.encoding);
    }
}
