//! A hand written message type, the way generated code would use the definition types:
//!
//! ```asn1
//! Measurement ::= SEQUENCE {
//!     id      INTEGER (0..65535),
//!     label   [0] IMPLICIT IA5String OPTIONAL,
//!     reading CHOICE {
//!         flag  [1] IMPLICIT BOOLEAN,
//!         value [2] EXPLICIT REAL
//!     }
//! }
//! ```


use test_utils::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    id: u16,
    label: Option<String>,
    reading: Reading,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Flag(bool),
    Value(f64),
}

type AsnDefMeasurement = Sequence<Measurement>;
type AsnDefMeasurementId = Integer<u16, IdConstraint>;
type AsnDefMeasurementLabel = Option<Ia5String<LabelTag>>;
type AsnDefMeasurementReading = Choice<Reading>;
type AsnDefReadingFlag = Boolean<FlagTag>;
type AsnDefReadingValue = Explicit<ValueTag, Real>;

pub struct IdConstraint;
impl common::Constraint for IdConstraint {
    const TAG: Tag = Tag::DEFAULT_INTEGER;
}
impl numbers::Constraint<u16> for IdConstraint {
    const MIN: Option<i64> = Some(0);
    const MAX: Option<i64> = Some(65_535);
}

pub struct LabelTag;
impl common::Constraint for LabelTag {
    const TAG: Tag = Tag::ContextSpecific(0);
}
impl ia5string::Constraint for LabelTag {}

pub struct FlagTag;
impl common::Constraint for FlagTag {
    const TAG: Tag = Tag::ContextSpecific(1);
}
impl boolean::Constraint for FlagTag {}

pub struct ValueTag;
impl common::Constraint for ValueTag {
    const TAG: Tag = Tag::ContextSpecific(2);
}

impl common::Constraint for Measurement {
    const TAG: Tag = Tag::DEFAULT_SEQUENCE;
}

impl sequence::Constraint for Measurement {
    const NAME: &'static str = "Measurement";

    fn read_seq<R: Reader>(reader: &mut R) -> Result<Self, R::Error>
    where
        Self: Sized,
    {
        Ok(Self {
            id: AsnDefMeasurementId::read_value(reader)?,
            label: AsnDefMeasurementLabel::read_value(reader)?,
            reading: AsnDefMeasurementReading::read_value(reader)?,
        })
    }

    fn write_seq<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        AsnDefMeasurementId::write_value(writer, &self.id)?;
        AsnDefMeasurementLabel::write_value(writer, &self.label)?;
        AsnDefMeasurementReading::write_value(writer, &self.reading)?;
        Ok(())
    }
}

impl Writable for Measurement {
    fn write<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        AsnDefMeasurement::write_value(writer, self)
    }
}

impl Readable for Measurement {
    fn read<R: Reader>(reader: &mut R) -> Result<Self, R::Error> {
        AsnDefMeasurement::read_value(reader)
    }
}

impl choice::Constraint for Reading {
    const NAME: &'static str = "Reading";
    const VARIANT_TAGS: &'static [Tag] = &[Tag::ContextSpecific(1), Tag::ContextSpecific(2)];

    fn to_choice_index(&self) -> u64 {
        match self {
            Reading::Flag(_) => 0,
            Reading::Value(_) => 1,
        }
    }

    fn write_content<W: Writer>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            Reading::Flag(flag) => AsnDefReadingFlag::write_value(writer, flag),
            Reading::Value(value) => AsnDefReadingValue::write_value(writer, value),
        }
    }

    fn read_content<R: Reader>(index: u64, reader: &mut R) -> Result<Option<Self>, R::Error> {
        Ok(Some(match index {
            0 => Reading::Flag(AsnDefReadingFlag::read_value(reader)?),
            1 => Reading::Value(AsnDefReadingValue::read_value(reader)?),
            _ => return Ok(None),
        }))
    }
}

#[test]
fn test_measurement_with_flag() {
    serialize_and_deserialize_ber(
        &[0x30, 0x07, 0x02, 0x02, 0x00, 0xC8, 0x81, 0x01, 0xFF],
        &Measurement {
            id: 200,
            label: None,
            reading: Reading::Flag(true),
        },
    );
}

#[test]
fn test_measurement_with_label_and_value() {
    serialize_and_deserialize_ber(
        &[
            0x30, 0x0E, // SEQUENCE
            0x02, 0x01, 0x07, // id
            0x80, 0x02, b'o', b'k', // label
            0xA2, 0x05, 0x09, 0x03, 0x80, 0x01, 0x01, // [2] EXPLICIT REAL 2.0
        ],
        &Measurement {
            id: 7,
            label: Some("ok".to_string()),
            reading: Reading::Value(2.0),
        },
    );
}

#[test]
fn test_measurement_indefinite_length() {
    let data = [
        0x30, 0x80, // SEQUENCE
        0x02, 0x01, 0x07, // id
        0xA2, 0x80, 0x09, 0x00, 0x00, 0x00, // [2] EXPLICIT REAL 0.0
        0x00, 0x00,
    ];
    assert_eq!(
        Measurement {
            id: 7,
            label: None,
            reading: Reading::Value(0.0),
        },
        deserialize_ber::<Measurement>(&data)
    );
}

#[test]
fn test_measurement_id_out_of_range() {
    let data = [0x30, 0x06, 0x02, 0x01, 0xFF, 0x81, 0x01, 0x00];
    let mut reader = BerReader::new(&data[..]);
    assert!(matches!(
        reader.read::<Measurement>().unwrap_err().kind(),
        ErrorKind::RangeViolation(_)
    ));
}

#[test]
fn test_measurement_unknown_reading() {
    let data = [0x30, 0x05, 0x02, 0x01, 0x07, 0x83, 0x00];
    let mut reader = BerReader::new(&data[..]);
    assert_eq!(
        &ErrorKind::UnexpectedChoiceTag {
            name: "Reading",
            got: Some(Tag::ContextSpecific(3)),
        },
        reader.read::<Measurement>().unwrap_err().kind()
    );
}

#[test]
fn test_measurement_primitive_sequence() {
    let data = [0x10, 0x00];
    let mut reader = BerReader::new(&data[..]);
    assert!(is_framing_violation(
        &reader.read::<Measurement>().unwrap_err()
    ));
}

#[test]
fn test_measurement_failed_write_leaves_writer_unchanged() {
    let mut writer = BerWriter::default();
    writer
        .write(&Measurement {
            id: 200,
            label: None,
            reading: Reading::Flag(true),
        })
        .unwrap();
    let before = writer.byte_content().to_vec();

    let error = writer
        .write(&Measurement {
            id: 7,
            label: Some("caf\u{e9}".to_string()),
            reading: Reading::Flag(false),
        })
        .unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::InvalidString(..)));
    assert_eq!(&before[..], writer.byte_content());

    // fails three levels deep, inside the explicit tag of the choice
    let error = writer
        .write(&Measurement {
            id: 7,
            label: Some("ok".to_string()),
            reading: Reading::Value(f64::from_bits(1)),
        })
        .unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::RangeViolation(_)));
    assert_eq!(&before[..], writer.byte_content());
}
