///ITU-T X.680 | ISO/IEC 8824-1, chapter 8
///
/// # Ordering
/// According to ITU-T X.680 | ISO/IEC 8824-1, 8.6, the canonical order is
/// a) Universal, Application, ContextSpecific and Private and
/// b) within each class, the numbers shall be ordered ascending
///
/// ```rust
/// use asn1ber::model::Tag;
/// let mut tags = vec![
///     Tag::Universal(1),
///     Tag::Application(0),
///     Tag::Private(7),
///     Tag::ContextSpecific(107),
///     Tag::ContextSpecific(32),
///     Tag::Universal(0),
/// ];
/// tags.sort();
/// assert_eq!(tags, vec![
///     Tag::Universal(0),
///     Tag::Universal(1),
///     Tag::Application(0),
///     Tag::ContextSpecific(32),
///     Tag::ContextSpecific(107),
///     Tag::Private(7),
/// ]);
/// ```
#[derive(
    Debug, Clone, Copy, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize,
)]
pub enum Tag {
    Universal(usize),
    Application(usize),
    ContextSpecific(usize),
    Private(usize),
}

impl Tag {
    /// ITU-T X.690 | ISO/IEC 8825-1, 8.1.5
    pub const END_OF_CONTENTS: Tag = Tag::Universal(0);
    pub const DEFAULT_BOOLEAN: Tag = Tag::Universal(1);
    pub const DEFAULT_INTEGER: Tag = Tag::Universal(2);
    pub const DEFAULT_BIT_STRING: Tag = Tag::Universal(3);
    pub const DEFAULT_OCTET_STRING: Tag = Tag::Universal(4);
    pub const DEFAULT_NULL: Tag = Tag::Universal(5);
    pub const DEFAULT_OBJECT_IDENTIFIER: Tag = Tag::Universal(6);
    /// ITU-T Rec. X.680, 48.1
    pub const DEFAULT_OBJECT_DESCRIPTOR: Tag = Tag::Universal(7);
    /// ITU-T Rec. X.680, 37.5
    pub const DEFAULT_EXTERNAL: Tag = Tag::Universal(8);
    pub const DEFAULT_REAL: Tag = Tag::Universal(9);
    pub const DEFAULT_UTF8_STRING: Tag = Tag::Universal(12);
    pub const DEFAULT_SEQUENCE: Tag = Tag::Universal(16);
    pub const DEFAULT_SET: Tag = Tag::Universal(17);

    /// ITU-T Rec. X.680, 41
    pub const DEFAULT_IA5_STRING: Tag = Tag::Universal(22);
    /// ITU-T Rec. X.680, 41
    pub const DEFAULT_GRAPHIC_STRING: Tag = Tag::Universal(25);

    #[inline]
    pub const fn new(class: Class, number: usize) -> Self {
        match class {
            Class::Universal => Tag::Universal(number),
            Class::Application => Tag::Application(number),
            Class::ContextSpecific => Tag::ContextSpecific(number),
            Class::Private => Tag::Private(number),
        }
    }

    #[inline]
    pub const fn class(self) -> Class {
        match self {
            Tag::Universal(_) => Class::Universal,
            Tag::Application(_) => Class::Application,
            Tag::ContextSpecific(_) => Class::ContextSpecific,
            Tag::Private(_) => Class::Private,
        }
    }

    /// The tag number within its class
    #[inline]
    pub const fn value(self) -> usize {
        match self {
            Tag::Universal(value) => value,
            Tag::Application(value) => value,
            Tag::ContextSpecific(value) => value,
            Tag::Private(value) => value,
        }
    }
}

/// ITU-T X.690 | ISO/IEC 8825-1, 8.1.2.2, the two most significant bits of the identifier octet
#[derive(
    Debug, Clone, Copy, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize,
)]
pub enum Class {
    Universal = 0,
    Application = 1,
    ContextSpecific = 2,
    Private = 3,
}

impl Class {
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Class::Universal,
            1 => Class::Application,
            2 => Class::ContextSpecific,
            _ => Class::Private,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}
