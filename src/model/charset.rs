use crate::model::Tag;

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charset {
    Utf8,
    /// Encoding as in ISO/IEC 646
    Ia5,
    /// ITU-T X.680 | ISO/IEC 8824-1, 43.3
    ///
    /// Escape sequences into other graphic sets are not supported, only the
    /// printable characters of the default G0 set (including space) are accepted.
    Graphic,
}

impl Charset {
    /// Sorted according to ITU-T X.680, 43.8
    /// ```rust
    /// use asn1ber::model::Charset;
    /// assert!(Charset::IA5_STRING_CHARACTERS.chars().all(|c| Charset::Ia5.is_valid(c)));
    /// assert!(Charset::IA5_STRING_CHARACTERS.chars().all(|c| Charset::Utf8.is_valid(c)));
    /// assert_eq!(128, Charset::IA5_STRING_CHARACTERS.chars().count());
    /// ```
    pub const IA5_STRING_CHARACTERS: &'static str =
        "\u{00}\u{01}\u{02}\u{03}\u{04}\u{05}\u{06}\u{07}\u{08}\u{09}\u{0A}\u{0B}\u{0C}\u{0D}\u{0E}\u{0F}\u{10}\u{11}\u{12}\u{13}\u{14}\u{15}\u{16}\u{17}\u{18}\u{19}\u{1A}\u{1B}\u{1C}\u{1D}\u{1E}\u{1F} !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~\u{7F}";

    /// ```rust
    /// use asn1ber::model::Charset;
    /// assert!(Charset::GRAPHIC_STRING_CHARACTERS.chars().all(|c| Charset::Graphic.is_valid(c)));
    /// assert!(Charset::GRAPHIC_STRING_CHARACTERS.chars().all(|c| Charset::Ia5.is_valid(c)));
    /// assert_eq!(95, Charset::GRAPHIC_STRING_CHARACTERS.chars().count());
    /// ```
    pub const GRAPHIC_STRING_CHARACTERS: &'static str =
        " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

    pub fn default_tag(self) -> Tag {
        match self {
            Charset::Utf8 => Tag::DEFAULT_UTF8_STRING,
            Charset::Ia5 => Tag::DEFAULT_IA5_STRING,
            Charset::Graphic => Tag::DEFAULT_GRAPHIC_STRING,
        }
    }

    pub fn find_invalid(self, str: &str) -> Option<(usize, char)> {
        str.chars()
            .enumerate()
            .find(|(_index, char)| !self.is_valid(*char))
    }

    pub const fn is_valid(self, char: char) -> bool {
        match self {
            Charset::Utf8 => true,
            Charset::Ia5 => matches!(char as u32, 0_u32..=127),
            Charset::Graphic => matches!(char as u32, 32_u32..=126),
        }
    }
}
