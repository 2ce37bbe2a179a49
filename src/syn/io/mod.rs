mod ber;

pub use ber::BerReader;
pub use ber::BerWriter;
