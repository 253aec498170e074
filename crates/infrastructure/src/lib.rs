pub mod dns;

pub use dns::relay::DohRelay;
