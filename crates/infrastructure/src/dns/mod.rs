pub mod relay;
pub mod transport;
pub mod wire;
