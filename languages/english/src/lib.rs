pub mod client;
pub mod reverso;
pub mod wooordhunt;

pub use client::build_client;
pub use reverso::ReversoSource;
pub use wooordhunt::WooordhuntSource;
