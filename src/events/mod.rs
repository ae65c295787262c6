//! Wire schemas for messages published to the bus.
//!
//! Each schema version lives in its own module and is never changed in a
//! backward-incompatible way; a breaking change gets a new `vN` module and a new
//! topic. The `.proto` sources for consumers in other languages are under
//! `proto/events/`.

pub mod v1;

pub use v1::REDIRECT_SUCCESS_TOPIC;
