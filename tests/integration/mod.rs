//! The voice state machine and registry driven end to end through fake backends.

mod registry;
