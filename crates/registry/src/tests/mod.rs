//! Scenario tests for registration, flush ordering, and settlement
//! timing, against an in-memory document host.


mod when_defined;
