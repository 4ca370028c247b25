/// Frame sink contract and the built-in sinks.
pub mod sink;
