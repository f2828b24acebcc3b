//! Adapters that call real services over the network.

pub mod gemini;
