//! Probes pinning down the Candle conv semantics the workspace relies on.

#[cfg(test)]
mod candle_probe;
