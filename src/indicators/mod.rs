// =============================================================================
// Technical Indicator Kernels
// =============================================================================
//
// Pure, side-effect-free column computations over close prices. Every kernel
// returns a column aligned to its input: one entry per close, with `None`
// marking the defined absence state where a window lacks history. Callers
// must treat `None` distinctly from any computed value.
//
// Inputs come from a validated `Series`, so closes are finite; the kernels
// rely on that rather than re-checking per element.

pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod sma;
