//! The elapsed-time source used to bound blocking operations.

/// A monotonic millisecond counter.
///
/// Only differences between two readings are used, computed with wrapping
/// arithmetic, so the counter may start at any value and roll over.
///
/// Any closure returning `u32` milliseconds implements this trait:
/// ```ignore
/// let radio = RF24::new(ce_pin, csn_pin, spi, delay, || timer.millis());
/// ```
pub trait Monotonic {
    /// The current time in milliseconds.
    fn now_ms(&mut self) -> u32;
}

impl<F> Monotonic for F
where
    F: FnMut() -> u32,
{
    fn now_ms(&mut self) -> u32 {
        self()
    }
}

/// A [`Monotonic`] clock backed by [`std::time::Instant`].
#[cfg(feature = "std")]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl StdClock {
    /// Start counting from zero at the current instant.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Monotonic for StdClock {
    fn now_ms(&mut self) -> u32 {
        // truncation is the intended roll-over
        self.origin.elapsed().as_millis() as u32
    }
}
