use crate::core::Sample;
use crate::error::{PlotError, PlotResult};

/// Bounded, append-only ring buffer of samples for one channel.
///
/// Once `capacity` samples are stored, each append overwrites the oldest
/// sample at the ring cursor. Iteration and column extraction always run in
/// append order (oldest first), regardless of where the cursor sits.
///
/// Samples are typically time-ordered in x but the buffer does not require
/// it; callers may plot non-time x axes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollingBuffer {
    samples: Vec<Sample>,
    capacity: usize,
    cursor: usize,
}

impl ScrollingBuffer {
    /// Creates an empty buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> PlotResult<Self> {
        if capacity == 0 {
            return Err(PlotError::InvalidData(
                "scrolling buffer capacity must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            samples: Vec::new(),
            capacity,
            cursor: 0,
        })
    }

    /// Appends one sample, evicting the oldest when the buffer is full.
    ///
    /// O(1) amortized; the only removal paths are this eviction and
    /// [`ScrollingBuffer::clear`].
    pub fn append(&mut self, sample: Sample) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
            self.cursor = self.samples.len() % self.capacity;
        } else {
            self.samples[self.cursor] = sample;
            self.cursor = (self.cursor + 1) % self.capacity;
        }
    }

    /// Appends a chunk of samples in order.
    pub fn append_many<I: IntoIterator<Item = Sample>>(&mut self, samples: I) {
        for sample in samples {
            self.append(sample);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.cursor = 0;
    }

    /// Iterates samples in append order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        let split = if self.samples.len() < self.capacity {
            0
        } else {
            self.cursor
        };
        self.samples[split..]
            .iter()
            .chain(&self.samples[..split])
            .copied()
    }

    /// Most recently appended sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Sample> {
        if self.samples.is_empty() {
            return None;
        }
        if self.samples.len() < self.capacity {
            return self.samples.last().copied();
        }
        let last = (self.cursor + self.capacity - 1) % self.capacity;
        Some(self.samples[last])
    }

    /// X column in append order.
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.iter().map(|sample| sample.x).collect()
    }

    /// Y column in append order.
    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.iter().map(|sample| sample.y).collect()
    }

    /// All samples in append order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Sample> {
        self.iter().collect()
    }
}
