//! A fixed-capacity accumulation buffer that turns arbitrarily sized byte
//! inputs into block-aligned deliveries.
//!
//! [BlockBuffer] accepts input either as in-memory slices ([BlockBuffer::load])
//! or from a [Read] stream ([BlockBuffer::load_from]) and hands the data to a
//! caller-supplied sink in runs whose length is always a positive multiple of
//! the configured block size. Bytes that do not yet fill a whole block stay
//! buffered and are visible through [BlockBuffer::pending] until more input
//! arrives or the caller drains the buffer.
//!
//! Inputs much larger than the buffer bypass it: once the buffer has been
//! flushed, any whole-buffer-sized prefix of the remaining input is delivered
//! to the sink directly from the caller's slice, so large writes cost a single
//! delivery rather than repeated internal copies.

use std::io::Read;

pub struct BlockBuffer {
    buf: Vec<u8>,
    len: usize,
    block_size: usize,
}

impl BlockBuffer {
    /// Creates a buffer holding `capacity_blocks` blocks of `block_size` bytes.
    pub fn new(capacity_blocks: usize, block_size: usize) -> Self {
        assert!(block_size > 0);
        assert!(capacity_blocks > 0);
        BlockBuffer {
            buf: vec![0u8; capacity_blocks * block_size],
            len: 0,
            block_size,
        }
    }

    /// The configured block size in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The buffered tail: bytes accepted but not yet delivered to a sink.
    /// Always strictly shorter than the capacity after a `load` returns.
    pub fn pending(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discards all buffered bytes.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Consumes the whole input slice, delivering block-aligned runs to
    /// `sink` and retaining the unaligned tail. Returns the number of bytes
    /// consumed, which is always `input.len()`.
    pub fn load(&mut self, input: &[u8], sink: &mut dyn FnMut(&[u8])) -> u64 {
        let loaded = self.fill_from(input);
        let remaining = &input[loaded..];

        if self.len == self.buf.len() {
            self.flush(sink);
        }

        if remaining.len() < self.buf.len() {
            self.fill_from(remaining);
        } else {
            // Whole-buffer multiples go straight from the caller's slice.
            let bulk = remaining.len() / self.buf.len() * self.buf.len();
            sink(&remaining[..bulk]);
            self.fill_from(&remaining[bulk..]);
        }

        input.len() as u64
    }

    /// Pulls `reader` to exhaustion through the same delivery path as
    /// [BlockBuffer::load], flushing each time the buffer fills. Returns the
    /// total number of bytes read.
    pub fn load_from(
        &mut self,
        reader: &mut dyn Read,
        sink: &mut dyn FnMut(&[u8]),
    ) -> std::io::Result<u64> {
        let mut total: u64 = 0;
        loop {
            let read = reader.read(&mut self.buf[self.len..])?;
            if read == 0 {
                break;
            }
            self.len += read;
            total += read as u64;

            if self.len == self.buf.len() {
                self.flush(sink);
            }
        }
        Ok(total)
    }

    fn fill_from(&mut self, input: &[u8]) -> usize {
        let take = input.len().min(self.buf.len() - self.len);
        self.buf[self.len..self.len + take].copy_from_slice(&input[..take]);
        self.len += take;
        take
    }

    // Only called with a full buffer, so the sink always sees an aligned run.
    fn flush(&mut self, sink: &mut dyn FnMut(&[u8])) {
        sink(&self.buf[..self.len]);
        self.len = 0;
    }
}
