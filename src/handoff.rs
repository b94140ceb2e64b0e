//! Single-slot exchange of FFT blocks between the audio thread and the render thread.
//!
//! The slot is an SPSC ring buffer of capacity one. A block offered while the
//! slot is occupied is dropped and the pending block is kept, so the renderer
//! never sees a block overwritten while it is waiting to be read.

use ringbuf::{Consumer, Producer, RingBuffer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::fifo::FftBlock;

/// Audio side of the exchange.
pub struct BlockSender {
    prod: Producer<FftBlock>,
    dropped: Arc<AtomicU64>,
}

/// Render side of the exchange.
pub struct BlockReceiver {
    cons: Consumer<FftBlock>,
    dropped: Arc<AtomicU64>,
}

pub fn block_slot() -> (BlockSender, BlockReceiver) {
    let (prod, cons) = RingBuffer::new(1).split();
    let dropped = Arc::new(AtomicU64::new(0));
    (
        BlockSender {
            prod,
            dropped: dropped.clone(),
        },
        BlockReceiver { cons, dropped },
    )
}

impl BlockSender {
    /// Copies `block` into the slot if it is empty. Returns false when the
    /// block was dropped because the previous one has not been taken yet.
    pub fn offer(&mut self, block: &FftBlock) -> bool {
        if self.prod.is_full() || self.prod.push(*block).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Number of blocks dropped since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl BlockReceiver {
    /// Whether a block is waiting to be taken.
    pub fn is_ready(&self) -> bool {
        !self.cons.is_empty()
    }

    /// Takes the pending block, clearing the slot.
    pub fn take(&mut self) -> Option<FftBlock> {
        self.cons.pop()
    }

    /// Number of blocks the sender has dropped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FFT_SIZE;
    use std::thread;

    #[test]
    fn offer_then_take() {
        let (mut tx, mut rx) = block_slot();
        assert!(!rx.is_ready());
        assert!(tx.offer(&[1.0; FFT_SIZE]));
        assert!(rx.is_ready());

        let block = rx.take().unwrap();
        assert!(block.iter().all(|&s| s == 1.0));
        assert!(!rx.is_ready());
        assert!(rx.take().is_none());
    }

    #[test]
    fn pending_block_is_not_overwritten() {
        let (mut tx, mut rx) = block_slot();
        assert!(tx.offer(&[1.0; FFT_SIZE]));
        assert!(!tx.offer(&[2.0; FFT_SIZE]));
        assert!(!tx.offer(&[3.0; FFT_SIZE]));
        assert_eq!(tx.dropped(), 2);
        assert_eq!(rx.dropped(), 2);

        // Still exactly one block, and it is the first one.
        let block = rx.take().unwrap();
        assert_eq!(block[0], 1.0);
        assert!(rx.take().is_none());

        assert!(tx.offer(&[4.0; FFT_SIZE]));
        assert_eq!(rx.take().unwrap()[FFT_SIZE - 1], 4.0);
    }

    #[test]
    fn blocks_arrive_whole_across_threads() {
        let (mut tx, mut rx) = block_slot();
        let producer = thread::spawn(move || {
            let mut sent = 0u32;
            for i in 0..2000u32 {
                if tx.offer(&[i as f32; FFT_SIZE]) {
                    sent += 1;
                }
            }
            (sent, tx.dropped())
        });

        let mut received = 0u32;
        let mut last = -1.0f32;
        loop {
            if let Some(block) = rx.take() {
                // Every sample of a block comes from the same offer.
                assert!(block.iter().all(|&s| s == block[0]));
                assert!(block[0] > last);
                last = block[0];
                received += 1;
            } else if producer.is_finished() {
                break;
            }
        }
        received += rx.take().map_or(0, |_| 1);

        let (sent, dropped) = producer.join().unwrap();
        assert_eq!(sent, received);
        assert_eq!(sent as u64 + dropped, 2000);
    }
}
