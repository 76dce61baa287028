//! Parameter updates from control threads.
//!
//! Setters on [`FilterKernel`](crate::FilterKernel) are plain field stores and
//! take `&mut self`, so a UI thread can't call them while the audio thread owns
//! the kernel. Instead the UI pushes [`ControlMessage`]s into a lock-free
//! single-producer/single-consumer ring and the audio callback drains it at the
//! top of each frame. Every parameter write then happens on the audio context.

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    SetCutoff(f32),
    SetResonance(f32),
    SetModValue(f32),
    SetEnvelope {
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
        contour: f32,
    },
    SetKeyTracking {
        base: f32,
        amount: f32,
        note: i32,
    },
    Trigger,
    Release,
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Create a control ring with room for `capacity` pending messages.
#[cfg(feature = "rtrb")]
pub fn channel(capacity: usize) -> (Producer<ControlMessage>, Consumer<ControlMessage>) {
    RingBuffer::new(capacity)
}
