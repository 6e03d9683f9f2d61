/// Receives the loss notification when the head leaves the bounds
pub trait LossNotifier {
    fn notify_loss(&mut self);
}

impl<F: FnMut()> LossNotifier for F {
    fn notify_loss(&mut self) {
        self()
    }
}

/// Notifier that only counts losses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LossCounter {
    pub losses: u32,
}

impl LossNotifier for LossCounter {
    fn notify_loss(&mut self) {
        self.losses += 1;
    }
}
