use crate::game::LossNotifier;

/// Modal "You lost" notice raised by the engine on a loss.
///
/// While pending, the host treats the next key press as a dismissal and
/// nothing else.
#[derive(Debug, Clone, Default)]
pub struct LossBanner {
    pending: bool,
}

impl LossBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn dismiss(&mut self) {
        self.pending = false;
    }
}

impl LossNotifier for LossBanner {
    fn notify_loss(&mut self) {
        self.pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_lifecycle() {
        let mut banner = LossBanner::new();
        assert!(!banner.is_pending());

        banner.notify_loss();
        assert!(banner.is_pending());

        banner.dismiss();
        assert!(!banner.is_pending());
    }
}
