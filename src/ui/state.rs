use alloy_primitives::Address;

use crate::common::Wave;

/// Local UI state. Touched only from the UI thread.
pub struct AppState {
    pub connected_account: Option<Address>,
    pub waves: Vec<Wave>,
    pub total_waves: Option<u64>,
    pub wallet_alert: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            connected_account: None,
            waves: Vec::new(),
            total_waves: None,
            wallet_alert: None,
        }
    }

    pub fn set_account(&mut self, account: Address) {
        self.connected_account = Some(account);
    }

    /// Full read replaces the list wholesale.
    pub fn replace_waves(&mut self, waves: Vec<Wave>) {
        self.waves = waves;
    }

    /// A wave already present is dropped, so the bulk read and the event
    /// push can interleave in either order without double entries.
    pub fn push_wave(&mut self, wave: Wave) {
        if !self.waves.contains(&wave) {
            self.waves.push(wave);
        }
    }

    pub fn set_total(&mut self, total: u64) {
        self.total_waves = Some(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(message: &str, epoch: i64) -> Wave {
        Wave::from_chain(
            "0xAbC0000000000000000000000000000000000abc"
                .parse()
                .unwrap(),
            epoch,
            message.to_string(),
        )
    }

    #[test]
    fn duplicate_push_is_dropped() {
        let mut state = AppState::new();
        state.push_wave(wave("gm", 1_700_000_000));
        state.push_wave(wave("gm", 1_700_000_000));
        assert_eq!(state.waves.len(), 1);
    }

    #[test]
    fn push_after_bulk_read_containing_it_is_dropped() {
        let mut state = AppState::new();
        state.replace_waves(vec![wave("gm", 1_700_000_000)]);
        state.push_wave(wave("gm", 1_700_000_000));
        assert_eq!(state.waves.len(), 1);
    }

    #[test]
    fn same_message_at_a_new_time_is_appended_last() {
        let mut state = AppState::new();
        state.push_wave(wave("gm", 1_700_000_000));
        state.push_wave(wave("gm", 1_700_000_060));
        assert_eq!(state.waves.len(), 2);
        assert_eq!(state.waves[0], wave("gm", 1_700_000_000));
        assert_eq!(state.waves[1], wave("gm", 1_700_000_060));
    }

    #[test]
    fn bulk_read_replaces_everything() {
        let mut state = AppState::new();
        state.push_wave(wave("old", 1));
        state.replace_waves(vec![wave("a", 2), wave("b", 3)]);
        assert_eq!(state.waves.len(), 2);
        assert!(state.waves.iter().all(|w| w.message != "old"));
    }
}
