use tracing::{debug, info, warn};

/// A modal workflow that can take over the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalChannel {
    ApiKey,
    SelectDocs,
    Upload,
}

impl ModalChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalChannel::ApiKey => "api_key",
            ModalChannel::SelectDocs => "select_docs",
            ModalChannel::Upload => "upload",
        }
    }

    /// State in which this channel is visible.
    pub fn active_state(self) -> ModalState {
        match self {
            ModalChannel::ApiKey => ModalState::ApiKeyActive,
            ModalChannel::SelectDocs => ModalState::SelectDocsActive,
            ModalChannel::Upload => ModalState::UploadActive,
        }
    }

    /// Whether the channel may be dismissed without completing its action.
    pub fn is_cancellable(self, preconditions: &Preconditions) -> bool {
        match self {
            ModalChannel::ApiKey => preconditions.has_valid_api_key,
            ModalChannel::SelectDocs => preconditions.has_selected_document,
            ModalChannel::Upload => true,
        }
    }
}

impl std::fmt::Display for ModalChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visible modal.
///
/// Only one modal can be visible at a time; a single enum makes two active
/// channels unrepresentable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Inactive,
    ApiKeyActive,
    SelectDocsActive,
    UploadActive,
}

impl ModalState {
    pub fn is_inactive(&self) -> bool {
        matches!(self, ModalState::Inactive)
    }

    /// The visible channel, if any.
    pub fn active_channel(&self) -> Option<ModalChannel> {
        match self {
            ModalState::Inactive => None,
            ModalState::ApiKeyActive => Some(ModalChannel::ApiKey),
            ModalState::SelectDocsActive => Some(ModalChannel::SelectDocs),
            ModalState::UploadActive => Some(ModalChannel::Upload),
        }
    }

    pub fn is_active(&self, channel: ModalChannel) -> bool {
        self.active_channel() == Some(channel)
    }
}

/// Facts that decide cancellability, sampled when `close` is called.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preconditions {
    pub has_selected_document: bool,
    pub has_valid_api_key: bool,
}

/// State machine over [`ModalState`].
///
/// - `open` only leaves `Inactive`; the first opened channel wins.
/// - `close` only succeeds for the visible channel when it is cancellable.
/// - `complete` always returns the visible channel to `Inactive`.
///
/// Every rejected transition is a logged no-op.
#[derive(Clone, Debug, Default)]
pub struct ModalCoordinator {
    state: ModalState,
}

impl ModalCoordinator {
    /// Start gated on document selection when none exists.
    pub fn new(has_selected_document: bool) -> Self {
        let state = if has_selected_document {
            ModalState::Inactive
        } else {
            ModalState::SelectDocsActive
        };
        debug!(event = "core.modal.initialized", state = ?state);
        Self { state }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_blocking(&self) -> bool {
        !self.state.is_inactive()
    }

    /// Show `channel`. Returns false when another modal is visible.
    pub fn open(&mut self, channel: ModalChannel) -> bool {
        if !self.state.is_inactive() {
            debug!(
                event = "core.modal.open_ignored",
                channel = %channel,
                current = ?self.state
            );
            return false;
        }
        self.state = channel.active_state();
        info!(event = "core.modal.opened", channel = %channel);
        true
    }

    /// Dismiss `channel` without completing it.
    ///
    /// Cancellability is evaluated against `preconditions` as they are now,
    /// not as they were when the modal opened.
    pub fn close(&mut self, channel: ModalChannel, preconditions: &Preconditions) -> bool {
        if !self.state.is_active(channel) {
            debug!(
                event = "core.modal.close_ignored",
                channel = %channel,
                current = ?self.state
            );
            return false;
        }
        if !channel.is_cancellable(preconditions) {
            warn!(
                event = "core.modal.close_rejected",
                channel = %channel,
                has_selected_document = preconditions.has_selected_document,
                has_valid_api_key = preconditions.has_valid_api_key
            );
            return false;
        }
        self.state = ModalState::Inactive;
        info!(event = "core.modal.closed", channel = %channel);
        true
    }

    /// The channel's action finished; hide it regardless of cancellability.
    pub fn complete(&mut self, channel: ModalChannel) -> bool {
        if !self.state.is_active(channel) {
            debug!(
                event = "core.modal.complete_ignored",
                channel = %channel,
                current = ?self.state
            );
            return false;
        }
        self.state = ModalState::Inactive;
        info!(event = "core.modal.completed", channel = %channel);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CHANNELS: [ModalChannel; 3] = [
        ModalChannel::ApiKey,
        ModalChannel::SelectDocs,
        ModalChannel::Upload,
    ];

    fn coordinator_in(state: ModalState) -> ModalCoordinator {
        ModalCoordinator { state }
    }

    fn satisfied() -> Preconditions {
        Preconditions {
            has_selected_document: true,
            has_valid_api_key: true,
        }
    }

    #[test]
    fn test_initial_state_depends_on_selection() {
        assert_eq!(
            ModalCoordinator::new(false).state(),
            ModalState::SelectDocsActive
        );
        assert_eq!(ModalCoordinator::new(true).state(), ModalState::Inactive);
    }

    #[test]
    fn test_open_from_inactive() {
        for channel in ALL_CHANNELS {
            let mut modal = ModalCoordinator::new(true);
            assert!(modal.open(channel));
            assert_eq!(modal.state(), channel.active_state());
            assert!(modal.is_blocking());
        }
    }

    #[test]
    fn test_open_when_active_is_noop_for_every_channel() {
        for current in ALL_CHANNELS {
            for requested in ALL_CHANNELS {
                let mut modal = coordinator_in(current.active_state());
                assert!(!modal.open(requested));
                assert_eq!(modal.state(), current.active_state());
            }
        }
    }

    #[test]
    fn test_close_select_docs_without_selection_stays_active() {
        let mut modal = ModalCoordinator::new(false);
        let preconditions = Preconditions {
            has_selected_document: false,
            has_valid_api_key: true,
        };
        assert!(!modal.close(ModalChannel::SelectDocs, &preconditions));
        assert_eq!(modal.state(), ModalState::SelectDocsActive);
    }

    #[test]
    fn test_close_select_docs_with_selection() {
        let mut modal = coordinator_in(ModalState::SelectDocsActive);
        assert!(modal.close(ModalChannel::SelectDocs, &satisfied()));
        assert_eq!(modal.state(), ModalState::Inactive);
    }

    #[test]
    fn test_close_api_key_requires_valid_key() {
        let mut modal = coordinator_in(ModalState::ApiKeyActive);
        let no_key = Preconditions {
            has_selected_document: true,
            has_valid_api_key: false,
        };
        assert!(!modal.close(ModalChannel::ApiKey, &no_key));
        assert_eq!(modal.state(), ModalState::ApiKeyActive);

        assert!(modal.close(ModalChannel::ApiKey, &satisfied()));
        assert!(modal.state().is_inactive());
    }

    #[test]
    fn test_upload_always_cancellable() {
        let mut modal = coordinator_in(ModalState::UploadActive);
        assert!(modal.close(ModalChannel::Upload, &Preconditions::default()));
        assert!(modal.state().is_inactive());
    }

    #[test]
    fn test_close_other_channel_is_noop() {
        let mut modal = coordinator_in(ModalState::UploadActive);
        assert!(!modal.close(ModalChannel::SelectDocs, &satisfied()));
        assert!(!modal.close(ModalChannel::ApiKey, &satisfied()));
        assert_eq!(modal.state(), ModalState::UploadActive);
    }

    #[test]
    fn test_cancellability_is_evaluated_at_close_time() {
        let mut modal = ModalCoordinator::new(false);
        let mut preconditions = Preconditions::default();
        assert!(!modal.close(ModalChannel::SelectDocs, &preconditions));

        preconditions.has_selected_document = true;
        assert!(modal.close(ModalChannel::SelectDocs, &preconditions));
    }

    #[test]
    fn test_complete_ignores_cancellability() {
        let mut modal = ModalCoordinator::new(false);
        assert!(modal.complete(ModalChannel::SelectDocs));
        assert_eq!(modal.state(), ModalState::Inactive);
    }

    #[test]
    fn test_complete_other_channel_is_noop() {
        let mut modal = coordinator_in(ModalState::UploadActive);
        assert!(!modal.complete(ModalChannel::SelectDocs));
        assert_eq!(modal.state(), ModalState::UploadActive);
        assert!(!ModalCoordinator::new(true).complete(ModalChannel::Upload));
    }

    #[test]
    fn test_active_channel_round_trip() {
        assert_eq!(ModalState::Inactive.active_channel(), None);
        for channel in ALL_CHANNELS {
            assert_eq!(channel.active_state().active_channel(), Some(channel));
        }
    }
}
