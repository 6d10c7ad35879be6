//! Integration tests for the channel notification preference view-model.

use std::sync::Arc;

use chatkit::adapters::mock::{MockPostSource, RecordedCall};
use chatkit::error::FetchError;
use chatkit::models::ChannelNotifyProps;
use chatkit::notifications::{
    ChannelNotificationPreference, NotificationLevel, PUSH_LEVEL_OPTIONS,
};

#[tokio::test]
async fn select_sends_partial_update_and_moves_selection() {
    let source = MockPostSource::new();
    let mut preference = ChannelNotificationPreference::new(
        Arc::new(source.clone()),
        "user1",
        "chan1",
        Some(NotificationLevel::Default),
    );
    assert_eq!(preference.selected_index(), 0);

    preference.select(NotificationLevel::None).await.unwrap();

    assert_eq!(preference.selected_index(), 3);
    assert_eq!(
        source.calls(),
        vec![RecordedCall::UpdateChannelNotifyProps {
            user_id: "user1".to_string(),
            channel_id: "chan1".to_string(),
            props: ChannelNotifyProps::push_only(NotificationLevel::None),
        }]
    );
}

#[tokio::test]
async fn failed_update_keeps_previous_selection() {
    let source = MockPostSource::new();
    source.set_notify_result("chan1", Err(FetchError::connection("offline")));
    let mut preference = ChannelNotificationPreference::new(
        Arc::new(source),
        "user1",
        "chan1",
        Some(NotificationLevel::Mention),
    );

    let result = preference.select(NotificationLevel::All).await;

    assert!(result.is_err());
    assert_eq!(preference.current(), Some(NotificationLevel::Mention));
    assert_eq!(preference.selected_index(), 2);
}

#[tokio::test]
async fn absent_preference_selects_default() {
    let source = MockPostSource::new();
    let preference =
        ChannelNotificationPreference::new(Arc::new(source), "user1", "chan1", None);

    assert_eq!(preference.selected_index(), 0);
    assert_eq!(PUSH_LEVEL_OPTIONS[preference.selected_index()], NotificationLevel::Default);
}
