mod harness;

use std::sync::Arc;

use bet_scorer::{BetUpdater, UpdateError, UpdateOutcome, Wager, WagerState, Winner};
use harness::memory_store::MemoryStore;
use harness::recording_publisher::RecordingPublisher;
use serde_json::json;

fn updater(wagers: Vec<Wager>) -> (BetUpdater, Arc<MemoryStore>, Arc<RecordingPublisher>) {
    let store = Arc::new(MemoryStore::new(wagers));
    let publisher = Arc::new(RecordingPublisher::new());
    let updater = BetUpdater::new(store.clone(), publisher.clone());
    (updater, store, publisher)
}

fn states(wagers: &[Wager]) -> Vec<Option<WagerState>> {
    wagers.iter().map(|w| w.state.clone()).collect()
}

#[tokio::test]
async fn live_event_marks_wagers_winning_and_losing_in_order() {
    let (updater, _, publisher) = updater(vec![
        Wager::new("E1", "team_1").with_field("id", json!(1)),
        Wager::new("E1", "team_2").with_field("id", json!(2)),
    ]);

    let outcome = updater
        .update_bet(br#"{"id":"E1","state":"active","score":"3-1"}"#)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Settled {
            event_id: "E1".to_string(),
            winner: Winner::Team1,
            dispatched: 2,
        }
    );

    let published = publisher.published();
    assert_eq!(
        states(&published),
        vec![Some(WagerState::Winning), Some(WagerState::Losing)]
    );
    assert_eq!(published[0].extra["id"], json!(1));
    assert_eq!(published[1].extra["id"], json!(2));
}

#[tokio::test]
async fn finished_draw_loses_a_team_bet() {
    let (updater, _, publisher) = updater(vec![Wager::new("E2", "team_2")]);

    let outcome = updater
        .update_bet(br#"{"id":"E2","state":"finished","score":"0-0"}"#)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        UpdateOutcome::Settled {
            winner: Winner::Draw,
            dispatched: 1,
            ..
        }
    ));
    assert_eq!(states(&publisher.published()), vec![Some(WagerState::Lose)]);
}

#[tokio::test]
async fn finished_draw_wins_a_draw_bet() {
    let (updater, _, publisher) = updater(vec![Wager::new("E2", "draw")]);

    updater
        .update_bet(br#"{"id":"E2","state":"finished","score":"2-2"}"#)
        .await
        .unwrap();

    assert_eq!(states(&publisher.published()), vec![Some(WagerState::Win)]);
}

#[tokio::test]
async fn event_without_wagers_never_reads_the_score() {
    let (updater, store, publisher) = updater(vec![Wager::new("other", "team_1")]);

    // The score is garbage; it must not be interpreted when nobody bet.
    let outcome = updater
        .update_bet(br#"{"id":"E3","state":"active","score":"not-a-score"}"#)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::NoWagers {
            event_id: "E3".to_string()
        }
    );
    assert_eq!(store.lookups(), 1);
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn unsettled_phase_is_a_no_op() {
    let (updater, store, publisher) = updater(vec![Wager::new("E4", "team_1")]);

    let outcome = updater
        .update_bet(br#"{"id":"E4","state":"postponed","score":"0-0"}"#)
        .await
        .unwrap();

    assert!(matches!(outcome, UpdateOutcome::Ignored { .. }));
    assert_eq!(store.lookups(), 0);
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn undecodable_payload_touches_nothing() {
    let (updater, store, publisher) = updater(vec![Wager::new("E1", "team_1")]);

    let payloads: [&[u8]; 3] = [
        b"{not json",
        br#"{"state":"active","score":"1-0"}"#,
        br#"{"id":"E1","score":"1-0"}"#,
    ];
    for payload in payloads {
        let err = updater.update_bet(payload).await.unwrap_err();
        assert!(matches!(err, UpdateError::Decode(_)));
    }

    assert_eq!(store.lookups(), 0);
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn malformed_score_is_surfaced_when_wagers_exist() {
    let (updater, _, publisher) = updater(vec![Wager::new("E7", "team_1")]);

    let payloads: [&[u8]; 4] = [
        br#"{"id":"E7","state":"active","score":"2-2-1"}"#,
        br#"{"id":"E7","state":"active","score":"abc-1"}"#,
        br#"{"id":"E7","state":"active","score":"3"}"#,
        br#"{"id":"E7","state":"active"}"#,
    ];
    for payload in payloads {
        let err = updater.update_bet(payload).await.unwrap_err();
        assert!(matches!(err, UpdateError::Format { .. }), "{err}");
    }

    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn numeric_event_id_matches_string_keyed_wagers() {
    let (updater, _, publisher) = updater(vec![Wager::new("42", "team_2")]);

    updater
        .update_bet(br#"{"id":42,"state":"active","score":"0-1"}"#)
        .await
        .unwrap();

    assert_eq!(states(&publisher.published()), vec![Some(WagerState::Winning)]);
}

#[tokio::test]
async fn prior_settlement_is_overwritten() {
    let (updater, _, publisher) = updater(vec![
        Wager::new("E8", "team_1").with_state(WagerState::Winning),
        Wager::new("E8", "team_2").with_state(WagerState::Other("pending".to_string())),
    ]);

    updater
        .update_bet(br#"{"id":"E8","state":"finished","score":"1-4"}"#)
        .await
        .unwrap();

    assert_eq!(
        states(&publisher.published()),
        vec![Some(WagerState::Lose), Some(WagerState::Win)]
    );
}

#[tokio::test]
async fn replaying_a_notification_yields_the_same_states() {
    let (updater, _, publisher) = updater(vec![
        Wager::new("E9", "team_1"),
        Wager::new("E9", "team_2"),
        Wager::new("E9", "void"),
    ]);
    let payload = br#"{"id":"E9","state":"finished","score":"5-2"}"#;

    updater.update_bet(payload).await.unwrap();
    updater.update_bet(payload).await.unwrap();

    let published = publisher.published();
    assert_eq!(published.len(), 6);
    assert_eq!(states(&published[..3]), states(&published[3..]));
    assert_eq!(
        states(&published[..3]),
        vec![
            Some(WagerState::Win),
            Some(WagerState::Lose),
            Some(WagerState::Lose)
        ]
    );
}
