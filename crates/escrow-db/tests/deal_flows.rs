//! End-to-end flows over one service: users trade, message, accept,
//! review each other, and read their feeds.

use std::sync::Arc;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use escrow_core::enums::{NotificationKind, Role};
use escrow_core::feed::FeedItem;
use escrow_db::error::ErrorKind;
use escrow_db::service::EscrowService;

async fn test_service() -> EscrowService {
    EscrowService::new_local(":memory:").await.unwrap()
}

// ---------------------------------------------------------------------------
// Deal lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deal_lifecycle_from_creation_to_acceptance() {
    let svc = test_service().await;
    let alice = svc.create_user("alice").await.unwrap();
    let bob = svc.create_user("bob").await.unwrap();
    let exchange = svc.create_exchange("buy").await.unwrap();

    let deal = svc
        .create_deal_for_exchange("bike", &alice.id, &bob.id, Some(&exchange.id))
        .await
        .unwrap();
    assert_eq!(deal.d_id, 1);
    assert_eq!(deal.exchange.as_deref(), Some(exchange.id.as_str()));
    assert!(!deal.fully_accepted());

    svc.append_deal_message(&deal.id, "msg-1").await.unwrap();
    svc.append_deal_message(&deal.id, "msg-2").await.unwrap();
    svc.accept_deal(&deal.id, &alice.id).await.unwrap();
    let deal = svc.accept_deal(&deal.id, &bob.id).await.unwrap();
    assert!(deal.fully_accepted());
    assert_eq!(deal.messages, vec!["msg-1".to_string(), "msg-2".to_string()]);

    let deal = svc.set_deal_status(&deal.id, &bob.id, "shipped").await.unwrap();
    assert_eq!(deal.status.as_deref(), Some("shipped"));
    assert_eq!(svc.get_deal_by_d_id(1).await.unwrap(), deal);
}

#[tokio::test]
async fn roles_are_resolved_per_deal() {
    let svc = test_service().await;
    let alice = svc.create_user("alice").await.unwrap();
    let bob = svc.create_user("bob").await.unwrap();
    let carol = svc.create_user("carol").await.unwrap();

    let first = svc.create_deal("first", &alice.id, &bob.id).await.unwrap();
    let second = svc.create_deal("second", &bob.id, &carol.id).await.unwrap();

    assert_eq!(svc.role_of(&first.id, &alice.id).await.unwrap(), Role::Seller);
    assert_eq!(svc.role_of(&second.id, &bob.id).await.unwrap(), Role::Seller);
    assert_eq!(svc.role_of(&first.id, &bob.id).await.unwrap(), Role::Buyer);
    assert_eq!(svc.role_of(&first.id, &carol.id).await.unwrap(), Role::None);
    assert_eq!(
        svc.role_of(&first.id, &alice.id.to_uppercase()).await.unwrap(),
        Role::Seller
    );

    let bobs: Vec<i64> = svc
        .list_deals_for_user(&bob.id)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.d_id)
        .collect();
    assert_eq!(bobs, vec![2, 1]);

    let err = svc.accept_deal(&first.id, &carol.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[tokio::test]
async fn both_sides_review_once() {
    let svc = test_service().await;
    let alice = svc.create_user("alice").await.unwrap();
    let bob = svc.create_user("bob").await.unwrap();
    let mallory = svc.create_user("mallory").await.unwrap();
    let deal = svc.create_deal("lamp", &alice.id, &bob.id).await.unwrap();

    svc.create_review(&bob.id, &deal.id, "fast shipping", 4)
        .await
        .unwrap();
    svc.create_review(&alice.id, &deal.id, "paid on time", 5)
        .await
        .unwrap();

    let again = svc
        .create_review(&bob.id, &deal.id, "changed my mind", 1)
        .await
        .unwrap_err();
    assert_eq!(again.kind(), ErrorKind::Conflict);

    let outsider = svc
        .create_review(&mallory.id, &deal.id, "never met them", 1)
        .await
        .unwrap_err();
    assert_eq!(outsider.kind(), ErrorKind::Forbidden);

    let profile = svc.user_profile(&alice.id).await.unwrap();
    assert_eq!(profile.reviews.len(), 1);
    assert_eq!(profile.reviews[0].author_username, "bob");
    assert_eq!(profile.average_rating, Some(4.0));

    let empty = svc.user_profile(&mallory.id).await.unwrap();
    assert!(empty.reviews.is_empty());
    assert_eq!(empty.average_rating, None);
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feed_collapses_messages_across_deals() {
    let svc = test_service().await;
    let alice = svc.create_user("alice").await.unwrap();
    let bob = svc.create_user("bob").await.unwrap();
    let lamp = svc.create_deal("lamp", &alice.id, &bob.id).await.unwrap();
    let desk = svc.create_deal("desk", &alice.id, &bob.id).await.unwrap();

    let base = Utc::now() - Duration::hours(1);
    for minutes in [1, 2, 3] {
        svc.record_notification(
            NotificationKind::Message,
            &bob.id,
            Some(&alice.id),
            &lamp.id,
            base + Duration::minutes(minutes),
        )
        .await
        .unwrap();
    }
    svc.record_notification(
        NotificationKind::Message,
        &bob.id,
        Some(&alice.id),
        &desk.id,
        base + Duration::minutes(10),
    )
    .await
    .unwrap();
    svc.record_notification(
        NotificationKind::DealAccepted,
        &bob.id,
        Some(&alice.id),
        &lamp.id,
        base + Duration::minutes(5),
    )
    .await
    .unwrap();

    let feed = svc.feed_for(&bob.id).await.unwrap();
    assert_eq!(feed.len(), 3);

    let FeedItem::MessageSummary(desk_summary) = &feed[0] else {
        panic!("expected a message summary first, got {:?}", feed[0]);
    };
    assert_eq!(desk_summary.deal.name, "desk");
    assert_eq!(desk_summary.count, 1);

    let FeedItem::Notification(accepted) = &feed[1] else {
        panic!("expected a notification second, got {:?}", feed[1]);
    };
    assert_eq!(accepted.kind, NotificationKind::DealAccepted);
    assert_eq!(accepted.sender.as_ref().unwrap().username, "alice");

    let FeedItem::MessageSummary(lamp_summary) = &feed[2] else {
        panic!("expected a message summary last, got {:?}", feed[2]);
    };
    assert_eq!(lamp_summary.count, 3);
    assert_eq!(lamp_summary.deal.id, lamp.id);

    assert!(svc.feed_for(&alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn notification_for_unknown_deal_is_rejected() {
    let svc = test_service().await;
    let alice = svc.create_user("alice").await.unwrap();

    let err = svc
        .record_notification(
            NotificationKind::StatusChanged,
            &alice.id,
            None,
            "dea-00000000",
            Utc::now(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_duplicate_reviews_leave_exactly_one() {
    let svc = Arc::new(test_service().await);
    let alice = svc.create_user("alice").await.unwrap();
    let bob = svc.create_user("bob").await.unwrap();
    let deal = svc.create_deal("chair", &alice.id, &bob.id).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let svc = Arc::clone(&svc);
        let (author, deal_id) = (bob.id.clone(), deal.id.clone());
        handles.push(tokio::spawn(async move {
            svc.create_review(&author, &deal_id, &format!("take {i}"), 5)
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::Conflict, "{err}");
                conflicts += 1;
            }
        }
    }
    assert_eq!((created, conflicts), (1, 15));

    let profile = svc.user_profile(&alice.id).await.unwrap();
    assert_eq!(profile.reviews.len(), 1);
}
