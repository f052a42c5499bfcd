//! PostgreSQL partner store. Skipped unless `DATABASE_URL` is set.

use chrono::{Duration, Utc};

use promocode_core::error::ErrorKind;
use promocode_database::PartnerStore;
use promocode_entity::partner::{Partner, PartnerPromoCodeLimit};

use crate::helpers::{insert_partner, pg_store};

fn partner_with_active_limit(issued: i32) -> Partner {
    let now = Utc::now();
    let mut partner = Partner::new("Cats & Dogs");
    partner.number_issued_promo_codes = issued;
    partner.limits.push(PartnerPromoCodeLimit::new(
        partner.id,
        2,
        now - Duration::days(1),
        now + Duration::days(1),
    ));
    partner
}

#[tokio::test]
async fn test_limits_load_in_create_date_order() {
    let Some(store) = pg_store().await else {
        return;
    };
    let now = Utc::now();
    let mut partner = Partner::new("Toys");
    let mut late = PartnerPromoCodeLimit::new(partner.id, 3, now, now + Duration::days(1));
    let mut early =
        PartnerPromoCodeLimit::new(partner.id, 1, now - Duration::days(2), now + Duration::days(1));
    let middle =
        PartnerPromoCodeLimit::new(partner.id, 2, now - Duration::days(1), now + Duration::days(1));
    late.cancel(now);
    early.cancel(now);
    let expected = vec![early.id, middle.id, late.id];
    partner.limits = vec![late, early, middle];

    insert_partner(&store, &partner).await;

    let loaded = store.find_by_id(partner.id).await.unwrap().unwrap();
    let ids: Vec<_> = loaded.limits.iter().map(|l| l.id).collect();
    assert_eq!(ids, expected);
    assert_eq!(loaded.active_limits().count(), 1);
}

#[tokio::test]
async fn test_update_cancels_previous_limit_and_inserts_new_one() {
    let Some(store) = pg_store().await else {
        return;
    };
    let partner = partner_with_active_limit(5);
    let previous = partner.limits[0].id;
    insert_partner(&store, &partner).await;

    let now = Utc::now();
    let mut loaded = store.find_by_id(partner.id).await.unwrap().unwrap();
    let new_limit = loaded.apply_new_limit(10, now + Duration::days(3), now);
    store.update(&loaded).await.unwrap();

    let stored = store.find_by_id(partner.id).await.unwrap().unwrap();
    assert_eq!(stored.number_issued_promo_codes, 0);
    assert_eq!(stored.limits.len(), 2);
    assert!(stored.limit(previous).unwrap().cancel_date.is_some());
    assert_eq!(stored.active_limit().map(|l| l.id), Some(new_limit));
    assert_eq!(stored.active_limit().map(|l| l.limit), Some(10));
}

#[tokio::test]
async fn test_second_outdated_writer_fails() {
    let Some(store) = pg_store().await else {
        return;
    };
    let partner = partner_with_active_limit(5);
    insert_partner(&store, &partner).await;

    let mut first = store.find_by_id(partner.id).await.unwrap().unwrap();
    let mut second = store.find_by_id(partner.id).await.unwrap().unwrap();
    let now = Utc::now();

    let committed = first.apply_new_limit(10, now + Duration::days(1), now);
    store.update(&first).await.unwrap();

    second.apply_new_limit(20, now + Duration::days(2), now);
    let err = store.update(&second).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    let stored = store.find_by_id(partner.id).await.unwrap().unwrap();
    assert_eq!(stored.limits.len(), 2);
    assert_eq!(stored.active_limits().count(), 1);
    assert_eq!(stored.active_limit().map(|l| l.id), Some(committed));
}

#[tokio::test]
async fn test_update_cannot_touch_another_partners_limit() {
    let Some(store) = pg_store().await else {
        return;
    };
    let owner = partner_with_active_limit(0);
    let owned = owner.limits[0].clone();
    insert_partner(&store, &owner).await;

    let mut intruder = Partner::new("Intruder");
    insert_partner(&store, &intruder).await;

    let mut borrowed = owned.clone();
    borrowed.partner_id = intruder.id;
    borrowed.cancel(Utc::now());
    intruder.limits.push(borrowed);

    let err = store.update(&intruder).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    let stored = store.find_by_id(owner.id).await.unwrap().unwrap();
    assert_eq!(stored.active_limit().map(|l| l.id), Some(owned.id));
    let intruder = store.find_by_id(intruder.id).await.unwrap().unwrap();
    assert!(intruder.limits.is_empty());
}
