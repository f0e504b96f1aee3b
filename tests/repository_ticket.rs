mod common;

use chrono::Duration;
use parking_system::domain::entities::{NewTicket, ParkingSpot, ParkingType};
use parking_system::domain::repositories::TicketRepository;
use parking_system::infrastructure::persistence::PgTicketRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_ticket(number: i32, reg: &str, discount: bool) -> NewTicket {
    NewTicket {
        parking_spot: ParkingSpot::new(number, ParkingType::Car, false),
        vehicle_reg_number: reg.to_string(),
        in_time: common::start_time(),
        discount,
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_save_ticket(pool: PgPool) {
    let repo = PgTicketRepository::new(Arc::new(pool));

    let ticket = repo.save_ticket(new_ticket(1, "ABCDEF", true)).await.unwrap();

    assert!(ticket.id > 0);
    assert_eq!(ticket.vehicle_reg_number, "ABCDEF");
    assert_eq!(ticket.price, 0.0);
    assert!(ticket.out_time.is_none());
    assert!(ticket.discount);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_get_ticket_joins_spot(pool: PgPool) {
    common::set_spot_availability(&pool, 2, false).await;
    common::create_test_ticket(&pool, 2, "ABCDEF", common::start_time(), None).await;
    let repo = PgTicketRepository::new(Arc::new(pool));

    let ticket = repo.get_ticket("ABCDEF").await.unwrap().unwrap();

    assert_eq!(ticket.parking_spot.number(), 2);
    assert_eq!(ticket.parking_spot.parking_type(), ParkingType::Car);
    assert!(!ticket.parking_spot.is_available());
    assert_eq!(ticket.in_time, common::start_time());
    assert!(ticket.is_open());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_get_ticket_not_found(pool: PgPool) {
    let repo = PgTicketRepository::new(Arc::new(pool));

    assert!(repo.get_ticket("GHOST").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_get_ticket_prefers_open_ticket(pool: PgPool) {
    let start = common::start_time();
    let open_id = common::create_test_ticket(&pool, 1, "ABCDEF", start, None).await;
    // A closed ticket with a later entry time must not shadow the open one
    common::create_test_ticket(
        &pool,
        2,
        "ABCDEF",
        start + Duration::hours(1),
        Some(start + Duration::hours(2)),
    )
    .await;
    let repo = PgTicketRepository::new(Arc::new(pool));

    let ticket = repo.get_ticket("ABCDEF").await.unwrap().unwrap();

    assert_eq!(ticket.id, open_id);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_get_ticket_falls_back_to_latest_closed(pool: PgPool) {
    let start = common::start_time();
    common::create_test_ticket(&pool, 1, "ABCDEF", start, Some(start + Duration::hours(1)))
        .await;
    let latest_id = common::create_test_ticket(
        &pool,
        1,
        "ABCDEF",
        start + Duration::hours(3),
        Some(start + Duration::hours(4)),
    )
    .await;
    let repo = PgTicketRepository::new(Arc::new(pool));

    let ticket = repo.get_ticket("ABCDEF").await.unwrap().unwrap();

    assert_eq!(ticket.id, latest_id);
    assert!(!ticket.is_open());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_ticket(pool: PgPool) {
    let repo = PgTicketRepository::new(Arc::new(pool));
    let mut ticket = repo.save_ticket(new_ticket(1, "ABCDEF", false)).await.unwrap();

    ticket.out_time = Some(common::start_time() + Duration::hours(1));
    ticket.price = 1.5;
    ticket.discount = true;
    let updated = repo.update_ticket(&ticket).await.unwrap();

    assert!(updated);
    let stored = repo.get_ticket("ABCDEF").await.unwrap().unwrap();
    assert_eq!(stored.price, 1.5);
    assert_eq!(stored.out_time, ticket.out_time);
    assert!(stored.discount);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_ticket_unknown_id(pool: PgPool) {
    let repo = PgTicketRepository::new(Arc::new(pool));
    let mut ticket = new_ticket(1, "ABCDEF", false).into_ticket(9999);
    ticket.out_time = Some(common::start_time());

    assert!(!repo.update_ticket(&ticket).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_get_nb_ticket(pool: PgPool) {
    let start = common::start_time();
    common::create_test_ticket(&pool, 1, "ABCDEF", start, Some(start + Duration::hours(1)))
        .await;
    common::create_test_ticket(&pool, 2, "ABCDEF", start + Duration::hours(2), None).await;
    common::create_test_ticket(&pool, 3, "OTHER", start, None).await;
    let repo = PgTicketRepository::new(Arc::new(pool));

    assert_eq!(repo.get_nb_ticket("ABCDEF").await.unwrap(), 2);
    assert_eq!(repo.get_nb_ticket("OTHER").await.unwrap(), 1);
    assert_eq!(repo.get_nb_ticket("GHOST").await.unwrap(), 0);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_by_vehicle_newest_first(pool: PgPool) {
    let start = common::start_time();
    let first = common::create_test_ticket(
        &pool,
        1,
        "ABCDEF",
        start,
        Some(start + Duration::hours(1)),
    )
    .await;
    let second = common::create_test_ticket(&pool, 2, "ABCDEF", start + Duration::hours(2), None)
        .await;
    let repo = PgTicketRepository::new(Arc::new(pool));

    let tickets = repo.list_by_vehicle("ABCDEF").await.unwrap();
    let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();

    assert_eq!(ids, vec![second, first]);
}
