//! Query bindings and actions against a wiremock vendor.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rentalwise_client::{
    availability_query, calendar_query, pricing_quote_query, properties_query, property_query,
    AvailabilityParams, CalendarParams, PropertySearch, QueryState, QuoteParams,
    Query, ReservationActions, VendorClient, VendorError,
};
use rentalwise_core::{SearchParams, ReservationStatus};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> Arc<VendorClient> {
    Arc::new(
        VendorClient::with_base_url("test-key", 5_000, base_url)
            .expect("client construction should not fail"),
    )
}

fn located(location: &str) -> Option<SearchParams> {
    Some(SearchParams {
        location: Some(location.to_owned()),
        ..SearchParams::default()
    })
}

#[tokio::test]
async fn properties_query_settles_with_normalized_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": "p1", "name": "Loft"}, {"title": "Cabin"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = properties_query(test_client(&server.uri()), None);
    let state = query.settled().await;

    let properties = state.data().expect("query should succeed");
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[1].name, "Cabin");
    assert!(properties[1].id.starts_with("rw-"));
    assert_eq!(state.error(), None);
}

#[tokio::test]
async fn newer_params_supersede_slow_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .and(query_param("location", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": "slow"}]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/properties"))
        .and(query_param("location", "fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": "fast"}])))
        .mount(&server)
        .await;

    let query = properties_query(test_client(&server.uri()), located("slow"));
    let fast_id = query.set_params(located("fast")).expect("params changed");

    let state = query.settled().await;
    assert_eq!(state.request_id(), Some(fast_id));
    assert_eq!(state.data().unwrap()[0].id, "fast");

    // Let the slow response arrive; it must not overwrite the newer result.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let state = query.state();
    assert_eq!(state.request_id(), Some(fast_id));
    assert_eq!(state.data().unwrap()[0].id, "fast");
}

#[tokio::test]
async fn unchanged_params_do_not_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let query = properties_query(test_client(&server.uri()), located("Austin"));
    query.settled().await;

    assert_eq!(query.set_params(located("Austin")), None);
    assert!(query.refetch().is_some(), "refetch always issues");
    query.settled().await;
}

#[tokio::test]
async fn clear_discards_in_flight_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": "late"}]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let query = properties_query(test_client(&server.uri()), None);
    assert!(query.state().is_loading());
    query.clear();

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(query.state(), QueryState::Idle);
}

#[tokio::test]
async fn property_query_records_vendor_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Not found",
            "code": "NOT_FOUND"
        })))
        .mount(&server)
        .await;

    let query = property_query(test_client(&server.uri()), Some("missing".to_owned()));
    let state = query.settled().await;

    assert_eq!(state.error(), Some("Not found"));
    assert!(state.data().is_none());
}

#[tokio::test]
async fn property_query_without_id_stays_idle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let query = property_query(test_client(&server.uri()), None);
    assert_eq!(query.state(), QueryState::Idle);
    assert_eq!(query.set_params(Some("  ".to_owned())), None);
    assert_eq!(query.settled().await, QueryState::Idle);
}

#[tokio::test]
async fn availability_query_waits_for_dates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties/p1/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "propertyId": "p1",
            "available": true,
            "dates": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = AvailabilityParams {
        property_id: "p1".to_owned(),
        check_in: "2026-11-01".to_owned(),
        check_out: String::new(),
    };
    let query = availability_query(test_client(&server.uri()), params.clone());
    assert_eq!(query.state(), QueryState::Idle);

    params.check_out = "2026-11-03".to_owned();
    assert!(query.set_params(params).is_some());
    let state = query.settled().await;
    assert!(state.data().expect("availability").available);
}

#[tokio::test]
async fn pricing_and_calendar_queries_fetch_typed_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties/p1/quote"))
        .and(query_param("guests", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total": 360,
            "currency": "USD"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/properties/p1/calendar"))
        .and(query_param("month", "2026-11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "propertyId": "p1",
            "available": true,
            "dates": [{"date": "2026-11-01", "available": false, "price": 120}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let quote = pricing_quote_query(
        Arc::clone(&client),
        QuoteParams {
            property_id: "p1".to_owned(),
            check_in: "2026-11-01".to_owned(),
            check_out: "2026-11-04".to_owned(),
            guests: 2,
        },
    );
    let calendar = calendar_query(
        client,
        CalendarParams {
            property_id: "p1".to_owned(),
            month: "2026-11".to_owned(),
        },
    );

    assert_eq!(quote.settled().await.data().unwrap().total, Some(360.0));
    let calendar_state = calendar.settled().await;
    let blocked: Vec<&str> = calendar_state.data().unwrap().blocked_dates().collect();
    assert_eq!(blocked, ["2026-11-01"]);
}

#[tokio::test]
async fn subscribers_observe_loading_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": "p1"}]))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let query = properties_query(test_client(&server.uri()), None);
    let mut rx = query.subscribe();
    assert!(rx.borrow_and_update().is_loading());

    rx.changed().await.expect("sender alive");
    assert_eq!(rx.borrow().data().map(Vec::len), Some(1));
}

// -----------------------------------------------------------------------
// actions
// -----------------------------------------------------------------------

#[tokio::test]
async fn property_search_records_and_returns_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties/search"))
        .and(query_param("guests", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "big", "maxGuests": 8}]
        })))
        .mount(&server)
        .await;

    let search = PropertySearch::new(test_client(&server.uri()));
    assert_eq!(search.state(), QueryState::Idle);

    let params = SearchParams {
        guests: Some(6),
        ..SearchParams::default()
    };
    let results = search.search(&params).await.unwrap();
    assert_eq!(results[0].guests, 8);
    assert_eq!(search.state().data(), Some(&results));

    search.reset();
    assert_eq!(search.state(), QueryState::Idle);
}

#[tokio::test]
async fn property_search_failure_is_recorded_and_returned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/properties/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let search = PropertySearch::new(test_client(&server.uri()));
    let err = search.search(&SearchParams::default()).await.unwrap_err();

    assert_eq!(err.status(), 503);
    assert_eq!(
        search.state().error(),
        Some("HTTP 503: Service Unavailable")
    );
}

#[tokio::test]
async fn reservation_actions_cancel_updates_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reservations/r-9/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "r-9",
            "status": "cancelled"
        })))
        .mount(&server)
        .await;

    let actions = ReservationActions::new(test_client(&server.uri()));
    let reservation = actions.cancel("r-9").await.unwrap();

    assert_eq!(reservation.status, ReservationStatus::Cancelled);
    assert_eq!(
        actions.state().data().map(|r| r.id.as_str()),
        Some("r-9")
    );
}

#[tokio::test]
async fn reservation_actions_create_failure_keeps_vendor_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reservations"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "message": "Dates unavailable",
            "code": "UNAVAILABLE"
        })))
        .mount(&server)
        .await;

    let actions = ReservationActions::new(test_client(&server.uri()));
    let draft = rentalwise_core::ReservationDraft {
        property_id: "p1".to_owned(),
        check_in: "2026-11-01".to_owned(),
        check_out: "2026-11-04".to_owned(),
        guests: 2,
        guest_info: rentalwise_core::GuestInfo::default(),
        special_requests: Some("Late arrival".to_owned()),
    };
    let err = actions.create(&draft).await.unwrap_err();

    assert_eq!(err.code(), Some("UNAVAILABLE"));
    assert_eq!(actions.state().error(), Some("Dates unavailable"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_set_params_settle_on_stored_params() {
    for _ in 0..300 {
        let query: Arc<Query<u32, u32>> = Arc::new(Query::new(
            |n: u32| async move { Ok::<_, VendorError>(n) }.boxed(),
            "failed",
        ));

        let first = Arc::clone(&query);
        let second = Arc::clone(&query);
        let a = tokio::spawn(async move { first.set_params(1) });
        let b = tokio::spawn(async move { second.set_params(2) });
        a.await.unwrap();
        b.await.unwrap();

        let data = *query.settled().await.data().expect("query should succeed");
        assert_eq!(
            query.set_params(data),
            None,
            "settled data {data} does not match the stored parameters"
        );
    }
}
