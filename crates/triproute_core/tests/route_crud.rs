mod common;

use common::{count_rows, seed_place, seed_user};
use triproute_core::db::open_db_in_memory;
use triproute_core::{
    RouteDraft, RouteHeadUpdate, RouteService, RouteServiceError, SqliteRouteStore,
};
use uuid::Uuid;

fn seaside_draft() -> RouteDraft {
    RouteDraft {
        course_name: "Seaside Loop".to_string(),
        town: Some("Busan".to_string()),
        tot_distance: 12.4,
        stops: vec!["101".to_string(), "202".to_string()],
    }
}

#[test]
fn save_route_persists_head_and_items_and_reads_back_in_order() {
    let mut conn = open_db_in_memory().unwrap();
    seed_user(&conn, "a@x.com");
    seed_place(&conn, "101", "Haeundae Beach");
    seed_place(&conn, "202", "Gwangan Bridge");

    let mut service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
    let route_id = service.save_route(&seaside_draft(), "a@x.com").unwrap();

    let view = service.get_route(route_id).unwrap();
    assert_eq!(view.id, route_id);
    assert_eq!(view.course_name, "Seaside Loop");
    assert_eq!(view.town.as_deref(), Some("Busan"));
    assert!((view.tot_distance - 12.4).abs() < f64::EPSILON);
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].place.content_id, "101");
    assert_eq!(view.items[0].place.title, "Haeundae Beach");
    assert_eq!(view.items[1].place.content_id, "202");
    assert_eq!(view.items[1].place.title, "Gwangan Bridge");
    assert!(view.tags.is_empty());
}

#[test]
fn save_route_with_unresolvable_place_persists_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    seed_user(&conn, "a@x.com");
    seed_place(&conn, "101", "Haeundae Beach");

    {
        let mut service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
        let mut draft = seaside_draft();
        draft.stops = vec!["101".to_string(), "999".to_string()];

        let err = service.save_route(&draft, "a@x.com").unwrap_err();
        match err {
            RouteServiceError::PlaceNotFound(content_id) => assert_eq!(content_id, "999"),
            other => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(count_rows(&conn, "route_heads"), 0);
    assert_eq!(count_rows(&conn, "route_items"), 0);
}

#[test]
fn save_route_for_unknown_user_fails() {
    let mut conn = open_db_in_memory().unwrap();
    seed_place(&conn, "101", "Haeundae Beach");
    seed_place(&conn, "202", "Gwangan Bridge");

    let mut service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
    let err = service
        .save_route(&seaside_draft(), "nobody@x.com")
        .unwrap_err();
    assert!(matches!(err, RouteServiceError::UserNotFound(_)));
}

#[test]
fn save_route_rejects_malformed_owner_email_before_lookup() {
    let mut conn = open_db_in_memory().unwrap();

    let mut service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
    let err = service
        .save_route(&seaside_draft(), "not-an-email")
        .unwrap_err();
    assert!(matches!(err, RouteServiceError::InvalidEmail(_)));
}

#[test]
fn save_route_rejects_blank_course_name() {
    let mut conn = open_db_in_memory().unwrap();
    seed_user(&conn, "a@x.com");

    {
        let mut service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
        let mut draft = seaside_draft();
        draft.course_name = "  ".to_string();

        let err = service.save_route(&draft, "a@x.com").unwrap_err();
        assert!(matches!(err, RouteServiceError::Validation(_)));
    }

    assert_eq!(count_rows(&conn, "route_heads"), 0);
}

#[test]
fn get_my_routes_returns_empty_list_for_user_without_routes() {
    let mut conn = open_db_in_memory().unwrap();
    seed_user(&conn, "a@x.com");

    let service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
    let routes = service.get_my_routes("a@x.com").unwrap();
    assert!(routes.is_empty());
}

#[test]
fn get_my_routes_lists_only_own_routes_with_items() {
    let mut conn = open_db_in_memory().unwrap();
    seed_user(&conn, "a@x.com");
    seed_user(&conn, "b@x.com");
    seed_place(&conn, "101", "Haeundae Beach");
    seed_place(&conn, "202", "Gwangan Bridge");

    let mut service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
    service.save_route(&seaside_draft(), "a@x.com").unwrap();

    let mut other = seaside_draft();
    other.course_name = "Bridge Walk".to_string();
    other.stops = vec!["202".to_string()];
    service.save_route(&other, "b@x.com").unwrap();

    let mine = service.get_my_routes("a@x.com").unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].course_name, "Seaside Loop");
    assert_eq!(mine[0].items.len(), 2);
}

#[test]
fn list_view_omits_content_while_single_view_includes_it() {
    let mut conn = open_db_in_memory().unwrap();
    seed_user(&conn, "a@x.com");
    seed_place(&conn, "101", "Haeundae Beach");
    seed_place(&conn, "202", "Gwangan Bridge");

    let mut service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
    let route_id = service.save_route(&seaside_draft(), "a@x.com").unwrap();
    service
        .update_route_head(&RouteHeadUpdate {
            id: route_id,
            course_name: "Seaside Loop".to_string(),
            content: Some("Two stops along the shoreline.".to_string()),
            tags: None,
        })
        .unwrap();

    let detail = service.get_route(route_id).unwrap();
    assert_eq!(
        detail.content.as_deref(),
        Some("Two stops along the shoreline.")
    );

    let listed = service.get_my_routes("a@x.com").unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, None);
}

#[test]
fn get_route_with_unknown_id_fails() {
    let mut conn = open_db_in_memory().unwrap();

    let service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
    let missing = Uuid::new_v4();
    let err = service.get_route(missing).unwrap_err();
    match err {
        RouteServiceError::RouteNotFound(id) => assert_eq!(id, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn route_view_serializes_with_schema_field_names() {
    let mut conn = open_db_in_memory().unwrap();
    seed_user(&conn, "a@x.com");
    seed_place(&conn, "101", "Haeundae Beach");
    seed_place(&conn, "202", "Gwangan Bridge");

    let mut service = RouteService::new(SqliteRouteStore::try_new(&mut conn).unwrap());
    let route_id = service.save_route(&seaside_draft(), "a@x.com").unwrap();
    let view = service.get_route(route_id).unwrap();

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["course_name"], "Seaside Loop");
    assert_eq!(json["items"][0]["place"]["content_id"], "101");
    assert_eq!(json["items"][1]["place"]["title"], "Gwangan Bridge");
    assert!(json["tags"].as_array().unwrap().is_empty());
}
