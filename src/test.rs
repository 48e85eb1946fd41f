//! Shared fixtures plus end-to-end tests over the HTTP surface.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::datasets::Snapshot;
use crate::services::DataSources;
use crate::services::loader_service::{SourceBytes, parse_snapshot};

pub(crate) const PROVIDERS_CSV: &str = "\
Provider_ID,Name,Type,Address,City,Contact,Email
1,Green Grocer,Grocery Store,1 Main St,Springfield,555-0101,green@example.com
2,Daily Bread,Restaurant,2 Oak Ave,Shelbyville,555-0102,bread@example.com
3,Harvest Hub,Supermarket,3 Pine Rd,Springfield,555-0103,harvest@example.com
";

pub(crate) const RECEIVERS_CSV: &str = "\
Receiver_ID,Name,Type,City,Contact
1,Hope Shelter,Shelter,Springfield,555-0201
2,City Pantry,NGO,Capital City,555-0202
";

pub(crate) const LISTINGS_CSV: &str = "\
Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type
1,Bread,10,3/17/2025,1,Grocery Store,Springfield,Vegetarian,Breakfast
2,Soup,abc,3/18/2025,2,Restaurant,Shelbyville,Vegan,Dinner
3,Rice,1500,3/19/2025,3,Supermarket,Springfield,Vegetarian,Lunch
4,Fish,5,3/20/2025,9,Restaurant,Ogdenville,Non-Vegetarian,Dinner
";

pub(crate) const CLAIMS_CSV: &str = "\
Claim_ID,Food_ID,Receiver_ID,Status,Timestamp
1,1,1,Completed,3/5/2025 5:26
2,3,1,completed,3/6/2025 9:00
3,2,2,Pending,3/7/2025 10:00
4,99,2,Cancelled,3/8/2025 11:00
5,3,2,Completed,3/9/2025 12:00
";

// Helper to build the fixture snapshot without touching the filesystem
pub(crate) fn fixture_snapshot() -> Snapshot {
    parse_snapshot(&SourceBytes {
        providers: PROVIDERS_CSV.as_bytes(),
        receivers: RECEIVERS_CSV.as_bytes(),
        listings: LISTINGS_CSV.as_bytes(),
        claims: CLAIMS_CSV.as_bytes(),
    })
    .expect("fixture must parse")
}

// Helper to write the fixture CSVs into a fresh temporary directory
pub(crate) fn write_fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let sources = fixture_sources(dir.path());

    fs::write(&sources.providers, PROVIDERS_CSV).expect("Failed to write providers");
    fs::write(&sources.receivers, RECEIVERS_CSV).expect("Failed to write receivers");
    fs::write(&sources.listings, LISTINGS_CSV).expect("Failed to write listings");
    fs::write(&sources.claims, CLAIMS_CSV).expect("Failed to write claims");

    dir
}

pub(crate) fn fixture_sources(dir: &Path) -> DataSources {
    DataSources::in_dir(
        dir,
        "providers_data.csv",
        "receivers_data.csv",
        "food_listings_data.csv",
        "claims_data.csv",
    )
}

pub(crate) fn fixture_config(dir: &Path) -> crate::config::Config {
    let data_dir = dir.to_string_lossy().to_string();
    crate::config::Config::from_lookup(|key| match key {
        "DATA_DIR" => Some(data_dir.clone()),
        "PORT" => Some("0".to_string()),
        _ => None,
    })
    .expect("fixture config")
}

#[cfg(test)]
mod end_to_end_tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        extract::ws::Message,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::controller::Controller;
    use crate::handlers::{AppState, create_router};

    fn setup_app() -> (TempDir, Arc<Controller>, Router) {
        let dir = write_fixture_dir();
        let controller = Arc::new(Controller::start(fixture_config(dir.path())).unwrap());
        let app = create_router(AppState::new(controller.clone()));
        (dir, controller, app)
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(app, "GET", uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_dir, _controller, app) = setup_app();
        let (status, json) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["snapshot"]["claims"], 5);
        assert_eq!(json["snapshot"]["lookup_misses"], 1);
    }

    #[tokio::test]
    async fn test_report_list() {
        let (_dir, _controller, app) = setup_app();
        let (status, json) = get_json(app, "/api/reports").await;

        assert_eq!(status, StatusCode::OK);
        let reports = json.as_array().unwrap();
        assert_eq!(reports.len(), 13);
        assert_eq!(reports[0]["id"], "report_01");
        assert_eq!(reports[4]["shape"], "scalar");
        assert_eq!(reports[2]["uses_city"], true);
    }

    #[tokio::test]
    async fn test_single_report() {
        let (_dir, _controller, app) = setup_app();
        let (status, json) = get_json(app, "/api/reports/report_05").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["shape"], "scalar");
        assert_eq!(json["display"], "1,515");
    }

    #[tokio::test]
    async fn test_contact_report_with_city() {
        let (_dir, _controller, app) = setup_app();
        let (status, json) = get_json(app, "/api/reports/report_03?city=Springfield").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["columns"], serde_json::json!(["Name", "Contact", "Email"]));
        assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_city_renders_empty_table() {
        let (_dir, _controller, app) = setup_app();
        let (status, json) = get_json(app, "/api/reports/report_03?city=Atlantis").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["rows"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_report() {
        let (_dir, _controller, app) = setup_app();
        let (status, json) = get_json(app, "/api/reports/report_42").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Report not found: report_42");
    }

    #[tokio::test]
    async fn test_catalog_and_cities() {
        let (_dir, _controller, app) = setup_app();
        let (status, json) = get_json(app.clone(), "/api/catalog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 13);

        let (status, json) = get_json(app, "/api/cities").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!(["Shelbyville", "Springfield"]));
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (_dir, _controller, app) = setup_app();
        let (status, body) = send(app, "GET", "/?city=Springfield").await;
        let html = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Food Donation Dashboard"));
        assert!(html.contains("id=\"report_13\""));
        assert!(html.contains("<option value=\"Springfield\" selected>"));
        assert!(html.contains("Harvest Hub"));
    }

    #[tokio::test]
    async fn test_text_rendering() {
        let (_dir, _controller, app) = setup_app();
        let (status, body) = send(app, "GET", "/reports.txt").await;
        let text = String::from_utf8(body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("[report_05] Total Food Available"));
        assert!(text.contains("Total Quantity Available: 1,515"));
    }

    #[tokio::test]
    async fn test_reload_swaps_snapshot() {
        let (dir, controller, app) = setup_app();
        let before = controller.snapshot().await;

        let (status, _) = send(app.clone(), "GET", "/api/reload").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, body) = send(app.clone(), "POST", "/api/reload").await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"], "unchanged");
        assert!(Arc::ptr_eq(&before, &controller.snapshot().await));

        let claims = fixture_sources(dir.path()).claims;
        let mut content = fs::read_to_string(&claims).unwrap();
        content.push_str("6,1,2,Completed,3/10/2025 8:00\n");
        fs::write(&claims, content).unwrap();

        let (status, body) = send(app, "POST", "/api/reload").await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"], "replaced");

        let after = controller.snapshot().await;
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before.claims.len(), 5);
        assert_eq!(after.claims.len(), 6);
    }

    #[tokio::test]
    async fn test_reload_notifies_dashboards_only_on_change() {
        let dir = write_fixture_dir();
        let controller = Arc::new(Controller::start(fixture_config(dir.path())).unwrap());
        let state = AppState::new(controller);
        let app = create_router(state.clone());

        let (tx, mut rx) = mpsc::channel::<Message>(4);
        state.connection_manager.register(Uuid::new_v4(), tx).await;

        let (status, _) = send(app.clone(), "POST", "/api/reload").await;
        assert_eq!(status, StatusCode::OK);
        assert!(rx.try_recv().is_err());

        let claims = fixture_sources(dir.path()).claims;
        let mut content = fs::read_to_string(&claims).unwrap();
        content.push_str("6,1,2,Completed,3/10/2025 8:00\n");
        fs::write(&claims, content).unwrap();

        let (status, _) = send(app, "POST", "/api/reload").await;
        assert_eq!(status, StatusCode::OK);
        let Ok(Message::Text(text)) = rx.try_recv() else {
            panic!("expected a snapshot_reloaded frame");
        };
        let json: Value = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(json["type"], "snapshot_reloaded");
        assert_eq!(json["data"]["outcome"], "replaced");
    }
}
