//! End-to-end search flow against a mock API: session, client and view model
//! together, as the binary wires them.

use bytes::Bytes;
use ebooktw::history::{HistoryStore, MemoryHistory};
use ebooktw::results::{RowContent, RowPath, Selection, ViewState};
use ebooktw::session::{self, RecoveryOption, SearchEvent, SearchOutcome, SearchSession};
use ebooktw::settings::Settings;
use ebooktw::thumbnail::{ThumbnailLoader, ThumbnailSlots};
use ebooktw_api::{ClientConfig, SearchClient, SearchParameter};
use image::ImageFormat;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Arc<SearchClient> {
    let config = ClientConfig::default().with_base_url(server.uri());
    Arc::new(SearchClient::new(config).expect("mock server config is valid"))
}

fn three_body() -> serde_json::Value {
    json!({
        "keywords": "三體",
        "id": "r-1",
        "results": [
            {
                "bookstore": {"id": "readmoo", "displayName": "Readmoo", "isOnline": true},
                "books": [
                    {"thumbnail": "", "title": "三體", "link": "https://readmoo/1", "priceCurrency": "TWD", "price": 280},
                    {"thumbnail": "", "title": "三體 II", "link": "https://readmoo/2", "priceCurrency": "TWD", "price": 300},
                    {"thumbnail": "", "title": "三體 III", "link": "https://readmoo/3", "priceCurrency": "TWD"}
                ],
                "isOkay": true,
                "status": ""
            },
            {
                "bookstore": {"id": "kobo", "displayName": "Kobo", "isOnline": false},
                "books": [],
                "isOkay": true,
                "status": ""
            }
        ]
    })
}

async fn run_once(
    session: &mut SearchSession<MemoryHistory>,
    client: &Arc<SearchClient>,
    parameter: SearchParameter,
    settings: &Settings,
) -> SearchOutcome {
    let (tx, mut rx) = mpsc::channel(1);
    let ticket = session.begin(parameter);
    session::spawn_search(Arc::clone(client), ticket, settings, tx);
    let Some(SearchEvent::Completed { ticket, result }) = rx.recv().await else {
        panic!("search task ended without a reply");
    };
    session.complete(&ticket, result)
}

#[tokio::test]
async fn keyword_search_then_expand() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/searches"))
        .and(query_param("q", "三體"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = SearchSession::new(MemoryHistory::new(10));
    let outcome = run_once(
        &mut session,
        &client,
        SearchParameter::Keyword("三體".into()),
        &Settings::default(),
    )
    .await;
    assert_eq!(outcome, SearchOutcome::Loaded);

    let view = session.view_mut();
    assert_eq!(view.state(0), Some(ViewState::Collapsed));
    assert_eq!(view.row_count(0), 2);
    assert_eq!(view.state(1), Some(ViewState::NotOnline));
    assert_eq!(view.row_count(1), 1);

    let script = view.toggle(0, &[RowPath::new(0, 0), RowPath::new(0, 1)]);
    assert_eq!(view.state(0), Some(ViewState::Expanded));
    assert_eq!(view.row_count(0), 4);
    assert_eq!(script.removed, [1]);
    assert_eq!(script.inserted, [1, 2, 3]);

    assert!(matches!(
        view.row_content(0, 2),
        Some(RowContent::Book(book)) if book.price.is_none()
    ));
    assert_eq!(
        view.select(0, 1, &[]),
        Selection::OpenLink("https://readmoo/2".into())
    );

    assert_eq!(session.history().list(""), ["三體"]);
}

#[tokio::test]
async fn share_link_fetches_stored_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/searches/r-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_body()))
        .expect(1)
        .mount(&server)
        .await;

    let parameter = ebooktw_api::parse_search_link("https://ebook.yuer.tw/searches/r-1")
        .expect("share link parses");
    let client = client_for(&server);
    let mut session = SearchSession::new(MemoryHistory::new(10));
    let outcome = run_once(&mut session, &client, parameter, &Settings::default()).await;

    assert_eq!(outcome, SearchOutcome::Loaded);
    assert_eq!(session.view().header(0), Some("Readmoo"));
    // Result links are not keywords and stay out of history.
    assert!(session.history().list("").is_empty());

    let current = session.current().expect("search not cancelled");
    let shared = client.share_url(current).expect("default share base is valid");
    assert_eq!(
        shared.as_str(),
        "https://taiwan-ebook-lover.github.io/searches/r-1"
    );
    assert_eq!(
        session::open_link(shared.as_str()).expect("share link reopens"),
        SearchParameter::ResultId("r-1".into())
    );
}

#[tokio::test]
async fn server_error_keeps_loading_and_offers_recovery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/searches"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "維護中，請稍後再試"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = SearchSession::new(MemoryHistory::new(10));
    let outcome = run_once(
        &mut session,
        &client,
        SearchParameter::Keyword("沙丘".into()),
        &Settings::default(),
    )
    .await;

    let SearchOutcome::Failed { error, recovery } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(error.message(), "維護中，請稍後再試");
    assert_eq!(
        recovery,
        [
            RecoveryOption::Retry,
            RecoveryOption::SwitchToLegacy,
            RecoveryOption::Cancel
        ]
    );
    assert_eq!(session.view().state(0), Some(ViewState::Loading));
}

#[tokio::test]
async fn verbose_setting_reaches_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/searches"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = SearchSession::new(MemoryHistory::new(10));
    let settings = Settings {
        verbose_errors: true,
        ..Default::default()
    };
    let outcome = run_once(
        &mut session,
        &client,
        SearchParameter::Keyword("x".into()),
        &settings,
    )
    .await;

    let SearchOutcome::Failed { error, .. } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(error.message(), "HTTP Error 502\nNo data");
}

#[tokio::test]
async fn thumbnail_download_applies_to_waiting_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/covers/1.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec()),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let loader = ThumbnailLoader::new(client.http().clone());
    let mut slots = ThumbnailSlots::new();
    let url = format!("{}/covers/1.png", server.uri());
    let request = slots
        .request(RowPath::new(0, 0), &url, &Settings::default())
        .expect("slot requested");

    let bytes: Bytes = loader.fetch(&request).await.expect("download");
    let thumb = slots
        .accept(request.path, &request.url, bytes)
        .expect("row still wants this cover");
    assert_eq!(thumb.format, ImageFormat::Png);
}
