//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock catalog sites and test
//! discovery, pagination, extraction and persistence end-to-end.

use catalog_crawl::catalog::{BookRecord, CatalogRecord, Category, SpeciesRecord};
use catalog_crawl::config::{Config, HttpConfig, OutputConfig, SiteConfig, SiteKind};
use catalog_crawl::crawler::{persist_crawl, walk, CatalogCrawl, HttpSession};
use catalog_crawl::output::{OutputResult, SheetData, SheetOutcome, SheetWriter, XlsxWorkbook};
use catalog_crawl::crawl_and_persist;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
///
/// Pacing and retries are switched off; tests that need them set them.
fn create_test_config(server: &MockServer, kind: SiteKind, workbook_path: &str) -> Config {
    Config {
        site: SiteConfig {
            kind,
            base_url: format!("{}/", server.uri()),
            index_path: "index.html".to_string(),
        },
        http: HttpConfig {
            retries: 0,
            backoff_factor: 0.0,
            pacing_ms: 0,
            ..HttpConfig::default()
        },
        output: OutputConfig {
            workbook_path: workbook_path.to_string(),
        },
        ..Config::default()
    }
}

async fn mount_page(server: &MockServer, page_path: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.into())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn book_index(categories: &[(&str, &str)]) -> String {
    let entries: String = categories
        .iter()
        .map(|(href, name)| format!(r#"<li><a href="{}">{}</a></li>"#, href, name))
        .collect();

    format!(
        r#"<html><body>
        <div class="side_categories"><ul>
          <li><a href="catalogue/category/books_1/index.html">Books</a>
            <ul>{}</ul>
          </li>
        </ul></div>
        </body></html>"#,
        entries
    )
}

fn book_listing(items: &[&str], next: Option<&str>) -> String {
    let articles: String = items
        .iter()
        .map(|href| {
            format!(
                r#"<li><article class="product_pod"><h3><a href="{}">...</a></h3></article></li>"#,
                href
            )
        })
        .collect();
    let pager = next
        .map(|href| format!(r#"<ul class="pager"><li class="next"><a href="{}">next</a></li></ul>"#, href))
        .unwrap_or_default();

    format!(
        r#"<html><body><ol class="row">{}</ol>{}</body></html>"#,
        articles, pager
    )
}

fn book_detail(title: &str, upc: &str) -> String {
    format!(
        r#"<html><body><article class="product_page">
        <div class="product_main">
          <h1>{}</h1>
          <p class="star-rating Two"></p>
        </div>
        <div id="product_description"><h2>Product Description</h2></div>
        <p>About {}.</p>
        <table class="table table-striped">
          <tr><th>UPC</th><td>{}</td></tr>
          <tr><th>Product Type</th><td>Books</td></tr>
          <tr><th>Price (excl. tax)</th><td>£10.00</td></tr>
          <tr><th>Price (incl. tax)</th><td>£10.00</td></tr>
          <tr><th>Tax</th><td>£0.00</td></tr>
          <tr><th>Availability</th><td>In stock (3 available)</td></tr>
          <tr><th>Number of reviews</th><td>0</td></tr>
        </table>
        </article></body></html>"#,
        title, title, upc
    )
}

/// Mounts a two-category book site
///
/// - Travel: one page, two books
/// - Poetry: two pages, one book each
async fn mount_book_site(server: &MockServer) {
    mount_page(
        server,
        "/index.html",
        book_index(&[
            ("catalogue/category/books/travel_2/index.html", "\n  Travel\n  "),
            ("catalogue/category/books/poetry_23/index.html", "Poetry"),
        ]),
    )
    .await;

    mount_page(
        server,
        "/catalogue/category/books/travel_2/index.html",
        book_listing(
            &["../../../trip_10/index.html", "../../../voyage_11/index.html"],
            None,
        ),
    )
    .await;
    mount_page(
        server,
        "/catalogue/category/books/poetry_23/index.html",
        book_listing(&["../../../verses_20/index.html"], Some("page-2.html")),
    )
    .await;
    mount_page(
        server,
        "/catalogue/category/books/poetry_23/page-2.html",
        book_listing(&["../../../sonnets_21/index.html"], None),
    )
    .await;

    mount_page(server, "/catalogue/trip_10/index.html", book_detail("Trip", "u10")).await;
    mount_page(server, "/catalogue/voyage_11/index.html", book_detail("Voyage", "u11")).await;
    mount_page(server, "/catalogue/verses_20/index.html", book_detail("Verses", "u20")).await;
    mount_page(server, "/catalogue/sonnets_21/index.html", book_detail("Sonnets", "u21")).await;
}

async fn collect<R: CatalogRecord>(mut crawl: CatalogCrawl<R>) -> Vec<Category<R>> {
    let mut categories = Vec::new();
    while let Some(category) = crawl.next_category().await {
        categories.push(category);
    }
    categories
}

#[tokio::test]
async fn test_categories_yielded_in_index_order() {
    let server = MockServer::start().await;
    mount_book_site(&server).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let categories = collect(CatalogCrawl::<BookRecord>::new(&config).unwrap()).await;

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id(), 2);
    assert_eq!(categories[0].name(), "Travel");
    assert_eq!(categories[1].id(), 23);
    assert_eq!(categories[1].name(), "Poetry");

    let travel = categories[0].products();
    assert_eq!(travel.len(), 2);
    assert_eq!(travel[0].id(), "10");
    assert_eq!(travel[0].name(), "Trip");
    assert_eq!(travel[0].upc(), "u10");
    assert_eq!(travel[0].star_rating(), "Two");
    assert_eq!(travel[0].description(), "About Trip.");
    assert_eq!(
        travel[0].link(),
        format!("{}/catalogue/trip_10/index.html", server.uri())
    );
    assert_eq!(travel[1].name(), "Voyage");
}

#[tokio::test]
async fn test_pagination_follows_next_link() {
    let server = MockServer::start().await;
    mount_book_site(&server).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let categories = collect(CatalogCrawl::<BookRecord>::new(&config).unwrap()).await;

    let poetry = &categories[1];
    let names: Vec<&str> = poetry.products().iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["Verses", "Sonnets"]);
    assert_eq!(
        poetry.link(),
        format!("{}/catalogue/category/books/poetry_23/page-2.html", server.uri())
    );
}

#[tokio::test]
async fn test_failed_detail_page_yields_empty_record() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/index.html",
        book_index(&[("catalogue/category/books/travel_2/index.html", "Travel")]),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/index.html",
        book_listing(
            &["../../../broken_5/index.html", "../../../trip_10/index.html"],
            None,
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/broken_5/index.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/catalogue/trip_10/index.html", book_detail("Trip", "u10")).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let categories = collect(CatalogCrawl::<BookRecord>::new(&config).unwrap()).await;

    let products = categories[0].products();
    assert_eq!(products.len(), 2);

    assert!(products[0].is_empty());
    assert_eq!(products[0].id(), "");
    assert_eq!(
        products[0].link(),
        format!("{}/catalogue/broken_5/index.html", server.uri())
    );

    assert!(!products[1].is_empty());
    assert_eq!(products[1].name(), "Trip");
}

#[tokio::test]
async fn test_page_without_detail_container_yields_empty_record() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/index.html",
        book_index(&[("catalogue/category/books/travel_2/index.html", "Travel")]),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/index.html",
        book_listing(&["../../../moved_6/index.html"], None),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/moved_6/index.html",
        "<html><body><p>This page has moved.</p></body></html>",
    )
    .await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let categories = collect(CatalogCrawl::<BookRecord>::new(&config).unwrap()).await;

    assert_eq!(categories[0].products().len(), 1);
    assert!(categories[0].products()[0].is_empty());
}

#[tokio::test]
async fn test_escaping_listing_item_is_skipped() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/index.html",
        book_index(&[("catalogue/category/books/travel_2/index.html", "Travel")]),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/index.html",
        book_listing(
            &["../../../../../escape_1/index.html", "../../../trip_10/index.html"],
            None,
        ),
    )
    .await;
    mount_page(&server, "/catalogue/trip_10/index.html", book_detail("Trip", "u10")).await;
    Mock::given(method("GET"))
        .and(path("/escape_1/index.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let categories = collect(CatalogCrawl::<BookRecord>::new(&config).unwrap()).await;

    let products = categories[0].products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name(), "Trip");
}

#[tokio::test]
async fn test_discovery_failure_yields_single_sentinel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let mut crawl = CatalogCrawl::<BookRecord>::new(&config).unwrap();

    let sentinel = crawl.next_category().await.unwrap();
    assert!(sentinel.is_sentinel());
    assert_eq!(sentinel.id(), 0);
    assert_eq!(sentinel.name(), "");
    assert_eq!(sentinel.link(), "");
    assert!(sentinel.products().is_empty());
    assert!(!crawl.is_session_open());

    assert!(crawl.next_category().await.is_none());
    assert!(crawl.next_category().await.is_none());
}

#[tokio::test]
async fn test_empty_index_yields_nothing() {
    let server = MockServer::start().await;
    mount_page(&server, "/index.html", book_index(&[])).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let mut crawl = CatalogCrawl::<BookRecord>::new(&config).unwrap();

    assert!(crawl.next_category().await.is_none());
    assert!(!crawl.is_session_open());
}

#[tokio::test]
async fn test_session_released_after_last_category() {
    let server = MockServer::start().await;
    mount_book_site(&server).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let mut crawl = CatalogCrawl::<BookRecord>::new(&config).unwrap();

    assert!(crawl.next_category().await.is_some());
    assert!(crawl.is_session_open());
    assert!(crawl.next_category().await.is_some());
    assert!(!crawl.is_session_open());
    assert!(crawl.next_category().await.is_none());
}

#[tokio::test]
async fn test_dropping_crawl_stops_remaining_categories() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/index.html",
        book_index(&[
            ("catalogue/category/books/travel_2/index.html", "Travel"),
            ("catalogue/category/books/poetry_23/index.html", "Poetry"),
        ]),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/index.html",
        book_listing(&["../../../trip_10/index.html"], None),
    )
    .await;
    mount_page(&server, "/catalogue/trip_10/index.html", book_detail("Trip", "u10")).await;
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/poetry_23/index.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let mut crawl = CatalogCrawl::<BookRecord>::new(&config).unwrap();

    let first = crawl.next_category().await.unwrap();
    assert_eq!(first.name(), "Travel");
    drop(crawl);

    server.verify().await;
}

#[tokio::test]
async fn test_walking_twice_appends_duplicates() {
    let server = MockServer::start().await;
    mount_book_site(&server).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let session = HttpSession::new(&config).unwrap();
    let category = Category::<BookRecord>::new(
        2,
        "Travel",
        format!("{}/catalogue/category/books/travel_2/index.html", server.uri()),
    );

    let category = walk(&session, category).await;
    assert_eq!(category.products().len(), 2);

    let category = walk(&session, category).await;
    assert_eq!(category.products().len(), 4);
    assert_eq!(category.products()[0], category.products()[2]);
}

#[tokio::test]
async fn test_listing_failure_keeps_earlier_pages() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/catalogue/category/books/poetry_23/index.html",
        book_listing(&["../../../verses_20/index.html"], Some("page-2.html")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/category/books/poetry_23/page-2.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(&server, "/catalogue/verses_20/index.html", book_detail("Verses", "u20")).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let session = HttpSession::new(&config).unwrap();
    let category = Category::<BookRecord>::new(
        23,
        "Poetry",
        format!("{}/catalogue/category/books/poetry_23/index.html", server.uri()),
    );

    let category = walk(&session, category).await;
    assert_eq!(category.products().len(), 1);
    assert_eq!(category.products()[0].name(), "Verses");
}

#[tokio::test]
async fn test_retry_on_service_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/index.html",
        book_index(&[("catalogue/category/books/travel_2/index.html", "Travel")]),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/index.html",
        book_listing(&[], None),
    )
    .await;

    let mut config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    config.http.retries = 1;

    let categories = collect(CatalogCrawl::<BookRecord>::new(&config).unwrap()).await;

    assert_eq!(categories.len(), 1);
    assert!(!categories[0].is_sentinel());
    assert_eq!(categories[0].name(), "Travel");
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    config.http.retries = 3;

    let categories = collect(CatalogCrawl::<BookRecord>::new(&config).unwrap()).await;
    assert_eq!(categories.len(), 1);
    assert!(categories[0].is_sentinel());
}

/// Serves `body` on every connection, except that the first response
/// announces more bytes than it sends and closes early
///
/// Returns the page URL and a counter of accepted connections.
async fn serve_truncated_first_response(body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let hit = counter.fetch_add(1, Ordering::SeqCst);

            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let response = if hit == 0 {
                format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len() + 500,
                    &body[..10]
                )
            } else {
                format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                )
            };

            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}/page.html", addr), hits)
}

#[tokio::test]
async fn test_truncated_body_is_retried() {
    let (url, hits) =
        serve_truncated_first_response("<html><body><h1>Recovered</h1></body></html>").await;

    let server = MockServer::start().await;
    let mut config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    config.http.retries = 3;
    let session = HttpSession::new(&config).unwrap();

    let document = session.fetch(&url).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    let heading = document.select_one(&["h1"]).unwrap();
    assert_eq!(heading.text().collect::<String>(), "Recovered");
}

#[tokio::test]
async fn test_truncated_body_fails_without_retries() {
    let (url, hits) =
        serve_truncated_first_response("<html><body><h1>Recovered</h1></body></html>").await;

    let server = MockServer::start().await;
    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let session = HttpSession::new(&config).unwrap();

    assert!(session.fetch(&url).await.is_err());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_pager_cycle_ends_walk() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/catalogue/category/books/poetry_23/index.html",
        book_listing(&["../../../verses_20/index.html"], Some("page-2.html")),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/poetry_23/page-2.html",
        book_listing(&["../../../sonnets_21/index.html"], Some("index.html")),
    )
    .await;
    mount_page(&server, "/catalogue/verses_20/index.html", book_detail("Verses", "u20")).await;
    mount_page(&server, "/catalogue/sonnets_21/index.html", book_detail("Sonnets", "u21")).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let session = HttpSession::new(&config).unwrap();
    let category = Category::<BookRecord>::new(
        23,
        "Poetry",
        format!("{}/catalogue/category/books/poetry_23/index.html", server.uri()),
    );

    let category = walk(&session, category).await;

    let names: Vec<&str> = category.products().iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["Verses", "Sonnets"]);
}

#[tokio::test]
async fn test_pacing_delay_follows_each_response() {
    let server = MockServer::start().await;
    mount_page(&server, "/page.html", "<html><body></body></html>").await;

    let mut config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    config.http.pacing_ms = 150;
    let session = HttpSession::new(&config).unwrap();
    let url = format!("{}/page.html", server.uri());

    let started = Instant::now();
    session.fetch(&url).await.unwrap();
    session.fetch(&url).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_crawl_and_persist_writes_one_sheet_per_category() {
    let server = MockServer::start().await;
    mount_book_site(&server).await;

    let dir = TempDir::new().unwrap();
    let workbook_path = dir.path().join("booklist.xlsx");
    let config = create_test_config(&server, SiteKind::Books, &workbook_path.display().to_string());

    let report = crawl_and_persist(&config).await.unwrap();

    assert!(report.is_success());
    assert_eq!(report.categories, 2);
    assert_eq!(report.records, 4);
    assert_eq!(report.saved[0].outcome, SheetOutcome::CreatedWorkbook);
    assert_eq!(report.saved[1].outcome, SheetOutcome::CreatedSheet);

    let workbook = XlsxWorkbook::new(&workbook_path);
    assert_eq!(
        workbook.sheet_names().unwrap(),
        vec!["Travel".to_string(), "Poetry".to_string()]
    );

    let travel = workbook.read_sheet("Travel").unwrap().unwrap();
    assert_eq!(travel.len(), 3);
    assert_eq!(travel[0], BookRecord::COLUMNS.to_vec());
    assert_eq!(travel[1][0], "10");
    assert_eq!(travel[1][1], "Trip");
    assert_eq!(travel[2][1], "Voyage");

    // A second run appends below the existing rows
    let report = crawl_and_persist(&config).await.unwrap();
    assert!(report.saved.iter().all(|s| s.outcome == SheetOutcome::Appended));

    let travel = workbook.read_sheet("Travel").unwrap().unwrap();
    assert_eq!(travel.len(), 5);
    assert_eq!(travel[0], BookRecord::COLUMNS.to_vec());
    assert_eq!(travel[3][1], "Trip");
}

/// Sheet writer that keeps sheets in memory and fails on a chosen name
#[derive(Default)]
struct MemoryWriter {
    sheets: Vec<SheetData>,
    fail_on: Option<String>,
}

impl SheetWriter for MemoryWriter {
    fn write_sheet(&mut self, sheet: &SheetData) -> OutputResult<SheetOutcome> {
        if self.fail_on.as_deref() == Some(sheet.name.as_str()) {
            return Err(catalog_crawl::output::OutputError::Sheet {
                name: sheet.name.clone(),
                message: "refused".to_string(),
            });
        }
        self.sheets.push(sheet.clone());
        Ok(SheetOutcome::CreatedSheet)
    }
}

#[tokio::test]
async fn test_failed_sheet_does_not_stop_persisting() {
    let server = MockServer::start().await;
    mount_book_site(&server).await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let crawl = CatalogCrawl::<BookRecord>::new(&config).unwrap();
    let mut writer = MemoryWriter {
        fail_on: Some("Travel".to_string()),
        ..MemoryWriter::default()
    };

    let report = persist_crawl(crawl, &mut writer).await;

    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "Travel");
    assert_eq!(writer.sheets.len(), 1);
    assert_eq!(writer.sheets[0].name, "Poetry");
    assert_eq!(writer.sheets[0].rows.len(), 2);
}

#[tokio::test]
async fn test_discovery_failure_persists_placeholder_sheet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = create_test_config(&server, SiteKind::Books, "unused.xlsx");
    let crawl = CatalogCrawl::<BookRecord>::new(&config).unwrap();
    let mut writer = MemoryWriter::default();

    let report = persist_crawl(crawl, &mut writer).await;

    assert_eq!(report.categories, 1);
    assert_eq!(writer.sheets.len(), 1);
    assert_eq!(writer.sheets[0].name, "category_0");
    assert!(writer.sheets[0].rows.is_empty());
}

#[tokio::test]
async fn test_species_site_crawl() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/index.html",
        r#"<html><body>
        <ul class="taxa-list">
          <li><a href="taxa/12/list.html">鳥類</a></li>
          <li><a href="about.html">このサイトについて</a></li>
        </ul>
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/taxa/12/list.html",
        r#"<html><body>
        <div class="species-list">
          <div class="species-card"><a class="detail" href="../../species/1043.html">カワセミ</a></div>
        </div>
        <nav class="pagination"><span>1</span><a href="list-2.html">次へ</a></nav>
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/taxa/12/list-2.html",
        r#"<html><body>
        <div class="species-list">
          <div class="species-card"><a class="detail" href="../../species/1044.html">ヤマセミ</a></div>
        </div>
        <nav class="pagination"><a href="list.html">前へ</a><span>2</span></nav>
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/species/1043.html",
        r#"<html><body><section id="species">
          <h1 class="species-name">カワセミ</h1>
          <p class="scientific-name"><i>Alcedo atthis</i></p>
          <span class="redlist rank-NT">準絶滅危惧</span>
          <dl class="species-data"><dt>目</dt><dd>ブッポウソウ目</dd><dt>科</dt><dd>カワセミ科</dd></dl>
        </section></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/species/1044.html",
        r#"<html><body><section id="species">
          <h1 class="species-name">ヤマセミ</h1>
          <dl class="species-data"><dt>科</dt><dd>カワセミ科</dd></dl>
        </section></body></html>"#,
    )
    .await;

    let config = create_test_config(&server, SiteKind::Species, "unused.xlsx");
    let categories = collect(CatalogCrawl::<SpeciesRecord>::new(&config).unwrap()).await;

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id(), 12);
    assert_eq!(categories[0].name(), "鳥類");

    let species = categories[0].products();
    assert_eq!(species.len(), 2);
    assert_eq!(species[0].id(), "1043");
    assert_eq!(species[0].red_list(), "NT");
    assert_eq!(species[0].order(), "ブッポウソウ目");
    assert_eq!(species[1].id(), "1044");
    assert_eq!(species[1].red_list(), "");
    assert_eq!(species[1].family(), "カワセミ科");
}
