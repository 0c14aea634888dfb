//! End-to-end tests against a local HTTP server.

use std::io::Write;

use katsuragi::{Error, FetchError, Fetcher, FetcherOptions, LinkCategory};

fn fetcher() -> Fetcher {
    fetcher_with(FetcherOptions::default())
}

fn fetcher_with(options: FetcherOptions) -> Fetcher {
    match Fetcher::new(&options) {
        Ok(fetcher) => fetcher,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

fn html_page(server: &mut mockito::Server, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create()
}

#[test]
fn title_over_http() {
    let mut server = mockito::Server::new();
    let _page = html_page(
        &mut server,
        "<html><head><title>Test</title></head><body><h1>test</h1></body></html>",
    );

    let result = fetcher().title(&server.url());
    assert_eq!(result, Ok("Test".to_string()));
}

#[test]
fn repeated_calls_fetch_once() {
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(r#"<html><head><title>Once</title><meta name="description" content="Only once"></head></html>"#)
        .expect(1)
        .create();

    let fetcher = fetcher();
    let url = server.url();
    assert_eq!(fetcher.title(&url), Ok("Once".to_string()));
    assert_eq!(fetcher.title(&url), Ok("Once".to_string()));
    assert_eq!(fetcher.description(&url), Ok("Only once".to_string()));
    page.assert();
}

#[test]
fn bad_status_is_cached() {
    let mut server = mockito::Server::new();
    let page = server.mock("GET", "/").with_status(404).expect(1).create();

    let fetcher = fetcher();
    let url = server.url();
    let expected = Err(Error::Fetch(FetchError::Status(404)));
    assert_eq!(fetcher.title(&url), expected);
    assert_eq!(fetcher.description(&url), expected);
    assert_eq!(fetcher.links(&url, LinkCategory::All).map(|_| ()), Err(Error::Fetch(FetchError::Status(404))));
    page.assert();
}

#[test]
fn clear_cache_allows_refetch() {
    let mut server = mockito::Server::new();
    let page = server.mock("GET", "/").with_status(500).expect(2).create();

    let fetcher = fetcher();
    let url = server.url();
    assert!(fetcher.title(&url).is_err());
    assert!(fetcher.title(&url).is_err());
    fetcher.clear_cache();
    assert!(fetcher.title(&url).is_err());
    page.assert();
}

#[test]
fn non_html_content_type_rejected() {
    let mut server = mockito::Server::new();
    let _page = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create();

    let result = fetcher().title(&server.url());
    assert_eq!(
        result,
        Err(Error::Fetch(FetchError::ContentType("application/json".to_string())))
    );
}

#[test]
fn empty_body_is_parse_error() {
    let mut server = mockito::Server::new();
    let _page = html_page(&mut server, "");

    let result = fetcher().title(&server.url());
    assert!(matches!(result, Err(Error::Parse(_))), "got {result:?}");
}

#[test]
fn user_agent_header_sent() {
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", "/")
        .match_header("user-agent", "test-agent")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><head><title>Agent</title></head></html>")
        .create();

    let fetcher = fetcher_with(FetcherOptions {
        user_agent: "test-agent".to_string(),
        ..FetcherOptions::default()
    });
    assert_eq!(fetcher.title(&server.url()), Ok("Agent".to_string()));
    page.assert();
}

#[test]
fn header_charset_decodes_body() {
    let mut server = mockito::Server::new();
    let _page = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html; charset=windows-1252")
        .with_body(&b"<html><head><title>Caf\xE9</title></head></html>"[..])
        .create();

    assert_eq!(fetcher().title(&server.url()), Ok("Café".to_string()));
}

#[test]
fn unreachable_host_is_fetch_error() {
    let fetcher = fetcher_with(FetcherOptions {
        timeout_ms: 1000,
        ..FetcherOptions::default()
    });

    let result = fetcher.title("http://127.0.0.1:9");
    assert!(
        matches!(result, Err(Error::Fetch(FetchError::Unreachable(_)))),
        "got {result:?}"
    );
    // The failure is served from cache the second time
    assert_eq!(fetcher.title("http://127.0.0.1:9"), result);
}

#[test]
fn slow_body_times_out_and_is_cached() {
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_chunked_body(|w| {
            std::thread::sleep(std::time::Duration::from_millis(1500));
            w.write_all(b"<html><head><title>Late</title></head></html>")
        })
        .expect(1)
        .create();

    let fetcher = fetcher_with(FetcherOptions {
        timeout_ms: 300,
        ..FetcherOptions::default()
    });
    let url = server.url();
    let expected = Err(Error::Fetch(FetchError::Timeout(300)));
    assert_eq!(fetcher.title(&url), expected);
    assert_eq!(fetcher.title(&url), expected);
    page.assert();
}

#[test]
fn invalid_url_never_reaches_network() {
    let fetcher = fetcher();
    assert!(matches!(fetcher.title("http:/"), Err(Error::Validation(_))));
    assert!(matches!(fetcher.links("", LinkCategory::All), Err(Error::Validation(_))));
    assert!(fetcher.cache().is_empty());
}

#[test]
fn multiple_favicons() {
    let mut server = mockito::Server::new();
    let _page = html_page(
        &mut server,
        r#"<html><head>
            <link rel="icon" href="favicon.ico" sizes="16x16">
            <link rel="icon" href="favicon-32.png" sizes="32x32">
            <link rel="apple-touch-icon" href="apple-touch-icon.png" sizes="180x180">
        </head><body></body></html>"#,
    );

    let url = server.url();
    let result = fetcher().favicons(&url);
    assert_eq!(
        result,
        Ok(vec![
            format!("{url}/favicon.ico"),
            format!("{url}/favicon-32.png"),
            format!("{url}/apple-touch-icon.png"),
        ])
    );
}

#[test]
fn favicon_fallback_found() {
    let mut server = mockito::Server::new();
    let _page = html_page(&mut server, "<html><head><title>No Favicons Here</title></head></html>");
    let icon = server
        .mock("GET", "/favicon.ico")
        .with_status(200)
        .with_header("content-type", "image/x-icon")
        .with_body([0_u8, 0, 1, 0])
        .expect(1)
        .create();

    let url = server.url();
    assert_eq!(fetcher().favicons(&url), Ok(vec![format!("{url}/favicon.ico")]));
    icon.assert();
}

#[test]
fn favicon_fallback_missing() {
    let mut server = mockito::Server::new();
    let _page = html_page(&mut server, "<html><head><title>No Favicons Here</title></head></html>");
    let _icon = server.mock("GET", "/favicon.ico").with_status(404).create();

    assert_eq!(fetcher().favicons(&server.url()), Err(Error::NotFound("favicons")));
}

#[test]
fn favicon_fallback_skipped_when_declared() {
    let mut server = mockito::Server::new();
    let _page = html_page(&mut server, r#"<html><head><link rel="icon" href="/icon.png"></head></html>"#);
    let icon = server.mock("GET", "/favicon.ico").with_status(200).expect(0).create();

    let url = server.url();
    assert_eq!(fetcher().favicons(&url), Ok(vec![format!("{url}/icon.png")]));
    icon.assert();
}

#[test]
fn links_by_category() {
    let mut server = mockito::Server::new();
    let url = server.url();
    let _page = html_page(
        &mut server,
        &format!(
            r#"<html><body>
                <a href="{url}/internal1">Internal 1</a>
                <a href="/internal2">Internal 2</a>
                <a href="http://external.com">External</a>
            </body></html>"#
        ),
    );

    let fetcher = fetcher();
    let internal1 = format!("{url}/internal1");
    let internal2 = format!("{url}/internal2");

    assert_eq!(
        fetcher.links(&url, LinkCategory::All),
        Ok(vec![internal1.clone(), internal2.clone(), "http://external.com".to_string()])
    );
    assert_eq!(
        fetcher.links(&url, LinkCategory::Internal),
        Ok(vec![internal1, internal2])
    );
    // Absolute hrefs are kept as written, not re-serialized
    assert_eq!(
        fetcher.links(&url, LinkCategory::External),
        Ok(vec!["http://external.com".to_string()])
    );
}

#[test]
fn links_not_found() {
    let mut server = mockito::Server::new();
    let _page = html_page(&mut server, "<html><body><p>nothing to follow</p></body></html>");

    assert_eq!(
        fetcher().links(&server.url(), LinkCategory::All),
        Err(Error::NotFound("links"))
    );
}
