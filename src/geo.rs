//! The module responsible for querying location data from [ip-api](https://ip-api.com).
//!

use std::time::Duration;

use log::{debug, info};
use reqwest::{
    blocking::{Client, Request},
    header::USER_AGENT,
    StatusCode,
};
use thiserror::Error;
use urlencoding::encode;

use crate::location::LocationInfo;

/// Base address, the location is appended as the last path segment.
pub const ENDPOINT: &str = "http://ip-api.com/json/";

/// Bitmask asking ip-api for every field of [`LocationInfo`].
pub const FIELDS_MASK: u32 = 37482495;

/// How long one query may take.
pub const TIMEOUT: Duration = Duration::from_secs(30);

/// Failure while querying location data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server did not answer in time.
    #[error("Request timed out")]
    Timeout,
    /// ip-api allows a limited number of queries per minute.
    #[error("Too many requests. Please wait 1 minute")]
    RateLimited,
    /// Any other non 200 answer.
    #[error("HTTP Error: {0}")]
    Http(StatusCode),
    /// The answer arrived but reports a failed query.
    #[error("{0}")]
    Upstream(String),
    /// The answer is not a location record.
    #[error("Unable to recognize json response from server: {0}")]
    Decode(#[from] serde_json::Error),
    /// Connection level failure.
    #[error("Error connecting to server: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(e)
        }
    }
}

/// Queries location data for the current or a given address.
///
/// * `endpoint: String` - Base address of the API.
/// * `timeout: Duration` - Limit for one query.
#[derive(Debug, Clone)]
pub struct Fetcher {
    /// Base address of the API.
    endpoint: String,
    /// Limit for one query.
    timeout: Duration,
}

impl Fetcher {
    /// Create fetcher for the public ip-api endpoint.
    pub fn new() -> Fetcher {
        Fetcher {
            endpoint: ENDPOINT.to_owned(),
            timeout: TIMEOUT,
        }
    }

    /// Use another base address, it must end with `/`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Fetcher {
        self.endpoint = endpoint.into();
        self
    }

    /// Use another query time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Fetcher {
        self.timeout = timeout;
        self
    }

    /// Address for `location`, an IP address or a domain name. `None` asks
    /// about the caller's own address.
    pub fn url(&self, location: Option<&str>) -> String {
        let location = location.map(encode).unwrap_or_default();
        format!("{}{}?fields={}", self.endpoint, location, FIELDS_MASK)
    }

    /// Build the query without sending it.
    pub fn request(&self, client: &Client, location: Option<&str>) -> Result<Request, FetchError> {
        let user_agent = format!("meridian/{}", env!("CARGO_PKG_VERSION"));
        let request = client
            .get(self.url(location))
            .header(USER_AGENT, user_agent)
            .build()?;
        Ok(request)
    }

    /// Get location data for `location`, see [`Fetcher::url`].
    pub fn fetch(&self, location: Option<&str>) -> Result<LocationInfo, FetchError> {
        // Client for url query
        let client = Client::builder().timeout(self.timeout).build()?;
        let request = self.request(&client, location)?;
        info!("querying {}", request.url());

        let response = client.execute(request)?;
        let status = response.status();
        debug!("answer status {}", status);
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        } else if status != StatusCode::OK {
            return Err(FetchError::Http(status));
        }

        let body = response.text()?;
        let info: LocationInfo = serde_json::from_str(&body)?;
        if !info.is_success() {
            return Err(FetchError::Upstream(info.message));
        }
        Ok(info)
    }
}

impl Default for Fetcher {
    fn default() -> Fetcher {
        Fetcher::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{net::TcpListener, thread, time::Duration};

    use mockito::{Matcher, Server};
    use reqwest::{blocking::Client, header::USER_AGENT, Method, StatusCode};

    use super::{FetchError, Fetcher};

    const SUCCESS: &str = concat!(
        r#"{"status":"success","continent":"North America","country":"United States","#,
        r#""countryCode":"US","city":"San Francisco","lat":37.7749,"lon":-122.4194,"#,
        r#""offset":-28800,"mobile":false,"proxy":false,"query":"8.8.8.8"}"#
    );

    fn fetcher(server: &Server) -> Fetcher {
        Fetcher::new().with_endpoint(format!("{}/json/", server.url()))
    }

    #[test]
    fn test_setup_request() {
        let client = Client::new();
        let request = Fetcher::new().request(&client, None).unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().as_str(), "http://ip-api.com/json/?fields=37482495");
        let agent = request.headers()[USER_AGENT].to_str().unwrap();
        assert_eq!(agent, format!("meridian/{}", env!("CARGO_PKG_VERSION")));

        let request = Fetcher::new().request(&client, Some("google.com")).unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://ip-api.com/json/google.com?fields=37482495"
        );
    }

    #[test]
    fn test_url_encodes_location() {
        assert_eq!(
            Fetcher::new().url(Some("a b/c")),
            "http://ip-api.com/json/a%20b%2Fc?fields=37482495"
        );
    }

    #[test]
    fn test_fetch_success() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/json/8.8.8.8")
            .match_query(Matcher::UrlEncoded("fields".into(), "37482495".into()))
            .match_header("user-agent", Matcher::Regex("^meridian/".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SUCCESS)
            .create();

        let info = fetcher(&server).fetch(Some("8.8.8.8")).unwrap();
        mock.assert();
        assert_eq!(info.country, "United States");
        assert_eq!(info.city, "San Francisco");
        assert_eq!(info.timezone_offset, -28800);
        assert_eq!(info.ip, "8.8.8.8");
    }

    #[test]
    fn test_fetch_own_address() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/json/")
            .match_query(Matcher::Any)
            .with_body(SUCCESS)
            .create();

        let info = fetcher(&server).fetch(None).unwrap();
        mock.assert();
        assert_eq!(info.country, "United States");
    }

    #[test]
    fn test_fetch_rate_limited() {
        let mut server = Server::new();
        server
            .mock("GET", "/json/")
            .match_query(Matcher::Any)
            .with_status(429)
            .create();

        let err = fetcher(&server).fetch(None).unwrap_err();
        assert!(matches!(err, FetchError::RateLimited));
        assert_eq!(err.to_string(), "Too many requests. Please wait 1 minute");
    }

    #[test]
    fn test_fetch_http_error() {
        let mut server = Server::new();
        server
            .mock("GET", "/json/")
            .match_query(Matcher::Any)
            .with_status(503)
            .create();

        let err = fetcher(&server).fetch(None).unwrap_err();
        assert!(matches!(
            err,
            FetchError::Http(status) if status == StatusCode::SERVICE_UNAVAILABLE
        ));
    }

    #[test]
    fn test_fetch_upstream_failure() {
        let mut server = Server::new();
        server
            .mock("GET", "/json/bogus")
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"fail","message":"invalid query","query":"bogus"}"#)
            .create();

        let err = fetcher(&server).fetch(Some("bogus")).unwrap_err();
        assert!(matches!(&err, FetchError::Upstream(message) if message == "invalid query"));
        assert_eq!(err.to_string(), "invalid query");
    }

    #[test]
    fn test_fetch_bad_body() {
        let mut server = Server::new();
        server
            .mock("GET", "/json/")
            .match_query(Matcher::Any)
            .with_body("<html>not json</html>")
            .create();

        let err = fetcher(&server).fetch(None).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_fetch_timeout() {
        // Accepts the connection but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                thread::sleep(Duration::from_secs(5));
                drop(stream);
            }
        });

        let err = Fetcher::new()
            .with_endpoint(format!("http://{}/json/", addr))
            .with_timeout(Duration::from_millis(200))
            .fetch(None)
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout));
    }
}
