//! Module responsible for program logic.
//!
use std::io::{stdout, Write};

use log::debug;

use crate::{
    error::Result,
    exec,
    geo::Fetcher,
    info::BuildInfo,
    init::{Command, Request},
    location::{self, render, LocationInfo},
};

/// Work struct with the request of this run and the fetcher serving it.
///
/// * `request: Request` - What to query and display.
/// * `fetcher: Fetcher` - Source of location data.
pub struct Work {
    /// What to query and display.
    request: Request,
    /// Source of location data.
    fetcher: Fetcher,
}

impl Work {
    /// Create work for `request` against the public API.
    pub fn new(request: Request) -> Work {
        Work::with_fetcher(request, Fetcher::new())
    }

    /// Create work for `request` with a given fetcher.
    pub fn with_fetcher(request: Request, fetcher: Fetcher) -> Work {
        Work { request, fetcher }
    }

    /// Carry out the request.
    pub fn run(&self) -> Result<()> {
        match &self.request.command {
            // Program information needs no query.
            Command::Info => {
                print!("{}", BuildInfo::current().show());
                Ok(())
            }
            Command::Show => {
                let info = self.locate()?;
                print!("{}", render::text(&info, &self.request.fields));
                Ok(())
            }
            Command::Json => {
                let info = self.locate()?;
                let json = render::json(&info, &self.request.fields)?;
                let mut out = stdout().lock();
                out.write_all(&json)?;
                writeln!(out)?;
                Ok(())
            }
            Command::Exec { template } => {
                let info = self.locate()?;
                let args = exec::render_template(template, &info)?;
                exec::run(&args)?;
                Ok(())
            }
        }
    }

    /// Check the requested fields, then query location data.
    fn locate(&self) -> Result<LocationInfo> {
        location::validate(&self.request.fields)?;
        debug!("fields {:?} are valid", self.request.fields);
        Ok(self.fetcher.fetch(self.request.location())?)
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::Work;
    use crate::{
        error::MeridianError,
        exec::TemplateError,
        geo::{FetchError, Fetcher},
        init::{Command, Request},
        location::InvalidField,
    };

    fn request(fields: &[&str], command: Command) -> Request {
        Request {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            location: None,
            command,
        }
    }

    #[test]
    fn test_invalid_field_stops_before_query() {
        let mut server = Server::new();
        let mock = server.mock("GET", Matcher::Any).expect(0).create();
        let fetcher = Fetcher::new().with_endpoint(format!("{}/json/", server.url()));

        let work = Work::with_fetcher(request(&["Country", "Status"], Command::Show), fetcher);
        let err = work.run().unwrap_err();
        mock.assert();
        assert!(matches!(
            err,
            MeridianError::InvalidField(InvalidField(ref name)) if name == "Status"
        ));
        assert_eq!(err.to_string(), "Invalid field name Status");
    }

    #[test]
    fn test_fetch_error_is_reported() {
        let mut server = Server::new();
        server
            .mock("GET", "/json/")
            .match_query(Matcher::Any)
            .with_status(429)
            .create();
        let fetcher = Fetcher::new().with_endpoint(format!("{}/json/", server.url()));

        let err = Work::with_fetcher(request(&["All"], Command::Json), fetcher)
            .run()
            .unwrap_err();
        assert!(matches!(err, MeridianError::Fetch(FetchError::RateLimited)));
    }

    #[test]
    fn test_template_error_is_reported() {
        let mut server = Server::new();
        server
            .mock("GET", "/json/")
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"success","country":"United States"}"#)
            .create();
        let fetcher = Fetcher::new().with_endpoint(format!("{}/json/", server.url()));

        let command = Command::Exec {
            template: "echo {{Planet}}".to_owned(),
        };
        let err = Work::with_fetcher(request(&["City"], command), fetcher)
            .run()
            .unwrap_err();
        assert!(matches!(
            err,
            MeridianError::Template(TemplateError::UnknownField(ref name)) if name == "Planet"
        ));
    }

    #[test]
    fn test_show_success() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/json/")
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"success","country":"United States"}"#)
            .create();
        let fetcher = Fetcher::new().with_endpoint(format!("{}/json/", server.url()));

        assert!(Work::with_fetcher(request(&["Country"], Command::Show), fetcher)
            .run()
            .is_ok());
        mock.assert();
    }
}
