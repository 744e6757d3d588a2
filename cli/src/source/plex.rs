//! Plex Web API client.
//!
//! Only two endpoints are used: the section list and the contents of one
//! section. Both answer with XML.

use plexdiff_engine::{BoxError, RawRecord, RecordSource};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::collections::HashMap;
use std::time::Duration;

/// Section type holding movies.
const MOVIE_SECTION_TYPE: &str = "movie";

/// Errors from talking to a Plex server.
#[derive(Debug, thiserror::Error)]
pub enum PlexError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("invalid XML: {0}")]
    Xml(String),

    #[error("movie section {0:?} has no key")]
    MissingSectionKey(String),
}

// Request URLs carry the token as a query parameter
impl From<reqwest::Error> for PlexError {
    fn from(err: reqwest::Error) -> Self {
        PlexError::Http(err.without_url())
    }
}

/// A movie section on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Display name; becomes the library of every movie in the section
    pub name: Option<String>,
    /// Section id used in the contents URL
    pub key: String,
}

/// Blocking client for one Plex server.
pub struct PlexClient {
    base_url: String,
    token: String,
    http: Client,
}

impl PlexClient {
    pub fn new(address: &str, token: &str, timeout: Duration) -> Result<Self, PlexError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url(address),
            token: token.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the movie sections of the server, in server order.
    pub fn list_sections(&self) -> Result<Vec<Section>, PlexError> {
        let xml = self.get("/library/sections")?;
        parse_sections(&xml)
    }

    /// List the titles in one section. A movie without a title yields `None`.
    pub fn list_movies(&self, section_key: &str) -> Result<Vec<Option<String>>, PlexError> {
        let xml = self.get(&format!("/library/sections/{section_key}/all"))?;
        parse_movies(&xml)
    }

    fn get(&self, path: &str) -> Result<String, PlexError> {
        tracing::debug!("GET {}{}", self.base_url, path);

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[("X-Plex-Token", self.token.as_str())])
            .header(ACCEPT, "application/xml")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlexError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}

/// A Plex server as a record source: one raw record per movie, section by section.
pub struct PlexSource {
    client: PlexClient,
}

impl PlexSource {
    pub fn new(client: PlexClient) -> Self {
        Self { client }
    }
}

impl RecordSource for PlexSource {
    fn describe(&self) -> String {
        format!("Plex server at {}", self.client.base_url())
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, BoxError> {
        let sections = self.client.list_sections()?;
        tracing::debug!("Found {} movie sections", sections.len());

        let mut records = Vec::new();
        for section in sections {
            let titles = self.client.list_movies(&section.key)?;
            tracing::debug!(
                "Section {:?} holds {} movies",
                section.name.as_deref().unwrap_or_default(),
                titles.len()
            );
            records.extend(titles.into_iter().map(|title| RawRecord {
                title,
                library: section.name.clone(),
            }));
        }
        Ok(records)
    }
}

/// Prefix `http://` unless the address already names a scheme.
fn base_url(address: &str) -> String {
    let address = address.trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}

/// Parse a `/library/sections` response, keeping movie sections only.
pub fn parse_sections(xml: &str) -> Result<Vec<Section>, PlexError> {
    element_attributes(xml, b"Directory")?
        .into_iter()
        .filter(|attrs| attrs.get("type").map(String::as_str) == Some(MOVIE_SECTION_TYPE))
        .map(|mut attrs| {
            let name = attrs.remove("title");
            let key = attrs.remove("key").ok_or_else(|| {
                PlexError::MissingSectionKey(name.clone().unwrap_or_default())
            })?;
            Ok(Section { name, key })
        })
        .collect()
}

/// Parse a `/library/sections/<key>/all` response into titles.
pub fn parse_movies(xml: &str) -> Result<Vec<Option<String>>, PlexError> {
    Ok(element_attributes(xml, b"Video")?
        .into_iter()
        .map(|mut attrs| attrs.remove("title"))
        .collect())
}

/// Attributes of every `element` in document order.
fn element_attributes(xml: &str, element: &[u8]) -> Result<Vec<HashMap<String, String>>, PlexError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut found = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == element => {
                let mut attrs = HashMap::new();
                for attr in e.attributes() {
                    let attr = attr.map_err(|err| PlexError::Xml(err.to_string()))?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr
                        .unescape_value()
                        .map_err(|err| PlexError::Xml(err.to_string()))?
                        .into_owned();
                    attrs.insert(key, value);
                }
                found.push(attrs);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PlexError::Xml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }
    Ok(found)
}
