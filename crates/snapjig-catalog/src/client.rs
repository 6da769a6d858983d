//! The blocking catalog client and its wire types.

use log::debug;
use reqwest::{
    StatusCode,
    blocking::{
        Client, Response,
        multipart::{Form, Part},
    },
};
use serde::{Deserialize, Serialize};
use url::Url;

/// One puzzle record as served by the catalog.
///
/// `best_time` is the best recorded solve time in milliseconds, `0`
/// when no solve has been recorded yet. `img` is an opaque file name;
/// resolve it with [`CatalogClient::upload_url`] to fetch the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRecord {
    /// Catalog-assigned identifier.
    pub id: u32,
    /// Unique human-readable name.
    pub name: String,
    /// File name of the uploaded image.
    pub img: String,
    /// Best solve time in milliseconds, `0` if unset.
    #[serde(default)]
    pub best_time: i64,
}

/// Errors from catalog calls.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CatalogError {
    /// Transport-level failure (connection, timeout, decoding).
    #[display("catalog request failed: {_0}")]
    Http(reqwest::Error),
    /// The service answered with a non-success status.
    #[display("catalog error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Message from the response's `error` field, or a fallback.
        message: String,
    },
    /// The configured base URL (or a path joined onto it) is invalid.
    #[display("invalid catalog URL: {_0}")]
    Url(url::ParseError),
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BestTimeBody {
    best_time: i64,
}

#[derive(Debug, Serialize)]
struct UpdateBestTimeBody {
    time: i64,
}

/// A blocking HTTP client for the puzzle catalog.
///
/// # Examples
///
/// ```no_run
/// use snapjig_catalog::CatalogClient;
///
/// let catalog = CatalogClient::new("http://localhost:8080")?;
/// for record in catalog.list()? {
///     println!("{}: {}", record.id, record.name);
/// }
/// # Ok::<(), snapjig_catalog::CatalogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base: Url,
    http: Client,
}

impl CatalogClient {
    /// Creates a client for the catalog at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Url`] if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let base = Url::parse(base_url)?;
        Ok(Self {
            base,
            http: Client::new(),
        })
    }

    /// Lists all puzzle records.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success response.
    pub fn list(&self) -> Result<Vec<PuzzleRecord>, CatalogError> {
        let url = self.api_url("api/puzzles/")?;
        let response = self.http.get(url).send()?;
        Ok(check(response)?.json()?)
    }

    /// Fetches one puzzle record by id.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, or with [`CatalogError::Api`]
    /// (status 404) if the puzzle does not exist.
    pub fn get(&self, id: u32) -> Result<PuzzleRecord, CatalogError> {
        let url = self.api_url(&format!("api/puzzles/{id}"))?;
        let response = self.http.get(url).send()?;
        Ok(check(response)?.json()?)
    }

    /// Fetches one puzzle record by its unique name.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, or with [`CatalogError::Api`]
    /// (status 404) if the puzzle does not exist.
    pub fn get_by_name(&self, name: &str) -> Result<PuzzleRecord, CatalogError> {
        let url = self.api_url(&format!("api/puzzles/name/{name}"))?;
        let response = self.http.get(url).send()?;
        Ok(check(response)?.json()?)
    }

    /// Creates a puzzle record by uploading an image.
    ///
    /// The catalog stores the image and answers with the new record
    /// (no best time yet).
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success response (for
    /// example a missing image or a duplicate name).
    pub fn create(
        &self,
        name: &str,
        file_name: &str,
        image: Vec<u8>,
    ) -> Result<PuzzleRecord, CatalogError> {
        let url = self.api_url("api/puzzles/")?;
        let part = Part::bytes(image)
            .file_name(file_name.to_owned())
            .mime_str("image/jpeg")?;
        let form = Form::new().text("name", name.to_owned()).part("image", part);
        debug!("uploading puzzle {name:?} ({file_name})");
        let response = self.http.post(url).multipart(form).send()?;
        Ok(check(response)?.json()?)
    }

    /// Submits a solve time (in milliseconds) as a best-time candidate.
    ///
    /// The catalog keeps the smaller of the stored and submitted times.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success response.
    pub fn update_best_time(&self, id: u32, millis: i64) -> Result<(), CatalogError> {
        let url = self.api_url(&format!("api/puzzles/{id}/best-time"))?;
        let response = self
            .http
            .put(url)
            .json(&UpdateBestTimeBody { time: millis })
            .send()?;
        check(response)?;
        Ok(())
    }

    /// Fetches the best recorded solve time for a puzzle, in
    /// milliseconds.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, or with [`CatalogError::Api`]
    /// (status 404) if the puzzle does not exist.
    pub fn best_time(&self, id: u32) -> Result<i64, CatalogError> {
        let url = self.api_url(&format!("api/puzzles/{id}/best-time"))?;
        let response = self.http.get(url).send()?;
        let body: BestTimeBody = check(response)?.json()?;
        Ok(body.best_time)
    }

    /// Resolves the static URL an uploaded image is served from.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Url`] if `img` does not join onto the
    /// base URL.
    pub fn upload_url(&self, img: &str) -> Result<Url, CatalogError> {
        Ok(self.base.join(&format!("uploads/{img}"))?)
    }

    /// Downloads an uploaded image's raw bytes.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-success response.
    pub fn fetch_image(&self, img: &str) -> Result<Vec<u8>, CatalogError> {
        let url = self.upload_url(img)?;
        let response = self.http.get(url).send()?;
        Ok(check(response)?.bytes()?.to_vec())
    }

    fn api_url(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.base.join(path)?)
    }
}

/// Maps a non-success response to [`CatalogError::Api`], decoding the
/// service's `{"error": …}` body when present.
fn check(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .ok()
        .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
        .map_or_else(|| format!("HTTP {status}"), |body| body.error);
    Err(CatalogError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_the_wire_shape() {
        let json = r#"{
            "id": 3,
            "name": "lighthouse",
            "img": "lighthouse.jpg",
            "bestTime": 61500,
            "createdAt": "2024-06-01T10:00:00Z"
        }"#;
        let record: PuzzleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record,
            PuzzleRecord {
                id: 3,
                name: "lighthouse".into(),
                img: "lighthouse.jpg".into(),
                best_time: 61_500,
            }
        );
    }

    #[test]
    fn record_defaults_missing_best_time() {
        // Create responses omit bestTime for a fresh record.
        let json = r#"{"id": 1, "name": "a", "img": "a.jpg"}"#;
        let record: PuzzleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.best_time, 0);
    }

    #[test]
    fn upload_url_is_keyed_by_img_field() {
        let catalog = CatalogClient::new("http://localhost:8080").unwrap();
        let url = catalog.upload_url("beach.jpg").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/uploads/beach.jpg");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            CatalogClient::new("not a url"),
            Err(CatalogError::Url(_))
        ));
    }

    #[test]
    fn error_body_shape_matches_the_service() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error": "No image provided"}"#).unwrap();
        assert_eq!(body.error, "No image provided");

        let best: BestTimeBody = serde_json::from_str(r#"{"bestTime": 420}"#).unwrap();
        assert_eq!(best.best_time, 420);
    }
}
