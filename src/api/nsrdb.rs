//! [NSRDB](https://nsrdb.nrel.gov) typical-meteorological-year downloads.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;

use crate::{
    core::{GeoPoint, ResourceFetcher, resource_file},
    prelude::*,
};

pub struct Client {
    inner: reqwest::Client,
    base_url: Url,
    api_key: String,
    email: String,
}

impl Client {
    const DOWNLOAD_PATH: &'static str = "api/nsrdb/v2/solar/psm3-tmy-download.csv";
    const INTERVAL_MINUTES: u32 = 60;

    pub fn new(base_url: Url, api_key: String, email: String, timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { inner, base_url, api_key, email })
    }

    #[instrument(skip_all, fields(point = %point))]
    async fn download(&self, point: GeoPoint, directory: &Path) -> Result<PathBuf> {
        let query = serde_qs::to_string(&DownloadQuery {
            api_key: &self.api_key,
            email: &self.email,
            wkt: format!("POINT({} {})", point.longitude(), point.latitude()),
            names: "tmy",
            interval: Self::INTERVAL_MINUTES,
            utc: false,
        })?;
        let mut url = self.base_url.join(Self::DOWNLOAD_PATH)?;
        url.set_query(Some(&query));

        info!("downloading…");
        // The URL carries the API key, hence `without_url`.
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("failed to call the NSRDB API")?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("failed to read the NSRDB response")?;
        ensure!(status.is_success(), "NSRDB responded with {status}: {}", body.trim());
        ensure!(!body.trim().is_empty(), "NSRDB returned an empty dataset");

        let path = directory.join(resource_file::file_name(point, Self::INTERVAL_MINUTES));
        let partial_path = path.with_extension("csv.part");
        if let Err(error) = Self::store(&partial_path, &path, body).await {
            // The partial file would otherwise count towards eviction.
            if let Err(remove_error) = tokio::fs::remove_file(&partial_path).await {
                debug!("failed to remove `{}`: {remove_error:#}", partial_path.display());
            }
            return Err(error);
        }
        info!(path = %path.display(), "downloaded");
        Ok(path)
    }

    async fn store(partial_path: &Path, path: &Path, body: String) -> Result {
        tokio::fs::write(partial_path, body)
            .await
            .with_context(|| format!("failed to write `{}`", partial_path.display()))?;
        tokio::fs::rename(partial_path, path)
            .await
            .with_context(|| format!("failed to move the download to `{}`", path.display()))
    }
}

#[async_trait]
impl ResourceFetcher for Client {
    #[instrument(skip_all, fields(n_points = points.len(), directory = %directory.display()))]
    async fn fetch(
        &self,
        points: &[GeoPoint],
        directory: &Path,
    ) -> Result<HashMap<GeoPoint, PathBuf>> {
        tokio::fs::create_dir_all(directory)
            .await
            .with_context(|| format!("failed to create `{}`", directory.display()))?;
        let mut paths = HashMap::with_capacity(points.len());
        for &point in points {
            paths.insert(point, self.download(point, directory).await?);
        }
        Ok(paths)
    }
}

#[derive(Serialize)]
struct DownloadQuery<'a> {
    api_key: &'a str,
    email: &'a str,

    /// Well-known text, longitude goes first.
    wkt: String,

    names: &'static str,
    interval: u32,
    utc: bool,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    // language=csv
    const DATASET: &str = "Source,Location ID,City,State,Country,Latitude,Longitude\n\
                           NSRDB,123456,-,-,-,38.05,-84.5\n";

    fn new_client(server: &MockServer) -> Result<Client> {
        Client::new(
            server.uri().parse()?,
            "secret".to_string(),
            "me@example.com".to_string(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_fetch_writes_resource_file() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/nsrdb/v2/solar/psm3-tmy-download.csv"))
            .and(query_param("api_key", "secret"))
            .and(query_param("email", "me@example.com"))
            .and(query_param("wkt", "POINT(-84.5078 38.0367)"))
            .and(query_param("names", "tmy"))
            .and(query_param("interval", "60"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DATASET))
            .expect(1)
            .mount(&server)
            .await;

        let directory = tempfile::tempdir()?;
        let resource_dir = directory.path().join("solar_data");
        let point = GeoPoint::try_new(38.0367, -84.5078)?;
        let paths = new_client(&server)?.fetch(&[point], &resource_dir).await?;

        let expected_path = resource_dir.join("nsrdb_38.0367_-84.5078_psm3-tmy_60_tmy.csv");
        assert_eq!(paths.get(&point), Some(&expected_path));
        assert_eq!(fs::read_to_string(&expected_path)?, DATASET);
        assert_eq!(fs::read_dir(&resource_dir)?.count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_error_writes_nothing() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                // language=json
                ResponseTemplate::new(403).set_body_string(r#"{"errors":["over rate limit"]}"#),
            )
            .mount(&server)
            .await;

        let directory = tempfile::tempdir()?;
        let point = GeoPoint::try_new(10.0, 20.0)?;
        let error = new_client(&server)?.fetch(&[point], directory.path()).await.unwrap_err();

        let message = format!("{error:#}");
        assert!(message.contains("over rate limit"), "{message}");
        assert!(!message.contains("secret"), "{message}");
        assert_eq!(fs::read_dir(directory.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_empty_body() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let directory = tempfile::tempdir()?;
        let point = GeoPoint::try_new(10.0, 20.0)?;
        assert!(new_client(&server)?.fetch(&[point], directory.path()).await.is_err());
        assert_eq!(fs::read_dir(directory.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_store_leaves_no_partial_file() -> Result {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DATASET))
            .mount(&server)
            .await;

        let directory = tempfile::tempdir()?;
        let point = GeoPoint::try_new(10.0, 20.0)?;
        // A file cannot be renamed over a non-empty directory.
        let blocker = directory.path().join(resource_file::file_name(point, 60));
        fs::create_dir(&blocker)?;
        fs::write(blocker.join("keep"), "")?;

        assert!(new_client(&server)?.fetch(&[point], directory.path()).await.is_err());
        let names = fs::read_dir(directory.path())?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        assert_eq!(names, [blocker]);
        Ok(())
    }
}
