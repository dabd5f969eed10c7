// SPDX-License-Identifier: MPL-2.0
//! HTTP upload relay.
//!
//! A single `POST /upload` route takes a multipart form with a `file` part
//! and a `destination` directory. Rocket stages the upload in the configured
//! staging directory, then the file is moved to
//! `destination/<original file name>`. The relay shares no state with the
//! review session.

use crate::app::config::RelayConfig;
use crate::error::{Error, Result};
use rocket::form::{Errors, Form};
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::{post, routes, Build, FromForm, Rocket};
use std::path::{Path, PathBuf};

pub const SAVED: &str = "File saved successfully.";
pub const SAVE_FAILED: &str = "Error saving file.";
pub const MALFORMED: &str = "Malformed upload.";

/// Largest accepted upload.
const UPLOAD_LIMIT: &str = "256 MiB";

#[derive(FromForm, Debug)]
pub struct UploadForm<'r> {
    #[field(name = "file")]
    pub file: TempFile<'r>,

    /// Directory the file is moved into.
    #[field(name = "destination")]
    pub destination: String,
}

#[post("/upload", data = "<form>")]
pub async fn upload(
    form: std::result::Result<Form<UploadForm<'_>>, Errors<'_>>,
) -> (Status, &'static str) {
    let mut form = match form {
        Ok(form) => form.into_inner(),
        Err(errors) => {
            log::warn!("Rejected upload: {errors}");
            return (Status::BadRequest, MALFORMED);
        }
    };

    let Some(file_name) = target_file_name(&form.file) else {
        log::warn!("Rejected upload without a file name");
        return (Status::BadRequest, MALFORMED);
    };

    let target = PathBuf::from(&form.destination).join(&file_name);
    match form.file.move_copy_to(&target).await {
        Ok(()) => {
            log::info!("Saved upload to {}", target.display());
            (Status::Ok, SAVED)
        }
        Err(err) => {
            log::error!("Failed to save upload to {}: {err}", target.display());
            (Status::InternalServerError, SAVE_FAILED)
        }
    }
}

/// The client-supplied file name reduced to its last path component.
fn target_file_name(file: &TempFile<'_>) -> Option<String> {
    let raw = file.raw_name()?.dangerous_unsafe_unsanitized_raw().as_str();
    sanitize_file_name(raw)
}

fn sanitize_file_name(raw: &str) -> Option<String> {
    let normalized = raw.replace('\\', "/");
    let name = Path::new(&normalized).file_name()?.to_str()?;
    if name.is_empty() || name.starts_with('.') {
        return None;
    }
    Some(name.to_string())
}

/// Builds the relay server from `config`, creating the staging directory.
pub fn build(config: &RelayConfig) -> Result<Rocket<Build>> {
    std::fs::create_dir_all(&config.staging_dir).map_err(|err| {
        Error::Io(format!(
            "cannot create staging directory {}: {err}",
            config.staging_dir.display()
        ))
    })?;

    let figment = rocket::Config::figment()
        .merge(("address", config.address.as_str()))
        .merge(("port", config.port))
        .merge(("temp_dir", config.staging_dir.as_path()))
        .merge(("limits.file", UPLOAD_LIMIT))
        .merge(("limits.data-form", UPLOAD_LIMIT));

    Ok(rocket::custom(figment).mount("/", routes![upload]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use tempfile::tempdir;

    const BOUNDARY: &str = "X-RELAY-BOUNDARY";

    fn multipart(file_name: &str, bytes: &[u8], destination: &Path) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(
            format!(
                "\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"destination\"\r\n\r\n{}\r\n--{BOUNDARY}--\r\n",
                destination.display()
            )
            .as_bytes(),
        );
        body
    }

    async fn client(staging: &Path) -> Client {
        let config = RelayConfig {
            staging_dir: staging.to_path_buf(),
            ..RelayConfig::default()
        };
        let rocket = build(&config).expect("relay should build");
        Client::tracked(rocket).await.expect("valid rocket instance")
    }

    fn content_type() -> ContentType {
        ContentType::new("multipart", "form-data").with_params(("boundary", BOUNDARY))
    }

    #[rocket::async_test]
    async fn upload_lands_in_destination() {
        let staging = tempdir().expect("failed to create temp dir");
        let destination = tempdir().expect("failed to create temp dir");
        let client = client(staging.path()).await;

        let response = client
            .post("/upload")
            .header(content_type())
            .body(multipart("img_00.png", b"pixels", destination.path()))
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().await.as_deref(), Some(SAVED));
        let saved = std::fs::read(destination.path().join("img_00.png")).expect("file saved");
        assert_eq!(saved, b"pixels");
    }

    #[rocket::async_test]
    async fn missing_destination_directory_fails() {
        let staging = tempdir().expect("failed to create temp dir");
        let root = tempdir().expect("failed to create temp dir");
        let client = client(staging.path()).await;

        let response = client
            .post("/upload")
            .header(content_type())
            .body(multipart("img_00.png", b"pixels", &root.path().join("missing")))
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::InternalServerError);
        assert_eq!(response.into_string().await.as_deref(), Some(SAVE_FAILED));
    }

    #[rocket::async_test]
    async fn form_without_destination_is_rejected() {
        let staging = tempdir().expect("failed to create temp dir");
        let client = client(staging.path()).await;
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.png\"\r\n\r\nx\r\n--{BOUNDARY}--\r\n"
        );

        let response = client
            .post("/upload")
            .header(content_type())
            .body(body)
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::BadRequest);
    }

    #[test]
    fn file_names_are_reduced_to_last_component() {
        assert_eq!(sanitize_file_name("a.png").as_deref(), Some("a.png"));
        assert_eq!(sanitize_file_name("../../etc/a.png").as_deref(), Some("a.png"));
        assert_eq!(sanitize_file_name("C:\\shots\\b.jpg").as_deref(), Some("b.jpg"));
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name(".hidden"), None);
        assert_eq!(sanitize_file_name(""), None);
    }
}
