use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use upload_engine::{
    EngineEvent, EngineHandle, FailureKind, ReqwestUploader, UploadError, UploadOutput,
    UploadSettings, Uploader,
};
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 1, 2, 255];

/// Matches a multipart body holding the given field, filename and content.
struct MultipartFile {
    field: &'static str,
    file_name: &'static str,
    content: &'static [u8],
}

impl Match for MultipartFile {
    fn matches(&self, request: &Request) -> bool {
        let is_multipart = request
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));
        let disposition = format!(
            "name=\"{}\"; filename=\"{}\"",
            self.field, self.file_name
        );
        is_multipart
            && contains(&request.body, disposition.as_bytes())
            && contains(&request.body, self.content)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}

fn settings_for(server: &MockServer) -> UploadSettings {
    UploadSettings::with_endpoint(format!("{}/api/submit", server.uri()))
}

#[tokio::test]
async fn uploader_posts_file_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .and(MultipartFile {
            field: "file",
            file_name: "cat.png",
            content: PNG_BYTES,
        })
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(settings_for(&server));
    let output = uploader
        .upload("cat.png", PNG_BYTES.to_vec())
        .await
        .expect("upload ok");

    assert_eq!(
        output,
        UploadOutput {
            status: 200,
            content_type: Some("image/png".to_string()),
            bytes: PNG_BYTES.to_vec(),
        }
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn uploader_reports_reason_phrase_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(settings_for(&server));
    let err = uploader.upload("cat.png", b"x".to_vec()).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            code: 404,
            reason: "Not Found".to_string(),
        }
    );
}

#[tokio::test]
async fn uploader_treats_server_error_as_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(settings_for(&server));
    let err = uploader.upload("cat.png", b"x".to_vec()).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            code: 500,
            reason: "Internal Server Error".to_string(),
        }
    );
}

#[tokio::test]
async fn uploader_honours_custom_field_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(MultipartFile {
            field: "video",
            file_name: "clip.mp4",
            content: b"frames",
        })
        .respond_with(ResponseTemplate::new(201).set_body_raw("ok", "image/svg+xml"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = UploadSettings {
        field_name: "video".to_string(),
        ..settings_for(&server)
    };
    let output = ReqwestUploader::new(settings)
        .upload("clip.mp4", b"frames".to_vec())
        .await
        .expect("upload ok");

    assert_eq!(output.status, 201);
    assert_eq!(output.bytes, b"ok");
}

#[tokio::test]
async fn uploader_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(PNG_BYTES, "image/png"),
        )
        .mount(&server)
        .await;

    let settings = UploadSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..settings_for(&server)
    };
    let err = ReqwestUploader::new(settings)
        .upload("cat.png", b"x".to_vec())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn uploader_rejects_invalid_endpoint() {
    let uploader = ReqwestUploader::new(UploadSettings::with_endpoint("not a url"));
    let err = uploader.upload("cat.png", b"x".to_vec()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn uploader_reports_network_failure() {
    // Bind then drop a listener so the port is very likely closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let uploader = ReqwestUploader::new(UploadSettings::with_endpoint(format!(
        "http://{addr}/api/submit"
    )));
    let err = uploader.upload("cat.png", b"x".to_vec()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

struct CannedUploader;

#[async_trait::async_trait]
impl Uploader for CannedUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadOutput, UploadError> {
        if file_name == "broken.png" {
            return Err(UploadError {
                kind: FailureKind::Network,
                message: "connection reset".to_string(),
            });
        }
        Ok(UploadOutput {
            status: 200,
            content_type: None,
            bytes,
        })
    }
}

#[test]
fn engine_handle_reports_completion_events() {
    let engine = EngineHandle::with_uploader(Arc::new(CannedUploader)).unwrap();

    engine.upload("cat.png", vec![7, 8, 9]);
    let event = engine.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event,
        EngineEvent::UploadCompleted {
            file_name: "cat.png".to_string(),
            result: Ok(UploadOutput {
                status: 200,
                content_type: None,
                bytes: vec![7, 8, 9],
            }),
        }
    );

    engine.upload("broken.png", vec![1]);
    let EngineEvent::UploadCompleted { result, .. } =
        engine.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(result.unwrap_err().kind, FailureKind::Network);
    assert!(engine.try_recv().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_handle_uploads_through_reqwest() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG_BYTES, "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let engine = EngineHandle::new(settings_for(&server)).unwrap();
    engine.upload("cat.png", PNG_BYTES.to_vec());

    let event = tokio::task::spawn_blocking(move || engine.recv_timeout(Duration::from_secs(10)))
        .await
        .unwrap()
        .expect("event");
    let EngineEvent::UploadCompleted { result, .. } = event;
    assert_eq!(result.unwrap().bytes, PNG_BYTES);
}
