use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use blog_client::{
    BlogClientError, ClientConfig, HttpClient, ImageUpload, ListOutcome, PostComposer,
    PostListView, PostsApi, Route, Session, SubmitOutcome,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Create {
        auth: Option<String>,
        fields: Vec<(String, Option<String>, Vec<u8>)>,
    },
    List {
        auth: Option<String>,
    },
    Patch {
        auth: Option<String>,
        id: i64,
        body: serde_json::Value,
    },
}

#[derive(Clone)]
struct Stub {
    seen: Arc<Mutex<Vec<Seen>>>,
    list_status: StatusCode,
    list_body: String,
    patch_status: StatusCode,
}

impl Stub {
    fn record(&self, seen: Seen) {
        self.seen.lock().unwrap().push(seen);
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

fn auth(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn create(State(stub): State<Stub>, headers: HeaderMap, mut multipart: Multipart) -> StatusCode {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.unwrap().to_vec();
        fields.push((name, file_name, bytes));
    }
    stub.record(Seen::Create {
        auth: auth(&headers),
        fields,
    });
    StatusCode::OK
}

async fn list(
    State(stub): State<Stub>,
    headers: HeaderMap,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    stub.record(Seen::List {
        auth: auth(&headers),
    });
    (
        stub.list_status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.list_body.clone(),
    )
}

async fn set_status(
    State(stub): State<Stub>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    stub.record(Seen::Patch {
        auth: auth(&headers),
        id,
        body,
    });
    stub.patch_status
}

async fn spawn_backend(list_status: StatusCode, list_body: &str, patch_status: StatusCode) -> (HttpClient, Stub) {
    let stub = Stub {
        seen: Arc::new(Mutex::new(Vec::new())),
        list_status,
        list_body: list_body.to_string(),
        patch_status,
    };

    let app = Router::new()
        .route("/api/posts", get(list).post(create))
        .route("/api/posts/{id}", patch(set_status))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = HttpClient::new(ClientConfig::new(format!("http://{}/", addr)));
    (client, stub)
}

const ONE_POST: &str = r#"[{"id":1,"title":"First","content":"<p>hi</p>","authorName":"Ann","createdAt":"2024-03-05T10:00:00Z","published":false,"image":"https://cdn.example.com/1.png"}]"#;

#[tokio::test]
async fn composer_posts_multipart_without_image_then_navigates() {
    let (client, stub) = spawn_backend(StatusCode::OK, "[]", StatusCode::OK).await;
    let mut composer = PostComposer::new();
    composer.set_title("Hello");
    composer.set_content("<p>World</p>");

    let outcome = composer.submit(&client, &Session::authenticated("tok")).await;

    assert_eq!(outcome, SubmitOutcome::Navigate(Route::Posts));
    assert_eq!(
        stub.seen(),
        vec![Seen::Create {
            auth: Some("Bearer tok".to_string()),
            fields: vec![
                ("title".to_string(), None, b"Hello".to_vec()),
                ("content".to_string(), None, b"<p>World</p>".to_vec()),
            ],
        }]
    );
}

#[tokio::test]
async fn image_is_sent_as_file_part() {
    let (client, stub) = spawn_backend(StatusCode::OK, "[]", StatusCode::OK).await;
    let mut composer = PostComposer::new();
    composer.set_title("With image");
    composer.set_image(Some(ImageUpload::new("cover.png", vec![0x89, 0x50, 0x4e, 0x47])));

    composer.submit(&client, &Session::authenticated("tok")).await;

    match &stub.seen()[0] {
        Seen::Create { fields, .. } => {
            let image = fields.iter().find(|(name, _, _)| name == "image").unwrap();
            assert_eq!(image.1.as_deref(), Some("cover.png"));
            assert_eq!(image.2, vec![0x89, 0x50, 0x4e, 0x47]);
        }
        other => panic!("unexpected request {:?}", other),
    }
}

#[tokio::test]
async fn listing_decodes_posts_with_bearer_token() {
    let (client, stub) = spawn_backend(StatusCode::OK, ONE_POST, StatusCode::OK).await;
    let token = Session::authenticated("tok");

    let posts = client.list_posts(token.token().unwrap()).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author_name, "Ann");
    assert_eq!(
        stub.seen(),
        vec![Seen::List {
            auth: Some("Bearer tok".to_string())
        }]
    );
}

#[tokio::test]
async fn non_array_bodies_are_format_errors() {
    for body in ["{}", "null"] {
        let (client, _stub) = spawn_backend(StatusCode::OK, body, StatusCode::OK).await;
        let session = Session::authenticated("tok");

        let err = client.list_posts(session.token().unwrap()).await.unwrap_err();
        assert!(matches!(err, BlogClientError::UnexpectedFormat(_)), "{}", body);
    }
}

#[tokio::test]
async fn server_message_is_carried_in_error() {
    let (client, _stub) = spawn_backend(
        StatusCode::UNAUTHORIZED,
        r#"{"message":"jwt expired"}"#,
        StatusCode::OK,
    )
    .await;
    let mut view = PostListView::new();

    let outcome = view.load(&client, &Session::authenticated("tok")).await;

    assert_eq!(outcome, ListOutcome::Failed("jwt expired".to_string()));
}

#[tokio::test]
async fn toggle_patches_inverted_flag() {
    let (client, stub) = spawn_backend(StatusCode::OK, ONE_POST, StatusCode::OK).await;
    let session = Session::authenticated("tok");
    let mut view = PostListView::new();
    view.load(&client, &session).await;

    let outcome = view.change_post_status(&client, &session, 1).await;

    assert_eq!(outcome, ListOutcome::Ready);
    assert_eq!(view.posts()[0].status_label(), "Published");
    assert_eq!(
        stub.seen().last(),
        Some(&Seen::Patch {
            auth: Some("Bearer tok".to_string()),
            id: 1,
            body: serde_json::json!({ "published": true }),
        })
    );
}

#[tokio::test]
async fn rejected_toggle_is_reverted() {
    let (client, _stub) = spawn_backend(StatusCode::OK, ONE_POST, StatusCode::INTERNAL_SERVER_ERROR).await;
    let session = Session::authenticated("tok");
    let mut view = PostListView::new();
    view.load(&client, &session).await;

    view.change_post_status(&client, &session, 1).await;

    assert_eq!(view.posts()[0].status_label(), "Hidden");
    assert_eq!(
        view.error(),
        Some("Failed to change post status. Please try again.")
    );
}

#[tokio::test]
async fn unreachable_backend_uses_fallback_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpClient::new(ClientConfig::new(format!("http://{}", addr)));
    let mut view = PostListView::new();

    let outcome = view.load(&client, &Session::authenticated("tok")).await;

    assert_eq!(
        outcome,
        ListOutcome::Failed("Failed to load posts. Please try again.".to_string())
    );
}
