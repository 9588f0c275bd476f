//! # HTTP server
//!
//! One axum router serves the JSON API under `/api`, the stored uploads under
//! `/uploads` and the public pages everywhere else.
pub mod api;
pub mod pages;
pub mod upload;

use crate::auth::Auth;
use crate::config::Config;
use crate::site::SiteConfig;
use crate::store::BlogStore;
use crate::upload::{FolderStorage, Uploader};
use axum::extract::{DefaultBodyLimit, FromRef};
use axum::routing::{get, post};
use axum::Router;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use log::*;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Everything the handlers share
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BlogStore>,
    pub uploader: Uploader,
    pub uploads: Arc<FolderStorage>,
    pub auth: Arc<Auth>,
    pub site: Arc<SiteConfig>,
}

impl FromRef<AppState> for Arc<Auth> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Open the stores named in the configuration
    pub async fn from_config(config: &Config) -> Result<Self, Report> {
        let store = BlogStore::open(config.storage.data_dir.clone())
            .await
            .wrap_err("Could not open the blog store")?;
        let uploads = Arc::new(FolderStorage::new(
            &config.storage.upload_dir,
            config.storage.public_url.clone(),
        ));
        let admin = &config.admin;
        Ok(Self {
            store: Arc::new(store),
            uploader: Uploader::new(uploads.clone(), config.storage.folder.clone()),
            uploads,
            auth: Arc::new(Auth::new(
                admin.username.clone(),
                admin.password.clone(),
                admin.jwt_secret.clone(),
            )),
            site: Arc::new(config.site.clone()),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/admin/auth", post(api::login))
        .route("/api/blogs", get(api::list_blogs).post(api::create_blog))
        .route(
            "/api/blogs/:id",
            get(api::get_blog)
                .put(api::update_blog)
                .delete(api::delete_blog),
        )
        .route("/api/blogs/slug/:slug", get(api::get_blog_by_slug))
        .route(
            "/api/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_BYTES)),
        )
        .route("/uploads/*key", get(upload::serve))
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/services", get(pages::services))
        .route("/portfolio", get(pages::portfolio))
        .route("/portfolio/:slug", get(pages::project))
        .route("/testimonials", get(pages::testimonials))
        .route("/contact", get(pages::contact))
        .route("/blog", get(pages::blog_index))
        .route("/blog/:slug", get(pages::blog_post))
        .route("/sitemap.xml", get(pages::sitemap))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Could not listen for shutdown: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Bind the configured address and serve until interrupted
pub async fn run(config: Config) -> Result<(), Report> {
    let state = AppState::from_config(&config).await?;
    let listener = TcpListener::bind(&config.addr)
        .await
        .wrap_err_with(|| format!("Can't listen on {}", config.addr))?;
    info!("Listening on: {}", config.addr);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{de, Mark, MarkType, Node, NodeType};
    use crate::render::render;
    use crate::store::content;
    use reqwest::multipart::{Form, Part};
    use reqwest::{header, Client, Method};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    struct Harness {
        base: String,
        client: Client,
        _dir: TempDir,
    }

    impl Harness {
        async fn start() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let mut config = Config::default();
            config.storage.data_dir = dir.path().join("blogs");
            config.storage.upload_dir = dir.path().join("uploads");
            config.admin.username = "admin".into();
            config.admin.password = "hunter2".into();
            config.admin.jwt_secret = "test-secret".into();

            let state = AppState::from_config(&config).await.unwrap();
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move { axum::serve(listener, router(state)).await });
            Self {
                base: format!("http://{}", addr),
                client: Client::builder().no_proxy().build().unwrap(),
                _dir: dir,
            }
        }

        fn request(&self, method: Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
            let req = self.client.request(method, format!("{}{}", self.base, path));
            match token {
                Some(token) => req.bearer_auth(token),
                None => req,
            }
        }

        async fn json(
            &self,
            method: Method,
            path: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (u16, Value) {
            let mut req = self.request(method, path, token);
            if let Some(body) = body {
                req = req.json(&body);
            }
            let res = req.send().await.unwrap();
            let status = res.status().as_u16();
            (status, de::from_slice_deep(&res.bytes().await.unwrap()).unwrap())
        }

        async fn page(&self, path: &str) -> (u16, String) {
            let res = self.request(Method::GET, path, None).send().await.unwrap();
            (res.status().as_u16(), res.text().await.unwrap())
        }

        async fn login(&self) -> String {
            let (status, body) = self
                .json(
                    Method::POST,
                    "/api/admin/auth",
                    None,
                    Some(json!({"username": "admin", "password": "hunter2"})),
                )
                .await;
            assert_eq!(status, 200);
            body["data"]["token"].as_str().unwrap().to_owned()
        }
    }

    fn tree() -> Node {
        Node::doc(vec![Node::paragraph(vec![
            Node::text("Read "),
            Node::marked_text(
                "<this>",
                vec![Mark::new(MarkType::Bold), Mark::new(MarkType::Italic)],
            ),
        ])])
    }

    fn post(slug: &str, content: Value) -> Value {
        json!({
            "title": "Wrap Party",
            "slug": slug,
            "excerpt": "We finished the shoot",
            "content": content,
            "published": true,
        })
    }

    #[tokio::test]
    async fn test_login_errors() {
        let h = Harness::start().await;
        let (status, body) = h
            .json(Method::POST, "/api/admin/auth", None, Some(json!({})))
            .await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Username and password are required");

        let (status, body) = h
            .json(
                Method::POST,
                "/api/admin/auth",
                None,
                Some(json!({"username": "admin", "password": "nope"})),
            )
            .await;
        assert_eq!(status, 401);
        assert_eq!(body, json!({"success": false, "error": "Invalid credentials"}));
    }

    #[tokio::test]
    async fn test_blog_lifecycle() {
        let h = Harness::start().await;
        let new_post = post("wrap-party", content::save(&tree()));

        let (status, body) = h
            .json(Method::POST, "/api/blogs", None, Some(new_post.clone()))
            .await;
        assert_eq!(status, 401);
        assert_eq!(body, json!({"success": false, "error": "Unauthorized"}));

        let token = h.login().await;
        let (status, body) = h
            .json(Method::POST, "/api/blogs", Some(&token), Some(new_post.clone()))
            .await;
        assert_eq!(status, 201);
        let id = body["data"]["_id"].as_str().unwrap().to_owned();
        assert_eq!(body["data"]["content"], content::save(&tree()));

        let (status, body) = h
            .json(Method::POST, "/api/blogs", Some(&token), Some(new_post))
            .await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "A blog with this slug already exists");

        let (status, body) = h
            .json(Method::GET, "/api/blogs?page=1&limit=5", None, None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(
            body["pagination"],
            json!({"page": 1, "limit": 5, "total": 1, "totalPages": 1})
        );

        let (status, html) = h.page("/blog/wrap-party").await;
        assert_eq!(status, 200);
        assert!(html.contains(&render(&tree())));
        assert!(html.contains("&lt;this&gt;"));

        let path = format!("/api/blogs/{}", id);
        let (status, body) = h
            .json(Method::PUT, &path, Some(&token), Some(json!({"published": false})))
            .await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["published"], false);

        let (status, _) = h
            .json(Method::GET, "/api/blogs/slug/wrap-party", None, None)
            .await;
        assert_eq!(status, 404);
        let (_, body) = h
            .json(Method::GET, "/api/blogs?includeUnpublished=true", None, None)
            .await;
        assert_eq!(body["pagination"]["total"], 0);
        let (_, body) = h
            .json(
                Method::GET,
                "/api/blogs?includeUnpublished=true",
                Some(&token),
                None,
            )
            .await;
        assert_eq!(body["pagination"]["total"], 1);

        let (status, _) = h.json(Method::DELETE, &path, Some(&token), None).await;
        assert_eq!(status, 200);
        let (status, body) = h.json(Method::GET, &path, None, None).await;
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Blog not found");
    }

    #[tokio::test]
    async fn test_listing_limits() {
        let h = Harness::start().await;
        let (status, body) = h
            .json(Method::GET, &format!("/api/blogs?limit={}", usize::MAX), None, None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(
            body["pagination"],
            json!({"page": 1, "limit": 100, "total": 0, "totalPages": 0})
        );

        let (status, body) = h.json(Method::GET, "/api/blogs?limit=0", None, None).await;
        assert_eq!(status, 200);
        assert_eq!(body["pagination"]["limit"], 10);

        let (status, body) = h.json(Method::GET, "/api/blogs?limit=-1", None, None).await;
        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_deep_tree_through_api() {
        let h = Harness::start().await;
        let token = h.login().await;

        let mut deep = Node::paragraph(vec![Node::text("bottom")]);
        for _ in 0..200 {
            deep = Node::with_content(NodeType::Blockquote, vec![deep]);
        }
        let deep = content::save(&Node::doc(vec![deep]));
        let (status, body) = h
            .json(Method::POST, "/api/blogs", Some(&token), Some(post("deep", deep.clone())))
            .await;
        assert_eq!(status, 201);
        assert_eq!(body["data"]["content"], deep);

        let (status, body) = h
            .json(Method::GET, "/api/blogs/slug/deep", None, None)
            .await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["content"], deep);

        let levels = de::MAX_NESTING;
        let abyss = format!(
            r#"{{"title":"Abyss","slug":"abyss","excerpt":"Down","content":{}0{}}}"#,
            "[".repeat(levels),
            "]".repeat(levels)
        );
        let res = h
            .request(Method::POST, "/api/blogs", Some(&token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(abyss)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "Content is nested too deeply");
    }

    #[tokio::test]
    async fn test_upload_then_serve() {
        let h = Harness::start().await;
        let token = h.login().await;
        let upload = |name: &'static str, mime: &str| {
            let part = Part::bytes(vec![0x89, b'P', b'N', b'G'])
                .file_name(name)
                .mime_str(mime)
                .unwrap();
            h.request(Method::POST, "/api/upload", Some(&token))
                .multipart(Form::new().part("file", part))
                .send()
        };

        let res = upload("poster.gif", "image/gif").await.unwrap();
        assert_eq!(res.status().as_u16(), 400);
        let body: Value = res.json().await.unwrap();
        assert_eq!(
            body["error"],
            "Invalid file type. Only JPG, JPEG, and PNG images are allowed."
        );

        let res = upload("still.png", "image/png").await.unwrap();
        assert_eq!(res.status().as_u16(), 200);
        let body: Value = res.json().await.unwrap();
        let url = body["data"]["url"].as_str().unwrap();
        assert!(url.starts_with("/uploads/blogs/"));

        let res = h.request(Method::GET, url, None).send().await.unwrap();
        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(res.bytes().await.unwrap().as_ref(), &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_pages_and_sitemap() {
        let h = Harness::start().await;
        for path in [
            "/",
            "/about",
            "/services",
            "/portfolio",
            "/portfolio/taraharu",
            "/testimonials",
            "/contact",
            "/blog",
        ] {
            let (status, html) = h.page(path).await;
            assert_eq!(status, 200, "{}", path);
            assert!(html.starts_with("<!DOCTYPE html>"));
        }
        let (status, _) = h.page("/blog/missing").await;
        assert_eq!(status, 404);
        let (status, xml) = h.page("/sitemap.xml").await;
        assert_eq!(status, 200);
        assert!(xml.contains("<loc>https://www.waysprivate.com.np/blog</loc>"));
    }
}
