#![allow(dead_code)]
use async_trait::async_trait;
use http_client::{HttpClient, Request, Response};
use http_types::StatusCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request as seen by [`FakeHttpClient`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
    pub body: String,
}

/// What [`FakeHttpClient`] does with a request
#[derive(Debug, Clone)]
pub enum Reply {
    Respond { status: u16, body: String },
    RespondBytes { status: u16, body: Vec<u8> },
    Fail(String),
    Hang,
}

/// In-process HTTP client that records requests and answers with a canned reply
#[derive(Debug, Clone)]
pub struct FakeHttpClient {
    reply: Reply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeHttpClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn responding(status: u16, body: &str) -> Self {
        Self::new(Reply::Respond {
            status,
            body: body.to_string(),
        })
    }

    /// Requests received so far, shared with every clone of this client
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn send(&self, mut req: Request) -> Result<Response, http_types::Error> {
        let body = req.body_string().await?;
        let content_type = req
            .header("Content-Type")
            .map(|values| values.last().as_str().to_string());
        let user_agent = req
            .header("User-Agent")
            .map(|values| values.last().as_str().to_string());

        self.requests.lock().unwrap().push(RecordedRequest {
            method: req.method().to_string(),
            url: req.url().to_string(),
            content_type,
            user_agent,
            body,
        });

        match &self.reply {
            Reply::Respond { status, body } => {
                let mut response = Response::new(*status);
                response.set_body(body.as_str());
                Ok(response)
            }
            Reply::RespondBytes { status, body } => {
                let mut response = Response::new(*status);
                response.set_body(body.clone());
                Ok(response)
            }
            Reply::Fail(message) => Err(http_types::Error::from_str(
                StatusCode::BadGateway,
                message.clone(),
            )),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(http_types::Error::from_str(
                    StatusCode::GatewayTimeout,
                    "fake client woke up",
                ))
            }
        }
    }
}
