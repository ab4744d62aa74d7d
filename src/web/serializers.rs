use axum::{
    body::Bytes,
    extract::{
        FromRequest, Multipart, Request,
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
    },
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The POSTed form. Both fields are optional here so a missing one is
/// reported by the handler instead of rejected by the extractor. When a key
/// repeats, the first value wins.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Submission {
    pub task: Option<String>,
    pub user_input: Option<String>,
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("missing form field `{0}`")]
    MissingField(&'static str),

    #[error("unsupported form content type {0:?}")]
    UnsupportedContentType(String),

    #[error("unreadable form body: {0}")]
    Body(#[from] BytesRejection),

    #[error("unreadable multipart body: {0}")]
    Multipart(#[from] MultipartRejection),

    #[error("unreadable multipart field: {0}")]
    MultipartField(#[from] MultipartError),
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// The two encodings a browser uses to submit a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    UrlEncoded,
    Multipart,
}

impl Encoding {
    fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "application/x-www-form-urlencoded" => Some(Self::UrlEncoded),
            "multipart/form-data" => Some(Self::Multipart),
            _ => None,
        }
    }
}

impl Submission {
    /// Build from decoded key/value pairs. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Self::default();
        for (key, value) in pairs {
            submission.offer(key.as_ref(), value.into());
        }
        submission
    }

    fn offer(&mut self, key: &str, value: String) {
        let slot = match key {
            "task" => &mut self.task,
            "user_input" => &mut self.user_input,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, FormError> {
        let mut submission = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            submission.offer(&name, field.text().await?);
        }
        Ok(submission)
    }

    /// Split into `(task, user_input)`, requiring both.
    pub fn into_parts(self) -> Result<(String, String), FormError> {
        let task = self.task.ok_or(FormError::MissingField("task"))?;
        let user_input = self.user_input.ok_or(FormError::MissingField("user_input"))?;
        Ok((task, user_input))
    }
}

impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = FormError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        match Encoding::from_content_type(&content_type) {
            Some(Encoding::UrlEncoded) => {
                let body = Bytes::from_request(req, state).await?;
                Ok(Self::from_pairs(url::form_urlencoded::parse(&body)))
            }
            Some(Encoding::Multipart) => {
                let multipart = Multipart::from_request(req, state).await?;
                Self::from_multipart(multipart).await
            }
            None => Err(FormError::UnsupportedContentType(content_type)),
        }
    }
}
