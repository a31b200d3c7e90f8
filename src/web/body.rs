use axum::{
    async_trait,
    body::HttpBody,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde_json::{Map, Value};

use super::response::ApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request body as a field map for validation.
///
/// JSON objects and urlencoded forms are accepted. A missing body, or one sent
/// with another content type, yields no fields so the rule set reports what is
/// missing. Form values are always strings; a key repeated in a form becomes an
/// array, which then fails the field's rule.
#[derive(Debug, Default)]
pub struct RequestFields(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for RequestFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.body().size_hint().exact() == Some(0) {
            return Ok(Self::default());
        }

        if is_form(&req) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
            return Ok(Self(form_fields(pairs)));
        }

        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(fields))) => Ok(Self(fields)),
            Ok(_) => Err(ApiError::MalformedBody(
                "Request body must be a JSON object".to_string(),
            )),
            // another content type: nothing to read
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self::default()),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(FORM_CONTENT_TYPE.as_bytes()))
}

fn form_fields(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (key, value) in pairs {
        match fields.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                fields.insert(key, Value::String(value));
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<RequestFields, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/agents");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        RequestFields::from_request(builder.body(Body::from(body)).unwrap(), &()).await
    }

    #[tokio::test]
    async fn test_json_object_body() {
        let RequestFields(fields) = extract(
            Some("application/json; charset=utf-8"),
            r#"{"workArea":"Delhi","commission":"0.1"}"#,
        )
        .await
        .unwrap();
        assert_eq!(fields["workArea"], "Delhi");
    }

    #[tokio::test]
    async fn test_form_body() {
        let RequestFields(fields) = extract(
            Some(FORM_CONTENT_TYPE),
            "workArea=New+Delhi&commission=0.10&phoneNo=",
        )
        .await
        .unwrap();
        assert_eq!(fields["workArea"], "New Delhi");
        assert_eq!(fields["commission"], "0.10");
        assert_eq!(fields["phoneNo"], "");
    }

    #[tokio::test]
    async fn test_repeated_form_key_becomes_an_array() {
        let RequestFields(fields) = extract(Some(FORM_CONTENT_TYPE), "workArea=a&workArea=b")
            .await
            .unwrap();
        assert_eq!(fields["workArea"], serde_json::json!(["a", "b"]));
    }

    #[tokio::test]
    async fn test_empty_or_unknown_body_has_no_fields() {
        let RequestFields(fields) = extract(Some("application/json"), "").await.unwrap();
        assert!(fields.is_empty());

        let RequestFields(fields) = extract(Some("text/plain"), "workArea=Delhi").await.unwrap();
        assert!(fields.is_empty());

        let RequestFields(fields) = extract(None, "workArea=Delhi").await.unwrap();
        assert!(fields.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let err = extract(Some("application/json"), "{not json").await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));

        let err = extract(Some("application/json"), "[1,2]").await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedBody(_)));
    }
}
