//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3cp-core.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use s3cp_core::{
    EndpointConfig, Error, ObjectReader, ObjectStore, PutObjectOutput, PutObjectRequest,
    RemoteLocation, Result,
};

/// Service error codes reported as a missing bucket or object
const NOT_FOUND_CODES: &[&str] = &["NoSuchKey", "NoSuchBucket", "NotFound"];

/// Service error codes reported as an authentication or permission failure
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
];

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from ambient AWS credentials
    ///
    /// Credentials and, unless overridden, the region come from the default
    /// provider chain: environment, shared profile, then instance role.
    pub async fn new(endpoint: &EndpointConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &endpoint.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(url) = &endpoint.endpoint_url {
            loader = loader.endpoint_url(url);
        }

        let config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(endpoint.force_path_style)
            .build();

        tracing::debug!(
            region = ?config.region(),
            endpoint_url = ?endpoint.endpoint_url,
            force_path_style = endpoint.force_path_style,
            "created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

/// Map an SDK error onto the core error taxonomy
fn map_sdk_error<E, R>(err: SdkError<E, R>, location: &RemoteLocation) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match &err {
        SdkError::ServiceError(context) => {
            let code = context.err().code();
            classify_service_error(code, location, &DisplayErrorContext(&err).to_string())
        }
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            Error::Network(DisplayErrorContext(&err).to_string())
        }
        _ => Error::Service(DisplayErrorContext(&err).to_string()),
    }
}

fn classify_service_error(code: Option<&str>, location: &RemoteLocation, detail: &str) -> Error {
    match code {
        Some(code) if NOT_FOUND_CODES.contains(&code) => Error::NotFound(location.to_string()),
        Some(code) if ACCESS_DENIED_CODES.contains(&code) => {
            Error::AccessDenied(format!("{location}: {code}"))
        }
        _ => Error::Service(detail.to_string()),
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object(&self, request: PutObjectRequest) -> Result<PutObjectOutput> {
        let size = request.content_length();
        let location = request.location;

        let response = self
            .inner
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .acl(ObjectCannedAcl::from(request.acl.as_str()))
            .body(ByteStream::from(request.body))
            .content_length(size)
            .content_type(request.content_type)
            .content_disposition(request.content_disposition)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &location))?;

        Ok(PutObjectOutput {
            etag: response.e_tag().map(|etag| etag.trim_matches('"').to_string()),
        })
    }

    async fn get_object(&self, location: &RemoteLocation) -> Result<ObjectReader> {
        let response = self
            .inner
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, location))?;

        tracing::debug!(
            content_length = ?response.content_length(),
            content_type = ?response.content_type(),
            "object stream opened"
        );

        Ok(Box::new(response.body.into_async_read()))
    }
}
