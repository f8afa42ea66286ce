//! cp - Copy one file to or from S3
//!
//! Direction is decided by which positional is an s3:// URL.

use clap::Args;
use s3cp_core::{Defaults, Error, ObjectStore, Transfer, TransferRequest, resolve};
use s3cp_s3::S3Client;
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Copy arguments
#[derive(Args, Debug)]
pub struct CpArgs {
    /// Source: local file or s3://bucket/key
    #[arg(required_unless_present = "completions")]
    pub source: Option<String>,

    /// Destination: local file or s3://bucket[/key]
    #[arg(required_unless_present = "completions")]
    pub destination: Option<String>,

    /// Canned ACL for uploads (private, public-read, public-read-write,
    /// authenticated-read, aws-exec-read, bucket-owner-read,
    /// bucket-owner-full-control, log-delivery-write). Passed to the service
    /// as-is [default: private]
    #[arg(long)]
    pub acl: Option<String>,

    /// Service region (defaults to the AWS environment)
    #[arg(long, env = "S3CP_REGION")]
    pub region: Option<String>,

    /// Endpoint URL for S3-compatible services
    #[arg(long, env = "S3CP_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long, default_value = "false")]
    pub force_path_style: bool,
}

#[derive(Debug, Serialize)]
struct CpOutput {
    status: &'static str,
    direction: &'static str,
    source: String,
    target: String,
    size_bytes: u64,
    size_human: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

/// Execute the cp command
pub async fn execute(args: CpArgs, defaults: &Defaults, formatter: &Formatter) -> ExitCode {
    let (Some(source), Some(destination)) = (args.source, args.destination) else {
        return report(
            &Error::Usage("Both SOURCE and DESTINATION are required".into()),
            formatter,
        );
    };

    let request = transfer_request(source, destination, args.acl, defaults);

    let transfer = match resolve(&request) {
        Ok(t) => t,
        Err(e) => return report(&e, formatter),
    };
    tracing::debug!(?transfer, "resolved transfer");

    let endpoint = defaults.endpoint(args.region, args.endpoint_url, args.force_path_style);
    let client = match S3Client::new(&endpoint).await {
        Ok(c) => c,
        Err(e) => return report(&e, formatter),
    };

    run(&client, &transfer, formatter).await
}

/// Build the transfer request; `--acl` takes precedence over the config file
fn transfer_request(
    source: String,
    destination: String,
    acl: Option<String>,
    defaults: &Defaults,
) -> TransferRequest {
    let acl = acl.unwrap_or_else(|| defaults.acl.clone());
    TransferRequest::new(source, destination).with_acl(acl)
}

/// Execute a resolved transfer against `store` and report the outcome
pub async fn run<S>(store: &S, transfer: &Transfer, formatter: &Formatter) -> ExitCode
where
    S: ObjectStore + ?Sized,
{
    let local_display = transfer.local_path().display().to_string();
    let remote_display = transfer.remote().to_string();
    let (source, target) = match transfer {
        Transfer::Upload { .. } => (local_display, remote_display),
        Transfer::Download { .. } => (remote_display, local_display),
    };

    match s3cp_core::transfer::execute(store, transfer).await {
        Ok(summary) => {
            let size_human = humansize::format_size(summary.size_bytes, humansize::BINARY);
            if formatter.is_json() {
                formatter.json(&CpOutput {
                    status: "success",
                    direction: transfer.direction(),
                    source,
                    target,
                    size_bytes: summary.size_bytes,
                    size_human,
                    content_type: summary.content_type,
                    etag: summary.etag,
                });
            } else {
                formatter.println(&format!("{source} -> {target} ({size_human})"));
            }
            ExitCode::Success
        }
        Err(e) => report(&e, formatter),
    }
}

/// Print an error and map it to an exit code
fn report(err: &Error, formatter: &Formatter) -> ExitCode {
    let code = ExitCode::from(err);
    tracing::error!(error = %err, %code, "transfer failed");
    if err.is_usage() {
        formatter.usage_error(&err.to_string(), &super::usage());
    } else {
        formatter.error(&err.to_string());
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputConfig;
    use s3cp_core::{MemoryStore, RemoteLocation};
    use tempfile::TempDir;

    fn quiet() -> Formatter {
        Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        })
    }

    fn args(source: &str, destination: &str) -> CpArgs {
        CpArgs {
            source: Some(source.to_string()),
            destination: Some(destination.to_string()),
            acl: None,
            region: None,
            endpoint_url: None,
            force_path_style: false,
        }
    }

    #[tokio::test]
    async fn test_execute_rejects_local_to_local() {
        let code = execute(args("/tmp/a", "/tmp/b"), &Defaults::default(), &quiet()).await;
        assert_eq!(code, ExitCode::UsageError);
        assert_eq!(code.as_i32(), 1);
    }

    #[tokio::test]
    async fn test_execute_rejects_missing_key_without_creating_file() {
        let dir = TempDir::new().unwrap();
        let dst = dir.path().join("out.txt");

        let code = execute(
            args("s3://bucket/", &dst.to_string_lossy()),
            &Defaults::default(),
            &quiet(),
        )
        .await;

        assert_eq!(code, ExitCode::UsageError);
        assert!(!dst.exists());
    }

    #[tokio::test]
    async fn test_execute_rejects_remote_to_remote() {
        let code = execute(args("s3://a/x", "s3://b/y"), &Defaults::default(), &quiet()).await;
        assert_eq!(code, ExitCode::UsageError);
    }

    #[tokio::test]
    async fn test_run_upload_and_download() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("notes.txt");
        std::fs::write(&src, b"remember the milk").unwrap();
        let store = MemoryStore::new();

        let upload = resolve(
            &TransferRequest::new(src.to_string_lossy(), "s3://bucket/").with_acl("public-read"),
        )
        .unwrap();
        assert_eq!(run(&store, &upload, &quiet()).await, ExitCode::Success);

        let stored = store
            .object(&RemoteLocation::new("bucket", "notes.txt"))
            .unwrap();
        assert_eq!(stored.acl, "public-read");

        let dst = dir.path().join("back.txt");
        let download = resolve(&TransferRequest::new(
            "s3://bucket/notes.txt",
            dst.to_string_lossy(),
        ))
        .unwrap();
        assert_eq!(run(&store, &download, &quiet()).await, ExitCode::Success);
        assert_eq!(std::fs::read(&dst).unwrap(), b"remember the milk");
    }

    #[tokio::test]
    async fn test_run_reports_missing_object() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let download = resolve(&TransferRequest::new(
            "s3://bucket/absent",
            dir.path().join("out").to_string_lossy(),
        ))
        .unwrap();

        assert_eq!(
            run(&store, &download, &quiet()).await,
            ExitCode::ServiceError
        );
    }

    #[tokio::test]
    async fn test_run_reports_unreadable_source() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let upload = resolve(&TransferRequest::new(
            dir.path().join("absent.txt").to_string_lossy(),
            "s3://bucket/",
        ))
        .unwrap();

        assert_eq!(run(&store, &upload, &quiet()).await, ExitCode::IoError);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_upload_acl_from_config_defaults() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("page.html");
        std::fs::write(&src, b"<html></html>").unwrap();
        let defaults = Defaults {
            acl: "public-read".into(),
            ..Default::default()
        };
        let store = MemoryStore::new();

        let request = transfer_request(
            src.to_string_lossy().into(),
            "s3://site/".into(),
            None,
            &defaults,
        );
        let upload = resolve(&request).unwrap();
        assert_eq!(run(&store, &upload, &quiet()).await, ExitCode::Success);

        let stored = store.object(&RemoteLocation::new("site", "page.html")).unwrap();
        assert_eq!(stored.acl, "public-read");
    }

    #[tokio::test]
    async fn test_upload_acl_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("page.html");
        std::fs::write(&src, b"<html></html>").unwrap();
        let defaults = Defaults {
            acl: "public-read".into(),
            ..Default::default()
        };
        let store = MemoryStore::new();

        let request = transfer_request(
            src.to_string_lossy().into(),
            "s3://site/".into(),
            Some("private".into()),
            &defaults,
        );
        let upload = resolve(&request).unwrap();
        assert_eq!(run(&store, &upload, &quiet()).await, ExitCode::Success);

        let stored = store.object(&RemoteLocation::new("site", "page.html")).unwrap();
        assert_eq!(stored.acl, "private");
    }

    #[tokio::test]
    async fn test_upload_output_includes_etag() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("notes.txt");
        std::fs::write(&src, b"remember the milk").unwrap();
        let store = MemoryStore::new();

        let upload =
            resolve(&TransferRequest::new(src.to_string_lossy(), "s3://bucket/")).unwrap();
        let summary = s3cp_core::transfer::execute(&store, &upload).await.unwrap();
        let output = CpOutput {
            status: "success",
            direction: upload.direction(),
            source: src.display().to_string(),
            target: upload.remote().to_string(),
            size_bytes: summary.size_bytes,
            size_human: String::new(),
            content_type: summary.content_type,
            etag: summary.etag,
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["etag"], "11");
        assert_eq!(value["content_type"], "text/plain; charset=utf-8");
    }
}
