use anyhow::Context;
use reqwest::StatusCode;
use std::{io::ErrorKind, path::PathBuf};
use thiserror::Error;
use tokio::fs::read_to_string;
use tracing::info;

use crate::command::ConfigurationKind;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// Local document path does not exist. A designed exit, not a crash.
    #[error("File {} not found", .0.display())]
    LocalMissing(PathBuf),

    /// Remote repository answered 404 for the document.
    #[error("file {0} does not exist on repo")]
    RemoteMissing(String),

    /// Anything else (transport failures, unreadable files) is fatal.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Where the pajee configuration document comes from.
///
/// Both variants produce the document text unmodified.
#[derive(Clone, Debug)]
pub enum DocumentSource {
    Local {
        path: PathBuf,
    },

    Remote {
        base_file_url: String,
        configuration: ConfigurationKind,
    },
}

impl DocumentSource {
    pub async fn load(&self) -> Result<String, DocumentError> {
        match self {
            Self::Local { path } => {
                info!("Loading pajee configuration from local file");

                match read_to_string(path).await {
                    Ok(document) => Ok(document),

                    Err(error) if error.kind() == ErrorKind::NotFound => {
                        Err(DocumentError::LocalMissing(path.clone()))
                    }

                    Err(error) => Err(anyhow::Error::new(error)
                        .context(format!("failed to read {}", path.display()))
                        .into()),
                }
            }

            Self::Remote {
                base_file_url,
                configuration,
            } => {
                info!("Loading pajee configuration from remote file");

                let file_name = configuration.file_name();

                // Exact join, no normalization. The registry entry owns any
                // trailing path components.
                let url = format!("{}/{}", base_file_url, file_name);

                let response = reqwest::get(&url)
                    .await
                    .with_context(|| format!("failed to fetch {}", url))?;

                if response.status() == StatusCode::NOT_FOUND {
                    return Err(DocumentError::RemoteMissing(file_name));
                }

                let response = response
                    .error_for_status()
                    .with_context(|| format!("failed to fetch {}", url))?;

                let document = response
                    .text()
                    .await
                    .with_context(|| format!("failed to read response body from {}", url))?;

                Ok(document)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn local_read_preserves_document_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("wildfly.yaml");
        let document = "heap: 2048m\n\nthreads:\n  max: 64\n";

        fs::write(&file, document).unwrap();

        let source = DocumentSource::Local { path: file };
        let loaded = source.load().await.expect("document should load");

        assert_eq!(loaded, document);
    }

    #[tokio::test]
    async fn local_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nope.yaml");

        let source = DocumentSource::Local { path: file.clone() };
        let error = source.load().await.unwrap_err();

        assert!(matches!(error, DocumentError::LocalMissing(_)));
        assert!(error.to_string().contains(&file.display().to_string()));
    }

    #[tokio::test]
    async fn remote_fetch_targets_kind_yaml_under_base_url() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repo/wildfly.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("heap: 1024m\n"))
            .expect(1)
            .mount(&server)
            .await;

        let source = DocumentSource::Remote {
            base_file_url: format!("{}/repo", server.uri()),
            configuration: ConfigurationKind::Wildfly,
        };

        let loaded = source.load().await.expect("document should load");

        assert_eq!(loaded, "heap: 1024m\n");
    }

    #[tokio::test]
    async fn remote_missing_document_names_the_file() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repo/java.yaml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = DocumentSource::Remote {
            base_file_url: format!("{}/repo", server.uri()),
            configuration: ConfigurationKind::Java,
        };

        let error = source.load().await.unwrap_err();

        assert!(matches!(error, DocumentError::RemoteMissing(_)));
        assert!(error.to_string().contains("java.yaml"));
    }

    #[tokio::test]
    async fn remote_server_error_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repo/jboss.yaml"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = DocumentSource::Remote {
            base_file_url: format!("{}/repo", server.uri()),
            configuration: ConfigurationKind::Jboss,
        };

        let error = source.load().await.unwrap_err();

        assert!(matches!(error, DocumentError::Other(_)));
    }
}
