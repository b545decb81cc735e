use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use dap_types::Source;

use super::SourceConverter;
use crate::config::ClientCapabilities;
use crate::error::{ReportError, Result};
use crate::handles::{Handle, HandleRegistry};
use crate::model::{LoadedSource, SourceIdentity};

/// Answers questions about a path source that require I/O.
pub trait SourceInspector {
    fn exists_on_disk(&self, path: &Path) -> impl Future<Output = Result<bool>> + Send;
}

/// Checks the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSourceInspector;

impl SourceInspector for FsSourceInspector {
    async fn exists_on_disk(&self, path: &Path) -> Result<bool> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|source| ReportError::Inspect {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Builds client sources, minting `sourceReference` handles where needed.
#[derive(Debug, Clone)]
pub struct SourceShaper {
    handles: Arc<HandleRegistry<SourceIdentity>>,
    client: ClientCapabilities,
}

impl SourceShaper {
    pub fn new(handles: Arc<HandleRegistry<SourceIdentity>>, client: ClientCapabilities) -> Self {
        Self { handles, client }
    }

    /// Shape `source` for the client.
    ///
    /// Scripts always get a handle. Path sources get one when `on_disk` is
    /// `Some(false)`; with `None` (not checked) they reuse a handle minted
    /// by an earlier check, if any.
    pub fn shape(&self, source: &LoadedSource, on_disk: Option<bool>) -> Result<Source> {
        let identity = &source.identity;
        match identity {
            SourceIdentity::Script { script_id, url } => {
                if script_id.is_empty() && url.is_none() {
                    return Err(ReportError::UnaddressableSource);
                }
                let handle = self.register(identity)?;

                Ok(Source {
                    name: source.display_name(),
                    source_reference: Some(handle.get()),
                    origin: source.origin.clone(),
                    ..Default::default()
                })
            }
            SourceIdentity::Path { path } => {
                let handle = match on_disk {
                    Some(false) => Some(self.register(identity)?),
                    Some(true) | None => self.handles.lookup(identity),
                };

                Ok(Source {
                    name: source.display_name(),
                    path: Some(self.client.render_path(path)),
                    source_reference: handle.map(|h| h.get()),
                    origin: source.origin.clone(),
                    ..Default::default()
                })
            }
        }
    }

    fn register(&self, identity: &SourceIdentity) -> Result<Handle> {
        self.handles
            .register(identity)
            .ok_or(ReportError::HandlesExhausted { kind: "source" })
    }

    pub fn handles(&self) -> &Arc<HandleRegistry<SourceIdentity>> {
        &self.handles
    }

    pub fn client(&self) -> &ClientCapabilities {
        &self.client
    }
}

/// Converts loaded sources, checking path sources against the disk.
#[derive(Debug, Clone)]
pub struct ClientSourceConverter<I = FsSourceInspector> {
    shaper: SourceShaper,
    inspector: I,
}

impl ClientSourceConverter {
    pub fn new(shaper: SourceShaper) -> Self {
        Self::with_inspector(shaper, FsSourceInspector)
    }
}

impl<I> ClientSourceConverter<I> {
    pub fn with_inspector(shaper: SourceShaper, inspector: I) -> Self {
        Self { shaper, inspector }
    }
}

impl<I> SourceConverter for ClientSourceConverter<I>
where
    I: SourceInspector + Sync,
{
    async fn to_client(&self, source: &LoadedSource) -> Result<Source> {
        let on_disk = match source.path() {
            Some(path) => Some(self.inspector.exists_on_disk(path).await?),
            None => None,
        };
        self.shaper.shape(source, on_disk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathFormat;

    fn converter() -> ClientSourceConverter {
        ClientSourceConverter::new(SourceShaper::new(
            Arc::new(HandleRegistry::new()),
            ClientCapabilities::default(),
        ))
    }

    struct BrokenInspector;

    impl SourceInspector for BrokenInspector {
        async fn exists_on_disk(&self, path: &Path) -> Result<bool> {
            Err(ReportError::Inspect {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
    }

    #[tokio::test]
    async fn existing_file_is_addressed_by_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = LoadedSource::from_path(file.path());

        let client = converter().to_client(&source).await.unwrap();

        assert_eq!(client.path, Some(file.path().display().to_string()));
        assert_eq!(client.source_reference, None);
        assert!(client.name.is_some());
    }

    #[tokio::test]
    async fn missing_file_gets_stable_reference() {
        let dir = tempfile::tempdir().unwrap();
        let source = LoadedSource::from_path(dir.path().join("generated.js"));
        let converter = converter();

        let first = converter.to_client(&source).await.unwrap();
        let second = converter.to_client(&source).await.unwrap();

        assert!(first.source_reference.is_some());
        assert_eq!(first.source_reference, second.source_reference);
        assert_eq!(first.name.as_deref(), Some("generated.js"));
    }

    #[tokio::test]
    async fn scripts_share_one_handle_per_identity() {
        let converter = converter();
        let eval = LoadedSource::script("31", None);
        let page = LoadedSource::script("32", Some("http://localhost/app.js".to_string()));

        let a = converter.to_client(&eval).await.unwrap();
        let b = converter.to_client(&page).await.unwrap();
        let a_again = converter.to_client(&eval).await.unwrap();

        assert_eq!(a.source_reference, a_again.source_reference);
        assert_ne!(a.source_reference, b.source_reference);
        assert_eq!(a.name.as_deref(), Some("VM31"));
        assert_eq!(a.path, None);
    }

    #[tokio::test]
    async fn script_without_id_or_url_fails() {
        let result = converter()
            .to_client(&LoadedSource::script("", None))
            .await;
        assert!(matches!(result, Err(ReportError::UnaddressableSource)));
    }

    #[tokio::test]
    async fn inspector_errors_propagate() {
        let converter = ClientSourceConverter::with_inspector(
            SourceShaper::new(Arc::new(HandleRegistry::new()), ClientCapabilities::default()),
            BrokenInspector,
        );

        let result = converter
            .to_client(&LoadedSource::from_path("/secret/a.js"))
            .await;
        assert!(matches!(result, Err(ReportError::Inspect { .. })));
    }

    #[tokio::test]
    async fn exhausted_handles_fail_the_conversion() {
        let converter = ClientSourceConverter::new(SourceShaper::new(
            Arc::new(HandleRegistry::with_base(crate::handles::MAX_HANDLE)),
            ClientCapabilities::default(),
        ));

        let result = converter.to_client(&LoadedSource::script("1", None)).await;
        assert!(matches!(
            result,
            Err(ReportError::HandlesExhausted { kind: "source" })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn unchecked_path_reuses_existing_handle() {
        let shaper = SourceShaper::new(
            Arc::new(HandleRegistry::new()),
            ClientCapabilities {
                path_format: PathFormat::Uri,
                ..Default::default()
            },
        );
        let source = LoadedSource::from_path("/gone/a.js");

        let unchecked = shaper.shape(&source, None).unwrap();
        assert_eq!(unchecked.source_reference, None);
        assert_eq!(unchecked.path.as_deref(), Some("file:///gone/a.js"));

        let missing = shaper.shape(&source, Some(false)).unwrap();
        let unchecked = shaper.shape(&source, None).unwrap();
        assert_eq!(unchecked.source_reference, missing.source_reference);
    }
}
