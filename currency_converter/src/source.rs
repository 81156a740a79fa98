use crate::error::ConversionError;
use crate::rates::RateTable;
use async_trait::async_trait;
use std::path::PathBuf;

/// Where a rate table comes from. Loaded on every call; implementations do
/// not cache.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn load(&self) -> Result<RateTable, ConversionError>;
}

/// Rate table on the function's filesystem.
#[derive(Debug, Clone)]
pub struct FileRateSource {
    path: PathBuf,
}

impl FileRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RateSource for FileRateSource {
    async fn load(&self) -> Result<RateTable, ConversionError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| {
                ConversionError::Source(anyhow::Error::new(e).context(format!(
                    "reading {}",
                    self.path.display()
                )))
            })?;

        RateTable::parse(&text)
    }
}

/// Rate table stored as an S3 object.
#[derive(Debug, Clone)]
pub struct S3RateSource {
    s3: aws_sdk_s3::Client,
    bucket: String,
    key: String,
}

impl S3RateSource {
    pub fn new(s3: aws_sdk_s3::Client, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            s3,
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

#[async_trait]
impl RateSource for S3RateSource {
    async fn load(&self) -> Result<RateTable, ConversionError> {
        let text = shared::s3::get_string(&self.s3, &self.bucket, &self.key)
            .await
            .map_err(|e| {
                ConversionError::Source(e.context(format!("fetching s3://{}/{}", self.bucket, self.key)))
            })?;

        RateTable::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn file_source_reads_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,USD\n2024-10-04,1.1029").unwrap();

        let table = FileRateSource::new(file.path()).load().await.unwrap();
        assert!(table.supports("USD"));
        assert!(table.supports("EUR"));
    }

    #[tokio::test]
    async fn missing_file_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileRateSource::new(dir.path().join("eurofxref-hist.csv"));

        let error = source.load().await.unwrap_err();
        assert!(matches!(error, ConversionError::Source(_)));
        assert!(error.to_string().contains("eurofxref-hist.csv"));
    }
}
