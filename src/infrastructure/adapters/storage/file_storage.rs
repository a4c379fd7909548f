//! File Storage - 文件系统小说存储实现
//!
//! 实现 NovelStoragePort trait

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::application::ports::{NovelStoragePort, StorageError};
use crate::domain::chapter::NovelText;
use crate::domain::novel::{normalized_file_name_of, Checksum};
use crate::infrastructure::adapters::encoding::{convert_to_utf8, decode_with_fallback, EncodingPolicy};

/// 校验和读取块大小
const CHECKSUM_CHUNK_SIZE: usize = 8 * 1024;

fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::Io(format!("{}: {}", path.display(), err)),
    }
}

/// 两个路径是否指向同一文件
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// 文件系统小说存储
#[derive(Debug, Clone, Default)]
pub struct FileNovelStorage {
    policy: EncodingPolicy,
}

impl FileNovelStorage {
    pub fn new(policy: EncodingPolicy) -> Self {
        Self { policy }
    }
}

impl NovelStoragePort for FileNovelStorage {
    fn checksum(&self, path: &Path) -> Result<Option<Checksum>, StorageError> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(path, e)),
        };

        let mut context = md5::Context::new();
        let mut buffer = [0u8; CHECKSUM_CHUNK_SIZE];
        loop {
            let read = file.read(&mut buffer).map_err(|e| io_error(path, e))?;
            if read == 0 {
                break;
            }
            context.consume(&buffer[..read]);
        }

        Ok(Some(Checksum::from_digest(context.compute())))
    }

    fn copy_into(&self, source: &Path, target_dir: &Path) -> Result<PathBuf, StorageError> {
        let file_name = normalized_file_name_of(source)
            .ok_or_else(|| StorageError::Io(format!("invalid file name: {}", source.display())))?;

        fs::create_dir_all(target_dir).map_err(|e| io_error(target_dir, e))?;
        let target = target_dir.join(file_name);

        if same_file(source, &target) {
            tracing::debug!(path = %target.display(), "Copy onto itself skipped");
            return Ok(target);
        }

        fs::copy(source, &target).map_err(|e| io_error(source, e))?;
        let detection = convert_to_utf8(&target, None, &self.policy)?;

        tracing::debug!(
            source = %source.display(),
            target = %target.display(),
            encoding = detection.encoding.name(),
            "Novel file copied"
        );

        Ok(target)
    }

    fn read_text(&self, path: &Path) -> Result<NovelText, StorageError> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        let text = decode_with_fallback(bytes, self.policy.fallback)
            .map_err(|e| StorageError::Decode(format!("{}: {}", path.display(), e)))?;
        Ok(NovelText::new(text))
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        fs::write(path, data).map_err(|e| io_error(path, e))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| io_error(parent, e))?;
        temp.write_all(contents.as_bytes())
            .map_err(|e| io_error(temp.path(), e))?;
        temp.flush().map_err(|e| io_error(temp.path(), e))?;
        temp.persist(path).map_err(|e| io_error(path, e.error))?;

        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), StorageError> {
        fs::remove_file(path).map_err(|e| io_error(path, e))?;
        tracing::debug!(path = %path.display(), "File removed");
        Ok(())
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
