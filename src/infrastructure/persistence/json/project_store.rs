//! JSON Project Store - 实现 ProjectStorePort
//!
//! project.json 使用 4 空格缩进，非 ASCII 字符原样保留

use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};

use tempfile::NamedTempFile;

use crate::application::ports::{ProjectStorePort, StorageError};
use crate::domain::project::{Project, ProjectLayout};

/// JSON 文件工程存储
#[derive(Debug, Clone, Default)]
pub struct JsonProjectStore;

impl JsonProjectStore {
    pub fn new() -> Self {
        Self
    }

    fn to_pretty_json(project: &Project) -> Result<Vec<u8>, StorageError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        project
            .serialize(&mut serializer)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}

impl ProjectStorePort for JsonProjectStore {
    fn load(&self, layout: &ProjectLayout) -> Result<Project, StorageError> {
        let path = layout.index_file();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Project index missing, starting empty");
                return Ok(Project::new());
            }
            Err(e) => return Err(StorageError::Io(format!("{}: {}", path.display(), e))),
        };

        serde_json::from_str(&content)
            .map_err(|e| StorageError::Serialization(format!("{}: {}", path.display(), e)))
    }

    fn save(&self, layout: &ProjectLayout, project: &Project) -> Result<(), StorageError> {
        let path = layout.index_file();
        let io_err = |e: std::io::Error| StorageError::Io(format!("{}: {}", path.display(), e));

        let data = Self::to_pretty_json(project)?;
        fs::create_dir_all(layout.root()).map_err(io_err)?;

        let mut temp = NamedTempFile::new_in(layout.root()).map_err(io_err)?;
        temp.write_all(&data).map_err(io_err)?;
        temp.persist(&path).map_err(|e| io_err(e.error))?;

        tracing::debug!(path = %path.display(), novels = project.novel_count(), "Project saved");
        Ok(())
    }
}
