//! 语法树图片的临时文件
//!
//! 终端里无法直接显示图片，因此把图片写到临时目录并展示其路径。
//! 文件随 `TreeArtifact` 一起释放：被新图片替换、重新提交分析或退出程序时删除。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::TreeImage;

/// 已落盘的语法树图片
#[derive(Debug)]
pub struct TreeArtifact {
    path: PathBuf,
    sentence: String,
    size: usize,
    dimensions: Option<(u32, u32)>,
}

impl TreeArtifact {
    /// 写入系统临时目录
    pub fn create(image: &TreeImage, sentence: &str) -> io::Result<Self> {
        Self::create_in(&std::env::temp_dir(), image, sentence)
    }

    pub fn create_in(dir: &Path, image: &TreeImage, sentence: &str) -> io::Result<Self> {
        let path = dir.join(format!("translens-tree-{}.png", Uuid::new_v4()));
        fs::write(&path, &image.bytes)?;
        debug!(path = %path.display(), bytes = image.len(), "语法树图片已写入");

        Ok(Self {
            path,
            sentence: sentence.to_string(),
            size: image.len(),
            dimensions: image.dimensions(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` 形式的地址，便于在终端中点击打开
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

impl Drop for TreeArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "语法树图片已删除"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "删除语法树图片失败"),
        }
    }
}
